use std::{
    io::{ErrorKind, Read, Write},
    net::{TcpListener, TcpStream},
    process::{Command, Output},
    thread::{self, JoinHandle},
};

use serde_json::json;

/**
    Runs relup with the given arguments and token, pointed at a local
    listener, returning its output and whether anything connected.
*/
fn run_relup(args: &[&str], token: Option<&str>) -> (Output, bool) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.set_nonblocking(true).unwrap();
    let api_url = format!("http://{}", listener.local_addr().unwrap());

    let mut command = Command::new(env!("CARGO_BIN_EXE_relup"));
    command.args(args).env("GITHUB_API_URL", api_url);
    match token {
        Some(token) => command.env("GITHUB_TOKEN", token),
        None => command.env_remove("GITHUB_TOKEN"),
    };
    let output = command.output().unwrap();

    let connected = match listener.accept() {
        Ok(_) => true,
        Err(e) if e.kind() == ErrorKind::WouldBlock => false,
        Err(e) => panic!("failed to check listener: {e}"),
    };

    (output, connected)
}

#[test]
fn wrong_argument_count_prints_usage() {
    for args in [
        &[][..],
        &["calmh/relup"][..],
        &["calmh/relup", "v1.0.0"][..],
        &["calmh/relup", "v1.0.0", "a.bin", "b.bin"][..],
    ] {
        let (output, connected) = run_relup(args, Some("ghp_test"));
        assert!(!output.status.success(), "args {args:?} should fail");
        assert!(!connected, "args {args:?} should not reach the network");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Usage"), "missing usage in: {stderr}");
    }
}

#[test]
fn malformed_repository_is_rejected() {
    let (output, connected) = run_relup(&["relup", "v1.0.0", "a.bin"], Some("ghp_test"));
    assert!(!output.status.success());
    assert!(!connected);
}

#[test]
fn missing_token_fails_before_network() {
    let (output, connected) = run_relup(&["calmh/relup", "v1.0.0", "a.bin"], None);
    assert_eq!(output.status.code(), Some(1));
    assert!(!connected);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("GITHUB_TOKEN"), "missing hint in: {stderr}");
}

#[test]
fn empty_token_fails_before_network() {
    let (output, connected) = run_relup(&["calmh/relup", "v1.0.0", "a.bin"], Some(""));
    assert_eq!(output.status.code(), Some(1));
    assert!(!connected);
}

/**
    Reads one request off the stream, returning its request line.
*/
fn read_request_line(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 8192];

    let header_end = loop {
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "connection closed before headers were read");
        buf.extend_from_slice(&chunk[..n]);
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("content-length"))
        .map_or(0, |(_, value)| value.trim().parse::<usize>().unwrap());

    let mut received = buf.len() - header_end;
    while received < content_length {
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "connection closed before body was read");
        received += n;
    }

    head.lines().next().unwrap().to_string()
}

fn serve(
    listener: TcpListener,
    responses: Vec<(&'static str, String)>,
) -> JoinHandle<Vec<String>> {
    thread::spawn(move || {
        let mut request_lines = Vec::new();
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().unwrap();
            request_lines.push(read_request_line(&mut stream));
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\n\
                Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len(),
            );
            stream.write_all(response.as_bytes()).unwrap();
        }
        request_lines
    })
}

#[test]
fn uploads_asset_and_prints_progress() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());

    let releases = json!([
        {
            "id": 1,
            "tag_name": "v1.0.0",
            "upload_url": format!("{base}/uploads/1/assets{{?name,label}}"),
        },
        {
            "id": 2,
            "tag_name": "v2.0.0",
            "upload_url": format!("{base}/uploads/2/assets{{?name,label}}"),
        },
    ]);
    let server = serve(
        listener,
        vec![
            ("200 OK", releases.to_string()),
            ("201 Created", json!({ "id": 7 }).to_string()),
        ],
    );

    let dir = tempfile::tempdir().unwrap();
    let asset = dir.path().join("relup.tar.gz");
    std::fs::write(&asset, vec![7u8; 300_000]).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_relup"))
        .args(["calmh/relup", "v2.0.0"])
        .arg(&asset)
        .env("GITHUB_API_URL", &base)
        .env("GITHUB_TOKEN", "ghp_test")
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "relup failed: {stderr}");
    assert!(stdout.contains("300000 / 300000 (100.0%)"), "stdout: {stdout}");
    assert!(
        stdout.lines().any(|line| line.ends_with("201 Created")),
        "stdout: {stdout}"
    );

    let request_lines = server.join().unwrap();
    assert_eq!(
        request_lines[1],
        "POST /uploads/2/assets?name=relup.tar.gz HTTP/1.1"
    );
}

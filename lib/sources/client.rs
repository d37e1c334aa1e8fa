use std::time::Duration;

use reqwest::{
    Client,
    header::{HeaderMap, HeaderValue, USER_AGENT},
};

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;

use super::github::GithubResult;

/*
    Adds middleware for:

    - Tracing of HTTP requests

    Retrying is deliberately left out, streamed upload bodies can not be replayed.
*/
fn add_client_middleware(client: Client) -> ClientWithMiddleware {
    ClientBuilder::new(client)
        .with(TracingMiddleware::default())
        .build()
}

/**
    Creates a client with:

    - HTTPS only, if requested
    - Timeout for connecting, response timeouts are set per request
    - All common compression algorithms enabled
    - User agent set to `<crate_name>/<crate_version> (<repository_url>)`
*/
pub fn create_client(
    mut default_headers: HeaderMap,
    https_only: bool,
) -> GithubResult<ClientWithMiddleware> {
    let user_agent = format!(
        "{}/{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_REPOSITORY"),
    );

    default_headers.insert(USER_AGENT, HeaderValue::from_str(&user_agent)?);

    let client = Client::builder()
        .default_headers(default_headers)
        .https_only(https_only)
        .connect_timeout(Duration::from_secs(15))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .build()?;

    Ok(add_client_middleware(client))
}

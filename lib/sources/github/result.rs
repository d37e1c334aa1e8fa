use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

use crate::repo::RepoId;

#[derive(Debug, Error)]
pub enum GithubError {
    #[error("no release with tag '{tag}' was found for repository '{repo}'")]
    ReleaseNotFound { repo: RepoId, tag: String },
    #[error("GitHub API returned {status}:\n{body}")]
    Api { status: StatusCode, body: String },
    #[error("invalid upload url '{url}': {source}")]
    InvalidUploadUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("asset path '{}' has no usable file name", .0.display())]
    InvalidAssetPath(PathBuf),
    #[error("failed to read asset '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to build client - invalid header value: {0}")]
    ReqwestHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("request error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type GithubResult<T> = Result<T, GithubError>;

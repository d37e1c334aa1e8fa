use std::{env::var, fmt};

use thiserror::Error;
use url::Url;

use crate::sources::github::{DEFAULT_API_URL, GithubProvider, GithubResult};

const TOKEN_VAR: &str = "GITHUB_TOKEN";
const API_URL_VAR: &str = "GITHUB_API_URL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GITHUB_TOKEN is not set - please export GITHUB_TOKEN=\"<your token here>\"")]
    MissingToken,
    #[error("GITHUB_API_URL '{url}' is not a valid URL: {source}")]
    InvalidApiUrl {
        url: String,
        source: url::ParseError,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/**
    Configuration for talking to the GitHub API, read from the environment.

    - `GITHUB_TOKEN` must be set to a non-empty token.
    - `GITHUB_API_URL` may be set to use an API other than `https://api.github.com`.
*/
pub struct Config {
    token: String,
    api_url: Url,
}

impl Config {
    /**
        Reads the configuration from environment variables.

        # Errors

        - If `GITHUB_TOKEN` is missing or empty.
        - If `GITHUB_API_URL` is set but not a valid URL.
    */
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_vars(var(TOKEN_VAR).ok(), var(API_URL_VAR).ok())
    }

    fn from_vars(token: Option<String>, api_url: Option<String>) -> ConfigResult<Self> {
        let token = token
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let api_url = api_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&api_url)
            .map_err(|source| ConfigError::InvalidApiUrl { url: api_url, source })?;

        Ok(Self { token, api_url })
    }

    /**
        Creates an authenticated GitHub provider from this configuration.

        # Errors

        - If the GitHub API client could not be created.
    */
    pub fn into_provider(self) -> GithubResult<GithubProvider> {
        GithubProvider::new_authenticated(&self.api_url, self.token)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("token", &"<redacted>")
            .field("api_url", &self.api_url.as_str())
            .finish()
    }
}

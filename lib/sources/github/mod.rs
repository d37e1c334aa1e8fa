#![allow(clippy::missing_errors_doc)]

use std::{path::Path, time::Duration};

use reqwest::{
    StatusCode,
    header::{
        ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue,
    },
};
use reqwest_middleware::ClientWithMiddleware;
use tracing::{debug, info, instrument};
use url::Url;

use crate::repo::RepoId;

use super::{ProgressObserver, client::create_client};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

const RESULTS_PER_PAGE: usize = 100;
const LIST_TIMEOUT: Duration = Duration::from_secs(60);

pub mod models;
mod result;
mod upload;

use self::models::GithubRelease;

pub use self::result::{GithubError, GithubResult};
pub use self::upload::{AssetFile, asset_name, expand_upload_url};

#[derive(Debug, Clone)]
pub struct GithubProvider {
    client: ClientWithMiddleware,
    api_url: String,
}

impl GithubProvider {
    /**
        Creates a new authenticated GitHub provider talking to the API at `api_url`.

        HTTPS is enforced for all requests whenever `api_url` is itself HTTPS.

        # Errors

        - If the token is not a valid header value.
        - If the GitHub API client could not be created.
    */
    pub fn new_authenticated(api_url: &Url, pat: impl AsRef<str>) -> GithubResult<Self> {
        let headers = {
            let mut headers = HeaderMap::new();
            headers.insert(
                HeaderName::from_static("x-github-api-version"),
                HeaderValue::from_static("2022-11-28"),
            );
            let mut token = HeaderValue::from_str(&format!("Bearer {}", pat.as_ref().trim()))?;
            token.set_sensitive(true);
            headers.insert(AUTHORIZATION, token);
            headers
        };

        let client = create_client(headers, api_url.scheme() == "https")?;
        let api_url = api_url.as_str().trim_end_matches('/').to_string();

        Ok(Self { client, api_url })
    }

    /**
        Fetches a single page of releases for the given repository, newest first.
    */
    #[instrument(skip(self), fields(%repo), level = "debug")]
    pub async fn list_releases(
        &self,
        repo: &RepoId,
        page: usize,
    ) -> GithubResult<Vec<GithubRelease>> {
        let url = format!(
            "{base}/repos/{owner}/{name}/releases",
            base = self.api_url,
            owner = repo.owner(),
            name = repo.name(),
        );

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .query(&[("per_page", RESULTS_PER_PAGE), ("page", page)])
            .timeout(LIST_TIMEOUT)
            .send()
            .await?;
        let response = error_for_status(response).await?;

        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /**
        Finds the first release, in the order returned by the API,
        whose tag exactly matches the given tag.

        Pages through the release list until a match is found or the list runs out.
    */
    #[instrument(skip(self), fields(%repo), level = "debug")]
    pub async fn find_release(&self, repo: &RepoId, tag: &str) -> GithubResult<GithubRelease> {
        debug!(%repo, tag, "looking up release by tag");

        let mut page = 1;
        loop {
            let releases = self.list_releases(repo, page).await?;
            let was_full = releases.len() >= RESULTS_PER_PAGE;

            if let Some(release) = find_release_by_tag(releases, tag) {
                debug!(
                    id = release.id,
                    name = release.name.as_deref(),
                    draft = release.draft,
                    prerelease = release.prerelease,
                    "found release"
                );
                return Ok(release);
            }

            if !was_full {
                break;
            }
            page += 1;
        }

        Err(GithubError::ReleaseNotFound {
            repo: repo.clone(),
            tag: tag.to_string(),
        })
    }

    /**
        Uploads the file at `path` as an asset, using the upload URL template of a release.

        The asset is named after the file name of `path`, and progress is
        reported to `observer` as the file contents are streamed.

        Returns the status of the upload response, which is always a success status.
    */
    #[instrument(skip(self, upload_url, observer), level = "debug")]
    pub async fn upload_asset<P>(
        &self,
        upload_url: &str,
        path: &Path,
        label: Option<&str>,
        observer: P,
    ) -> GithubResult<StatusCode>
    where
        P: ProgressObserver + Send + 'static,
    {
        let name = asset_name(path)?;
        let url = expand_upload_url(upload_url, name, label)?;

        let asset = AssetFile::open(path).await?;
        let size = asset.size();

        info!("Uploading {name}");
        debug!(%url, size, "uploading asset");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .header(CONTENT_LENGTH, size)
            .body(asset.into_body(observer))
            .send()
            .await?;
        let response = error_for_status(response).await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, %body, "upload finished");

        Ok(status)
    }
}

async fn error_for_status(response: reqwest::Response) -> GithubResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => format!("<failed to read body: {e}>"),
    };
    Err(GithubError::Api { status, body })
}

fn find_release_by_tag(releases: Vec<GithubRelease>, tag: &str) -> Option<GithubRelease> {
    releases.into_iter().find(|release| release.tag_name == tag)
}

use serde::Deserialize;

/**
    A single entry from the list-releases endpoint.

    Only the fields needed to pick a release and upload
    to it are decoded, everything else is ignored.
*/
#[derive(Debug, Clone, Deserialize)]
pub struct GithubRelease {
    pub id: u64,
    pub tag_name: String,
    pub upload_url: String,
    pub name: Option<String>,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
}

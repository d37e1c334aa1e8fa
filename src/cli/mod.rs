use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use relup::{Config, repo::RepoId};

use crate::util::UploadProgress;

/// Uploads a file as an asset to a GitHub release.
///
/// Requires the GITHUB_TOKEN environment variable to be set.
#[derive(Debug, Parser)]
#[clap(
    author,
    version,
    about,
    after_help = "Example: relup calmh/relup v1.0.0 relup-binary.tar.gz"
)]
pub struct Cli {
    /// The repository to upload to, as `owner/name`.
    pub repo: RepoId,
    /// The tag of the release to upload to.
    pub tag: String,
    /// The file to upload, named in the release after its file name.
    pub asset: PathBuf,
    /// A short label shown in place of the file name in the release.
    #[clap(long)]
    pub label: Option<String>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let provider = Config::from_env()
            .context("Failed to load configuration")?
            .into_provider()
            .context("Failed to create GitHub client")?;

        let release = provider
            .find_release(&self.repo, &self.tag)
            .await
            .with_context(|| format!("Failed to find release '{}' in {}", self.tag, self.repo))?;

        let progress = UploadProgress::for_stdout();
        let result = provider
            .upload_asset(
                &release.upload_url,
                &self.asset,
                self.label.as_deref(),
                progress.clone(),
            )
            .await;

        let status = match result {
            Ok(status) => {
                progress.finish();
                status
            }
            Err(e) => {
                progress.finish_and_clear();
                return Err(e).with_context(|| {
                    format!("Failed to upload '{}'", self.asset.display())
                });
            }
        };

        println!("{}", style(status).bold().green());

        Ok(())
    }
}

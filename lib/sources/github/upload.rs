use std::{io, path::Path};

use futures::stream;
use reqwest::Body;
use tokio::{
    fs::File,
    io::{AsyncRead, AsyncReadExt},
};
use url::Url;

use crate::sources::{ProgressCounter, ProgressObserver};

use super::{GithubError, GithubResult};

const CHUNK_SIZE: usize = 64 * 1024;

/**
    Returns the file name portion of an asset path, which is
    the name the asset will be given in the release.
*/
pub fn asset_name(path: &Path) -> GithubResult<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .ok_or_else(|| GithubError::InvalidAssetPath(path.to_path_buf()))
}

/**
    Expands an upload URL template, such as
    `https://uploads.github.com/repos/o/r/releases/1/assets{?name,label}`,
    into a concrete URL with the `name` and optional `label` query parameters set.
*/
pub fn expand_upload_url(template: &str, name: &str, label: Option<&str>) -> GithubResult<Url> {
    let base = template
        .split_once('{')
        .map_or(template, |(before, _)| before);

    let mut url = Url::parse(base).map_err(|source| GithubError::InvalidUploadUrl {
        url: template.to_string(),
        source,
    })?;

    {
        let mut query = url.query_pairs_mut();
        query.append_pair("name", name);
        if let Some(label) = label {
            query.append_pair("label", label);
        }
    }

    Ok(url)
}

/**
    An opened asset file along with its size at the time it was opened.
*/
#[derive(Debug)]
pub struct AssetFile {
    file: File,
    size: u64,
}

impl AssetFile {
    pub async fn open(path: &Path) -> GithubResult<Self> {
        let to_err = |source| GithubError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::open(path).await.map_err(to_err)?;
        let size = file.metadata().await.map_err(to_err)?.len();
        Ok(Self { file, size })
    }

    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /**
        Turns the file into a streamed request body of exactly `size` bytes,
        reporting every chunk handed to the transport to the given observer.
    */
    pub fn into_body<P>(self, observer: P) -> Body
    where
        P: ProgressObserver + Send + 'static,
    {
        let reader = self.file.take(self.size);
        counting_body(reader, ProgressCounter::new(self.size, observer))
    }
}

fn counting_body<R, P>(reader: R, counter: ProgressCounter<P>) -> Body
where
    R: AsyncRead + Unpin + Send + 'static,
    P: ProgressObserver + Send + 'static,
{
    let chunks = stream::try_unfold(
        (reader, counter),
        |(mut reader, mut counter)| async move {
            let mut buf = vec![0; CHUNK_SIZE];
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                return Ok::<_, io::Error>(None);
            }
            buf.truncate(n);
            counter.write(&buf);
            Ok(Some((buf, (reader, counter))))
        },
    );
    Body::wrap_stream(chunks)
}

use std::{
    fmt::Debug,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use log::debug;

use crate::{
    client::RestClient,
    digest::{DigestAlgorithm, DigestAlgorithmAndValue},
    models::{FileModel, FileReferenceModel},
    serde::{decode_base64, Base64Content},
};

/// A file handed to the service, in whichever form the caller has it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileReference {
    Path(PathBuf),
    ContentRaw(Vec<u8>),
    ContentBase64(String),
    /// A file that already lives on the service (e.g. the output of a
    /// previous operation)
    BlobToken(String),
}

impl FileReference {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Self {
        FileReference::Path(path.as_ref().to_path_buf())
    }

    pub fn from_content_raw<B: Into<Vec<u8>>>(content: B) -> Self {
        FileReference::ContentRaw(content.into())
    }

    pub fn from_content_base64<S: Into<String>>(content: S) -> Self {
        FileReference::ContentBase64(content.into())
    }

    pub fn from_blob_token<S: Into<String>>(blob_token: S) -> Self {
        FileReference::BlobToken(blob_token.into())
    }

    /// Read the file's bytes. Only possible for local references.
    pub fn content_raw(&self) -> Result<Vec<u8>> {
        match self {
            FileReference::Path(path) => std::fs::read(path)
                .with_context(|| format!("Could not read file {}", path.display())),
            FileReference::ContentRaw(content) => Ok(content.clone()),
            FileReference::ContentBase64(content) => decode_base64(content)
                .map_err(|error| anyhow!(error))
                .context("Could not decode base64 file content"),
            FileReference::BlobToken(_) => Err(anyhow!(
                "File is stored on the service; its content is not available locally"
            )),
        }
    }

    /// Produce the request field designating this file. Files already on
    /// the service are referenced by token; small local files are sent
    /// inline; larger ones are uploaded first. Base64 content is decoded
    /// either way, so malformed input fails here rather than on the service.
    pub async fn upload_or_reference<C>(&self, client: &C) -> Result<FileReferenceModel>
    where
        C: RestClient + ?Sized,
    {
        if let FileReference::BlobToken(blob_token) = self {
            return Ok(FileReferenceModel {
                content: None,
                blob_token: Some(blob_token.clone()),
            });
        }

        let content = self.content_raw()?;

        if content.len() <= client.inline_content_threshold() {
            return Ok(FileReferenceModel {
                content: Some(content.to_base64()),
                blob_token: None,
            });
        }

        debug!("Uploading {} bytes ahead of request", content.len());
        let blob_token = client.upload(&content).await?;

        Ok(FileReferenceModel {
            content: None,
            blob_token: Some(blob_token),
        })
    }

    /// Hash the file with each of the given algorithms, in order
    pub fn compute_data_hashes(
        &self,
        algorithms: &[DigestAlgorithm],
    ) -> Result<Vec<DigestAlgorithmAndValue>> {
        let content = self.content_raw()?;

        Ok(algorithms
            .iter()
            .map(|algorithm| DigestAlgorithmAndValue::compute(*algorithm, &content))
            .collect())
    }
}

/// A file produced by the service. Its content may have been returned
/// inline or may need to be fetched.
pub struct FileResult<'a, C>
where
    C: RestClient + ?Sized,
{
    client: &'a C,
    model: FileModel,
}

impl<'a, C> Debug for FileResult<'a, C>
where
    C: RestClient + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileResult")
            .field("model", &self.model)
            .finish()
    }
}

impl<'a, C> FileResult<'a, C>
where
    C: RestClient + ?Sized,
{
    pub fn new(client: &'a C, model: FileModel) -> Self {
        FileResult { client, model }
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.model.mime_type.as_deref()
    }

    pub fn model(&self) -> &FileModel {
        &self.model
    }

    /// The file's bytes, downloading them if they were not returned inline
    pub async fn content_raw(&self) -> Result<Vec<u8>> {
        if let Some(content) = &self.model.content {
            return decode_base64(content)
                .map_err(|error| anyhow!(error))
                .context("Could not decode base64 file content");
        }

        if let Some(url) = &self.model.url {
            debug!("Downloading file result from {}", url);
            return self.client.download(url).await;
        }

        if let Some(blob_token) = &self.model.blob_token {
            let location = format!("Api/Blobs/{blob_token}");
            debug!("Downloading file result from {}", location);
            return self.client.download(&location).await;
        }

        Err(anyhow!("File result carries neither content nor a location"))
    }

    pub async fn content_base64(&self) -> Result<String> {
        if let Some(content) = &self.model.content {
            return Ok(content.clone());
        }
        Ok(self.content_raw().await?.to_base64())
    }

    pub async fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = self.content_raw().await?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("Could not write file {}", path.as_ref().display()))
    }

    /// Reference this result as input to another operation, without moving
    /// its bytes through the client when possible
    pub async fn to_file_reference(&self) -> Result<FileReference> {
        if let Some(blob_token) = &self.model.blob_token {
            return Ok(FileReference::from_blob_token(blob_token.clone()));
        }
        Ok(FileReference::from_content_raw(self.content_raw().await?))
    }
}


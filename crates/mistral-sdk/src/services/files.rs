//! File storage.

use crate::client::Client;
use crate::error::{Error, Result};
use crate::types::{File, FileList, FilePurpose};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use std::path::Path;
use tracing::{debug, instrument};

/// File endpoints.
#[derive(Debug, Clone, Copy)]
pub struct FilesService<'a> {
    client: &'a Client,
}

impl<'a> FilesService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// List uploaded files.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<FileList> {
        self.client.get(&["files"]).await
    }

    /// Retrieve file metadata.
    #[instrument(skip(self))]
    pub async fn get(&self, file_id: &str) -> Result<File> {
        self.client.get(&["files", file_id]).await
    }

    /// Delete a file.
    #[instrument(skip(self))]
    pub async fn delete(&self, file_id: &str) -> Result<()> {
        self.client
            .request_empty::<()>(Method::DELETE, &["files", file_id], None)
            .await
    }

    /// Upload a file from disk.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub async fn upload(&self, path: impl AsRef<Path>, purpose: FilePurpose) -> Result<File> {
        let path = path.as_ref();
        let filename = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                Error::invalid_request(format!("'{}' has no file name", path.display()))
            })?
            .to_string();
        let data = tokio::fs::read(path).await?;

        self.upload_bytes(filename, data, purpose).await
    }

    /// Upload in-memory content under the given file name.
    #[instrument(skip(self, data))]
    pub async fn upload_bytes(
        &self,
        filename: impl Into<String> + std::fmt::Debug,
        data: impl Into<Vec<u8>>,
        purpose: FilePurpose,
    ) -> Result<File> {
        let data = data.into();
        debug!(bytes = data.len(), "Uploading file");

        let form = Form::new()
            .part("file", Part::bytes(data).file_name(filename.into()))
            .text("purpose", purpose.as_str());

        self.client.post_multipart(&["files"], form).await
    }

    /// Download the content of a file.
    #[instrument(skip(self))]
    pub async fn download(&self, file_id: &str) -> Result<Bytes> {
        self.client.get_bytes(&["files", file_id, "content"]).await
    }
}

use async_trait::async_trait;

use super::client::ContentApiClient;
use crate::application::ApplicationResult;
use crate::application::ports::files::{FileDownload, FileSource};
use crate::domain::article::FileAttachment;
use crate::domain::errors::RepositoryError;
use crate::trace::TraceContext;

/// Streams attachment payloads through the content API client.
#[derive(Clone)]
pub struct ContentApiFileSource {
    client: ContentApiClient,
}

impl ContentApiFileSource {
    pub fn new(client: ContentApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FileSource for ContentApiFileSource {
    async fn open(
        &self,
        ctx: &TraceContext,
        file: &FileAttachment,
    ) -> ApplicationResult<FileDownload> {
        let download = self
            .client
            .open_download(ctx, &file.url)
            .await
            .map_err(|e| {
                RepositoryError::with_cause(format!("failed to download `{}`", file.name), e)
            })?;

        Ok(FileDownload {
            content_type: download.content_type,
            content_length: download.content_length,
            body: download.body,
        })
    }
}

use crate::application::ApplicationResult;
use crate::domain::article::FileAttachment;
use crate::trace::TraceContext;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

pub type ByteStream = BoxStream<'static, std::io::Result<Bytes>>;

pub struct FileDownload {
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
    pub body: ByteStream,
}

impl std::fmt::Debug for FileDownload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileDownload")
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Opens the binary payload behind a [`FileAttachment`].
#[async_trait]
pub trait FileSource: Send + Sync {
    async fn open(&self, ctx: &TraceContext, file: &FileAttachment)
    -> ApplicationResult<FileDownload>;
}

use super::ArticleQueryService;
use super::service::kind_label;
use crate::{
    application::{
        dto::FileAttachmentDto,
        error::{ApplicationError, ApplicationResult},
        ports::files::FileDownload,
    },
    domain::article::ContentKind,
    trace::TraceContext,
};

pub struct DownloadArticleFileQuery {
    pub kind: ContentKind,
    pub slug: String,
}

#[derive(Debug)]
pub struct ArticleFileDownload {
    pub file: FileAttachmentDto,
    pub download: FileDownload,
}

impl ArticleFileDownload {
    /// Declared MIME type of the attachment, then the upstream header, then a
    /// generic binary type.
    pub fn content_type(&self) -> &str {
        if !self.file.mime_type.trim().is_empty() {
            return &self.file.mime_type;
        }
        self.download
            .content_type
            .as_deref()
            .unwrap_or("application/octet-stream")
    }
}

impl ArticleQueryService {
    pub async fn download_article_file(
        &self,
        ctx: &TraceContext,
        query: DownloadArticleFileQuery,
    ) -> ApplicationResult<ArticleFileDownload> {
        let article = self.load_by_slug(ctx, query.kind, &query.slug).await?;
        let file = article.file.ok_or_else(|| {
            ApplicationError::not_found(format!(
                "{} has no file attachment",
                kind_label(query.kind)
            ))
        })?;

        tracing::info!(
            request_id = %ctx.request_id(),
            slug = %article.slug,
            file = %file.name,
            "opening file attachment"
        );
        let download = self.files.open(ctx, &file).await?;

        Ok(ArticleFileDownload {
            file: file.into(),
            download,
        })
    }
}

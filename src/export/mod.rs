// src/export/mod.rs
//! Document exporters and the shared download naming convention

pub mod markdown;
pub mod pdf;
pub mod word;

pub use markdown::generate_markdown;
pub use pdf::{PdfExporter, PdfOptions};
pub use word::generate_word_html;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ResumeResult;
use crate::types::ResumeDocument;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Markdown,
    Word,
    Pdf,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Word => "doc",
            ExportFormat::Pdf => "pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown",
            ExportFormat::Word => "application/msword",
            ExportFormat::Pdf => "application/pdf",
        }
    }

    /// `{fullName}_简历.{ext}`
    pub fn file_name(&self, full_name: &str) -> String {
        format!("{}_简历.{}", full_name, self.extension())
    }
}

/// In-memory download produced by one export
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub file_name: String,
    pub content_type: &'static str,
    pub bytes: Vec<u8>,
}

pub struct Exporter {
    pdf: PdfExporter,
}

impl Exporter {
    pub fn new(pdf: PdfExporter) -> Self {
        Self { pdf }
    }

    pub async fn export(
        &self,
        doc: &ResumeDocument,
        format: ExportFormat,
    ) -> ResumeResult<ExportArtifact> {
        let bytes = match format {
            ExportFormat::Markdown => generate_markdown(doc).into_bytes(),
            ExportFormat::Word => generate_word_html(doc).into_bytes(),
            ExportFormat::Pdf => self.pdf.export(doc).await?,
        };

        let artifact = ExportArtifact {
            file_name: format.file_name(&doc.personal_info.full_name),
            content_type: format.content_type(),
            bytes,
        };
        info!(
            "Exported {} ({} bytes)",
            artifact.file_name,
            artifact.bytes.len()
        );
        Ok(artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_follow_convention() {
        assert_eq!(ExportFormat::Pdf.file_name("张伟"), "张伟_简历.pdf");
        assert_eq!(ExportFormat::Markdown.file_name("张伟"), "张伟_简历.md");
        assert_eq!(ExportFormat::Word.file_name("张伟"), "张伟_简历.doc");
    }

    #[test]
    fn test_content_types() {
        assert_eq!(ExportFormat::Markdown.content_type(), "text/markdown");
        assert_eq!(ExportFormat::Word.content_type(), "application/msword");
        assert_eq!(ExportFormat::Pdf.content_type(), "application/pdf");
    }

    #[tokio::test]
    async fn test_text_exports_produce_named_artifacts() {
        let exporter = Exporter::new(PdfExporter::default());
        let doc = ResumeDocument::seed();

        let md = exporter.export(&doc, ExportFormat::Markdown).await.unwrap();
        assert_eq!(md.file_name, "张伟_简历.md");
        assert!(String::from_utf8(md.bytes).unwrap().starts_with("# 张伟\n"));

        let word = exporter.export(&doc, ExportFormat::Word).await.unwrap();
        assert_eq!(word.file_name, "张伟_简历.doc");
        assert_eq!(word.content_type, "application/msword");
    }
}

// src/export/pdf.rs
//! PDF export through an external HTML-to-PDF converter

use std::path::Path;
use tokio::process::Command;
use tracing::{error, info};

use crate::error::{ResumeError, ResumeResult};
use crate::render::render_print_page;
use crate::types::ResumeDocument;

pub const DEFAULT_CONVERTER: &str = "wkhtmltopdf";

/// CSS pixels per inch; the render scale multiplies this
const CSS_DPI: u32 = 96;

/// Message shown when the converter cannot be started
pub const CONVERTER_MISSING_MESSAGE: &str = "PDF 生成库尚未加载，请稍候。";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageBreakMode {
    AvoidAll,
    Css,
    Legacy,
}

/// Fixed conversion settings; padding lives inside the rendered markup
#[derive(Debug, Clone, PartialEq)]
pub struct PdfOptions {
    /// Top, right, bottom, left in millimetres
    pub margin_mm: [u32; 4],
    pub image_quality: f64,
    /// Raster sharpness multiplier; the layout itself is never zoomed
    pub render_scale: u32,
    pub page_size: &'static str,
    pub orientation: &'static str,
    pub page_break: Vec<PageBreakMode>,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            margin_mm: [0, 0, 0, 0],
            image_quality: 0.98,
            render_scale: 2,
            page_size: "A4",
            orientation: "Portrait",
            page_break: vec![PageBreakMode::AvoidAll, PageBreakMode::Css, PageBreakMode::Legacy],
        }
    }
}

impl PdfOptions {
    /// Command-line flags understood by wkhtmltopdf
    pub fn converter_args(&self) -> Vec<String> {
        let [top, right, bottom, left] = self.margin_mm;
        let mut args = vec![
            "--quiet".to_string(),
            "--encoding".to_string(),
            "utf-8".to_string(),
            "-T".to_string(),
            format!("{}mm", top),
            "-R".to_string(),
            format!("{}mm", right),
            "-B".to_string(),
            format!("{}mm", bottom),
            "-L".to_string(),
            format!("{}mm", left),
            "-s".to_string(),
            self.page_size.to_string(),
            "-O".to_string(),
            self.orientation.to_string(),
            "--zoom".to_string(),
            "1".to_string(),
            "--disable-smart-shrinking".to_string(),
            "--dpi".to_string(),
            (CSS_DPI * self.render_scale).to_string(),
            "--image-quality".to_string(),
            ((self.image_quality * 100.0).round() as u32).to_string(),
        ];
        // keep-together blocks are flagged in the markup and honoured via print CSS
        if self.page_break.contains(&PageBreakMode::Css) {
            args.push("--print-media-type".to_string());
        }
        args
    }
}

#[derive(Debug, Clone)]
pub struct PdfExporter {
    program: String,
    options: PdfOptions,
}

impl PdfExporter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            options: PdfOptions::default(),
        }
    }

    pub fn options(&self) -> &PdfOptions {
        &self.options
    }

    /// Render the preview container and convert it, returning the PDF bytes
    pub async fn export(&self, doc: &ResumeDocument) -> ResumeResult<Vec<u8>> {
        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join("resume.html");
        let output = workdir.path().join("resume.pdf");

        tokio::fs::write(&input, render_print_page(doc)).await?;
        self.convert(&input, &output).await?;

        let bytes = tokio::fs::read(&output).await?;
        info!("Converted résumé to PDF ({} bytes)", bytes.len());
        Ok(bytes)
    }

    async fn convert(&self, input: &Path, output: &Path) -> ResumeResult<()> {
        let result = Command::new(&self.program)
            .args(self.options.converter_args())
            .arg(input)
            .arg(output)
            .output()
            .await;

        let result = match result {
            Ok(result) => result,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                error!("PDF converter '{}' not found", self.program);
                return Err(ResumeError::PdfConverterUnavailable {
                    program: self.program.clone(),
                });
            }
            Err(e) => return Err(ResumeError::Io(e)),
        };

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            error!("PDF converter failed: {}", stderr);
            return Err(ResumeError::PdfConversion(stderr));
        }

        Ok(())
    }
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERTER)
    }
}

// src/cli.rs
use crate::ai::{CritiqueClient, GeminiClient, TextGenerator};
use crate::core::{ConfigManager, FsOps};
use crate::export::{ExportFormat, Exporter, PdfExporter};
use crate::pagination::PageEstimator;
use crate::session::{AiTarget, ResumeSession};
use crate::store::ResumeStore;
use crate::web::start_web_server;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "devresume")]
#[command(about = "Edit, preview, export and critique a résumé")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Directory holding resumeData.json (overrides config and environment)
    #[arg(long, global = true)]
    pub storage_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the local HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the current document as JSON
    Show,
    /// Write the document as Markdown, Word HTML or PDF
    Export {
        format: ExportFormat,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Score the document against its target title
    Critique,
    /// Rewrite one prose field in place
    Rewrite {
        #[command(subcommand)]
        target: RewriteTarget,
    },
    /// Delete the stored document and start over from the sample
    Reset,
    /// Estimate the A4 page count for a measured layout
    Pages {
        #[arg(long)]
        height: f64,
        #[arg(long)]
        width: f64,
    },
}

#[derive(Subcommand)]
pub enum RewriteTarget {
    Summary,
    SelfEvaluation,
    Highlight {
        #[arg(long)]
        experience: String,
        #[arg(long)]
        index: usize,
    },
}

impl From<RewriteTarget> for AiTarget {
    fn from(target: RewriteTarget) -> Self {
        match target {
            RewriteTarget::Summary => AiTarget::Summary,
            RewriteTarget::SelfEvaluation => AiTarget::SelfEvaluation,
            RewriteTarget::Highlight { experience, index } => AiTarget::Highlight {
                experience_id: experience,
                index,
            },
        }
    }
}

pub async fn handle_command(cli: Cli, mut config: ConfigManager) -> Result<()> {
    if let Some(path) = cli.storage_path {
        config.storage_path = path;
    }

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.port = port;
            }
            let generator: Box<dyn TextGenerator> = Box::new(GeminiClient::new(config.ai.clone())?);
            start_web_server(config, generator).await
        }

        Command::Show => {
            let session = open_session(&config).await;
            let json = serde_json::to_string_pretty(session.document())
                .context("Failed to serialize résumé")?;
            println!("{}", json);
            Ok(())
        }

        Command::Export { format, out_dir } => {
            let session = open_session(&config).await;
            let exporter = Exporter::new(PdfExporter::new(config.pdf_converter.clone()));
            let artifact = exporter.export(session.document(), format).await?;

            let dir = out_dir.unwrap_or_else(|| config.output_path.clone());
            let path = dir.join(&artifact.file_name);
            FsOps::write_file_safe(&path, &artifact.bytes).await?;
            println!("✅ {}", path.display());
            Ok(())
        }

        Command::Critique => {
            let session = open_session(&config).await;
            let client = CritiqueClient::gemini(config.ai.clone())?;
            let result = client.critique(session.document()).await;

            println!("Score: {}", result.score);
            if !result.missing_keywords.is_empty() {
                println!("Missing keywords: {}", result.missing_keywords.join(", "));
            }
            for suggestion in &result.suggestions {
                println!("- {}", suggestion);
            }
            Ok(())
        }

        Command::Rewrite { target } => {
            let mut session = open_session(&config).await;
            let client = CritiqueClient::gemini(config.ai.clone())?;

            let snapshot = session.begin_rewrite(target.into())?;
            let text = snapshot.run(&client).await;
            if text == snapshot.input {
                println!("Unchanged: {}", text);
            } else {
                println!("{}", text);
            }
            session.finish_rewrite(snapshot, text).await;
            Ok(())
        }

        Command::Reset => {
            let mut session = open_session(&config).await;
            session.reset().await?;
            println!("✅ Résumé reset to the sample document");
            Ok(())
        }

        Command::Pages { height, width } => {
            let mut estimator = PageEstimator::new();
            println!("{}", estimator.observe(height, width));
            Ok(())
        }
    }
}

async fn open_session(config: &ConfigManager) -> ResumeSession {
    let path = config.storage_file();
    info!("Using résumé at {}", path.display());
    ResumeSession::open(ResumeStore::new(path)).await
}

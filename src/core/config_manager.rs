// src/core/config_manager.rs
//! Unified configuration: optional config.yaml, then environment overrides

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::ai::gemini::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use crate::export::pdf::DEFAULT_CONVERTER;
use crate::store::STORAGE_FILE_NAME;

pub const CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_PORT: u16 = 8000;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub storage_path: PathBuf,
    pub output_path: PathBuf,
    pub ai: GeminiConfig,
    pub pdf_converter: String,
    pub port: u16,
}

// ===== config.yaml layout =====

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: Option<EnvironmentSection>,
    #[serde(default)]
    production: Option<EnvironmentSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EnvironmentSection {
    storage_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    ai: AiSection,
    pdf: PdfSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AiSection {
    model: Option<String>,
    base_url: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PdfSection {
    converter: Option<String>,
}

impl ConfigManager {
    /// Load config.yaml from the working directory (if any) and the process environment
    pub fn load() -> Result<Self> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "local".to_string());
        info!("Loading configuration for environment: {}", environment);

        let config_path = PathBuf::from(CONFIG_FILE);
        let yaml = if config_path.exists() {
            Some(std::fs::read_to_string(&config_path).context("Failed to read config.yaml")?)
        } else {
            None
        };

        let base_dir = std::env::current_dir().context("Failed to get current directory")?;
        Self::from_sources(
            &environment,
            yaml.as_deref(),
            &base_dir,
            |key| std::env::var(key).ok(),
        )
    }

    /// Resolve the configuration from explicit sources
    pub fn from_sources(
        environment: &str,
        yaml: Option<&str>,
        base_dir: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let file: ConfigFile = match yaml {
            Some(content) => {
                serde_yaml::from_str(content).context("Failed to parse config.yaml")?
            }
            None => ConfigFile::default(),
        };

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        }
        .unwrap_or_default();

        let env = |key: &str| env(key).filter(|value| !value.trim().is_empty());

        let storage_path = env("RESUME_STORAGE_PATH")
            .map(PathBuf::from)
            .or(section.storage_path)
            .unwrap_or_else(|| PathBuf::from("data"));
        let output_path = env("RESUME_OUTPUT_PATH")
            .map(PathBuf::from)
            .or(section.output_path)
            .unwrap_or_else(|| PathBuf::from("out"));

        let timeout_seconds = match env("GEMINI_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid GEMINI_TIMEOUT_SECONDS: {}", raw))?,
            None => section.ai.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        let ai = GeminiConfig {
            api_key: env("GEMINI_API_KEY").or_else(|| env("API_KEY")),
            model: env("GEMINI_MODEL")
                .or(section.ai.model)
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: env("GEMINI_BASE_URL")
                .or(section.ai.base_url)
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout_seconds,
        };

        let pdf_converter = env("PDF_CONVERTER")
            .or(section.pdf.converter)
            .unwrap_or_else(|| DEFAULT_CONVERTER.to_string());

        let port = match env("ROCKET_PORT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid ROCKET_PORT: {}", raw))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            environment: environment.to_string(),
            storage_path: resolve_path(base_dir, storage_path),
            output_path: resolve_path(base_dir, output_path),
            ai,
            pdf_converter,
            port,
        })
    }

    /// Path of the saved document
    pub fn storage_file(&self) -> PathBuf {
        self.storage_path.join(STORAGE_FILE_NAME)
    }

    /// Ensure all required directories exist
    pub async fn ensure_directories(&self) -> Result<()> {
        use crate::core::FsOps;

        FsOps::ensure_dir_exists(&self.storage_path).await?;
        FsOps::ensure_dir_exists(&self.output_path).await?;

        info!("All configured directories ensured to exist");
        Ok(())
    }
}

fn resolve_path(base_dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base_dir.join(path)
    }
}

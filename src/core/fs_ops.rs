// src/core/fs_ops.rs
//! File system helpers shared by the store and the exporters

use anyhow::{Context, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::fs;
use tracing::{info, trace};

pub struct FsOps;

impl FsOps {
    /// Create the directory and its parents if missing
    pub async fn ensure_dir_exists(path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
            info!("Created directory: {}", path.display());
        }
        Ok(())
    }

    /// Read a text file, `None` when it does not exist
    pub async fn read_optional(path: &Path) -> Result<Option<String>> {
        match fs::read_to_string(path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read file: {}", path.display()))
            }
        }
    }

    /// Overwrite a file, creating the parent directory first
    pub async fn write_file_safe(path: &Path, content: impl AsRef<[u8]>) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                Self::ensure_dir_exists(parent).await?;
            }
        }

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write file: {}", path.display()))?;

        trace!("Written file: {}", path.display());
        Ok(())
    }

    /// Replace a file without ever truncating it: the content goes to a sibling
    /// temp file that is then renamed over the target
    pub async fn write_file_atomic(path: &Path, content: impl AsRef<[u8]>) -> Result<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Self::ensure_dir_exists(&parent).await?;

        let target = path.to_path_buf();
        let content = content.as_ref().to_vec();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut tmp = NamedTempFile::new_in(&parent).with_context(|| {
                format!("Failed to create temp file in: {}", parent.display())
            })?;
            tmp.write_all(&content)
                .and_then(|_| tmp.as_file().sync_all())
                .with_context(|| format!("Failed to write temp file for: {}", target.display()))?;
            tmp.persist(&target)
                .with_context(|| format!("Failed to replace file: {}", target.display()))?;
            Ok(())
        })
        .await
        .context("Atomic write task failed")??;

        trace!("Atomically replaced file: {}", path.display());
        Ok(())
    }

    /// Remove a file; a missing file is not an error
    pub async fn remove_file_if_exists(path: &Path) -> Result<bool> {
        match fs::remove_file(path).await {
            Ok(()) => {
                info!("Removed file: {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove file: {}", path.display()))
            }
        }
    }
}

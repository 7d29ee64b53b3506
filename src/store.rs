// src/store.rs
//! Durable local state: one file holding the whole serialized document

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, trace, warn};

use crate::core::FsOps;
use crate::types::ResumeDocument;

/// File name kept from the browser storage key
pub const STORAGE_FILE_NAME: &str = "resumeData.json";

#[derive(Debug, Clone)]
pub struct ResumeStore {
    path: PathBuf,
}

impl ResumeStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the saved document once; anything missing or unparseable yields the seed
    pub async fn load_or_seed(&self) -> ResumeDocument {
        match FsOps::read_optional(&self.path).await {
            Ok(Some(content)) => match serde_json::from_str::<ResumeDocument>(&content) {
                Ok(doc) => {
                    info!("Loaded résumé from {}", self.path.display());
                    doc
                }
                Err(e) => {
                    warn!(
                        "Stored résumé at {} is unparseable, using seed: {}",
                        self.path.display(),
                        e
                    );
                    ResumeDocument::seed()
                }
            },
            Ok(None) => {
                info!("No stored résumé at {}, using seed", self.path.display());
                ResumeDocument::seed()
            }
            Err(e) => {
                warn!("Failed to read stored résumé, using seed: {:#}", e);
                ResumeDocument::seed()
            }
        }
    }

    /// Replace the stored document with the given one; the previous copy stays
    /// intact until the new one is fully on disk
    pub async fn save(&self, doc: &ResumeDocument) -> Result<()> {
        let json = serde_json::to_string(doc).context("Failed to serialize résumé")?;
        let size = json.len();
        FsOps::write_file_atomic(&self.path, json).await?;
        trace!("Persisted résumé ({} bytes)", size);
        Ok(())
    }

    /// Delete the stored document
    pub async fn clear(&self) -> Result<()> {
        FsOps::remove_file_if_exists(&self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_yields_seed() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(dir.path().join(STORAGE_FILE_NAME));
        assert_eq!(store.load_or_seed().await, ResumeDocument::seed());
    }

    #[tokio::test]
    async fn test_garbage_yields_seed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE_NAME);
        std::fs::write(&path, "{not json").unwrap();

        let store = ResumeStore::new(path);
        assert_eq!(store.load_or_seed().await, ResumeDocument::seed());
    }

    #[tokio::test]
    async fn test_save_overwrites_and_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(dir.path().join("sub").join(STORAGE_FILE_NAME));

        let mut doc = ResumeDocument::seed();
        doc.personal_info.full_name = "王芳".to_string();
        store.save(&doc).await.unwrap();

        doc.personal_info.full_name = "李娜".to_string();
        store.save(&doc).await.unwrap();

        let reloaded = store.load_or_seed().await;
        assert_eq!(reloaded.personal_info.full_name, "李娜");
        assert_eq!(reloaded, doc);
    }

    #[tokio::test]
    async fn test_interrupted_save_keeps_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(dir.path().join(STORAGE_FILE_NAME));
        let mut doc = ResumeDocument::seed();
        doc.personal_info.full_name = "王芳".to_string();
        store.save(&doc).await.unwrap();

        // a writer killed mid-save leaves only a stray partial temp file behind
        std::fs::write(dir.path().join(".tmpAbC123"), "{\"personalInfo\":").unwrap();
        assert_eq!(store.load_or_seed().await, doc);

        // the next save still lands on the real file
        doc.personal_info.full_name = "李娜".to_string();
        store.save(&doc).await.unwrap();
        assert_eq!(store.load_or_seed().await, doc);
    }

    #[tokio::test]
    async fn test_clear_removes_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(dir.path().join(STORAGE_FILE_NAME));
        let mut doc = ResumeDocument::seed();
        doc.self_evaluation.clear();
        store.save(&doc).await.unwrap();

        store.clear().await.unwrap();
        assert!(!store.path().exists());
        assert_eq!(store.load_or_seed().await, ResumeDocument::seed());
    }
}

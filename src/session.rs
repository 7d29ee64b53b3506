// src/session.rs
//! The one live document: edits, persistence, page count and AI round trips

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

use crate::ai::{CritiqueClient, TextGenerator};
use crate::editor::{self, Edit, IdMinter, PersonalField};
use crate::error::{ResumeError, ResumeResult};
use crate::pagination::PageEstimator;
use crate::store::ResumeStore;
use crate::types::ResumeDocument;

/// Field an AI rewrite writes back into
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AiTarget {
    Summary,
    SelfEvaluation,
    Highlight { experience_id: String, index: usize },
}

impl fmt::Display for AiTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AiTarget::Summary => write!(f, "summary"),
            AiTarget::SelfEvaluation => write!(f, "self-evaluation"),
            AiTarget::Highlight {
                experience_id,
                index,
            } => write!(f, "highlight {}#{}", experience_id, index),
        }
    }
}

impl AiTarget {
    fn read(&self, doc: &ResumeDocument) -> Option<String> {
        match self {
            AiTarget::Summary => Some(doc.personal_info.summary.clone()),
            AiTarget::SelfEvaluation => Some(doc.self_evaluation.clone()),
            AiTarget::Highlight {
                experience_id,
                index,
            } => doc
                .experience_by_id(experience_id)
                .and_then(|exp| exp.highlights.get(*index))
                .cloned(),
        }
    }

    fn into_edit(self, value: String) -> Edit {
        match self {
            AiTarget::Summary => Edit::SetPersonal {
                field: PersonalField::Summary,
                value,
            },
            AiTarget::SelfEvaluation => Edit::SetSelfEvaluation { value },
            AiTarget::Highlight {
                experience_id,
                index,
            } => Edit::SetHighlight {
                experience_id,
                index,
                value,
            },
        }
    }
}

type InFlight = Arc<Mutex<HashSet<AiTarget>>>;

fn lock_in_flight(in_flight: &InFlight) -> MutexGuard<'_, HashSet<AiTarget>> {
    in_flight.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Keeps a target busy until dropped
#[derive(Debug)]
struct InFlightGuard {
    target: AiTarget,
    in_flight: InFlight,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        lock_in_flight(&self.in_flight).remove(&self.target);
        debug!("AI rewrite released {}", self.target);
    }
}

/// Inputs captured when an AI action starts; the session lock is not held while it runs.
/// The target stays busy for as long as the snapshot lives.
#[derive(Debug)]
pub struct RewriteSnapshot {
    pub target: AiTarget,
    pub input: String,
    pub job_title: String,
    pub skills: Vec<String>,
    _guard: InFlightGuard,
}

impl RewriteSnapshot {
    /// One round trip; the input comes back unchanged on any failure
    pub async fn run<G: TextGenerator>(&self, client: &CritiqueClient<G>) -> String {
        match self.target {
            AiTarget::Summary | AiTarget::SelfEvaluation => {
                client
                    .rewrite_summary(&self.input, &self.job_title, &self.skills)
                    .await
            }
            AiTarget::Highlight { .. } => client.improve_bullet(&self.input).await,
        }
    }
}

pub struct ResumeSession {
    doc: ResumeDocument,
    store: ResumeStore,
    ids: IdMinter,
    pages: PageEstimator,
    in_flight: InFlight,
}

impl ResumeSession {
    /// Load the stored document, or the seed when there is none
    pub async fn open(store: ResumeStore) -> Self {
        let doc = store.load_or_seed().await;
        Self::with_document(store, doc)
    }

    pub fn with_document(store: ResumeStore, doc: ResumeDocument) -> Self {
        Self {
            ids: IdMinter::after(&doc),
            doc,
            store,
            pages: PageEstimator::new(),
            in_flight: InFlight::default(),
        }
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.doc
    }

    pub fn pages(&self) -> u32 {
        self.pages.pages()
    }

    /// Feed a measured layout; unmeasurable widths keep the previous count
    pub fn observe_layout(&mut self, height: f64, width: f64) -> u32 {
        self.pages.observe(height, width)
    }

    /// Apply one edit, swap the document in, then write it through to the store
    pub async fn apply(&mut self, edit: Edit) -> &ResumeDocument {
        self.doc = editor::apply(&self.doc, edit, &mut self.ids);

        if let Err(e) = self.store.save(&self.doc).await {
            warn!("Failed to persist résumé: {:#}", e);
        }
        &self.doc
    }

    /// Forget the stored document and start over from the seed
    pub async fn reset(&mut self) -> anyhow::Result<&ResumeDocument> {
        self.store.clear().await?;
        self.doc = ResumeDocument::seed();
        self.pages = PageEstimator::new();
        info!("Résumé reset to seed");
        Ok(&self.doc)
    }

    pub fn is_in_flight(&self, target: &AiTarget) -> bool {
        lock_in_flight(&self.in_flight).contains(target)
    }

    /// Mark the target busy and capture what the AI call needs
    pub fn begin_rewrite(&mut self, target: AiTarget) -> ResumeResult<RewriteSnapshot> {
        let mut in_flight = lock_in_flight(&self.in_flight);
        if in_flight.contains(&target) {
            return Err(ResumeError::TargetBusy(target.to_string()));
        }
        let input = target
            .read(&self.doc)
            .ok_or_else(|| ResumeError::TargetNotFound(target.to_string()))?;

        in_flight.insert(target.clone());
        drop(in_flight);
        debug!("AI rewrite started for {}", target);

        Ok(RewriteSnapshot {
            _guard: InFlightGuard {
                target: target.clone(),
                in_flight: Arc::clone(&self.in_flight),
            },
            target,
            input,
            job_title: self.doc.personal_info.title.clone(),
            skills: self.doc.all_skills(),
        })
    }

    /// Write the result into the target as an ordinary edit and release it.
    /// Edits made to the target while the call was outstanding are overwritten.
    pub async fn finish_rewrite(
        &mut self,
        snapshot: RewriteSnapshot,
        text: String,
    ) -> &ResumeDocument {
        let edit = snapshot.target.clone().into_edit(text);
        drop(snapshot);
        self.apply(edit).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::STORAGE_FILE_NAME;

    async fn open_session(dir: &tempfile::TempDir) -> ResumeSession {
        ResumeSession::open(ResumeStore::new(dir.path().join(STORAGE_FILE_NAME))).await
    }

    #[tokio::test]
    async fn test_apply_writes_through_to_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open_session(&dir).await;

        session
            .apply(Edit::SetPersonal {
                field: PersonalField::FullName,
                value: "李娜".to_string(),
            })
            .await;
        assert_eq!(session.document().personal_info.full_name, "李娜");

        let reopened = open_session(&dir).await;
        assert_eq!(reopened.document().personal_info.full_name, "李娜");
    }

    #[tokio::test]
    async fn test_store_failure_does_not_block_edit() {
        let dir = tempfile::tempdir().unwrap();
        // the store path is a directory, so every write fails
        let mut session = ResumeSession::open(ResumeStore::new(dir.path().to_path_buf())).await;
        session
            .apply(Edit::SetSelfEvaluation {
                value: "新评价".to_string(),
            })
            .await;
        assert_eq!(session.document().self_evaluation, "新评价");
    }

    #[tokio::test]
    async fn test_reset_restores_seed_and_clears_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open_session(&dir).await;
        session.apply(Edit::AddEducation).await;
        assert!(dir.path().join(STORAGE_FILE_NAME).exists());

        session.reset().await.unwrap();
        assert_eq!(session.document(), &ResumeDocument::seed());
        assert!(!dir.path().join(STORAGE_FILE_NAME).exists());
    }

    #[tokio::test]
    async fn test_second_rewrite_on_busy_target_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open_session(&dir).await;

        let snapshot = session.begin_rewrite(AiTarget::Summary).unwrap();
        assert_eq!(snapshot.input, ResumeDocument::seed().personal_info.summary);
        assert_eq!(snapshot.job_title, "高级前端工程师");
        assert!(matches!(
            session.begin_rewrite(AiTarget::Summary),
            Err(ResumeError::TargetBusy(_))
        ));
        // other targets stay available
        assert!(session.begin_rewrite(AiTarget::SelfEvaluation).is_ok());

        session.finish_rewrite(snapshot, "改写后的总结".to_string()).await;
        assert!(!session.is_in_flight(&AiTarget::Summary));
        assert_eq!(session.document().personal_info.summary, "改写后的总结");
    }

    #[tokio::test]
    async fn test_rewrite_result_overwrites_concurrent_edit() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open_session(&dir).await;
        let target = AiTarget::Highlight {
            experience_id: "1".to_string(),
            index: 0,
        };

        let snapshot = session.begin_rewrite(target.clone()).unwrap();
        session
            .apply(Edit::SetHighlight {
                experience_id: "1".to_string(),
                index: 0,
                value: "手动修改".to_string(),
            })
            .await;
        session.finish_rewrite(snapshot, "AI 结果".to_string()).await;

        assert_eq!(session.document().experience[0].highlights[0], "AI 结果");
    }

    #[tokio::test]
    async fn test_abandoned_rewrite_releases_target() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open_session(&dir).await;

        let snapshot = session.begin_rewrite(AiTarget::SelfEvaluation).unwrap();
        assert!(session.is_in_flight(&AiTarget::SelfEvaluation));
        drop(snapshot);
        assert!(!session.is_in_flight(&AiTarget::SelfEvaluation));

        // a task that panics mid-call still frees the target
        let snapshot = session.begin_rewrite(AiTarget::Summary).unwrap();
        let task = tokio::spawn(async move {
            let _snapshot = snapshot;
            panic!("service call blew up");
        });
        assert!(task.await.is_err());
        assert!(!session.is_in_flight(&AiTarget::Summary));
        assert!(session.begin_rewrite(AiTarget::Summary).is_ok());
        assert_eq!(session.document(), &ResumeDocument::seed());
    }

    #[tokio::test]
    async fn test_open_seeds_ids_from_stored_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResumeStore::new(dir.path().join(STORAGE_FILE_NAME));
        let mut doc = ResumeDocument::seed();
        let future = chrono::Utc::now().timestamp_millis() + 3_600_000;
        doc.experience[0].id = future.to_string();
        store.save(&doc).await.unwrap();

        let mut session = open_session(&dir).await;
        session.apply(Edit::AddExperience).await;
        assert_eq!(session.document().experience[0].id, (future + 1).to_string());
    }

    #[tokio::test]
    async fn test_missing_highlight_target() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open_session(&dir).await;
        let target = AiTarget::Highlight {
            experience_id: "404".to_string(),
            index: 0,
        };
        assert!(matches!(
            session.begin_rewrite(target.clone()),
            Err(ResumeError::TargetNotFound(_))
        ));
        assert!(!session.is_in_flight(&target));
    }

    #[tokio::test]
    async fn test_observe_layout_keeps_last_good_count() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open_session(&dir).await;
        assert_eq!(session.observe_layout(2000.0, 794.0), 2);
        assert_eq!(session.observe_layout(5000.0, 0.0), 2);
        assert_eq!(session.pages(), 2);
    }

    #[test]
    fn test_target_wire_format() {
        let target: AiTarget =
            serde_json::from_str(r#"{"kind": "highlight", "experienceId": "2", "index": 1}"#)
                .unwrap();
        assert_eq!(
            target,
            AiTarget::Highlight {
                experience_id: "2".to_string(),
                index: 1
            }
        );
        let target: AiTarget = serde_json::from_str(r#"{"kind": "selfEvaluation"}"#).unwrap();
        assert_eq!(target, AiTarget::SelfEvaluation);
    }
}

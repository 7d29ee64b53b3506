//! Résumé builder: document model, editor, preview, exporters and AI critique

pub mod ai;
pub mod cli;
pub mod core;
pub mod editor;
pub mod error;
pub mod export;
pub mod pagination;
pub mod render;
pub mod session;
pub mod store;
pub mod types;
pub mod web;

pub use error::{ResumeError, ResumeResult};
pub use types::ResumeDocument;
pub use web::start_web_server;

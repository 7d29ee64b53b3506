// src/error.rs
//! Domain errors surfaced by the critique client, the session and the exporters

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("API key is not configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("Service returned empty content")]
    EmptyResponse,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF converter '{program}' is not available")]
    PdfConverterUnavailable { program: String },

    #[error("PDF conversion failed: {0}")]
    PdfConversion(String),

    #[error("An AI action on {0} is already in progress")]
    TargetBusy(String),

    #[error("No such AI target: {0}")]
    TargetNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ResumeResult<T> = Result<T, ResumeError>;

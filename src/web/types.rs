// src/web/types.rs
//! Response envelopes, request bodies and the shared server state

use rocket::http::{Header, Status};
use rocket::request::FromParam;
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;
use rocket::serde::{Deserialize, Serialize};
use rocket::{Request, Response};
use tokio::sync::Mutex;

use crate::ai::{CritiqueClient, TextGenerator};
use crate::error::ResumeError;
use crate::export::pdf::CONVERTER_MISSING_MESSAGE;
use crate::export::{ExportArtifact, ExportFormat, Exporter};
use crate::session::{AiTarget, ResumeSession};

/// Everything the routes share; the session lock serializes edits
pub struct AppState {
    pub session: Mutex<ResumeSession>,
    pub exporter: Exporter,
    pub critique: CritiqueClient<Box<dyn TextGenerator>>,
}

// ===== Downloads =====

pub struct FileResponse {
    pub data: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

impl From<ExportArtifact> for FileResponse {
    fn from(artifact: ExportArtifact) -> Self {
        Self {
            data: artifact.bytes,
            content_type: artifact.content_type,
            filename: artifact.file_name,
        }
    }
}

impl<'r> Responder<'r, 'static> for FileResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let content_type = if self.content_type.starts_with("text/") {
            format!("{}; charset=utf-8", self.content_type)
        } else {
            self.content_type.to_string()
        };

        Response::build()
            .header(Header::new("Content-Type", content_type))
            .header(Header::new(
                "Content-Disposition",
                content_disposition(&self.filename),
            ))
            .sized_body(self.data.len(), std::io::Cursor::new(self.data))
            .ok()
    }
}

/// Attachment header with an ASCII fallback and the UTF-8 `filename*` form
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();

    let mut encoded = String::new();
    for byte in filename.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }

    format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        fallback, encoded
    )
}

impl<'a> FromParam<'a> for ExportFormat {
    type Error = &'a str;

    fn from_param(param: &'a str) -> Result<Self, Self::Error> {
        match param {
            "markdown" => Ok(ExportFormat::Markdown),
            "word" => Ok(ExportFormat::Word),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(other),
        }
    }
}

// ===== Requests =====

#[derive(Debug, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct RewriteRequest {
    pub target: AiTarget,
}

// ===== Responses =====

#[derive(Debug, Serialize)]
#[serde(crate = "rocket::serde")]
pub struct PagesData {
    pub pages: u32,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct TextResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct DataResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub message: String,
    pub data: T,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct StandardErrorResponse {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub success: bool,
    pub error: String,
    pub error_code: String,
    pub suggestions: Vec<String>,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde", rename_all = "lowercase")]
pub enum ResponseType {
    Text,
    Data,
    Error,
}

pub type ApiError = status::Custom<Json<StandardErrorResponse>>;
pub type ApiResult<T> = Result<Json<DataResponse<T>>, ApiError>;

impl TextResponse {
    pub fn success(message: String) -> Self {
        Self {
            response_type: ResponseType::Text,
            success: true,
            message,
        }
    }
}

impl<T> DataResponse<T> {
    pub fn success(message: String, data: T) -> Self {
        Self {
            response_type: ResponseType::Data,
            success: true,
            message,
            data,
        }
    }
}

impl StandardErrorResponse {
    pub fn new(error: String, error_code: String, suggestions: Vec<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            success: false,
            error,
            error_code,
            suggestions,
        }
    }
}

pub fn api_error(status: Status, error: &str, code: &str, suggestions: &[&str]) -> ApiError {
    status::Custom(
        status,
        Json(StandardErrorResponse::new(
            error.to_string(),
            code.to_string(),
            suggestions.iter().map(|s| s.to_string()).collect(),
        )),
    )
}

impl From<ResumeError> for ApiError {
    fn from(e: ResumeError) -> Self {
        match e {
            ResumeError::PdfConverterUnavailable { .. } => api_error(
                Status::ServiceUnavailable,
                CONVERTER_MISSING_MESSAGE,
                "PDF_CONVERTER_UNAVAILABLE",
                &["Install wkhtmltopdf or set PDF_CONVERTER"],
            ),
            ResumeError::TargetBusy(target) => api_error(
                Status::Conflict,
                &format!("AI action already running for {}", target),
                "AI_IN_PROGRESS",
                &["Wait for the current rewrite to finish"],
            ),
            ResumeError::TargetNotFound(target) => api_error(
                Status::NotFound,
                &format!("Nothing to rewrite at {}", target),
                "TARGET_NOT_FOUND",
                &["Check the experience id and highlight index"],
            ),
            other => api_error(
                Status::InternalServerError,
                &other.to_string(),
                "INTERNAL_ERROR",
                &["Try again in a few moments"],
            ),
        }
    }
}

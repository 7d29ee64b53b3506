// src/web/handlers/export_handlers.rs
use crate::export::ExportFormat;
use crate::web::types::*;

use rocket::http::Status;
use rocket::State;
use tracing::{error, warn};

pub async fn export_handler(
    format: Result<ExportFormat, &str>,
    state: &State<AppState>,
) -> Result<FileResponse, ApiError> {
    let format = match format {
        Ok(format) => format,
        Err(unknown) => {
            warn!("Unknown export format requested: {}", unknown);
            return Err(api_error(
                Status::NotFound,
                &format!("Unknown export format: {}", unknown),
                "UNKNOWN_FORMAT",
                &["Use one of: markdown, word, pdf"],
            ));
        }
    };

    // snapshot so a slow PDF conversion does not hold up edits
    let doc = state.session.lock().await.document().clone();

    match state.exporter.export(&doc, format).await {
        Ok(artifact) => Ok(artifact.into()),
        Err(e) => {
            error!("Export to {:?} failed: {}", format, e);
            Err(e.into())
        }
    }
}

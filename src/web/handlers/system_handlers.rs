// src/web/handlers/system_handlers.rs
use crate::web::types::*;

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

pub async fn health_handler(state: &State<AppState>) -> Json<TextResponse> {
    let ai = if state.critique.has_credential() {
        "configured"
    } else {
        "missing"
    };
    info!("Health check (AI credential {})", ai);
    Json(TextResponse::success(format!("OK (AI credential {})", ai)))
}

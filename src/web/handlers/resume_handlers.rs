// src/web/handlers/resume_handlers.rs
use crate::editor::Edit;
use crate::pagination::PreviewLayout;
use crate::render::render_page;
use crate::types::ResumeDocument;
use crate::web::types::*;

use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

pub async fn get_resume_handler(state: &State<AppState>) -> Json<DataResponse<ResumeDocument>> {
    let session = state.session.lock().await;
    Json(DataResponse::success(
        "Résumé loaded".to_string(),
        session.document().clone(),
    ))
}

pub async fn edit_resume_handler(
    edit: Json<Edit>,
    state: &State<AppState>,
) -> Json<DataResponse<ResumeDocument>> {
    let edit = edit.into_inner();
    let label = edit.label();

    let mut session = state.session.lock().await;
    let doc = session.apply(edit).await.clone();
    Json(DataResponse::success(format!("Applied {}", label), doc))
}

pub async fn reset_resume_handler(state: &State<AppState>) -> ApiResult<ResumeDocument> {
    let mut session = state.session.lock().await;
    match session.reset().await {
        Ok(doc) => Ok(Json(DataResponse::success(
            "Résumé reset to the sample document".to_string(),
            doc.clone(),
        ))),
        Err(e) => {
            error!("Failed to clear stored résumé: {:#}", e);
            Err(api_error(
                Status::InternalServerError,
                "Failed to clear stored résumé",
                "STORAGE_ERROR",
                &["Check permissions on the storage directory"],
            ))
        }
    }
}

pub async fn preview_handler(
    height: Option<f64>,
    width: Option<f64>,
    scale: Option<f64>,
    state: &State<AppState>,
) -> RawHtml<String> {
    let mut session = state.session.lock().await;
    let pages = match (height, width) {
        (Some(height), Some(width)) => session.observe_layout(height, width),
        _ => session.pages(),
    };
    let layout = PreviewLayout::new(pages, scale.unwrap_or(1.0));
    info!("Rendering preview ({} page(s), scale {})", pages, layout.scale);
    RawHtml(render_page(session.document(), layout))
}

pub async fn pages_handler(
    height: f64,
    width: f64,
    state: &State<AppState>,
) -> Json<DataResponse<PagesData>> {
    let mut session = state.session.lock().await;
    let pages = session.observe_layout(height, width);
    Json(DataResponse::success(
        format!("{} page(s)", pages),
        PagesData { pages },
    ))
}

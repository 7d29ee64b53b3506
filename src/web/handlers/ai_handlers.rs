// src/web/handlers/ai_handlers.rs
use crate::types::{CritiqueResult, ResumeDocument};
use crate::web::types::*;

use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

/// Lock to snapshot, call out unlocked, lock again to write the result back
pub async fn rewrite_handler(
    request: Json<RewriteRequest>,
    state: &State<AppState>,
) -> ApiResult<ResumeDocument> {
    let target = request.into_inner().target;

    let snapshot = state.session.lock().await.begin_rewrite(target)?;
    info!("AI rewrite requested for {}", snapshot.target);

    let text = snapshot.run(&state.critique).await;

    let mut session = state.session.lock().await;
    let doc = session.finish_rewrite(snapshot, text).await.clone();
    Ok(Json(DataResponse::success("Rewrite applied".to_string(), doc)))
}

pub async fn critique_handler(state: &State<AppState>) -> Json<DataResponse<CritiqueResult>> {
    let doc = state.session.lock().await.document().clone();
    let result = state.critique.critique(&doc).await;
    Json(DataResponse::success(
        format!("Score {}", result.score),
        result,
    ))
}

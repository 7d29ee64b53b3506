// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::ai::{CritiqueClient, TextGenerator};
use crate::core::ConfigManager;
use crate::editor::Edit;
use crate::export::{ExportFormat, Exporter, PdfExporter};
use crate::session::ResumeSession;
use crate::store::ResumeStore;
use crate::types::{CritiqueResult, ResumeDocument};
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, delete, get, options, patch, post, routes, Build, Request, Response, Rocket, State};
use tokio::sync::Mutex;
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, PATCH, DELETE, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new(
            "Access-Control-Expose-Headers",
            "Content-Disposition",
        ));
    }
}

// Document routes

#[get("/resume")]
pub async fn get_resume(state: &State<AppState>) -> Json<DataResponse<ResumeDocument>> {
    handlers::get_resume_handler(state).await
}

#[patch("/resume", data = "<edit>")]
pub async fn edit_resume(
    edit: Json<Edit>,
    state: &State<AppState>,
) -> Json<DataResponse<ResumeDocument>> {
    handlers::edit_resume_handler(edit, state).await
}

#[delete("/resume")]
pub async fn reset_resume(state: &State<AppState>) -> ApiResult<ResumeDocument> {
    handlers::reset_resume_handler(state).await
}

#[get("/preview?<height>&<width>&<scale>")]
pub async fn preview(
    height: Option<f64>,
    width: Option<f64>,
    scale: Option<f64>,
    state: &State<AppState>,
) -> RawHtml<String> {
    handlers::preview_handler(height, width, scale, state).await
}

#[get("/pages?<height>&<width>")]
pub async fn pages(height: f64, width: f64, state: &State<AppState>) -> Json<DataResponse<PagesData>> {
    handlers::pages_handler(height, width, state).await
}

// Downloads

#[get("/export/<format>")]
pub async fn export(
    format: Result<ExportFormat, &str>,
    state: &State<AppState>,
) -> Result<FileResponse, ApiError> {
    handlers::export_handler(format, state).await
}

// AI actions

#[post("/ai/rewrite", data = "<request>")]
pub async fn ai_rewrite(
    request: Json<RewriteRequest>,
    state: &State<AppState>,
) -> ApiResult<ResumeDocument> {
    handlers::rewrite_handler(request, state).await
}

#[post("/ai/critique")]
pub async fn ai_critique(state: &State<AppState>) -> Json<DataResponse<CritiqueResult>> {
    handlers::critique_handler(state).await
}

#[get("/health")]
pub async fn health(state: &State<AppState>) -> Json<TextResponse> {
    handlers::health_handler(state).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Resource not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Check the endpoint path".to_string()],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request could not be understood".to_string(),
        "UNPROCESSABLE".to_string(),
        vec![
            "Check the edit's \"op\" tag and field names".to_string(),
            "Numeric query parameters must be numbers".to_string(),
        ],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec!["Try again in a few moments".to_string()],
    ))
}

/// Assemble the server around an existing state
pub fn build_rocket(state: AppState) -> Rocket<Build> {
    mount_api(rocket::build(), state)
}

fn mount_api(rocket: Rocket<Build>, state: AppState) -> Rocket<Build> {
    rocket
        .attach(Cors)
        .manage(state)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![
                get_resume,
                edit_resume,
                reset_resume,
                preview,
                pages,
                export,
                ai_rewrite,
                ai_critique,
                health,
                options,
            ],
        )
}

/// Build the state from configuration
pub async fn app_state(
    config: &ConfigManager,
    generator: Box<dyn TextGenerator>,
) -> AppState {
    let store = ResumeStore::new(config.storage_file());
    AppState {
        session: Mutex::new(ResumeSession::open(store).await),
        exporter: Exporter::new(PdfExporter::new(config.pdf_converter.clone())),
        critique: CritiqueClient::new(generator),
    }
}

// Main server start function
pub async fn start_web_server(config: ConfigManager, generator: Box<dyn TextGenerator>) -> Result<()> {
    config.ensure_directories().await?;

    let state = app_state(&config, generator).await;

    info!("Starting résumé builder API server");
    info!("Storage: {}", config.storage_file().display());
    info!("Server: http://0.0.0.0:{}", config.port);

    let figment = rocket::Config::figment()
        .merge(("port", config.port))
        .merge(("address", "0.0.0.0"));

    mount_api(rocket::custom(figment), state)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResumeResult;
    use crate::store::STORAGE_FILE_NAME;
    use rocket::http::ContentType;
    use rocket::local::asynchronous::Client;
    use serde_json::Value;

    struct CannedGenerator {
        credential: bool,
        reply: &'static str,
    }

    #[rocket::async_trait]
    impl TextGenerator for CannedGenerator {
        fn has_credential(&self) -> bool {
            self.credential
        }

        async fn generate(&self, _prompt: &str) -> ResumeResult<String> {
            Ok(self.reply.to_string())
        }

        async fn generate_json(&self, _prompt: &str, _schema: &Value) -> ResumeResult<String> {
            Ok(self.reply.to_string())
        }
    }

    async fn client(dir: &tempfile::TempDir, generator: CannedGenerator) -> Client {
        let store = ResumeStore::new(dir.path().join(STORAGE_FILE_NAME));
        let generator: Box<dyn TextGenerator> = Box::new(generator);
        let state = AppState {
            session: Mutex::new(ResumeSession::with_document(store, ResumeDocument::seed())),
            exporter: Exporter::new(PdfExporter::new("devresume-test-missing-converter")),
            critique: CritiqueClient::new(generator),
        };
        Client::tracked(build_rocket(state)).await.unwrap()
    }

    fn offline() -> CannedGenerator {
        CannedGenerator {
            credential: false,
            reply: "",
        }
    }

    #[rocket::async_test]
    async fn test_get_resume_returns_envelope() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(&dir, offline()).await;

        let response = client.get("/api/resume").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["type"], "data");
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["personalInfo"]["fullName"], "张伟");
    }

    #[rocket::async_test]
    async fn test_patch_applies_edit_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(&dir, offline()).await;

        let response = client
            .patch("/api/resume")
            .header(ContentType::JSON)
            .body(r#"{"op": "setPersonal", "field": "fullName", "value": "李娜"}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["data"]["personalInfo"]["fullName"], "李娜");

        let saved = std::fs::read_to_string(dir.path().join(STORAGE_FILE_NAME)).unwrap();
        assert!(saved.contains("李娜"));
    }

    #[rocket::async_test]
    async fn test_unknown_edit_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(&dir, offline()).await;

        let response = client
            .patch("/api/resume")
            .header(ContentType::JSON)
            .body(r#"{"op": "renameEverything"}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::UnprocessableEntity);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["error_code"], "UNPROCESSABLE");
    }

    #[rocket::async_test]
    async fn test_markdown_download() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(&dir, offline()).await;

        let response = client.get("/api/export/markdown").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let disposition = response
            .headers()
            .get_one("Content-Disposition")
            .unwrap()
            .to_string();
        assert!(disposition.ends_with("filename*=UTF-8''%E5%BC%A0%E4%BC%9F_%E7%AE%80%E5%8E%86.md"));
        assert_eq!(
            response.headers().get_one("Content-Type"),
            Some("text/markdown; charset=utf-8")
        );
        let body = response.into_string().await.unwrap();
        assert!(body.starts_with("# 张伟\n"));
    }

    #[rocket::async_test]
    async fn test_missing_pdf_converter_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(&dir, offline()).await;

        let response = client.get("/api/export/pdf").dispatch().await;
        assert_eq!(response.status(), Status::ServiceUnavailable);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["error"], "PDF 生成库尚未加载，请稍候。");
    }

    #[rocket::async_test]
    async fn test_unknown_export_format() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(&dir, offline()).await;

        let response = client.get("/api/export/docx").dispatch().await;
        assert_eq!(response.status(), Status::NotFound);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["error_code"], "UNKNOWN_FORMAT");
    }

    #[rocket::async_test]
    async fn test_critique_without_credential() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(&dir, offline()).await;

        let response = client.post("/api/ai/critique").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["data"]["score"], 0);
        assert_eq!(body["data"]["missingKeywords"][0], "API Key Missing");
    }

    #[rocket::async_test]
    async fn test_rewrite_writes_result_into_target() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(
            &dir,
            CannedGenerator {
                credential: true,
                reply: "  主导前端架构升级，首屏时间降低 50%。 ",
            },
        )
        .await;

        let response = client
            .post("/api/ai/rewrite")
            .header(ContentType::JSON)
            .body(r#"{"target": {"kind": "highlight", "experienceId": "1", "index": 0}}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(
            body["data"]["experience"][0]["highlights"][0],
            "主导前端架构升级，首屏时间降低 50%。"
        );
    }

    #[rocket::async_test]
    async fn test_rewrite_of_missing_target() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(&dir, offline()).await;

        let response = client
            .post("/api/ai/rewrite")
            .header(ContentType::JSON)
            .body(r#"{"target": {"kind": "highlight", "experienceId": "nope", "index": 0}}"#)
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::NotFound);
    }

    #[rocket::async_test]
    async fn test_pages_and_preview() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(&dir, offline()).await;

        let response = client.get("/api/pages?height=2300&width=794").dispatch().await;
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["data"]["pages"], 3);

        // zero width keeps the previous count
        let response = client.get("/api/pages?height=100&width=0").dispatch().await;
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["data"]["pages"], 3);

        let response = client.get("/api/preview?scale=0.75").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let html = response.into_string().await.unwrap();
        assert!(html.contains("transform: scale(0.75)"));
        assert!(html.contains("min-height: 891mm"));
    }

    #[rocket::async_test]
    async fn test_delete_resets_to_seed() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(&dir, offline()).await;

        client
            .patch("/api/resume")
            .header(ContentType::JSON)
            .body(r#"{"op": "setSelfEvaluation", "value": ""}"#)
            .dispatch()
            .await;
        let response = client.delete("/api/resume").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        let body: Value = response.into_json().await.unwrap();
        assert_ne!(body["data"]["selfEvaluation"], "");
        assert!(!dir.path().join(STORAGE_FILE_NAME).exists());
    }

    #[rocket::async_test]
    async fn test_health_and_cors() {
        let dir = tempfile::tempdir().unwrap();
        let client = client(&dir, offline()).await;

        let response = client.get("/api/health").dispatch().await;
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(
            response.headers().get_one("Access-Control-Allow-Origin"),
            Some("*")
        );
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["message"], "OK (AI credential missing)");
    }
}

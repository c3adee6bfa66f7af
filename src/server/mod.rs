//! AX-017: HTTP service: `POST /chat`, `GET /healthz`, `GET /api/demo/cards`.
//!
//! Handlers share one immutable [`Router`]. Generation touches the
//! filesystem, so it runs on the blocking pool.

pub mod demo;

use crate::core::error::AuroraError;
use crate::core::pipeline::{Generation, Router};
use crate::core::types::{IntentKind, Lang, Renderer};
use crate::journal::eventlog::now_rfc3339;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;

/// Name reported by `/healthz`.
pub const SERVICE_NAME: &str = "aurora-x";

pub type AppState = Arc<Router>;

/// Body of `POST /chat`.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub prompt: Option<String>,
    #[serde(default)]
    pub lang: Option<String>,
}

/// Successful `POST /chat` response. Exactly one of `file` / `files` is set.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub ok: bool,
    pub kind: IntentKind,
    pub lang: Lang,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    pub hint: String,
    pub reason: String,
    pub name: String,
    pub dir: String,
    pub renderer: Renderer,
    pub digest: String,
}

impl From<&Generation> for ChatResponse {
    fn from(g: &Generation) -> Self {
        let mut paths: Vec<String> = g
            .project
            .files
            .iter()
            .map(|rel| g.project.dir.join(rel).display().to_string())
            .collect();
        let (file, files) = if paths.len() == 1 {
            (paths.pop(), None)
        } else {
            (None, Some(paths))
        };
        Self {
            ok: true,
            kind: g.intent.kind,
            lang: g.choice.lang,
            file,
            files,
            hint: g.output.hint.clone(),
            reason: g.choice.reason.clone(),
            name: g.intent.name.clone(),
            dir: g.project.dir.display().to_string(),
            renderer: g.output.renderer,
            digest: g.project.digest.clone(),
        }
    }
}

/// Error response: `{"ok": false, "err": "..."}` with the error's status.
#[derive(Debug)]
pub struct ApiError(pub AuroraError);

impl From<AuroraError> for ApiError {
    fn from(e: AuroraError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_client_error() {
            tracing::warn!(status = status.as_u16(), error = %self.0, "rejected request");
        } else {
            tracing::error!(status = status.as_u16(), error = %self.0, "request failed");
        }
        (status, Json(json!({"ok": false, "err": self.0.to_string()}))).into_response()
    }
}

/// Build the axum application.
pub fn app(router: Arc<Router>) -> axum::Router {
    axum::Router::new()
        .route("/chat", post(chat))
        .route("/healthz", get(healthz))
        .route("/api/demo/cards", get(demo_cards))
        .with_state(router)
}

/// Parse a `/chat` body. An empty body is a request without a prompt.
pub fn parse_chat_request(body: &[u8]) -> Result<ChatRequest, AuroraError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ChatRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| AuroraError::InvalidJson(e.to_string()))
}

async fn chat(State(router): State<AppState>, body: Bytes) -> Result<Json<ChatResponse>, ApiError> {
    let req = parse_chat_request(&body)?;
    let prompt = req.prompt.unwrap_or_default();
    if prompt.trim().is_empty() {
        return Err(AuroraError::MissingPrompt.into());
    }

    let generation = tokio::task::spawn_blocking(move || router.generate(&prompt, req.lang.as_deref()))
        .await
        .map_err(|e| AuroraError::Render(format!("generation task failed: {}", e)))??;
    Ok(Json(ChatResponse::from(&generation)))
}

async fn healthz(State(router): State<AppState>) -> Json<Value> {
    let renderers = [
        Renderer::FlaskApp,
        Renderer::PythonCli,
        Renderer::PythonLib,
        Renderer::GoService,
        Renderer::RustCli,
        Renderer::CsharpWebApi,
    ]
    .map(|r| r.to_string());
    Json(json!({
        "ok": true,
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "classifier": "ok",
            "languages": Lang::ALL.map(|l| l.to_string()),
            "renderers": renderers,
            "output_dir": router.output_dir().display().to_string(),
            "journal": router.journal_enabled(),
        },
        "ts": now_rfc3339(),
    }))
}

async fn demo_cards() -> Json<Value> {
    let cards = demo::demo_cards();
    Json(json!({"ok": true, "count": cards.len(), "cards": cards}))
}

/// Bind and serve until Ctrl-C.
pub async fn serve(router: Arc<Router>, addr: SocketAddr) -> Result<(), String> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| format!("cannot bind {}: {}", addr, e))?;
    let local = listener
        .local_addr()
        .map_err(|e| format!("cannot read local address: {}", e))?;
    tracing::info!(addr = %local, output_dir = %router.output_dir().display(), "serving");

    axum::serve(listener, app(router))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("server error: {}", e))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("shutdown requested");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AuroraConfig;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use std::path::Path;
    use tower::ServiceExt;

    fn test_app(dir: &Path) -> axum::Router {
        let mut config = AuroraConfig::default();
        config.output.dir = dir.to_path_buf();
        app(Arc::new(Router::new(&config)))
    }

    async fn post_chat(app: axum::Router, body: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_ax017_empty_prompt_is_400() {
        let tmp = tempfile::tempdir().unwrap();
        for body in [r#"{"prompt": ""}"#, r#"{"prompt": "   "}"#, "{}", ""] {
            let (status, json) = post_chat(test_app(tmp.path()), body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", body);
            assert_eq!(json, json!({"ok": false, "err": "missing prompt"}));
        }
    }

    #[tokio::test]
    async fn test_ax017_invalid_json_is_400() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, json) = post_chat(test_app(tmp.path()), "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["ok"], false);
        assert!(json["err"].as_str().unwrap().starts_with("invalid json:"));
    }

    #[tokio::test]
    async fn test_ax017_unsupported_lang_is_400() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, json) =
            post_chat(test_app(tmp.path()), r#"{"prompt": "timer", "lang": "cobol"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["err"], "unsupported lang: cobol");
    }

    #[tokio::test]
    async fn test_ax017_timer_single_file() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, json) =
            post_chat(test_app(tmp.path()), r#"{"prompt": "make a futuristic timer ui"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ok"], true);
        assert_eq!(json["kind"], "web_app");
        assert_eq!(json["lang"], "python");
        assert_eq!(json["hint"], "PORT=8000 python app.py");
        assert!(json.get("files").is_none());

        let file = json["file"].as_str().unwrap();
        assert!(file.ends_with("app.py"));
        let src = std::fs::read_to_string(file).unwrap();
        assert!(src.contains("Futuristic UI Timer"));
    }

    #[tokio::test]
    async fn test_ax017_multi_file_uses_files() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, json) = post_chat(
            test_app(tmp.path()),
            r#"{"prompt": "fast microservice web api", "lang": "go"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["lang"], "go");
        assert_eq!(json["reason"], "requested explicitly");
        assert!(json.get("file").is_none());
        let files = json["files"].as_array().unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|f| f.as_str().unwrap().ends_with("main.go")));
    }

    #[tokio::test]
    async fn test_ax017_write_failure_is_500() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocked");
        std::fs::write(&blocker, "file, not dir").unwrap();
        let (status, json) = post_chat(test_app(&blocker), r#"{"prompt": "reverse a string"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["ok"], false);
    }

    #[tokio::test]
    async fn test_ax017_healthz() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, json) = get_json(test_app(tmp.path()), "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["ok"], true);
        assert_eq!(json["service"], SERVICE_NAME);
        assert_eq!(json["components"]["renderers"].as_array().unwrap().len(), 6);
        assert!(json["ts"].as_str().unwrap().ends_with('Z'));
    }

    #[tokio::test]
    async fn test_ax017_demo_cards() {
        let tmp = tempfile::tempdir().unwrap();
        let (status, json) = get_json(test_app(tmp.path()), "/api/demo/cards").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["count"], json["cards"].as_array().unwrap().len());
    }

    #[test]
    fn test_ax017_parse_chat_request() {
        let req = parse_chat_request(br#"{"prompt": "x", "lang": null}"#).unwrap();
        assert_eq!(req.prompt.as_deref(), Some("x"));
        assert!(req.lang.is_none());
        assert!(parse_chat_request(b"  \n").unwrap().prompt.is_none());
        assert!(matches!(
            parse_chat_request(b"[1,2]"),
            Err(AuroraError::InvalidJson(_))
        ));
    }
}

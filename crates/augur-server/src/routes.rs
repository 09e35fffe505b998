//! Route handlers for the bridge API.

use crate::images;
use crate::state::AppState;
use augur_core::InteractionRequest;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Upper bound on the JSON body; image payloads arrive base64-inline.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct ConsultRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub images: Vec<ImagePayload>,
}

#[derive(Debug, Deserialize)]
pub struct ImagePayload {
    /// Base64 data URL, e.g. "data:image/png;base64,…".
    pub data: String,
}

/// Build the bridge router. CORS is wide open: the expected caller is a
/// browser extension or local tool on an arbitrary origin.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/consult", post(consult))
        .route("/healthz", get(healthz))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn consult(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConsultRequest>,
) -> Response {
    tracing::info!(
        text_len = req.text.len(),
        images = req.images.len(),
        "consult request"
    );

    let payloads: Vec<String> = req.images.into_iter().map(|i| i.data).collect();
    let staged = match images::stage(&payloads) {
        Ok(staged) => staged,
        Err(e) => {
            tracing::warn!("rejecting request: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response();
        }
    };

    let request = InteractionRequest::text(req.text).with_attachments(staged.paths());

    // One interaction at a time; later requests queue here.
    let mut manager = state.manager.lock().await;
    let result = match manager.ensure_ready().await {
        Ok(session) => session.interact(&request).await,
        Err(e) => Err(e),
    };
    drop(manager);
    // Interaction over: the staged temp images can go.
    drop(staged);

    match result {
        Ok(answer) => {
            tracing::info!(chars = answer.len(), "answer extracted");
            Json(serde_json::json!({ "answer": answer })).into_response()
        }
        Err(e) => {
            tracing::error!("interaction failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use augur_browser::SessionManager;
    use augur_core::BridgeConfig;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_state() -> Arc<AppState> {
        let config = BridgeConfig {
            target_url: "https://example.com/".to_string(),
            profile_dir: std::env::temp_dir().join("augur-route-tests"),
            chrome_path: None,
            selectors: Default::default(),
            timings: Default::default(),
        };
        Arc::new(AppState::new(SessionManager::new(config)))
    }

    #[tokio::test]
    async fn test_healthz_reports_ok() {
        let response = build_router(test_state())
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(body.as_ref(), br#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn test_malformed_image_is_rejected_before_the_browser_starts() {
        let state = test_state();
        let payload = r#"{"text":"hi","images":[{"data":"data:image/png;base64,%%%"}]}"#;

        let response = build_router(state.clone())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/consult")
                    .header("content-type", "application/json")
                    .body(Body::from(payload))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["error"].as_str().unwrap().contains("base64"));

        // The session was never touched, let alone launched.
        assert!(!state.manager.lock().await.is_ready());
    }

    #[tokio::test]
    async fn test_consult_requires_json() {
        let response = build_router(test_state())
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/consult")
                    .body(Body::from("not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    #[test]
    fn test_request_shape_tolerates_missing_fields() {
        let req: ConsultRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.text, "");
        assert!(req.images.is_empty());
    }
}

pub mod collab;
pub mod pipeline;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use rozgar_core::store::DocumentStore;
use rozgar_core::traits::{Generator, Translator};
use rozgar_core::types::{ConversationTurn, Intent};
use rozgar_retrieval::HybridRetriever;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    pub retriever: Arc<HybridRetriever>,
    pub generator: Arc<dyn Generator>,
    pub translator: Arc<dyn Translator>,
    pub admin_token: Option<String>,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_language")]
    pub language: String,
    pub session_id: Option<String>,
    #[serde(default)]
    pub history: Vec<ConversationTurn>,
}

fn default_language() -> String {
    "en".to_string()
}

#[derive(Serialize)]
pub struct ChatResponse {
    pub text: String,
    pub session_id: String,
    pub response_id: String,
    pub original_language: String,
    pub meta: ChatMeta,
}

#[derive(Serialize)]
pub struct ChatMeta {
    pub intent: Intent,
    pub sources: Vec<String>,
    pub translated_query: Option<String>,
    pub took_s: f64,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub indexed: usize,
}

pub fn build_app(state: AppState) -> Router {
    // CORS: comma-separated CORS_ALLOW_ORIGIN, or allow any by default.
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/chat", post(chat_handler))
        .route("/admin/refresh", post(refresh_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let start = std::time::Instant::now();
    let session_id = payload
        .session_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let response_id = uuid::Uuid::new_v4().to_string();

    let outcome = pipeline::run_chat(
        state.retriever.as_ref(),
        state.generator.as_ref(),
        state.translator.as_ref(),
        &payload.message,
        &payload.language,
        &payload.history,
    )
    .await;

    Json(ChatResponse {
        text: outcome.text,
        session_id,
        response_id,
        original_language: payload.language,
        meta: ChatMeta {
            intent: outcome.intent,
            sources: outcome.sources,
            translated_query: outcome.translated_query,
            took_s: start.elapsed().as_secs_f64(),
        },
    })
}

/// Re-read the store and swap in a fresh lexical index. Gated on the admin
/// token; meant to be hit after an ingestion run completes.
pub async fn refresh_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RefreshResponse>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    match state.store.list_all() {
        Ok(docs) => {
            let indexed = state.retriever.rebuild(docs);
            Ok(Json(RefreshResponse { indexed }))
        }
        Err(error) => {
            // Keep serving the previous index.
            tracing::error!(%error, "refresh failed, keeping current index");
            Err((StatusCode::INTERNAL_SERVER_ERROR, error.to_string()))
        }
    }
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(token) => token,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers
        .get("X-ADMIN-TOKEN")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}

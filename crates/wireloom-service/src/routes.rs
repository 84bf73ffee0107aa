//! HTTP surface of the translation service.
//!
//! Endpoints:
//!   POST /translations → translate a flow JSON document into XML
//!   GET  /health       → liveness probe
//!
//! A translation response carries the document together with the
//! per-node errors, so a partly broken flow still yields usable XML.
//! Structural failures map to a status code instead: 400 for a body
//! that is not a valid flow, 422 when the flow references an
//! unregistered namespace, 500 for anything else. Every translation
//! gets a request id that correlates its log lines.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use flow_model::{Flow, SequencedFlowGraph};
use xml_engine::{EngineError, GraphTranslator, TranslationError};

type AppState = Arc<GraphTranslator>;

/// Build the service router
pub fn router(translator: Arc<GraphTranslator>) -> Router {
    Router::new()
        .route("/translations", post(translate))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(translator)
}

/// Response body of a translation call
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslationResponse {
    /// The complete XML document
    pub data: String,
    /// Per-node failures, empty on full success
    pub errors: Vec<NodeErrorBody>,
}

/// One per-node failure as reported to the client
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeErrorBody {
    /// Id of the node that could not be encoded
    pub node_id: String,
    /// Human-readable cause
    pub message: String,
}

impl From<&TranslationError> for NodeErrorBody {
    fn from(error: &TranslationError) -> Self {
        Self {
            node_id: error.node_id.clone(),
            message: error.cause.to_string(),
        }
    }
}

// POST /translations
async fn translate(State(translator): State<AppState>, body: String) -> Response {
    let request_id = Uuid::new_v4();

    let flow: Flow = match serde_json::from_str(&body) {
        Ok(flow) => flow,
        Err(e) => {
            log::warn!("[{request_id}] rejected body: {e}");
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };
    let graph = match SequencedFlowGraph::from_flow(flow) {
        Ok(graph) => graph,
        Err(e) => {
            log::warn!("[{request_id}] rejected flow: {e}");
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    log::info!(
        "[{request_id}] translating flow with {} node(s), {} edge(s)",
        graph.node_count(),
        graph.edge_count()
    );
    match translator.translate_to_string(&graph) {
        Ok((document, errors)) => {
            if !errors.is_empty() {
                log::warn!("[{request_id}] {} node(s) failed to encode", errors.len());
            }
            let errors = errors.iter().map(NodeErrorBody::from).collect();
            Json(TranslationResponse {
                data: document,
                errors,
            })
            .into_response()
        }
        Err(e @ EngineError::UnregisteredNamespace(_)) => {
            log::warn!("[{request_id}] translation aborted: {e}");
            error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
        Err(e) => {
            log::error!("[{request_id}] translation failed: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

// GET /health
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

// Axum server module
//
// Purpose: form-driven CRUD over the sections hierarchy.
// Every mutating route performs one store write and redirects to `/`,
// which re-reads the whole collection and renders it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use askama::Template;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::store::{SectionStore, StoreError};
use crate::web::handlers::{forms, pages};

// ============================================================================
// Application State
// ============================================================================

/// Store handle shared by every handler; created once at process start
pub struct AppState<S> {
    pub store: Arc<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: SectionStore> AppState<S> {
    pub fn new(store: S) -> Self {
        Self::from_shared(Arc::new(store))
    }

    pub fn from_shared(store: Arc<S>) -> Self {
        Self { store }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router<S: SectionStore>(state: AppState<S>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Listing (every mutation redirects here)
        .route("/", get(pages::index_page::<S>))

        // Create
        .route("/add_section", post(forms::add_section::<S>))
        .route("/add_subsection/:section_id/subsection", post(forms::add_subsection::<S>))
        .route("/add_description/:section_id/:subsection_id", post(forms::add_description::<S>))
        .route("/add_rating/:section_id/:subsection_id", post(forms::add_rating::<S>))
        .route(
            "/add_characteristic/:section_id/:subsection_id",
            post(forms::add_characteristic::<S>),
        )

        // Update
        .route("/edit_section/:section_id", post(forms::edit_section::<S>))

        // Delete (cascades through embedded documents)
        .route("/delete_section/:section_id", post(forms::delete_section::<S>))
        .route(
            "/delete_subsection/:section_id/:subsection_id",
            post(forms::delete_subsection::<S>),
        )
        .route(
            "/delete_description/:section_id/:subsection_id/:description_id",
            post(forms::delete_description::<S>),
        )
        .route(
            "/delete_rating/:section_id/:subsection_id/:description_id/:rating_id",
            post(forms::delete_rating::<S>),
        )

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Parse a path segment into an ObjectId, rejecting anything that is not 24 hex chars
pub(crate) fn parse_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::InvalidId(raw.to_string()))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    InvalidId(String),
    Store(StoreError),
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

#[derive(Template)]
#[template(path = "pages/error.html")]
struct ErrorTemplate {
    status: u16,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidId(raw) => {
                tracing::warn!("Rejected malformed identifier '{}'", raw);
                (StatusCode::BAD_REQUEST, format!("Malformed identifier: {}", raw))
            }
            AppError::Store(err) => {
                tracing::error!("Store error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "The database request failed".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let page = ErrorTemplate {
            status: status.as_u16(),
            message,
        };
        let body = page
            .render()
            .unwrap_or_else(|e| format!("Template error: {}", e));

        (status, axum::response::Html(body)).into_response()
    }
}

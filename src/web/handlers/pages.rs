// Page handlers for HTML rendering with Askama

use askama::Template;
use axum::{extract::State, response::Html};

use crate::api_server::{AppError, AppState};
use crate::model::Section;
use crate::store::SectionStore;

// ============================================================================
// Index Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub sections: Vec<Section>,
}

/// Full collection, storage order, rendered three levels deep
pub async fn index_page<S: SectionStore>(
    State(state): State<AppState<S>>,
) -> Result<Html<String>, AppError> {
    let sections = state.store.list_sections().await?;
    tracing::debug!("Rendering {} sections", sections.len());

    let template = IndexTemplate {
        title: "Sections".to_string(),
        sections,
    };
    let body = template
        .render()
        .map_err(|e| AppError::Internal(format!("Template error: {}", e)))?;
    Ok(Html(body))
}

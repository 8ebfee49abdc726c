//! Section Tree
//!
//! Form-driven web front end over a three-level hierarchy stored in a
//! document database: sections own subsections, subsections own
//! descriptions, ratings and characteristics.
//!
//! - `model`: embedded document types
//! - `store/`: store access layer (MongoDB + in-memory backends)
//! - `config`: environment-driven server configuration
//! - `api_server` / `web/`: Axum router, form handlers, Askama pages (feature `api`)

pub mod config;
pub mod model;
pub mod store;

#[cfg(feature = "api")]
pub mod api_server;
#[cfg(feature = "api")]
pub mod web;

// Re-export commonly used types
pub use config::{ConfigError, ServerConfig, StoreBackend};
pub use model::{Description, Rating, Section, Subsection};
pub use store::{MemorySectionStore, MongoSectionStore, SectionStore, StoreError};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppError, AppState};

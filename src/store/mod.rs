//! Store Access Layer
//!
//! Each logical operation maps to a single filtered write against the
//! sections collection. Mutations report how many section documents the
//! filter matched; zero means the identifiers pointed at nothing and the
//! write was a no-op, which callers treat as success.
//!
//! Backends:
//! - `mongo`: MongoDB collection (production)
//! - `memory`: `RwLock<Vec<Section>>` with the same matching rules (tests, local runs)

pub mod memory;
pub mod mongo;

use std::future::Future;

use mongodb::bson::oid::ObjectId;

use crate::model::Section;

pub use memory::MemorySectionStore;
pub use mongo::MongoSectionStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("failed to encode document: {0}")]
    Encode(#[from] mongodb::bson::ser::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Number of section documents matched by a mutation's filter
pub type Matched = u64;

pub trait SectionStore: Send + Sync + 'static {
    /// All sections at full depth, in storage order
    fn list_sections(&self) -> impl Future<Output = StoreResult<Vec<Section>>> + Send;

    /// Insert a section with an empty subsection sequence
    fn add_section(&self, name: String) -> impl Future<Output = StoreResult<ObjectId>> + Send;

    fn add_subsection(
        &self,
        section_id: ObjectId,
        name: String,
    ) -> impl Future<Output = StoreResult<Matched>> + Send;

    fn add_description(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
        text: String,
    ) -> impl Future<Output = StoreResult<Matched>> + Send;

    fn add_rating(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
        value: String,
    ) -> impl Future<Output = StoreResult<Matched>> + Send;

    fn add_characteristic(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
        characteristic: String,
    ) -> impl Future<Output = StoreResult<Matched>> + Send;

    /// Overwrite the section name; subsections are left untouched
    fn rename_section(
        &self,
        section_id: ObjectId,
        name: String,
    ) -> impl Future<Output = StoreResult<Matched>> + Send;

    /// Remove the section document and everything embedded in it
    fn delete_section(&self, section_id: ObjectId) -> impl Future<Output = StoreResult<Matched>> + Send;

    fn delete_subsection(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
    ) -> impl Future<Output = StoreResult<Matched>> + Send;

    fn delete_description(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
        description_id: ObjectId,
    ) -> impl Future<Output = StoreResult<Matched>> + Send;

    /// Ratings hang off the subsection, so no description id takes part in the match
    fn delete_rating(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
        rating_id: ObjectId,
    ) -> impl Future<Output = StoreResult<Matched>> + Send;
}

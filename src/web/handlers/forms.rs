// Form submission handlers
//
// Each handler: typed path ids + typed form body -> one store write -> 303 to `/`.
// Path ids are parsed before the store is touched; a missing form field is
// rejected by the `Form` extractor (422) and never reaches the store.

use axum::{
    extract::{Path, State},
    response::Redirect,
    Form,
};
use mongodb::bson::oid::ObjectId;
use serde::Deserialize;

use crate::api_server::{parse_id, AppError, AppState};
use crate::store::{Matched, SectionStore};

// ============================================================================
// Path Schemas
// ============================================================================

#[derive(Deserialize, Debug)]
pub struct SectionPath {
    section_id: String,
}

impl SectionPath {
    fn parse(&self) -> Result<ObjectId, AppError> {
        parse_id(&self.section_id)
    }
}

#[derive(Deserialize, Debug)]
pub struct SubsectionPath {
    section_id: String,
    subsection_id: String,
}

impl SubsectionPath {
    fn parse(&self) -> Result<(ObjectId, ObjectId), AppError> {
        Ok((parse_id(&self.section_id)?, parse_id(&self.subsection_id)?))
    }
}

#[derive(Deserialize, Debug)]
pub struct DescriptionPath {
    section_id: String,
    subsection_id: String,
    description_id: String,
}

#[derive(Deserialize, Debug)]
pub struct RatingPath {
    section_id: String,
    subsection_id: String,
    description_id: String,
    rating_id: String,
}

// ============================================================================
// Form Schemas (field names match the rendered forms)
// ============================================================================

#[derive(Deserialize, Debug)]
pub struct AddSectionForm {
    pub section_name: String,
}

#[derive(Deserialize, Debug)]
pub struct AddSubsectionForm {
    pub subsection_name: String,
}

#[derive(Deserialize, Debug)]
pub struct AddDescriptionForm {
    pub description: String,
}

#[derive(Deserialize, Debug)]
pub struct AddRatingForm {
    pub description_rating: String,
}

#[derive(Deserialize, Debug)]
pub struct AddCharacteristicForm {
    pub characteristic: String,
}

#[derive(Deserialize, Debug)]
pub struct EditSectionForm {
    pub new_section_name: String,
}

// ============================================================================
// Handlers
// ============================================================================

fn back_to_index(operation: &str, matched: Matched) -> Redirect {
    if matched == 0 {
        tracing::debug!("{}: no document matched, nothing changed", operation);
    }
    Redirect::to("/")
}

pub async fn add_section<S: SectionStore>(
    State(state): State<AppState<S>>,
    Form(form): Form<AddSectionForm>,
) -> Result<Redirect, AppError> {
    let id = state.store.add_section(form.section_name).await?;
    tracing::info!("Added section {}", id);
    Ok(Redirect::to("/"))
}

pub async fn add_subsection<S: SectionStore>(
    State(state): State<AppState<S>>,
    Path(path): Path<SectionPath>,
    Form(form): Form<AddSubsectionForm>,
) -> Result<Redirect, AppError> {
    let section_id = path.parse()?;
    let matched = state
        .store
        .add_subsection(section_id, form.subsection_name)
        .await?;
    tracing::info!("Added subsection to section {}", section_id);
    Ok(back_to_index("add_subsection", matched))
}

pub async fn add_description<S: SectionStore>(
    State(state): State<AppState<S>>,
    Path(path): Path<SubsectionPath>,
    Form(form): Form<AddDescriptionForm>,
) -> Result<Redirect, AppError> {
    let (section_id, subsection_id) = path.parse()?;
    let matched = state
        .store
        .add_description(section_id, subsection_id, form.description)
        .await?;
    tracing::info!("Added description to {}/{}", section_id, subsection_id);
    Ok(back_to_index("add_description", matched))
}

pub async fn add_rating<S: SectionStore>(
    State(state): State<AppState<S>>,
    Path(path): Path<SubsectionPath>,
    Form(form): Form<AddRatingForm>,
) -> Result<Redirect, AppError> {
    let (section_id, subsection_id) = path.parse()?;
    let matched = state
        .store
        .add_rating(section_id, subsection_id, form.description_rating)
        .await?;
    tracing::info!("Added rating to {}/{}", section_id, subsection_id);
    Ok(back_to_index("add_rating", matched))
}

pub async fn add_characteristic<S: SectionStore>(
    State(state): State<AppState<S>>,
    Path(path): Path<SubsectionPath>,
    Form(form): Form<AddCharacteristicForm>,
) -> Result<Redirect, AppError> {
    let (section_id, subsection_id) = path.parse()?;
    let matched = state
        .store
        .add_characteristic(section_id, subsection_id, form.characteristic)
        .await?;
    tracing::info!("Added characteristic to {}/{}", section_id, subsection_id);
    Ok(back_to_index("add_characteristic", matched))
}

pub async fn edit_section<S: SectionStore>(
    State(state): State<AppState<S>>,
    Path(path): Path<SectionPath>,
    Form(form): Form<EditSectionForm>,
) -> Result<Redirect, AppError> {
    let section_id = path.parse()?;
    let matched = state
        .store
        .rename_section(section_id, form.new_section_name)
        .await?;
    tracing::info!("Renamed section {}", section_id);
    Ok(back_to_index("edit_section", matched))
}

pub async fn delete_section<S: SectionStore>(
    State(state): State<AppState<S>>,
    Path(path): Path<SectionPath>,
) -> Result<Redirect, AppError> {
    let section_id = path.parse()?;
    let matched = state.store.delete_section(section_id).await?;
    tracing::info!("Deleted section {}", section_id);
    Ok(back_to_index("delete_section", matched))
}

pub async fn delete_subsection<S: SectionStore>(
    State(state): State<AppState<S>>,
    Path(path): Path<SubsectionPath>,
) -> Result<Redirect, AppError> {
    let (section_id, subsection_id) = path.parse()?;
    let matched = state
        .store
        .delete_subsection(section_id, subsection_id)
        .await?;
    tracing::info!("Deleted subsection {}/{}", section_id, subsection_id);
    Ok(back_to_index("delete_subsection", matched))
}

pub async fn delete_description<S: SectionStore>(
    State(state): State<AppState<S>>,
    Path(path): Path<DescriptionPath>,
) -> Result<Redirect, AppError> {
    let section_id = parse_id(&path.section_id)?;
    let subsection_id = parse_id(&path.subsection_id)?;
    let description_id = parse_id(&path.description_id)?;

    let matched = state
        .store
        .delete_description(section_id, subsection_id, description_id)
        .await?;
    tracing::info!("Deleted description {} from {}/{}", description_id, section_id, subsection_id);
    Ok(back_to_index("delete_description", matched))
}

/// The description id stays in the URL for compatibility; ratings are matched
/// by section, subsection and rating id only.
pub async fn delete_rating<S: SectionStore>(
    State(state): State<AppState<S>>,
    Path(path): Path<RatingPath>,
) -> Result<Redirect, AppError> {
    let section_id = parse_id(&path.section_id)?;
    let subsection_id = parse_id(&path.subsection_id)?;
    parse_id(&path.description_id)?;
    let rating_id = parse_id(&path.rating_id)?;

    let matched = state
        .store
        .delete_rating(section_id, subsection_id, rating_id)
        .await?;
    tracing::info!("Deleted rating {} from {}/{}", rating_id, section_id, subsection_id);
    Ok(back_to_index("delete_rating", matched))
}

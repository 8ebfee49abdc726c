//! Section Documents
//!
//! One collection, nested three deep:
//! - `Section` owns its `Subsection`s
//! - `Subsection` owns its `Description`s, `Rating`s and characteristics
//!
//! Everything below a section is an embedded document, so deleting a parent
//! drops its descendants with it.

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Deserializer, Serialize};

/// Top-level grouping entity (one document in the collection)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub subsections: Vec<Subsection>,
}

impl Section {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            subsections: Vec::new(),
        }
    }

    pub fn subsection(&self, id: &ObjectId) -> Option<&Subsection> {
        self.subsections.iter().find(|s| s.id == *id)
    }

    pub(crate) fn subsection_mut(&mut self, id: &ObjectId) -> Option<&mut Subsection> {
        self.subsections.iter_mut().find(|s| s.id == *id)
    }
}

/// Mid-level entity embedded in a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subsection {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub descriptions: Vec<Description>,
    // Older documents were created without these two arrays
    #[serde(default)]
    pub ratings: Vec<Rating>,
    #[serde(default, deserialize_with = "nullable_strings")]
    pub characteristics: Vec<String>,
}

impl Subsection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            name: name.into(),
            descriptions: Vec::new(),
            ratings: Vec::new(),
            characteristics: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Description {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub text: String,
}

impl Description {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            text: text.into(),
        }
    }
}

/// Scalar rating, kept as the submitted string (no numeric validation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "rating", default, deserialize_with = "null_as_empty")]
    pub value: String,
}

impl Rating {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: ObjectId::new(),
            value: value.into(),
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Option<String>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(items.into_iter().map(Option::unwrap_or_default).collect())
}

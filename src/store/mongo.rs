// MongoDB-backed section store
//
// Nested writes address the matched subsection through the positional
// operator: filter on `subsections._id`, then `$push`/`$pull` into
// `subsections.$.<field>`.

use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, to_bson, Bson, Document};
use mongodb::{Client, Collection};

use super::{Matched, SectionStore, StoreResult};
use crate::model::{Description, Rating, Section, Subsection};

#[derive(Clone)]
pub struct MongoSectionStore {
    collection: Collection<Section>,
}

impl MongoSectionStore {
    /// Connect once at startup and verify the deployment answers a ping
    pub async fn connect(uri: &str, database: &str, collection: &str) -> StoreResult<Self> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(database);
        db.run_command(doc! { "ping": 1 }).await?;

        tracing::info!("Connected to MongoDB (database: {}, collection: {})", database, collection);
        Ok(Self::from_collection(db.collection(collection)))
    }

    pub fn from_collection(collection: Collection<Section>) -> Self {
        Self { collection }
    }

    async fn update(&self, filter: Document, update: Document) -> StoreResult<Matched> {
        let result = self.collection.update_one(filter, update).await?;
        Ok(result.matched_count)
    }
}

impl SectionStore for MongoSectionStore {
    async fn list_sections(&self) -> StoreResult<Vec<Section>> {
        let cursor = self.collection.find(doc! {}).await?;
        let sections: Vec<Section> = cursor.try_collect().await?;
        Ok(sections)
    }

    async fn add_section(&self, name: String) -> StoreResult<ObjectId> {
        let section = Section::new(name);
        self.collection.insert_one(&section).await?;
        Ok(section.id)
    }

    async fn add_subsection(&self, section_id: ObjectId, name: String) -> StoreResult<Matched> {
        let subsection = to_bson(&Subsection::new(name))?;
        self.update(section_filter(section_id), push_subsection(subsection))
            .await
    }

    async fn add_description(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
        text: String,
    ) -> StoreResult<Matched> {
        let description = to_bson(&Description::new(text))?;
        self.update(
            subsection_filter(section_id, subsection_id),
            push_into_subsection("descriptions", description),
        )
        .await
    }

    async fn add_rating(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
        value: String,
    ) -> StoreResult<Matched> {
        let rating = to_bson(&Rating::new(value))?;
        self.update(
            subsection_filter(section_id, subsection_id),
            push_into_subsection("ratings", rating),
        )
        .await
    }

    async fn add_characteristic(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
        characteristic: String,
    ) -> StoreResult<Matched> {
        self.update(
            subsection_filter(section_id, subsection_id),
            push_into_subsection("characteristics", Bson::String(characteristic)),
        )
        .await
    }

    async fn rename_section(&self, section_id: ObjectId, name: String) -> StoreResult<Matched> {
        self.update(section_filter(section_id), doc! { "$set": { "name": name } })
            .await
    }

    async fn delete_section(&self, section_id: ObjectId) -> StoreResult<Matched> {
        let result = self.collection.delete_one(section_filter(section_id)).await?;
        Ok(result.deleted_count)
    }

    async fn delete_subsection(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
    ) -> StoreResult<Matched> {
        self.update(
            section_filter(section_id),
            doc! { "$pull": { "subsections": { "_id": subsection_id } } },
        )
        .await
    }

    async fn delete_description(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
        description_id: ObjectId,
    ) -> StoreResult<Matched> {
        self.update(
            subsection_filter(section_id, subsection_id),
            pull_from_subsection("descriptions", description_id),
        )
        .await
    }

    async fn delete_rating(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
        rating_id: ObjectId,
    ) -> StoreResult<Matched> {
        self.update(
            subsection_filter(section_id, subsection_id),
            pull_from_subsection("ratings", rating_id),
        )
        .await
    }
}

// ============================================================================
// Filter / Update Builders
// ============================================================================

fn section_filter(section_id: ObjectId) -> Document {
    doc! { "_id": section_id }
}

fn subsection_filter(section_id: ObjectId, subsection_id: ObjectId) -> Document {
    doc! { "_id": section_id, "subsections._id": subsection_id }
}

fn push_subsection(subsection: Bson) -> Document {
    doc! { "$push": { "subsections": subsection } }
}

/// `$push` into an array of the subsection matched by `subsection_filter`
fn push_into_subsection(field: &str, value: Bson) -> Document {
    let mut target = Document::new();
    target.insert(format!("subsections.$.{}", field), value);
    doc! { "$push": target }
}

/// `$pull` the element with `_id == id` from an array of the matched subsection
fn pull_from_subsection(field: &str, id: ObjectId) -> Document {
    let mut target = Document::new();
    target.insert(format!("subsections.$.{}", field), doc! { "_id": id });
    doc! { "$pull": target }
}

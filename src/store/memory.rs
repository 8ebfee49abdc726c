// In-memory section store
//
// Mirrors the MongoDB matching rules: a nested write matches when the
// section id and the subsection id inside it both resolve, and reports one
// matched document even if the targeted element was absent.

use mongodb::bson::oid::ObjectId;
use tokio::sync::RwLock;

use super::{Matched, SectionStore, StoreResult};
use crate::model::{Description, Rating, Section, Subsection};

#[derive(Debug, Default)]
pub struct MemorySectionStore {
    sections: RwLock<Vec<Section>>,
}

impl MemorySectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sections(sections: Vec<Section>) -> Self {
        Self {
            sections: RwLock::new(sections),
        }
    }

    async fn with_section<F>(&self, section_id: ObjectId, mutate: F) -> Matched
    where
        F: FnOnce(&mut Section),
    {
        let mut sections = self.sections.write().await;
        match sections.iter_mut().find(|s| s.id == section_id) {
            Some(section) => {
                mutate(section);
                1
            }
            None => 0,
        }
    }

    async fn with_subsection<F>(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
        mutate: F,
    ) -> Matched
    where
        F: FnOnce(&mut Subsection),
    {
        let mut sections = self.sections.write().await;
        let subsection = sections
            .iter_mut()
            .find(|s| s.id == section_id)
            .and_then(|s| s.subsection_mut(&subsection_id));

        match subsection {
            Some(sub) => {
                mutate(sub);
                1
            }
            None => 0,
        }
    }
}

impl SectionStore for MemorySectionStore {
    async fn list_sections(&self) -> StoreResult<Vec<Section>> {
        Ok(self.sections.read().await.clone())
    }

    async fn add_section(&self, name: String) -> StoreResult<ObjectId> {
        let section = Section::new(name);
        let id = section.id;
        self.sections.write().await.push(section);
        Ok(id)
    }

    async fn add_subsection(&self, section_id: ObjectId, name: String) -> StoreResult<Matched> {
        Ok(self
            .with_section(section_id, |s| s.subsections.push(Subsection::new(name)))
            .await)
    }

    async fn add_description(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
        text: String,
    ) -> StoreResult<Matched> {
        Ok(self
            .with_subsection(section_id, subsection_id, |sub| {
                sub.descriptions.push(Description::new(text))
            })
            .await)
    }

    async fn add_rating(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
        value: String,
    ) -> StoreResult<Matched> {
        Ok(self
            .with_subsection(section_id, subsection_id, |sub| {
                sub.ratings.push(Rating::new(value))
            })
            .await)
    }

    async fn add_characteristic(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
        characteristic: String,
    ) -> StoreResult<Matched> {
        Ok(self
            .with_subsection(section_id, subsection_id, |sub| {
                sub.characteristics.push(characteristic)
            })
            .await)
    }

    async fn rename_section(&self, section_id: ObjectId, name: String) -> StoreResult<Matched> {
        Ok(self.with_section(section_id, |s| s.name = name).await)
    }

    async fn delete_section(&self, section_id: ObjectId) -> StoreResult<Matched> {
        let mut sections = self.sections.write().await;
        let before = sections.len();
        // delete_one semantics: ids are unique, but only ever drop the first hit
        if let Some(pos) = sections.iter().position(|s| s.id == section_id) {
            sections.remove(pos);
        }
        Ok((before - sections.len()) as Matched)
    }

    async fn delete_subsection(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
    ) -> StoreResult<Matched> {
        Ok(self
            .with_section(section_id, |s| s.subsections.retain(|sub| sub.id != subsection_id))
            .await)
    }

    async fn delete_description(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
        description_id: ObjectId,
    ) -> StoreResult<Matched> {
        Ok(self
            .with_subsection(section_id, subsection_id, |sub| {
                sub.descriptions.retain(|d| d.id != description_id)
            })
            .await)
    }

    async fn delete_rating(
        &self,
        section_id: ObjectId,
        subsection_id: ObjectId,
        rating_id: ObjectId,
    ) -> StoreResult<Matched> {
        Ok(self
            .with_subsection(section_id, subsection_id, |sub| {
                sub.ratings.retain(|r| r.id != rating_id)
            })
            .await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store_with_subsection() -> (MemorySectionStore, ObjectId, ObjectId) {
        let store = MemorySectionStore::new();
        let section_id = store.add_section("A".into()).await.unwrap();
        store.add_subsection(section_id, "B".into()).await.unwrap();
        let subsection_id = store.list_sections().await.unwrap()[0].subsections[0].id;
        (store, section_id, subsection_id)
    }

    #[tokio::test]
    async fn test_add_section_starts_empty() {
        let store = MemorySectionStore::new();
        let id = store.add_section("A".into()).await.unwrap();

        let sections = store.list_sections().await.unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].id, id);
        assert_eq!(sections[0].name, "A");
        assert!(sections[0].subsections.is_empty());
    }

    #[tokio::test]
    async fn test_description_lands_in_matching_subsection_only() {
        let (store, section_id, first) = store_with_subsection().await;
        store.add_subsection(section_id, "C".into()).await.unwrap();

        let matched = store
            .add_description(section_id, first, "hello".into())
            .await
            .unwrap();
        assert_eq!(matched, 1);

        let sections = store.list_sections().await.unwrap();
        let subs = &sections[0].subsections;
        assert_eq!(subs[0].descriptions.len(), 1);
        assert_eq!(subs[0].descriptions[0].text, "hello");
        assert!(subs[1].descriptions.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_ids_match_nothing() {
        let (store, section_id, _) = store_with_subsection().await;
        let before = store.list_sections().await.unwrap();

        let stray = ObjectId::new();
        assert_eq!(store.add_subsection(stray, "X".into()).await.unwrap(), 0);
        assert_eq!(store.add_rating(section_id, stray, "5".into()).await.unwrap(), 0);
        assert_eq!(store.rename_section(stray, "Z".into()).await.unwrap(), 0);
        assert_eq!(store.delete_section(stray).await.unwrap(), 0);

        assert_eq!(store.list_sections().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_rename_keeps_subsections() {
        let (store, section_id, subsection_id) = store_with_subsection().await;
        store
            .add_characteristic(section_id, subsection_id, "tall".into())
            .await
            .unwrap();
        let before = store.list_sections().await.unwrap()[0].subsections.clone();

        store.rename_section(section_id, "Renamed".into()).await.unwrap();

        let after = &store.list_sections().await.unwrap()[0];
        assert_eq!(after.name, "Renamed");
        assert_eq!(after.subsections, before);
    }

    #[tokio::test]
    async fn test_delete_rating_removes_only_that_rating() {
        let (store, section_id, subsection_id) = store_with_subsection().await;
        store.add_rating(section_id, subsection_id, "3".into()).await.unwrap();
        store.add_rating(section_id, subsection_id, "5".into()).await.unwrap();
        let ratings = store.list_sections().await.unwrap()[0].subsections[0]
            .ratings
            .clone();

        store
            .delete_rating(section_id, subsection_id, ratings[0].id)
            .await
            .unwrap();

        let left = &store.list_sections().await.unwrap()[0].subsections[0].ratings;
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].value, "5");
    }

    #[tokio::test]
    async fn test_delete_missing_description_still_matches_subsection() {
        let (store, section_id, subsection_id) = store_with_subsection().await;

        let matched = store
            .delete_description(section_id, subsection_id, ObjectId::new())
            .await
            .unwrap();
        assert_eq!(matched, 1);
    }

    #[tokio::test]
    async fn test_delete_subsection_drops_descendants() {
        let (store, section_id, subsection_id) = store_with_subsection().await;
        store
            .add_description(section_id, subsection_id, "hello".into())
            .await
            .unwrap();

        store.delete_subsection(section_id, subsection_id).await.unwrap();

        let sections = store.list_sections().await.unwrap();
        assert_eq!(sections[0].name, "A");
        assert!(sections[0].subsections.is_empty());
    }

    #[tokio::test]
    async fn test_storage_order_is_insertion_order() {
        let store = MemorySectionStore::new();
        for name in ["one", "two", "three"] {
            store.add_section(name.into()).await.unwrap();
        }

        let names: Vec<String> = store
            .list_sections()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["one", "two", "three"]);
    }
}

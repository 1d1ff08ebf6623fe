// Event service for business logic
//
// Creation validates the draft, computes the derived fields and hands storage
// a single operation that inserts the event, links it to the matching
// categories and bumps the counter.

use crate::services::category::row_to_category;
use crate::storage::{
    models::{CreateEventRow, UpdateEvent},
    EventRow, StorageBackend,
};
use anyhow::Result;
use eventboard_core::event::{event_matches, validate_capacity};
use eventboard_core::{
    generate_event_id, CatalogError, Category, CounterDelta, Event, EventDraft,
    EventWithCategories, NewEvent, MAX_ID_ATTEMPTS,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub struct EventService {
    db: Arc<StorageBackend>,
}

impl EventService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    pub async fn create(&self, draft: EventDraft) -> Result<Event> {
        let input = NewEvent::from_draft(draft)?;

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let row = CreateEventRow {
                event_id: generate_event_id(),
                name: input.name.clone(),
                description: input.description.clone(),
                start_date: input.start_date,
                duration: input.duration,
                display_duration: input.display_duration.clone(),
                end_date: input.end_date,
                image: input.image.clone(),
                capacity: input.capacity,
                tickets_available: input.tickets_available,
                categories: input.categories.clone(),
            };
            let event_id = row.event_id.clone();

            match self.db.create_event(row, CounterDelta::event_added()).await? {
                Some(row) => {
                    tracing::info!(
                        event_id = %row.event_id,
                        matched_categories = row.category_list.len(),
                        requested_categories = row.categories.len(),
                        "event created"
                    );
                    return Ok(row_to_event(row));
                }
                None => {
                    tracing::debug!(%event_id, attempt, "event ID taken, regenerating");
                }
            }
        }

        Err(CatalogError::id_space_exhausted("event", MAX_ID_ATTEMPTS).into())
    }

    pub async fn get(&self, event_id: &str) -> Result<Option<Event>> {
        let row = self.db.get_event_by_external_id(event_id).await?;
        Ok(row.map(row_to_event))
    }

    /// All events with their categories resolved.
    pub async fn list(&self) -> Result<Vec<EventWithCategories>> {
        let events = self.list_rows().await?;
        self.populate(events).await
    }

    /// Events whose name or description contains `keyword`.
    pub async fn search(&self, keyword: &str) -> Result<Vec<EventWithCategories>> {
        let events = self
            .list_rows()
            .await?
            .into_iter()
            .filter(|e| event_matches(e, keyword))
            .collect();
        self.populate(events).await
    }

    /// Overwrite name and, when given, capacity. Derived fields are not
    /// recomputed. Returns None if the event is unknown.
    pub async fn update(
        &self,
        event_id: &str,
        name: Option<String>,
        capacity: Option<i32>,
    ) -> Result<Option<Event>> {
        if matches!(name.as_deref(), Some(n) if n.trim().is_empty()) {
            return Err(CatalogError::validation("name: Path `name` is required.").into());
        }
        if capacity.is_some() {
            validate_capacity(capacity)?;
        }

        let input = UpdateEvent { name, capacity };
        let row = self
            .db
            .update_event(event_id, input, CounterDelta::event_updated())
            .await?;

        if row.is_some() {
            tracing::info!(%event_id, "event updated");
        }
        Ok(row.map(row_to_event))
    }

    /// Delete an event and remove it from its categories.
    /// Returns None if the event is unknown.
    pub async fn delete(&self, event_id: &str) -> Result<Option<Event>> {
        let row = self
            .db
            .delete_event(event_id, CounterDelta::event_deleted())
            .await?;

        if row.is_some() {
            tracing::info!(%event_id, "event deleted");
        }
        Ok(row.map(row_to_event))
    }

    async fn list_rows(&self) -> Result<Vec<Event>> {
        let rows = self.db.list_events().await?;
        Ok(rows.into_iter().map(row_to_event).collect())
    }

    async fn populate(&self, events: Vec<Event>) -> Result<Vec<EventWithCategories>> {
        let mut ids: Vec<Uuid> = events
            .iter()
            .flat_map(|e| e.category_list.iter().copied())
            .collect();
        ids.sort_unstable();
        ids.dedup();

        let categories: HashMap<Uuid, Category> = self
            .db
            .get_categories_by_ids(&ids)
            .await?
            .into_iter()
            .map(|row| (row.id, row_to_category(row)))
            .collect();

        Ok(events
            .into_iter()
            .map(|e| EventWithCategories::populate(e, |id| categories.get(id).cloned()))
            .collect())
    }
}

pub(crate) fn row_to_event(row: EventRow) -> Event {
    Event {
        id: row.id,
        event_id: row.event_id,
        name: row.name,
        start_date: row.start_date,
        duration: row.duration,
        display_duration: row.display_duration,
        end_date: row.end_date,
        description: row.description,
        is_active: row.is_active,
        image: row.image,
        capacity: row.capacity,
        tickets_available: row.tickets_available,
        category_list: row.category_list,
        categories: row.categories,
        created_at: row.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{CategoryService, CounterService};
    use chrono::{TimeZone, Utc};
    use eventboard_core::{Counter, NewCategory};
    use regex::Regex;

    struct Fixture {
        categories: CategoryService,
        events: EventService,
        counter: CounterService,
    }

    fn fixture() -> Fixture {
        let db = Arc::new(StorageBackend::in_memory());
        Fixture {
            categories: CategoryService::new(db.clone()),
            events: EventService::new(db.clone()),
            counter: CounterService::new(db),
        }
    }

    fn gig(categories: &str) -> EventDraft {
        EventDraft {
            name: Some("Gig".into()),
            description: Some("Friday night show".into()),
            categories: Some(categories.to_string()),
            start_date_time: Some("2024-05-01T18:00:00Z".into()),
            duration_in_minutes: Some(90),
            ..Default::default()
        }
    }

    async fn category(f: &Fixture, name: &str) -> Category {
        f.categories
            .create(NewCategory::new(Some(name.into()), None, None).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_music_gig_scenario() {
        let f = fixture();
        let music = category(&f, "Music").await;
        assert!(Regex::new(r"^CMU-\d{4}$")
            .unwrap()
            .is_match(&music.category_id));

        let event = f.events.create(gig(&music.category_id)).await.unwrap();
        assert!(Regex::new(r"^[A-Z]{3}-\d{1,5}$")
            .unwrap()
            .is_match(&event.event_id));
        assert_eq!(event.display_duration, "1 hour(s) 30 minutes");
        assert_eq!(
            event.end_date,
            Utc.with_ymd_and_hms(2024, 5, 1, 19, 30, 0).unwrap()
        );
        assert_eq!(event.category_list, vec![music.id]);

        let listed = f.categories.list().await.unwrap();
        assert_eq!(listed[0].events_list[0].id, event.id);

        f.events.delete(&event.event_id).await.unwrap().unwrap();
        let music = f.categories.get(&music.category_id).await.unwrap().unwrap();
        assert!(music.events_list.is_empty());

        let counter = f.counter.get().await.unwrap();
        assert_eq!(counter.add_count, 2);
        assert_eq!(counter.delete_count, 1);
        assert_eq!(counter.events_count, 0);
        assert_eq!(counter.categories_count, 1);
    }

    #[tokio::test]
    async fn test_create_keeps_unmatched_category_ids() {
        let f = fixture();
        let music = category(&f, "Music").await;
        let art = category(&f, "Art").await;

        let raw = format!("{},{},CZZ-0000", music.category_id, art.category_id);
        let event = f.events.create(gig(&raw)).await.unwrap();

        assert_eq!(
            event.categories,
            vec![
                music.category_id.clone(),
                art.category_id.clone(),
                "CZZ-0000".to_string()
            ]
        );
        assert_eq!(event.category_list.len(), 2);
        assert!(event.category_list.contains(&music.id));
        assert!(event.category_list.contains(&art.id));

        for id in [&music.category_id, &art.category_id] {
            let c = f.categories.get(id).await.unwrap().unwrap();
            assert_eq!(c.events_list, vec![event.id]);
        }
    }

    #[tokio::test]
    async fn test_create_does_not_trim_category_ids() {
        let f = fixture();
        let music = category(&f, "Music").await;
        let art = category(&f, "Art").await;

        let raw = format!("{}, {}", music.category_id, art.category_id);
        let event = f.events.create(gig(&raw)).await.unwrap();

        assert_eq!(event.categories[1], format!(" {}", art.category_id));
        assert_eq!(event.category_list, vec![music.id]);
        let art = f.categories.get(&art.category_id).await.unwrap().unwrap();
        assert!(art.events_list.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_capacity() {
        let f = fixture();
        let mut draft = gig("");
        draft.capacity = Some(5000);

        let err = f.events.create(draft).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::Validation(_))
        ));
        assert_eq!(f.counter.get().await.unwrap().add_count, 0);
    }

    #[tokio::test]
    async fn test_delete_category_detaches_from_events() {
        let f = fixture();
        let music = category(&f, "Music").await;
        let event = f.events.create(gig(&music.category_id)).await.unwrap();

        f.categories.delete(&music.category_id).await.unwrap().unwrap();

        let event = f.events.get(&event.event_id).await.unwrap().unwrap();
        assert!(event.category_list.is_empty());
        assert_eq!(event.categories, vec![music.category_id]);

        let listed = f.events.list().await.unwrap();
        assert!(listed[0].category_list.is_empty());
    }

    #[tokio::test]
    async fn test_update_keeps_derived_fields() {
        let f = fixture();
        let created = f.events.create(gig("")).await.unwrap();

        let updated = f
            .events
            .update(&created.event_id, Some("Encore".into()), Some(20))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Encore");
        assert_eq!(updated.capacity, 20);
        assert_eq!(updated.display_duration, created.display_duration);
        assert_eq!(updated.end_date, created.end_date);
        assert_eq!(updated.description, created.description);

        let counter = f.counter.get().await.unwrap();
        assert_eq!(counter.update_count, 1);
    }

    #[tokio::test]
    async fn test_update_without_capacity_keeps_it() {
        let f = fixture();
        let created = f.events.create(gig("")).await.unwrap();

        let updated = f
            .events
            .update(&created.event_id, Some("Encore".into()), None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.capacity, 1000);
    }

    #[tokio::test]
    async fn test_update_rejects_out_of_range_capacity() {
        let f = fixture();
        let created = f.events.create(gig("")).await.unwrap();

        assert!(f
            .events
            .update(&created.event_id, None, Some(3))
            .await
            .is_err());
        assert_eq!(f.counter.get().await.unwrap().update_count, 0);
    }

    #[tokio::test]
    async fn test_delete_missing_event_leaves_counter() {
        let f = fixture();
        assert!(f.events.delete("ZZZ-1").await.unwrap().is_none());
        assert_eq!(f.counter.get().await.unwrap(), Counter::default());
    }

    #[tokio::test]
    async fn test_search_matches_description() {
        let f = fixture();
        f.events.create(gig("")).await.unwrap();

        assert_eq!(f.events.search("friday").await.unwrap().len(), 1);
        assert!(f.events.search("monday").await.unwrap().is_empty());
    }
}

// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: One lock over all tables, so a mutation and its back-reference
// and counter changes are applied together
// Decision: UUIDs generated via uuid v7 (time-ordered)
//
// This implementation mirrors the PostgreSQL Database API, allowing the server
// to run (and the tests to exercise it) without a database.

use anyhow::Result;
use chrono::Utc;
use eventboard_core::{Counter, CounterDelta};
use parking_lot::RwLock;
use uuid::Uuid;

use super::models::*;

#[derive(Default)]
struct Tables {
    // Vecs keep insertion order, which is the listing order
    categories: Vec<CategoryRow>,
    events: Vec<EventRow>,
    counter: Counter,
}

/// In-memory database for dev mode
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    tables: RwLock<Tables>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================
    // Categories
    // ============================================

    pub async fn create_category(
        &self,
        input: CreateCategoryRow,
        delta: CounterDelta,
    ) -> Result<Option<CategoryRow>> {
        let mut tables = self.tables.write();
        if tables
            .categories
            .iter()
            .any(|c| c.category_id == input.category_id)
        {
            return Ok(None);
        }

        let row = CategoryRow {
            id: Uuid::now_v7(),
            category_id: input.category_id,
            name: input.name,
            description: input.description,
            image: input.image,
            events_list: Vec::new(),
            created_at: Utc::now(),
        };
        tables.categories.push(row.clone());
        tables.counter.apply(delta);
        Ok(Some(row))
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryRow>> {
        Ok(self.tables.read().categories.clone())
    }

    pub async fn get_categories_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CategoryRow>> {
        let tables = self.tables.read();
        Ok(tables
            .categories
            .iter()
            .filter(|c| ids.contains(&c.id))
            .cloned()
            .collect())
    }

    pub async fn get_category_by_external_id(
        &self,
        category_id: &str,
    ) -> Result<Option<CategoryRow>> {
        let tables = self.tables.read();
        Ok(tables
            .categories
            .iter()
            .find(|c| c.category_id == category_id)
            .cloned())
    }

    pub async fn update_category(
        &self,
        category_id: &str,
        input: UpdateCategory,
        delta: CounterDelta,
    ) -> Result<Option<CategoryRow>> {
        let mut tables = self.tables.write();
        let Some(row) = tables
            .categories
            .iter_mut()
            .find(|c| c.category_id == category_id)
        else {
            return Ok(None);
        };

        if let Some(name) = input.name {
            row.name = name;
        }
        if let Some(description) = input.description {
            row.description = Some(description);
        }
        let updated = row.clone();
        tables.counter.apply(delta);
        Ok(Some(updated))
    }

    pub async fn delete_category(
        &self,
        category_id: &str,
        delta: CounterDelta,
    ) -> Result<Option<CategoryRow>> {
        let mut tables = self.tables.write();
        let Some(pos) = tables
            .categories
            .iter()
            .position(|c| c.category_id == category_id)
        else {
            return Ok(None);
        };

        let row = tables.categories.remove(pos);
        for event in tables
            .events
            .iter_mut()
            .filter(|e| row.events_list.contains(&e.id))
        {
            event.category_list.retain(|id| *id != row.id);
        }
        tables.counter.apply(delta);
        Ok(Some(row))
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(
        &self,
        input: CreateEventRow,
        delta: CounterDelta,
    ) -> Result<Option<EventRow>> {
        let mut tables = self.tables.write();
        if tables.events.iter().any(|e| e.event_id == input.event_id) {
            return Ok(None);
        }

        let category_list: Vec<Uuid> = tables
            .categories
            .iter()
            .filter(|c| input.categories.contains(&c.category_id))
            .map(|c| c.id)
            .collect();

        let row = EventRow {
            id: Uuid::now_v7(),
            event_id: input.event_id,
            name: input.name,
            start_date: input.start_date,
            duration: input.duration,
            display_duration: input.display_duration,
            end_date: input.end_date,
            description: input.description,
            is_active: true,
            image: input.image,
            capacity: input.capacity,
            tickets_available: input.tickets_available,
            categories: input.categories,
            category_list,
            created_at: Utc::now(),
        };

        for category in tables
            .categories
            .iter_mut()
            .filter(|c| row.category_list.contains(&c.id))
        {
            category.events_list.push(row.id);
        }
        tables.events.push(row.clone());
        tables.counter.apply(delta);
        Ok(Some(row))
    }

    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        Ok(self.tables.read().events.clone())
    }

    pub async fn get_events_by_ids(&self, ids: &[Uuid]) -> Result<Vec<EventRow>> {
        let tables = self.tables.read();
        Ok(tables
            .events
            .iter()
            .filter(|e| ids.contains(&e.id))
            .cloned()
            .collect())
    }

    pub async fn get_event_by_external_id(&self, event_id: &str) -> Result<Option<EventRow>> {
        let tables = self.tables.read();
        Ok(tables.events.iter().find(|e| e.event_id == event_id).cloned())
    }

    pub async fn update_event(
        &self,
        event_id: &str,
        input: UpdateEvent,
        delta: CounterDelta,
    ) -> Result<Option<EventRow>> {
        let mut tables = self.tables.write();
        let Some(row) = tables.events.iter_mut().find(|e| e.event_id == event_id) else {
            return Ok(None);
        };

        if let Some(name) = input.name {
            row.name = name;
        }
        if let Some(capacity) = input.capacity {
            row.capacity = capacity;
        }
        let updated = row.clone();
        tables.counter.apply(delta);
        Ok(Some(updated))
    }

    pub async fn delete_event(
        &self,
        event_id: &str,
        delta: CounterDelta,
    ) -> Result<Option<EventRow>> {
        let mut tables = self.tables.write();
        let Some(pos) = tables.events.iter().position(|e| e.event_id == event_id) else {
            return Ok(None);
        };

        let row = tables.events.remove(pos);
        for category in tables
            .categories
            .iter_mut()
            .filter(|c| row.category_list.contains(&c.id))
        {
            category.events_list.retain(|id| *id != row.id);
        }
        tables.counter.apply(delta);
        Ok(Some(row))
    }

    // ============================================
    // Counter
    // ============================================

    pub async fn get_counter(&self) -> Result<CounterRow> {
        Ok(self.tables.read().counter.into())
    }

    pub async fn reconcile_counter(&self) -> Result<CounterRow> {
        let mut tables = self.tables.write();
        tables.counter.events_count = tables.events.len() as i64;
        tables.counter.categories_count = tables.categories.len() as i64;
        Ok(tables.counter.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn category(category_id: &str, name: &str) -> CreateCategoryRow {
        CreateCategoryRow {
            category_id: category_id.to_string(),
            name: name.to_string(),
            description: None,
            image: String::new(),
        }
    }

    fn event(event_id: &str, categories: &[&str]) -> CreateEventRow {
        let start = Utc.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap();
        CreateEventRow {
            event_id: event_id.to_string(),
            name: "Gig".to_string(),
            description: None,
            start_date: start,
            duration: 90,
            display_duration: "1 hour(s) 30 minutes".to_string(),
            end_date: start + Duration::minutes(90),
            image: String::new(),
            capacity: 1000,
            tickets_available: None,
            categories: categories.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_create_category_rejects_duplicate_external_id() {
        let db = InMemoryDatabase::new();
        let first = db
            .create_category(category("CMU-0001", "Music"), CounterDelta::category_added())
            .await
            .unwrap();
        assert!(first.is_some());

        let second = db
            .create_category(category("CMU-0001", "Museum"), CounterDelta::category_added())
            .await
            .unwrap();
        assert!(second.is_none());

        let counter = db.get_counter().await.unwrap();
        assert_eq!(counter.categories_count, 1);
        assert_eq!(counter.add_count, 1);
    }

    #[tokio::test]
    async fn test_create_event_links_both_sides() {
        let db = InMemoryDatabase::new();
        let music = db
            .create_category(category("CMU-0001", "Music"), CounterDelta::category_added())
            .await
            .unwrap()
            .unwrap();

        let gig = db
            .create_event(event("ABC-1", &["CMU-0001", "CZZ-9999"]), CounterDelta::event_added())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(gig.category_list, vec![music.id]);
        assert_eq!(gig.categories, vec!["CMU-0001", "CZZ-9999"]);
        assert!(gig.is_active);

        let music = db.get_category_by_external_id("CMU-0001").await.unwrap().unwrap();
        assert_eq!(music.events_list, vec![gig.id]);
    }

    #[tokio::test]
    async fn test_delete_category_detaches_events() {
        let db = InMemoryDatabase::new();
        db.create_category(category("CMU-0001", "Music"), CounterDelta::category_added())
            .await
            .unwrap();
        db.create_event(event("ABC-1", &["CMU-0001"]), CounterDelta::event_added())
            .await
            .unwrap();

        let deleted = db
            .delete_category("CMU-0001", CounterDelta::category_deleted())
            .await
            .unwrap();
        assert!(deleted.is_some());

        let gig = db.get_event_by_external_id("ABC-1").await.unwrap().unwrap();
        assert!(gig.category_list.is_empty());
        // Raw external IDs are not touched
        assert_eq!(gig.categories, vec!["CMU-0001"]);

        let counter = db.get_counter().await.unwrap();
        assert_eq!(counter.categories_count, 0);
        assert_eq!(counter.events_count, 1);
        assert_eq!(counter.delete_count, 1);
    }

    #[tokio::test]
    async fn test_delete_missing_leaves_counter_alone() {
        let db = InMemoryDatabase::new();
        let deleted = db
            .delete_event("NOPE-1", CounterDelta::event_deleted())
            .await
            .unwrap();
        assert!(deleted.is_none());
        assert_eq!(db.get_counter().await.unwrap().delete_count, 0);
    }

    #[tokio::test]
    async fn test_update_event_only_touches_given_fields() {
        let db = InMemoryDatabase::new();
        db.create_event(event("ABC-1", &[]), CounterDelta::event_added())
            .await
            .unwrap();

        let updated = db
            .update_event(
                "ABC-1",
                UpdateEvent {
                    name: None,
                    capacity: Some(50),
                },
                CounterDelta::event_updated(),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Gig");
        assert_eq!(updated.capacity, 50);
        assert_eq!(db.get_counter().await.unwrap().update_count, 1);
    }

    #[tokio::test]
    async fn test_reconcile_recounts_live_totals() {
        let db = InMemoryDatabase::new();
        db.create_event(event("ABC-1", &[]), CounterDelta::default())
            .await
            .unwrap();

        let counter = db.reconcile_counter().await.unwrap();
        assert_eq!(counter.events_count, 1);
        assert_eq!(counter.add_count, 0);
    }
}

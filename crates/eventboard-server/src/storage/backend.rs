// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use anyhow::Result;
use eventboard_core::CounterDelta;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use super::memory::InMemoryDatabase;
use super::models::*;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend from a database URL
    pub async fn postgres(database_url: &str) -> Result<Self> {
        let db = Database::from_url(database_url).await?;
        Ok(Self::Postgres(db))
    }

    /// Create an in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Check if this is dev mode (in-memory)
    pub fn is_dev_mode(&self) -> bool {
        matches!(self, Self::InMemory(_))
    }

    /// Get the PostgreSQL pool if using PostgreSQL backend
    /// Returns None for in-memory backend
    pub fn pool(&self) -> Option<&PgPool> {
        match self {
            Self::Postgres(db) => Some(db.pool()),
            Self::InMemory(_) => None,
        }
    }

    /// Run migrations and make sure the counter row exists.
    /// No-op for the in-memory backend.
    pub async fn prepare(&self) -> Result<()> {
        match self {
            Self::Postgres(db) => {
                db.migrate().await?;
                db.ensure_counter().await
            }
            Self::InMemory(_) => Ok(()),
        }
    }

    // ============================================
    // Categories
    // ============================================

    pub async fn create_category(
        &self,
        input: CreateCategoryRow,
        delta: CounterDelta,
    ) -> Result<Option<CategoryRow>> {
        match self {
            Self::Postgres(db) => db.create_category(input, delta).await,
            Self::InMemory(db) => db.create_category(input, delta).await,
        }
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryRow>> {
        match self {
            Self::Postgres(db) => db.list_categories().await,
            Self::InMemory(db) => db.list_categories().await,
        }
    }

    pub async fn get_categories_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CategoryRow>> {
        match self {
            Self::Postgres(db) => db.get_categories_by_ids(ids).await,
            Self::InMemory(db) => db.get_categories_by_ids(ids).await,
        }
    }

    pub async fn get_category_by_external_id(
        &self,
        category_id: &str,
    ) -> Result<Option<CategoryRow>> {
        match self {
            Self::Postgres(db) => db.get_category_by_external_id(category_id).await,
            Self::InMemory(db) => db.get_category_by_external_id(category_id).await,
        }
    }

    pub async fn update_category(
        &self,
        category_id: &str,
        input: UpdateCategory,
        delta: CounterDelta,
    ) -> Result<Option<CategoryRow>> {
        match self {
            Self::Postgres(db) => db.update_category(category_id, input, delta).await,
            Self::InMemory(db) => db.update_category(category_id, input, delta).await,
        }
    }

    pub async fn delete_category(
        &self,
        category_id: &str,
        delta: CounterDelta,
    ) -> Result<Option<CategoryRow>> {
        match self {
            Self::Postgres(db) => db.delete_category(category_id, delta).await,
            Self::InMemory(db) => db.delete_category(category_id, delta).await,
        }
    }

    // ============================================
    // Events
    // ============================================

    pub async fn create_event(
        &self,
        input: CreateEventRow,
        delta: CounterDelta,
    ) -> Result<Option<EventRow>> {
        match self {
            Self::Postgres(db) => db.create_event(input, delta).await,
            Self::InMemory(db) => db.create_event(input, delta).await,
        }
    }

    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        match self {
            Self::Postgres(db) => db.list_events().await,
            Self::InMemory(db) => db.list_events().await,
        }
    }

    pub async fn get_events_by_ids(&self, ids: &[Uuid]) -> Result<Vec<EventRow>> {
        match self {
            Self::Postgres(db) => db.get_events_by_ids(ids).await,
            Self::InMemory(db) => db.get_events_by_ids(ids).await,
        }
    }

    pub async fn get_event_by_external_id(&self, event_id: &str) -> Result<Option<EventRow>> {
        match self {
            Self::Postgres(db) => db.get_event_by_external_id(event_id).await,
            Self::InMemory(db) => db.get_event_by_external_id(event_id).await,
        }
    }

    pub async fn update_event(
        &self,
        event_id: &str,
        input: UpdateEvent,
        delta: CounterDelta,
    ) -> Result<Option<EventRow>> {
        match self {
            Self::Postgres(db) => db.update_event(event_id, input, delta).await,
            Self::InMemory(db) => db.update_event(event_id, input, delta).await,
        }
    }

    pub async fn delete_event(
        &self,
        event_id: &str,
        delta: CounterDelta,
    ) -> Result<Option<EventRow>> {
        match self {
            Self::Postgres(db) => db.delete_event(event_id, delta).await,
            Self::InMemory(db) => db.delete_event(event_id, delta).await,
        }
    }

    // ============================================
    // Counter
    // ============================================

    pub async fn get_counter(&self) -> Result<CounterRow> {
        match self {
            Self::Postgres(db) => db.get_counter().await,
            Self::InMemory(db) => db.get_counter().await,
        }
    }

    pub async fn reconcile_counter(&self) -> Result<CounterRow> {
        match self {
            Self::Postgres(db) => db.reconcile_counter().await,
            Self::InMemory(db) => db.reconcile_counter().await,
        }
    }
}

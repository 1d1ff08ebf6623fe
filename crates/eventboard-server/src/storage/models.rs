// Database models (internal, may differ from public DTOs)

use chrono::{DateTime, Utc};
use eventboard_core::Counter;
use sqlx::FromRow;
use uuid::Uuid;

// ============================================
// Category models
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: Uuid,
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub image: String,
    pub events_list: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateCategoryRow {
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub image: String,
}

/// Fields left as None keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategory {
    pub name: Option<String>,
    pub description: Option<String>,
}

// ============================================
// Event models
// ============================================

#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: Uuid,
    pub event_id: String,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub duration: i32,
    pub display_duration: String,
    pub end_date: DateTime<Utc>,
    pub description: Option<String>,
    pub is_active: bool,
    pub image: String,
    pub capacity: i32,
    pub tickets_available: Option<i32>,
    pub categories: Vec<String>,
    pub category_list: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Input for inserting an event. `categories` holds external category IDs;
/// storage resolves them to internal references inside the same transaction.
#[derive(Debug, Clone)]
pub struct CreateEventRow {
    pub event_id: String,
    pub name: String,
    pub description: Option<String>,
    pub start_date: DateTime<Utc>,
    pub duration: i32,
    pub display_duration: String,
    pub end_date: DateTime<Utc>,
    pub image: String,
    pub capacity: i32,
    pub tickets_available: Option<i32>,
    pub categories: Vec<String>,
}

/// Fields left as None keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
    pub name: Option<String>,
    pub capacity: Option<i32>,
}

// ============================================
// Counter model
// ============================================

#[derive(Debug, Clone, Copy, Default, FromRow)]
pub struct CounterRow {
    pub events_count: i64,
    pub categories_count: i64,
    pub add_count: i64,
    pub update_count: i64,
    pub delete_count: i64,
}

impl From<Counter> for CounterRow {
    fn from(counter: Counter) -> Self {
        Self {
            events_count: counter.events_count,
            categories_count: counter.categories_count,
            add_count: counter.add_count,
            update_count: counter.update_count,
            delete_count: counter.delete_count,
        }
    }
}

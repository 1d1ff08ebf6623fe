// Catalog Core
//
// This crate provides the DB-agnostic rules of the events/categories catalog.
//
// Key design decisions:
// - Domain entity types (Event, Category, Counter) are defined here
// - Internal identity is a UUID; the human-readable external ID is separate
// - Derived event fields are computed once, at creation
// - Counter changes are values (CounterDelta) so storage can apply them
//   atomically with the mutation they describe

pub mod category;
pub mod counter;
pub mod error;
pub mod event;
pub mod ids;

// Re-exports for convenience
pub use category::{validate_category_name, Category, CategoryWithEvents, NewCategory};
pub use counter::{Counter, CounterDelta};
pub use error::{CatalogError, Result};
pub use event::{Event, EventDraft, EventWithCategories, NewEvent};
pub use ids::{generate_category_id, generate_event_id, MAX_ID_ATTEMPTS};

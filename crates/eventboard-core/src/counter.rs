// Aggregate statistics
//
// A single counter record tracks live totals per entity type and lifetime
// totals of adds, updates and deletes. Mutations describe their effect as a
// CounterDelta, which storage applies in the same unit as the mutation.

use serde::{Deserialize, Serialize};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Singleton counter record.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Counter {
    /// Events currently stored.
    pub events_count: i64,
    /// Categories currently stored.
    pub categories_count: i64,
    /// Entities ever created.
    pub add_count: i64,
    /// Successful updates ever applied.
    pub update_count: i64,
    /// Entities ever deleted.
    pub delete_count: i64,
}

impl Counter {
    /// Apply a delta in place.
    pub fn apply(&mut self, delta: CounterDelta) {
        self.events_count += delta.events;
        self.categories_count += delta.categories;
        self.add_count += delta.adds;
        self.update_count += delta.updates;
        self.delete_count += delta.deletes;
    }
}

/// Effect of one mutation on the counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterDelta {
    pub events: i64,
    pub categories: i64,
    pub adds: i64,
    pub updates: i64,
    pub deletes: i64,
}

impl CounterDelta {
    pub fn category_added() -> Self {
        Self {
            categories: 1,
            adds: 1,
            ..Self::default()
        }
    }

    pub fn category_updated() -> Self {
        Self {
            updates: 1,
            ..Self::default()
        }
    }

    pub fn category_deleted() -> Self {
        Self {
            categories: -1,
            deletes: 1,
            ..Self::default()
        }
    }

    pub fn event_added() -> Self {
        Self {
            events: 1,
            adds: 1,
            ..Self::default()
        }
    }

    pub fn event_updated() -> Self {
        Self {
            updates: 1,
            ..Self::default()
        }
    }

    pub fn event_deleted() -> Self {
        Self {
            events: -1,
            deletes: 1,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_and_deletes_track_live_totals() {
        let mut counter = Counter::default();
        counter.apply(CounterDelta::category_added());
        counter.apply(CounterDelta::category_added());
        counter.apply(CounterDelta::event_added());
        counter.apply(CounterDelta::category_deleted());

        assert_eq!(counter.categories_count, 1);
        assert_eq!(counter.events_count, 1);
        assert_eq!(counter.add_count, 3);
        assert_eq!(counter.delete_count, 1);
        assert_eq!(counter.update_count, 0);
    }

    #[test]
    fn test_updates_leave_live_totals_alone() {
        let mut counter = Counter::default();
        counter.apply(CounterDelta::event_updated());
        counter.apply(CounterDelta::category_updated());

        assert_eq!(
            counter,
            Counter {
                update_count: 2,
                ..Counter::default()
            }
        );
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(Counter::default()).unwrap();
        for key in [
            "eventsCount",
            "categoriesCount",
            "addCount",
            "updateCount",
            "deleteCount",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
    }
}

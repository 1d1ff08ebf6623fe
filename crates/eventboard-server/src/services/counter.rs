// Counter service: read and recount the aggregate statistics

use crate::storage::{CounterRow, StorageBackend};
use anyhow::Result;
use eventboard_core::Counter;
use std::sync::Arc;

pub struct CounterService {
    db: Arc<StorageBackend>,
}

impl CounterService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    pub async fn get(&self) -> Result<Counter> {
        let row = self.db.get_counter().await?;
        Ok(row_to_counter(row))
    }

    /// Recompute the live totals from the stored entities.
    pub async fn reconcile(&self) -> Result<Counter> {
        let before = self.db.get_counter().await?;
        let after = self.db.reconcile_counter().await?;

        if before.events_count != after.events_count
            || before.categories_count != after.categories_count
        {
            tracing::warn!(
                events_before = before.events_count,
                events_after = after.events_count,
                categories_before = before.categories_count,
                categories_after = after.categories_count,
                "counter drift corrected"
            );
        }

        Ok(row_to_counter(after))
    }
}

fn row_to_counter(row: CounterRow) -> Counter {
    Counter {
        events_count: row.events_count,
        categories_count: row.categories_count,
        add_count: row.add_count,
        update_count: row.update_count,
        delete_count: row.delete_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::CategoryService;
    use eventboard_core::NewCategory;

    #[tokio::test]
    async fn test_counts_follow_mutations() {
        let db = Arc::new(StorageBackend::in_memory());
        let categories = CategoryService::new(db.clone());
        let counter = CounterService::new(db);

        let mut ids = Vec::new();
        for name in ["Music", "Art", "Film"] {
            let c = categories
                .create(NewCategory::new(Some(name.into()), None, None).unwrap())
                .await
                .unwrap();
            ids.push(c.category_id);
        }
        categories.delete(&ids[0]).await.unwrap();
        categories
            .update(&ids[1], Some("Painting".into()), None)
            .await
            .unwrap();

        let totals = counter.get().await.unwrap();
        assert_eq!(totals.add_count, 3);
        assert_eq!(totals.delete_count, 1);
        assert_eq!(totals.update_count, 1);
        assert_eq!(totals.categories_count, 2);
        assert_eq!(totals.events_count, 0);
    }

    #[tokio::test]
    async fn test_reconcile_matches_live_rows() {
        let db = Arc::new(StorageBackend::in_memory());
        let categories = CategoryService::new(db.clone());
        let counter = CounterService::new(db);

        categories
            .create(NewCategory::new(Some("Music".into()), None, None).unwrap())
            .await
            .unwrap();

        let before = counter.get().await.unwrap();
        let after = counter.reconcile().await.unwrap();
        assert_eq!(before, after);
        assert_eq!(after.categories_count, 1);
    }
}

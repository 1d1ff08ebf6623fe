// Category service for business logic

use crate::services::event::row_to_event;
use crate::storage::{
    models::{CreateCategoryRow, UpdateCategory},
    CategoryRow, StorageBackend,
};
use anyhow::Result;
use eventboard_core::category::category_matches;
use eventboard_core::{
    generate_category_id, validate_category_name, CatalogError, Category, CategoryWithEvents,
    CounterDelta, Event, NewCategory, MAX_ID_ATTEMPTS,
};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

pub struct CategoryService {
    db: Arc<StorageBackend>,
}

impl CategoryService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    /// Persist a new category under a freshly generated external ID.
    pub async fn create(&self, input: NewCategory) -> Result<Category> {
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let row = CreateCategoryRow {
                category_id: generate_category_id(Some(&input.name)),
                name: input.name.clone(),
                description: input.description.clone(),
                image: input.image.clone(),
            };
            let category_id = row.category_id.clone();

            match self
                .db
                .create_category(row, CounterDelta::category_added())
                .await?
            {
                Some(row) => {
                    tracing::info!(category_id = %row.category_id, "category created");
                    return Ok(row_to_category(row));
                }
                None => {
                    tracing::debug!(%category_id, attempt, "category ID taken, regenerating");
                }
            }
        }

        Err(CatalogError::id_space_exhausted("category", MAX_ID_ATTEMPTS).into())
    }

    pub async fn get(&self, category_id: &str) -> Result<Option<Category>> {
        let row = self.db.get_category_by_external_id(category_id).await?;
        Ok(row.map(row_to_category))
    }

    /// All categories with their events resolved.
    pub async fn list(&self) -> Result<Vec<CategoryWithEvents>> {
        let categories = self.list_rows().await?;
        self.populate(categories).await
    }

    /// Categories whose name or description contains `keyword`.
    pub async fn search(&self, keyword: &str) -> Result<Vec<CategoryWithEvents>> {
        let categories = self
            .list_rows()
            .await?
            .into_iter()
            .filter(|c| category_matches(c, keyword))
            .collect();
        self.populate(categories).await
    }

    /// Overwrite name and description. Returns None if the category is unknown.
    pub async fn update(
        &self,
        category_id: &str,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<Option<Category>> {
        if let Some(name) = name.as_deref() {
            validate_category_name(Some(name))?;
        }

        let input = UpdateCategory { name, description };
        let row = self
            .db
            .update_category(category_id, input, CounterDelta::category_updated())
            .await?;

        if row.is_some() {
            tracing::info!(%category_id, "category updated");
        }
        Ok(row.map(row_to_category))
    }

    /// Delete a category and detach it from its events.
    /// Returns None if the category is unknown.
    pub async fn delete(&self, category_id: &str) -> Result<Option<Category>> {
        let row = self
            .db
            .delete_category(category_id, CounterDelta::category_deleted())
            .await?;

        if let Some(row) = &row {
            tracing::info!(
                %category_id,
                detached_events = row.events_list.len(),
                "category deleted"
            );
        }
        Ok(row.map(row_to_category))
    }

    async fn list_rows(&self) -> Result<Vec<Category>> {
        let rows = self.db.list_categories().await?;
        Ok(rows.into_iter().map(row_to_category).collect())
    }

    async fn populate(&self, categories: Vec<Category>) -> Result<Vec<CategoryWithEvents>> {
        let mut ids: Vec<Uuid> = categories
            .iter()
            .flat_map(|c| c.events_list.iter().copied())
            .collect();
        ids.sort_unstable();
        ids.dedup();

        let events: HashMap<Uuid, Event> = self
            .db
            .get_events_by_ids(&ids)
            .await?
            .into_iter()
            .map(|row| (row.id, row_to_event(row)))
            .collect();

        Ok(categories
            .into_iter()
            .map(|c| CategoryWithEvents::populate(c, |id| events.get(id).cloned()))
            .collect())
    }
}

pub(crate) fn row_to_category(row: CategoryRow) -> Category {
    Category {
        id: row.id,
        category_id: row.category_id,
        name: row.name,
        description: row.description,
        image: row.image,
        events_list: row.events_list,
        created_at: row.created_at,
    }
}

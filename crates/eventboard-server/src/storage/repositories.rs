// Repository layer for database operations
// Decision: Every mutation runs in one transaction covering the entity row,
// the back-references on the other side and the counter row.

use anyhow::Result;
use eventboard_core::CounterDelta;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;
use uuid::Uuid;

use super::models::*;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending migrations from `migrations/`
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Create the counter row if it does not exist yet
    pub async fn ensure_counter(&self) -> Result<()> {
        sqlx::query("INSERT INTO counters (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // ============================================
    // Categories
    // ============================================

    /// Insert a category. Returns None when the external ID is already taken.
    #[instrument(skip(self, input), fields(category_id = %input.category_id))]
    pub async fn create_category(
        &self,
        input: CreateCategoryRow,
        delta: CounterDelta,
    ) -> Result<Option<CategoryRow>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (id, category_id, name, description, image)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (category_id) DO NOTHING
            RETURNING id, category_id, name, description, image, events_list, created_at
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(&input.category_id)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.image)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        apply_counter_delta(&mut *tx, delta).await?;
        tx.commit().await?;

        Ok(Some(row))
    }

    pub async fn list_categories(&self) -> Result<Vec<CategoryRow>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, category_id, name, description, image, events_list, created_at
            FROM categories
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get_categories_by_ids(&self, ids: &[Uuid]) -> Result<Vec<CategoryRow>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, category_id, name, description, image, events_list, created_at
            FROM categories
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get_category_by_external_id(
        &self,
        category_id: &str,
    ) -> Result<Option<CategoryRow>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, category_id, name, description, image, events_list, created_at
            FROM categories
            WHERE category_id = $1
            "#,
        )
        .bind(category_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[instrument(skip(self, input, delta))]
    pub async fn update_category(
        &self,
        category_id: &str,
        input: UpdateCategory,
        delta: CounterDelta,
    ) -> Result<Option<CategoryRow>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
            WHERE category_id = $1
            RETURNING id, category_id, name, description, image, events_list, created_at
            "#,
        )
        .bind(category_id)
        .bind(&input.name)
        .bind(&input.description)
        .fetch_optional(&mut *tx)
        .await?;

        if row.is_some() {
            apply_counter_delta(&mut *tx, delta).await?;
        }
        tx.commit().await?;

        Ok(row)
    }

    /// Delete a category and detach it from every event that references it.
    #[instrument(skip(self, delta))]
    pub async fn delete_category(
        &self,
        category_id: &str,
        delta: CounterDelta,
    ) -> Result<Option<CategoryRow>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            DELETE FROM categories
            WHERE category_id = $1
            RETURNING id, category_id, name, description, image, events_list, created_at
            "#,
        )
        .bind(category_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            r#"
            UPDATE events
            SET category_list = array_remove(category_list, $1)
            WHERE id = ANY($2)
            "#,
        )
        .bind(row.id)
        .bind(&row.events_list)
        .execute(&mut *tx)
        .await?;

        apply_counter_delta(&mut *tx, delta).await?;
        tx.commit().await?;

        Ok(Some(row))
    }

    // ============================================
    // Events
    // ============================================

    /// Link a new event to its categories, then insert it. Returns None when
    /// the external ID is taken.
    ///
    /// The back-reference append runs first and locks the matched category
    /// rows, so a concurrent category delete either removes the row before
    /// the append (and the event never lists it) or waits for this commit
    /// and then sees the event in `events_list`.
    #[instrument(skip(self, input, delta), fields(event_id = %input.event_id))]
    pub async fn create_event(
        &self,
        input: CreateEventRow,
        delta: CounterDelta,
    ) -> Result<Option<EventRow>> {
        let id = Uuid::now_v7();
        let mut tx = self.pool.begin().await?;

        let category_list = sqlx::query_scalar::<_, Uuid>(
            r#"
            WITH linked AS (
                UPDATE categories
                SET events_list = array_append(events_list, $1)
                WHERE category_id = ANY($2)
                RETURNING id, created_at
            )
            SELECT id FROM linked
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(id)
        .bind(&input.categories)
        .fetch_all(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, EventRow>(
            r#"
            INSERT INTO events (
                id, event_id, name, start_date, duration, display_duration, end_date,
                description, is_active, image, capacity, tickets_available,
                categories, category_list
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, $9, $10, $11, $12, $13)
            ON CONFLICT (event_id) DO NOTHING
            RETURNING id, event_id, name, start_date, duration, display_duration, end_date,
                      description, is_active, image, capacity, tickets_available,
                      categories, category_list, created_at
            "#,
        )
        .bind(id)
        .bind(&input.event_id)
        .bind(&input.name)
        .bind(input.start_date)
        .bind(input.duration)
        .bind(&input.display_duration)
        .bind(input.end_date)
        .bind(&input.description)
        .bind(&input.image)
        .bind(input.capacity)
        .bind(input.tickets_available)
        .bind(&input.categories)
        .bind(&category_list)
        .fetch_optional(&mut *tx)
        .await?;

        // Rolling back also undoes the appends
        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        apply_counter_delta(&mut *tx, delta).await?;
        tx.commit().await?;

        Ok(Some(row))
    }

    pub async fn list_events(&self) -> Result<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, event_id, name, start_date, duration, display_duration, end_date,
                   description, is_active, image, capacity, tickets_available,
                   categories, category_list, created_at
            FROM events
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get_events_by_ids(&self, ids: &[Uuid]) -> Result<Vec<EventRow>> {
        let rows = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, event_id, name, start_date, duration, display_duration, end_date,
                   description, is_active, image, capacity, tickets_available,
                   categories, category_list, created_at
            FROM events
            WHERE id = ANY($1)
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    pub async fn get_event_by_external_id(&self, event_id: &str) -> Result<Option<EventRow>> {
        let row = sqlx::query_as::<_, EventRow>(
            r#"
            SELECT id, event_id, name, start_date, duration, display_duration, end_date,
                   description, is_active, image, capacity, tickets_available,
                   categories, category_list, created_at
            FROM events
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    #[instrument(skip(self, input, delta))]
    pub async fn update_event(
        &self,
        event_id: &str,
        input: UpdateEvent,
        delta: CounterDelta,
    ) -> Result<Option<EventRow>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, EventRow>(
            r#"
            UPDATE events
            SET
                name = COALESCE($2, name),
                capacity = COALESCE($3, capacity)
            WHERE event_id = $1
            RETURNING id, event_id, name, start_date, duration, display_duration, end_date,
                      description, is_active, image, capacity, tickets_available,
                      categories, category_list, created_at
            "#,
        )
        .bind(event_id)
        .bind(&input.name)
        .bind(input.capacity)
        .fetch_optional(&mut *tx)
        .await?;

        if row.is_some() {
            apply_counter_delta(&mut *tx, delta).await?;
        }
        tx.commit().await?;

        Ok(row)
    }

    /// Delete an event and remove it from the back-reference list of every
    /// category it was attached to.
    #[instrument(skip(self, delta))]
    pub async fn delete_event(
        &self,
        event_id: &str,
        delta: CounterDelta,
    ) -> Result<Option<EventRow>> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, EventRow>(
            r#"
            DELETE FROM events
            WHERE event_id = $1
            RETURNING id, event_id, name, start_date, duration, display_duration, end_date,
                      description, is_active, image, capacity, tickets_available,
                      categories, category_list, created_at
            "#,
        )
        .bind(event_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(row) = row else {
            tx.rollback().await?;
            return Ok(None);
        };

        sqlx::query(
            r#"
            UPDATE categories
            SET events_list = array_remove(events_list, $1)
            WHERE id = ANY($2)
            "#,
        )
        .bind(row.id)
        .bind(&row.category_list)
        .execute(&mut *tx)
        .await?;

        apply_counter_delta(&mut *tx, delta).await?;
        tx.commit().await?;

        Ok(Some(row))
    }

    // ============================================
    // Counter
    // ============================================

    pub async fn get_counter(&self) -> Result<CounterRow> {
        let row = sqlx::query_as::<_, CounterRow>(
            r#"
            SELECT events_count, categories_count, add_count, update_count, delete_count
            FROM counters
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.unwrap_or_default())
    }

    /// Recompute the live totals from the entity tables.
    /// Lifetime totals (adds, updates, deletes) are left as they are.
    #[instrument(skip(self))]
    pub async fn reconcile_counter(&self) -> Result<CounterRow> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO counters (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(&mut *tx)
            .await?;

        let row = sqlx::query_as::<_, CounterRow>(
            r#"
            UPDATE counters
            SET
                events_count = (SELECT COUNT(*) FROM events),
                categories_count = (SELECT COUNT(*) FROM categories)
            WHERE id = 1
            RETURNING events_count, categories_count, add_count, update_count, delete_count
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row)
    }
}

/// Add a delta to the counter row, creating the row on first use.
async fn apply_counter_delta(conn: &mut PgConnection, delta: CounterDelta) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO counters (id, events_count, categories_count, add_count, update_count, delete_count)
        VALUES (1, $1, $2, $3, $4, $5)
        ON CONFLICT (id) DO UPDATE SET
            events_count = counters.events_count + EXCLUDED.events_count,
            categories_count = counters.categories_count + EXCLUDED.categories_count,
            add_count = counters.add_count + EXCLUDED.add_count,
            update_count = counters.update_count + EXCLUDED.update_count,
            delete_count = counters.delete_count + EXCLUDED.delete_count
        "#,
    )
    .bind(delta.events)
    .bind(delta.categories)
    .bind(delta.adds)
    .bind(delta.updates)
    .bind(delta.deletes)
    .execute(conn)
    .await?;

    Ok(())
}

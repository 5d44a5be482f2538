use async_trait::async_trait;
use uuid::Uuid;

use super::repo_types::LocationSample;
use crate::storage::{MemoryStore, PgStore, StoreError};

#[async_trait]
pub trait LocationStore: Send + Sync {
    async fn insert(&self, latitude: f64, longitude: f64) -> Result<LocationSample, StoreError>;
    /// Newest first, at most `limit` rows.
    async fn recent(&self, limit: i64) -> Result<Vec<LocationSample>, StoreError>;
}

#[async_trait]
impl LocationStore for PgStore {
    async fn insert(&self, latitude: f64, longitude: f64) -> Result<LocationSample, StoreError> {
        let row = sqlx::query_as::<_, LocationSample>(
            r#"
            INSERT INTO locations (id, latitude, longitude)
            VALUES ($1, $2, $3)
            RETURNING id, latitude, longitude, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(latitude)
        .bind(longitude)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<LocationSample>, StoreError> {
        let rows = sqlx::query_as::<_, LocationSample>(
            r#"
            SELECT id, latitude, longitude, created_at
            FROM locations
            ORDER BY created_at DESC, seq DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl LocationStore for MemoryStore {
    async fn insert(&self, latitude: f64, longitude: f64) -> Result<LocationSample, StoreError> {
        let mut inner = self.lock();
        let sample = LocationSample {
            id: Uuid::new_v4(),
            latitude,
            longitude,
            created_at: inner.next_stamp(),
        };
        inner.locations.push(sample.clone());
        Ok(sample)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<LocationSample>, StoreError> {
        let take = usize::try_from(limit).unwrap_or(0);
        // appended in stamp order, so reversing gives newest first
        Ok(self
            .lock()
            .locations
            .iter()
            .rev()
            .take(take)
            .cloned()
            .collect())
    }
}

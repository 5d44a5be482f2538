use std::sync::{Mutex, MutexGuard};

use sqlx::PgPool;
use time::{Duration, OffsetDateTime};

use crate::auth::repo_types::User;
use crate::locations::repo_types::LocationSample;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("email already registered")]
    DuplicateEmail,
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            if db.is_unique_violation() {
                return StoreError::DuplicateEmail;
            }
        }
        StoreError::Database(e)
    }
}

/// Postgres-backed store. Implements both `UserStore` and `LocationStore`.
#[derive(Clone)]
pub struct PgStore {
    pub(crate) pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Process-local store used by tests and throwaway runs.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryInner>,
}

#[derive(Default)]
pub(crate) struct MemoryInner {
    pub(crate) users: Vec<User>,
    pub(crate) locations: Vec<LocationSample>,
    last_stamp: Option<OffsetDateTime>,
}

impl MemoryInner {
    /// Strictly increasing timestamps, even when the clock doesn't advance between writes.
    pub(crate) fn next_stamp(&mut self) -> OffsetDateTime {
        let mut now = OffsetDateTime::now_utc();
        if let Some(last) = self.last_stamp {
            if now <= last {
                now = last + Duration::microseconds(1);
            }
        }
        self.last_stamp = Some(now);
        now
    }
}

impl MemoryStore {
    pub(crate) fn lock(&self) -> MutexGuard<'_, MemoryInner> {
        // nothing inside can be left half-written, so a poisoned lock is still usable
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }
}

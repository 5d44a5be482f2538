use std::sync::Arc;

use crate::auth::{jwt::JwtKeys, repo::UserStore};
use crate::config::AppConfig;
use crate::db;
use crate::locations::repo::LocationStore;
use crate::storage::PgStore;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub locations: Arc<dyn LocationStore>,
    pub jwt: JwtKeys,
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Connects to Postgres and applies migrations. Fails if the store is unreachable.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let pool = db::connect(&config).await?;
        db::migrate(&pool).await?;

        let store = Arc::new(PgStore::new(pool));
        Ok(Self::from_parts(store.clone(), store, config))
    }

    pub fn from_parts(
        users: Arc<dyn UserStore>,
        locations: Arc<dyn LocationStore>,
        config: AppConfig,
    ) -> Self {
        Self {
            users,
            locations,
            jwt: JwtKeys::from(&config.jwt),
            config: Arc::new(config),
        }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        Self::fake_with(AppConfig::test())
    }

    #[cfg(test)]
    pub fn fake_with(config: AppConfig) -> Self {
        let store = Arc::new(crate::storage::MemoryStore::default());
        Self::from_parts(store.clone(), store, config)
    }
}

use crate::config::AppConfig;
use crate::db;
use sqlx::AnyPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: AnyPool,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = db::connect(&config).await?;
        Ok(Self { db, config })
    }

    pub fn from_parts(db: AnyPool, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }
}

use std::net::SocketAddr;

use anyhow::Context;

use crate::db::Backend;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:///tmp/test.db?mode=rwc";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub backend: Backend,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// Identity every request acts as until real auth exists.
    pub acting_user_id: i64,
    pub seed_demo_data: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = get("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.into());
        let backend = Backend::from_url(&database_url)?;

        let port = match get("PORT").or_else(|| get("APP_PORT")) {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("PORT must be a port number, got {v:?}"))?,
            None => 3000,
        };

        Ok(Self {
            database_url,
            backend,
            host: get("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
            max_connections: get("DB_MAX_CONNECTIONS")
                .and_then(|v| v.parse::<u32>().ok())
                .unwrap_or(10),
            acting_user_id: get("ACTING_USER_ID")
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(1),
            seed_demo_data: get("SEED_DEMO_DATA")
                .map(|v| matches!(v.trim(), "1" | "true" | "TRUE" | "yes"))
                .unwrap_or(false),
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid bind address {}:{}", self.host, self.port))
    }
}

use anyhow::{bail, Context};
use sqlx::{
    any::{AnyPoolOptions, AnyRow},
    Any, AnyPool, Decode, Row, Type, ValueRef,
};
use tracing::info;

use crate::config::AppConfig;

/// SQL dialect behind the `AnyPool`. Only DDL differs between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn from_url(url: &str) -> anyhow::Result<Self> {
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Ok(Backend::Postgres)
        } else if url.starts_with("sqlite:") {
            Ok(Backend::Sqlite)
        } else {
            bail!("unsupported DATABASE_URL scheme: {url}")
        }
    }

    fn id_column(self) -> &'static str {
        match self {
            Backend::Postgres => "id BIGSERIAL PRIMARY KEY",
            Backend::Sqlite => "id INTEGER PRIMARY KEY AUTOINCREMENT",
        }
    }

    fn ref_type(self) -> &'static str {
        match self {
            Backend::Postgres => "BIGINT",
            Backend::Sqlite => "INTEGER",
        }
    }
}

pub async fn connect(config: &AppConfig) -> anyhow::Result<AnyPool> {
    sqlx::any::install_default_drivers();
    let db = AnyPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")?;
    Ok(db)
}

/// Read a nullable column from an `Any` row.
///
/// The `Any` driver type-checks a SQLite NULL as its own type and refuses to
/// decode it into `Option<T>`, so NULL is detected on the raw value first.
pub fn nullable<'r, T>(row: &'r AnyRow, column: &str) -> sqlx::Result<Option<T>>
where
    T: Decode<'r, Any> + Type<Any>,
{
    if row.try_get_raw(column)?.is_null() {
        return Ok(None);
    }
    row.try_get(column).map(Some)
}

fn schema_statements(backend: Backend) -> Vec<String> {
    let id = backend.id_column();
    let fk = backend.ref_type();
    vec![
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS "user" (
                {id},
                email TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL,
                is_active BOOLEAN NOT NULL DEFAULT TRUE
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS "character" (
                {id},
                name TEXT NOT NULL,
                gender TEXT,
                birth_year TEXT,
                height TEXT,
                mass TEXT,
                hair_color TEXT,
                eye_color TEXT
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS "planet" (
                {id},
                name TEXT NOT NULL,
                climate TEXT,
                terrain TEXT,
                population TEXT,
                diameter TEXT,
                gravity TEXT
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS "favorite" (
                {id},
                user_id {fk} NOT NULL REFERENCES "user" (id) ON DELETE CASCADE,
                character_id {fk} REFERENCES "character" (id) ON DELETE CASCADE,
                planet_id {fk} REFERENCES "planet" (id) ON DELETE CASCADE,
                CONSTRAINT favorite_one_target
                    CHECK ((character_id IS NULL) <> (planet_id IS NULL)),
                CONSTRAINT favorite_user_character_key UNIQUE (user_id, character_id),
                CONSTRAINT favorite_user_planet_key UNIQUE (user_id, planet_id)
            )
            "#
        ),
        r#"CREATE INDEX IF NOT EXISTS favorite_user_id_idx ON "favorite" (user_id)"#.to_string(),
    ]
}

/// Idempotent bootstrap of the four tables and their constraints.
pub async fn ensure_schema(db: &AnyPool, backend: Backend) -> anyhow::Result<()> {
    for ddl in schema_statements(backend) {
        sqlx::query(&ddl)
            .execute(db)
            .await
            .context("apply schema")?;
    }
    info!(?backend, "schema ready");
    Ok(())
}

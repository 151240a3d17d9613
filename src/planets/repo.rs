use sqlx::{Any, Executor};

use crate::planets::repo_types::{NewPlanet, Planet};

impl Planet {
    pub async fn list_all<'e, E>(db: E) -> sqlx::Result<Vec<Planet>>
    where
        E: Executor<'e, Database = Any>,
    {
        sqlx::query_as::<_, Planet>(
            r#"
            SELECT id, name, climate, terrain, population, diameter, gravity
            FROM "planet"
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await
    }

    pub async fn find_by_id<'e, E>(db: E, id: i64) -> sqlx::Result<Option<Planet>>
    where
        E: Executor<'e, Database = Any>,
    {
        sqlx::query_as::<_, Planet>(
            r#"
            SELECT id, name, climate, terrain, population, diameter, gravity
            FROM "planet"
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create<'e, E>(db: E, new: NewPlanet) -> sqlx::Result<Planet>
    where
        E: Executor<'e, Database = Any>,
    {
        sqlx::query_as::<_, Planet>(
            r#"
            INSERT INTO "planet" (name, climate, terrain, population, diameter, gravity)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, climate, terrain, population, diameter, gravity
            "#,
        )
        .bind(new.name)
        .bind(new.climate)
        .bind(new.terrain)
        .bind(new.population)
        .bind(new.diameter)
        .bind(new.gravity)
        .fetch_one(db)
        .await
    }

    pub async fn delete<'e, E>(db: E, id: i64) -> sqlx::Result<bool>
    where
        E: Executor<'e, Database = Any>,
    {
        let res = sqlx::query(r#"DELETE FROM "planet" WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

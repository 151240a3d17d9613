use sqlx::{Any, Executor};

use crate::people::repo_types::{Character, NewCharacter};

impl Character {
    pub async fn list_all<'e, E>(db: E) -> sqlx::Result<Vec<Character>>
    where
        E: Executor<'e, Database = Any>,
    {
        sqlx::query_as::<_, Character>(
            r#"
            SELECT id, name, gender, birth_year, height, mass, hair_color, eye_color
            FROM "character"
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await
    }

    /// `None` when no character has this id.
    pub async fn find_by_id<'e, E>(db: E, id: i64) -> sqlx::Result<Option<Character>>
    where
        E: Executor<'e, Database = Any>,
    {
        sqlx::query_as::<_, Character>(
            r#"
            SELECT id, name, gender, birth_year, height, mass, hair_color, eye_color
            FROM "character"
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    pub async fn create<'e, E>(db: E, new: NewCharacter) -> sqlx::Result<Character>
    where
        E: Executor<'e, Database = Any>,
    {
        sqlx::query_as::<_, Character>(
            r#"
            INSERT INTO "character" (name, gender, birth_year, height, mass, hair_color, eye_color)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, gender, birth_year, height, mass, hair_color, eye_color
            "#,
        )
        .bind(new.name)
        .bind(new.gender)
        .bind(new.birth_year)
        .bind(new.height)
        .bind(new.mass)
        .bind(new.hair_color)
        .bind(new.eye_color)
        .fetch_one(db)
        .await
    }

    /// Returns whether a row was removed. Favorites pointing at it are cascaded.
    pub async fn delete<'e, E>(db: E, id: i64) -> sqlx::Result<bool>
    where
        E: Executor<'e, Database = Any>,
    {
        let res = sqlx::query(r#"DELETE FROM "character" WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

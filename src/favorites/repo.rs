use sqlx::{Any, Executor};

use crate::favorites::repo_types::{Favorite, FavoriteRecord, FavoriteTarget};

fn into_favorite(rec: FavoriteRecord) -> sqlx::Result<Favorite> {
    Favorite::try_from(rec).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

impl Favorite {
    pub async fn list_for_user<'e, E>(db: E, user_id: i64) -> sqlx::Result<Vec<Favorite>>
    where
        E: Executor<'e, Database = Any>,
    {
        let rows = sqlx::query_as::<_, FavoriteRecord>(
            r#"
            SELECT id, user_id, character_id, planet_id
            FROM "favorite"
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await?;
        rows.into_iter().map(into_favorite).collect()
    }

    pub async fn find_for_target<'e, E>(
        db: E,
        user_id: i64,
        target: FavoriteTarget,
    ) -> sqlx::Result<Option<Favorite>>
    where
        E: Executor<'e, Database = Any>,
    {
        let sql = match target {
            FavoriteTarget::Character(_) => {
                r#"
                SELECT id, user_id, character_id, planet_id
                FROM "favorite"
                WHERE user_id = $1 AND character_id = $2
                "#
            }
            FavoriteTarget::Planet(_) => {
                r#"
                SELECT id, user_id, character_id, planet_id
                FROM "favorite"
                WHERE user_id = $1 AND planet_id = $2
                "#
            }
        };
        let row = sqlx::query_as::<_, FavoriteRecord>(sql)
            .bind(user_id)
            .bind(target.id())
            .fetch_optional(db)
            .await?;
        row.map(into_favorite).transpose()
    }

    pub async fn insert<'e, E>(db: E, user_id: i64, target: FavoriteTarget) -> sqlx::Result<Favorite>
    where
        E: Executor<'e, Database = Any>,
    {
        let row = sqlx::query_as::<_, FavoriteRecord>(
            r#"
            INSERT INTO "favorite" (user_id, character_id, planet_id)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, character_id, planet_id
            "#,
        )
        .bind(user_id)
        .bind(target.character_id())
        .bind(target.planet_id())
        .fetch_one(db)
        .await?;
        into_favorite(row)
    }

    /// Deletes the user's favorite for `target`; returns the number of rows removed.
    pub async fn delete_for_target<'e, E>(
        db: E,
        user_id: i64,
        target: FavoriteTarget,
    ) -> sqlx::Result<u64>
    where
        E: Executor<'e, Database = Any>,
    {
        let sql = match target {
            FavoriteTarget::Character(_) => {
                r#"DELETE FROM "favorite" WHERE user_id = $1 AND character_id = $2"#
            }
            FavoriteTarget::Planet(_) => {
                r#"DELETE FROM "favorite" WHERE user_id = $1 AND planet_id = $2"#
            }
        };
        let res = sqlx::query(sql)
            .bind(user_id)
            .bind(target.id())
            .execute(db)
            .await?;
        Ok(res.rows_affected())
    }
}

use sqlx::{Any, Executor};

use crate::users::repo_types::{User, UserRow};

// `is_active` is cast to an integer in every projection; see `UserRow`.

impl User {
    /// Active users only.
    pub async fn list_active<'e, E>(db: E) -> sqlx::Result<Vec<User>>
    where
        E: Executor<'e, Database = Any>,
    {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password,
                   CAST(CASE WHEN is_active THEN 1 ELSE 0 END AS BIGINT) AS is_active
            FROM "user"
            WHERE is_active
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    pub async fn list_all<'e, E>(db: E) -> sqlx::Result<Vec<User>>
    where
        E: Executor<'e, Database = Any>,
    {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password,
                   CAST(CASE WHEN is_active THEN 1 ELSE 0 END AS BIGINT) AS is_active
            FROM "user"
            ORDER BY id
            "#,
        )
        .fetch_all(db)
        .await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    pub async fn find_by_id<'e, E>(db: E, id: i64) -> sqlx::Result<Option<User>>
    where
        E: Executor<'e, Database = Any>,
    {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, password,
                   CAST(CASE WHEN is_active THEN 1 ELSE 0 END AS BIGINT) AS is_active
            FROM "user"
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await?;
        Ok(row.map(User::from))
    }

    /// Insert a user. `password_hash` must already be hashed.
    pub async fn create<'e, E>(
        db: E,
        email: &str,
        password_hash: &str,
        is_active: bool,
    ) -> sqlx::Result<User>
    where
        E: Executor<'e, Database = Any>,
    {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO "user" (email, password, is_active)
            VALUES ($1, $2, $3)
            RETURNING id, email, password,
                      CAST(CASE WHEN is_active THEN 1 ELSE 0 END AS BIGINT) AS is_active
            "#,
        )
        .bind(email.to_owned())
        .bind(password_hash.to_owned())
        .bind(is_active)
        .fetch_one(db)
        .await?;
        Ok(row.into())
    }

    /// Returns whether a row was removed. Favorites owned by the user go with it.
    pub async fn delete<'e, E>(db: E, id: i64) -> sqlx::Result<bool>
    where
        E: Executor<'e, Database = Any>,
    {
        let res = sqlx::query(r#"DELETE FROM "user" WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

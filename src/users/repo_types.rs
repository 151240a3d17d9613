use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Raw `user` row. `is_active` is read as an integer so both dialects decode alike.
#[derive(Debug, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub is_active: i64,
}

/// User record as served by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String, // argon2 hash, not exposed in JSON
    pub is_active: bool,
}

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        Self {
            id: r.id,
            email: r.email,
            password: r.password,
            is_active: r.is_active != 0,
        }
    }
}

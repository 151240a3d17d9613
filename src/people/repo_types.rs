use serde::{Deserialize, Serialize};
use sqlx::{any::AnyRow, FromRow, Row};

use crate::db::nullable;

/// A catalog character. Descriptive fields are free-form text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: i64,
    pub name: String,
    pub gender: Option<String>,
    pub birth_year: Option<String>,
    pub height: Option<String>,
    pub mass: Option<String>,
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
}

impl<'r> FromRow<'r, AnyRow> for Character {
    fn from_row(row: &'r AnyRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            gender: nullable(row, "gender")?,
            birth_year: nullable(row, "birth_year")?,
            height: nullable(row, "height")?,
            mass: nullable(row, "mass")?,
            hair_color: nullable(row, "hair_color")?,
            eye_color: nullable(row, "eye_color")?,
        })
    }
}

/// Fields accepted when inserting a character.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCharacter {
    pub name: String,
    pub gender: Option<String>,
    pub birth_year: Option<String>,
    pub height: Option<String>,
    pub mass: Option<String>,
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
}

use serde::{Deserialize, Serialize};
use sqlx::{any::AnyRow, FromRow, Row};
use thiserror::Error;

use crate::db::nullable;

/// What a favorite points at. Exactly one of the two, by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteTarget {
    Character(i64),
    Planet(i64),
}

impl FavoriteTarget {
    pub fn character_id(self) -> Option<i64> {
        match self {
            FavoriteTarget::Character(id) => Some(id),
            FavoriteTarget::Planet(_) => None,
        }
    }

    pub fn planet_id(self) -> Option<i64> {
        match self {
            FavoriteTarget::Planet(id) => Some(id),
            FavoriteTarget::Character(_) => None,
        }
    }

    pub fn id(self) -> i64 {
        match self {
            FavoriteTarget::Character(id) | FavoriteTarget::Planet(id) => id,
        }
    }

    /// Capitalized noun used in response messages.
    pub fn label(self) -> &'static str {
        match self {
            FavoriteTarget::Character(_) => "Character",
            FavoriteTarget::Planet(_) => "Planet",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidFavoriteTarget {
    #[error("favorite references both a character and a planet")]
    Both,
    #[error("favorite references neither a character nor a planet")]
    Neither,
}

/// Row and wire shape of a favorite: two nullable reference columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: i64,
    pub user_id: i64,
    pub character_id: Option<i64>,
    pub planet_id: Option<i64>,
}

impl<'r> FromRow<'r, AnyRow> for FavoriteRecord {
    fn from_row(row: &'r AnyRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            character_id: nullable(row, "character_id")?,
            planet_id: nullable(row, "planet_id")?,
        })
    }
}

/// A user's favorite. Serializes to `FavoriteRecord`; deserializing a record
/// with both or neither reference set fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FavoriteRecord", into = "FavoriteRecord")]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub target: FavoriteTarget,
}

impl TryFrom<FavoriteRecord> for Favorite {
    type Error = InvalidFavoriteTarget;

    fn try_from(r: FavoriteRecord) -> Result<Self, Self::Error> {
        let target = match (r.character_id, r.planet_id) {
            (Some(id), None) => FavoriteTarget::Character(id),
            (None, Some(id)) => FavoriteTarget::Planet(id),
            (Some(_), Some(_)) => return Err(InvalidFavoriteTarget::Both),
            (None, None) => return Err(InvalidFavoriteTarget::Neither),
        };
        Ok(Self {
            id: r.id,
            user_id: r.user_id,
            target,
        })
    }
}

impl From<Favorite> for FavoriteRecord {
    fn from(f: Favorite) -> Self {
        Self {
            id: f.id,
            user_id: f.user_id,
            character_id: f.target.character_id(),
            planet_id: f.target.planet_id(),
        }
    }
}

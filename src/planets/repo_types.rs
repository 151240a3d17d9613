use serde::{Deserialize, Serialize};
use sqlx::{any::AnyRow, FromRow, Row};

use crate::db::nullable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: i64,
    pub name: String,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    pub population: Option<String>,
    pub diameter: Option<String>,
    pub gravity: Option<String>,
}

impl<'r> FromRow<'r, AnyRow> for Planet {
    fn from_row(row: &'r AnyRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            climate: nullable(row, "climate")?,
            terrain: nullable(row, "terrain")?,
            population: nullable(row, "population")?,
            diameter: nullable(row, "diameter")?,
            gravity: nullable(row, "gravity")?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewPlanet {
    pub name: String,
    pub climate: Option<String>,
    pub terrain: Option<String>,
    pub population: Option<String>,
    pub diameter: Option<String>,
    pub gravity: Option<String>,
}

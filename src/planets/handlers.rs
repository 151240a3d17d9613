use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{error::AppError, planets::repo_types::Planet, state::AppState};

pub fn planet_routes() -> Router<AppState> {
    Router::new()
        .route("/planets", get(list_planets))
        .route("/planets/:id", get(get_planet))
}

#[instrument(skip(state))]
pub async fn list_planets(State(state): State<AppState>) -> Result<Json<Vec<Planet>>, AppError> {
    Ok(Json(Planet::list_all(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn get_planet(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Planet>, AppError> {
    let planet = Planet::find_by_id(&state.db, id).await?.ok_or_else(|| {
        warn!(%id, "planet not found");
        AppError::NotFound("Planet not found".into())
    })?;
    Ok(Json(planet))
}

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{error::AppError, people::repo_types::Character, state::AppState};

pub fn people_routes() -> Router<AppState> {
    Router::new()
        .route("/people", get(list_people))
        .route("/people/:id", get(get_person))
}

#[instrument(skip(state))]
pub async fn list_people(State(state): State<AppState>) -> Result<Json<Vec<Character>>, AppError> {
    Ok(Json(Character::list_all(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Character>, AppError> {
    match Character::find_by_id(&state.db, id).await? {
        Some(character) => Ok(Json(character)),
        None => {
            warn!(%id, "character not found");
            Err(AppError::NotFound("Character not found".into()))
        }
    }
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    error::{AppError, MessageBody},
    favorites::{repo_types::Favorite, services},
    state::AppState,
    users::ActingUser,
};

pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/users/favorites", get(list_favorites))
        .route(
            "/favorite/people/:id",
            post(add_character).delete(remove_character),
        )
        .route(
            "/favorite/planet/:id",
            post(add_planet).delete(remove_planet),
        )
}

#[instrument(skip(state))]
pub async fn list_favorites(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
) -> Result<Json<Vec<Favorite>>, AppError> {
    let favorites = services::list_favorites_for_user(&state.db, user_id).await?;
    Ok(Json(favorites))
}

#[instrument(skip(state))]
pub async fn add_character(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<Favorite>), AppError> {
    let favorite = services::add_character_favorite(&state.db, user_id, id).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

#[instrument(skip(state))]
pub async fn add_planet(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Path(id): Path<i64>,
) -> Result<(StatusCode, Json<Favorite>), AppError> {
    let favorite = services::add_planet_favorite(&state.db, user_id, id).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

#[instrument(skip(state))]
pub async fn remove_character(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageBody>, AppError> {
    services::remove_character_favorite(&state.db, user_id, id).await?;
    Ok(Json(MessageBody::new("Character removed from favorites")))
}

#[instrument(skip(state))]
pub async fn remove_planet(
    State(state): State<AppState>,
    ActingUser(user_id): ActingUser,
    Path(id): Path<i64>,
) -> Result<Json<MessageBody>, AppError> {
    services::remove_planet_favorite(&state.db, user_id, id).await?;
    Ok(Json(MessageBody::new("Planet removed from favorites")))
}

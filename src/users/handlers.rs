use axum::{extract::State, routing::get, Json, Router};
use tracing::{debug, instrument};

use crate::{error::AppError, state::AppState, users::repo_types::User};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(list_users))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    let users = User::list_active(&state.db).await?;
    debug!(count = users.len(), "listed active users");
    Ok(Json(users))
}

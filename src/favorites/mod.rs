use crate::state::AppState;
use axum::Router;

pub mod handlers;
pub mod repo;
pub mod repo_types;
pub mod services;

pub use repo_types::{Favorite, FavoriteRecord, FavoriteTarget};

pub fn router() -> Router<AppState> {
    handlers::favorite_routes()
}

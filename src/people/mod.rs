use crate::state::AppState;
use axum::Router;

pub mod handlers;
pub mod repo;
pub mod repo_types;

pub use repo_types::{Character, NewCharacter};

pub fn router() -> Router<AppState> {
    handlers::people_routes()
}

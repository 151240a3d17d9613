use crate::state::AppState;
use axum::Router;

pub mod extractors;
pub mod handlers;
pub mod password;
pub mod repo;
pub mod repo_types;

pub use extractors::ActingUser;
pub use repo_types::User;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::user_routes())
}

//! REST backend for a favorites catalog: characters, planets, users and the
//! per-user favorites linking them.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod favorites;
pub mod people;
pub mod planets;
pub mod routes;
pub mod seed;
pub mod state;
pub mod users;

pub use app::build_app;
pub use config::AppConfig;
pub use error::AppError;
pub use state::AppState;

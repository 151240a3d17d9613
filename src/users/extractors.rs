use std::convert::Infallible;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::state::AppState;

/// Id of the user a request acts on behalf of.
///
/// A middleware may place an `ActingUser` in the request extensions; otherwise
/// the configured default identity is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActingUser(pub i64);

#[async_trait]
impl FromRequestParts<AppState> for ActingUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<ActingUser>() {
            return Ok(*user);
        }
        Ok(ActingUser(state.config.acting_user_id))
    }
}

use sqlx::AnyPool;
use tracing::{info, warn};

use crate::{
    error::{is_foreign_key_violation, is_unique_violation, AppError},
    favorites::repo_types::{Favorite, FavoriteTarget},
    people::Character,
    planets::Planet,
    users::User,
};

async fn target_exists(db: &AnyPool, target: FavoriteTarget) -> sqlx::Result<bool> {
    Ok(match target {
        FavoriteTarget::Character(id) => Character::find_by_id(db, id).await?.is_some(),
        FavoriteTarget::Planet(id) => Planet::find_by_id(db, id).await?.is_some(),
    })
}

/// Favorite `target` for `user_id`.
///
/// The lookups only pick the right error message. The write is one
/// autocommit INSERT, so a concurrent duplicate is settled by the UNIQUE
/// constraint and comes back as `Conflict`.
pub async fn add_favorite(
    db: &AnyPool,
    user_id: i64,
    target: FavoriteTarget,
) -> Result<Favorite, AppError> {
    let label = target.label();

    if User::find_by_id(db, user_id).await?.is_none() {
        warn!(%user_id, "acting user does not exist");
        return Err(AppError::NotFound("User not found".into()));
    }
    if !target_exists(db, target).await? {
        warn!(%user_id, ?target, "favorite target does not exist");
        return Err(AppError::NotFound(format!("{label} not found")));
    }
    if Favorite::find_for_target(db, user_id, target)
        .await?
        .is_some()
    {
        warn!(%user_id, ?target, "duplicate favorite");
        return Err(AppError::Conflict(format!("{label} already in favorites")));
    }

    insert_favorite(db, user_id, target).await
}

/// Insert without the lookups, mapping constraint violations to API errors.
pub async fn insert_favorite(
    db: &AnyPool,
    user_id: i64,
    target: FavoriteTarget,
) -> Result<Favorite, AppError> {
    let label = target.label();
    let favorite = match Favorite::insert(db, user_id, target).await {
        Ok(f) => f,
        Err(e) if is_unique_violation(&e) => {
            warn!(%user_id, ?target, "duplicate favorite rejected by storage");
            return Err(AppError::Conflict(format!("{label} already in favorites")));
        }
        Err(e) if is_foreign_key_violation(&e) => {
            warn!(%user_id, ?target, "favorite reference vanished");
            return Err(AppError::NotFound(format!("{label} not found")));
        }
        Err(e) => return Err(e.into()),
    };
    info!(%user_id, favorite_id = favorite.id, ?target, "favorite added");
    Ok(favorite)
}

/// Remove the user's favorite for `target`. Single statement, so no transaction.
pub async fn remove_favorite(
    db: &AnyPool,
    user_id: i64,
    target: FavoriteTarget,
) -> Result<(), AppError> {
    let removed = Favorite::delete_for_target(db, user_id, target).await?;
    if removed == 0 {
        warn!(%user_id, ?target, "favorite not found");
        return Err(AppError::NotFound(format!("{} not in favorites", target.label())));
    }
    info!(%user_id, ?target, "favorite removed");
    Ok(())
}

pub async fn add_character_favorite(
    db: &AnyPool,
    user_id: i64,
    character_id: i64,
) -> Result<Favorite, AppError> {
    add_favorite(db, user_id, FavoriteTarget::Character(character_id)).await
}

pub async fn add_planet_favorite(
    db: &AnyPool,
    user_id: i64,
    planet_id: i64,
) -> Result<Favorite, AppError> {
    add_favorite(db, user_id, FavoriteTarget::Planet(planet_id)).await
}

pub async fn remove_character_favorite(
    db: &AnyPool,
    user_id: i64,
    character_id: i64,
) -> Result<(), AppError> {
    remove_favorite(db, user_id, FavoriteTarget::Character(character_id)).await
}

pub async fn remove_planet_favorite(
    db: &AnyPool,
    user_id: i64,
    planet_id: i64,
) -> Result<(), AppError> {
    remove_favorite(db, user_id, FavoriteTarget::Planet(planet_id)).await
}

pub async fn list_favorites_for_user(db: &AnyPool, user_id: i64) -> Result<Vec<Favorite>, AppError> {
    Ok(Favorite::list_for_user(db, user_id).await?)
}

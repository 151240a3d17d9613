use std::sync::Arc;

use axum::{http::StatusCode, Extension};
use axum_test::TestServer;
use favorites_api::{
    build_app, db,
    error::{AppError, MessageBody},
    favorites::{services, Favorite, FavoriteTarget},
    people::Character,
    planets::Planet,
    routes::sitemap::ROUTES,
    seed,
    users::{ActingUser, User},
    AppConfig, AppState,
};
use serde_json::Value;
use sqlx::any::AnyPoolOptions;
use tempfile::TempDir;

/// Fresh seeded in-memory database: users 1 (active) and 2 (inactive),
/// characters 1..=4, planets 1..=3.
async fn test_state() -> AppState {
    sqlx::any::install_default_drivers();
    let config = AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        _ => None,
    })
    .unwrap();
    // One connection that never expires keeps the in-memory database alive.
    let pool = AnyPoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect(&config.database_url)
        .await
        .unwrap();
    db::ensure_schema(&pool, config.backend).await.unwrap();
    seed::seed_demo_data(&pool).await.unwrap();
    AppState::from_parts(pool, Arc::new(config))
}

/// Seeded database in a temp file behind a multi-connection pool, the way
/// the service runs by default. Keep the `TempDir` alive for the test.
async fn file_state() -> (AppState, TempDir) {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("favorites.db").display());
    let config = AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some(url.clone()),
        "DB_MAX_CONNECTIONS" => Some("8".to_string()),
        _ => None,
    })
    .unwrap();
    let pool = db::connect(&config).await.unwrap();
    db::ensure_schema(&pool, config.backend).await.unwrap();
    seed::seed_demo_data(&pool).await.unwrap();
    (AppState::from_parts(pool, Arc::new(config)), dir)
}

async fn test_server() -> (TestServer, AppState) {
    let state = test_state().await;
    let server = TestServer::new(build_app(state.clone())).unwrap();
    (server, state)
}

#[tokio::test]
async fn sitemap_lists_every_route() {
    let (server, _) = test_server().await;

    let response = server.get("/").await;
    response.assert_status_ok();
    let body: Value = response.json();
    let routes = body["routes"].as_array().unwrap();
    assert_eq!(routes.len(), ROUTES.len());
    assert!(routes
        .iter()
        .any(|r| r["method"] == "DELETE" && r["path"] == "/favorite/planet/{id}"));
}

#[tokio::test]
async fn parameterless_get_routes_answer_ok() {
    let (server, _) = test_server().await;

    for route in ROUTES
        .iter()
        .filter(|r| r.method == "GET" && !r.path.contains('{'))
    {
        let response = server.get(route.path).await;
        assert_eq!(response.status_code(), StatusCode::OK, "GET {}", route.path);
    }
}

#[tokio::test]
async fn health_reports_database() {
    let (server, _) = test_server().await;

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn users_listing_excludes_inactive() {
    let (server, state) = test_server().await;
    assert_eq!(User::list_all(&state.db).await.unwrap().len(), 2);

    let response = server.get("/users").await;
    response.assert_status_ok();
    let users: Vec<Value> = response.json();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["email"], "demo@example.com");
    assert_eq!(users[0]["is_active"], true);
    assert!(users[0].get("password").is_none());
}

#[tokio::test]
async fn people_by_id_echoes_id() {
    let (server, state) = test_server().await;

    let all = Character::list_all(&state.db).await.unwrap();
    assert_eq!(all.len(), 4);
    for character in all {
        let response = server.get(&format!("/people/{}", character.id)).await;
        response.assert_status_ok();
        let body: Character = response.json();
        assert_eq!(body, character);
    }
}

#[tokio::test]
async fn missing_catalog_entries_are_404() {
    let (server, state) = test_server().await;
    assert!(Character::find_by_id(&state.db, 999).await.unwrap().is_none());
    assert!(Planet::find_by_id(&state.db, 999).await.unwrap().is_none());

    let response = server.get("/people/999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: MessageBody = response.json();
    assert_eq!(body.message, "Character not found");

    let response = server.get("/planets/999").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: MessageBody = response.json();
    assert_eq!(body.message, "Planet not found");
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let (server, _) = test_server().await;

    server
        .get("/people/luke")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn trailing_slash_is_equivalent() {
    let (server, _) = test_server().await;

    let plain: Vec<Planet> = server.get("/planets").await.json();
    let slashed = server.get("/planets/").await;
    slashed.assert_status_ok();
    assert_eq!(slashed.json::<Vec<Planet>>(), plain);

    server.get("/planets/2/").await.assert_status_ok();
    server
        .post("/favorite/planet/2/")
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn duplicate_character_favorite_is_rejected() {
    let (server, _) = test_server().await;

    let first = server.post("/favorite/people/1").await;
    first.assert_status(StatusCode::CREATED);
    let favorite: Favorite = first.json();
    assert_eq!(favorite.user_id, 1);
    assert_eq!(favorite.target, FavoriteTarget::Character(1));
    let raw: Value = first.json();
    assert_eq!(raw["planet_id"], Value::Null);

    let second = server.post("/favorite/people/1").await;
    second.assert_status(StatusCode::BAD_REQUEST);
    let body: MessageBody = second.json();
    assert_eq!(body.message, "Character already in favorites");
}

#[tokio::test]
async fn duplicate_planet_favorite_is_rejected() {
    let (server, _) = test_server().await;

    server
        .post("/favorite/planet/3")
        .await
        .assert_status(StatusCode::CREATED);
    let second = server.post("/favorite/planet/3").await;
    second.assert_status(StatusCode::BAD_REQUEST);
    let body: MessageBody = second.json();
    assert_eq!(body.message, "Planet already in favorites");
}

#[tokio::test]
async fn same_id_as_character_and_planet_are_independent() {
    let (server, _) = test_server().await;

    server
        .post("/favorite/people/2")
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/favorite/planet/2")
        .await
        .assert_status(StatusCode::CREATED);

    let favorites: Vec<Favorite> = server.get("/users/favorites").await.json();
    let targets: Vec<FavoriteTarget> = favorites.iter().map(|f| f.target).collect();
    assert_eq!(
        targets,
        vec![FavoriteTarget::Character(2), FavoriteTarget::Planet(2)]
    );
}

#[tokio::test]
async fn favorite_for_unknown_target_is_404() {
    let (server, state) = test_server().await;

    let response = server.post("/favorite/people/404").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: MessageBody = response.json();
    assert_eq!(body.message, "Character not found");

    server
        .post("/favorite/planet/404")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    assert!(Favorite::list_for_user(&state.db, 1).await.unwrap().is_empty());
}

#[tokio::test]
async fn add_then_remove_leaves_no_favorite() {
    let (server, _) = test_server().await;

    server
        .post("/favorite/people/3")
        .await
        .assert_status(StatusCode::CREATED);
    let removed = server.delete("/favorite/people/3").await;
    removed.assert_status_ok();
    let body: MessageBody = removed.json();
    assert_eq!(body.message, "Character removed from favorites");

    let favorites: Vec<Favorite> = server.get("/users/favorites").await.json();
    assert!(favorites
        .iter()
        .all(|f| f.target != FavoriteTarget::Character(3)));

    // The referenced character is untouched.
    server.get("/people/3").await.assert_status_ok();

    server
        .delete("/favorite/people/3")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn removing_absent_planet_favorite_is_404() {
    let (server, _) = test_server().await;

    let response = server.delete("/favorite/planet/1").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: MessageBody = response.json();
    assert_eq!(body.message, "Planet not in favorites");
}

#[tokio::test]
async fn concurrent_duplicates_create_one_row() {
    let (server, state) = test_server().await;

    let (a, b, c) = tokio::join!(
        async { server.post("/favorite/people/4").await },
        async { server.post("/favorite/people/4").await },
        async { server.post("/favorite/people/4").await },
    );
    let statuses = [a.status_code(), b.status_code(), c.status_code()];
    let created = statuses
        .iter()
        .filter(|s| **s == StatusCode::CREATED)
        .count();
    assert_eq!(created, 1, "statuses: {statuses:?}");
    assert!(statuses
        .iter()
        .all(|s| *s == StatusCode::CREATED || *s == StatusCode::BAD_REQUEST));

    let rows = Favorite::list_for_user(&state.db, 1).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_duplicates_on_shared_file_pool() {
    let (state, _dir) = file_state().await;

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let db = state.db.clone();
            tokio::spawn(async move { services::add_character_favorite(&db, 1, 4).await })
        })
        .collect();
    let mut created = 0;
    for task in tasks {
        match task.await.unwrap() {
            Ok(favorite) => {
                assert_eq!(favorite.target, FavoriteTarget::Character(4));
                created += 1;
            }
            Err(e) => {
                assert_eq!(e.status(), StatusCode::BAD_REQUEST, "unexpected error: {e}");
                assert_eq!(e.to_string(), "Character already in favorites");
            }
        }
    }
    assert_eq!(created, 1);

    let rows = Favorite::list_for_user(&state.db, 1).await.unwrap();
    assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn file_backed_favorites_round_trip_over_http() {
    let (state, _dir) = file_state().await;
    let server = TestServer::new(build_app(state.clone())).unwrap();

    server
        .post("/favorite/people/1")
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/favorite/planet/2")
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/favorite/people/1")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let response = server.get("/users/favorites").await;
    response.assert_status_ok();
    let raw: Vec<Value> = response.json();
    assert_eq!(raw.len(), 2);
    assert_eq!(raw[0]["planet_id"], Value::Null);
    assert_eq!(raw[1]["character_id"], Value::Null);
}

#[tokio::test]
async fn rows_with_null_references_decode() {
    let (server, state) = test_server().await;

    sqlx::query(r#"INSERT INTO "favorite" (user_id, character_id) VALUES (1, 1)"#)
        .execute(&state.db)
        .await
        .unwrap();
    sqlx::query(r#"INSERT INTO "character" (name) VALUES ('Chewbacca')"#)
        .execute(&state.db)
        .await
        .unwrap();

    let response = server.get("/users/favorites").await;
    response.assert_status_ok();
    let favorites: Vec<Favorite> = response.json();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].target, FavoriteTarget::Character(1));

    let people: Vec<Character> = server.get("/people").await.json();
    let chewie = people.iter().find(|c| c.name == "Chewbacca").unwrap();
    assert_eq!(chewie.gender, None);
    assert_eq!(chewie.eye_color, None);
}

#[tokio::test]
async fn duplicate_caught_by_storage_is_400() {
    let (state, _dir) = file_state().await;

    services::add_planet_favorite(&state.db, 1, 3).await.unwrap();
    // Skips the lookup, as a request racing the first one would.
    let err = services::insert_favorite(&state.db, 1, FavoriteTarget::Planet(3))
        .await
        .unwrap_err();
    assert!(matches!(&err, AppError::Conflict(m) if m == "Planet already in favorites"));

    let response = axum::response::IntoResponse::into_response(err);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn storage_maps_missing_reference_to_404() {
    let state = test_state().await;

    let err = services::insert_favorite(&state.db, 1, FavoriteTarget::Character(404))
        .await
        .unwrap_err();
    assert!(matches!(&err, AppError::NotFound(m) if m == "Character not found"));
}

#[tokio::test]
async fn acting_user_comes_from_request_extension() {
    let state = test_state().await;
    let as_user_two =
        TestServer::new(build_app(state.clone()).layer(Extension(ActingUser(2)))).unwrap();
    let as_default = TestServer::new(build_app(state.clone())).unwrap();

    let response = as_user_two.post("/favorite/planet/1").await;
    response.assert_status(StatusCode::CREATED);
    let favorite: Favorite = response.json();
    assert_eq!(favorite.user_id, 2);

    let mine: Vec<Favorite> = as_default.get("/users/favorites").await.json();
    assert!(mine.is_empty());
    let theirs: Vec<Favorite> = as_user_two.get("/users/favorites").await.json();
    assert_eq!(theirs, vec![favorite]);
}

#[tokio::test]
async fn favorites_require_an_existing_user() {
    let state = test_state().await;
    let ghost = TestServer::new(build_app(state).layer(Extension(ActingUser(77)))).unwrap();

    let response = ghost.post("/favorite/people/1").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: MessageBody = response.json();
    assert_eq!(body.message, "User not found");
}

#[tokio::test]
async fn deleting_catalog_or_user_cascades_to_favorites() {
    let (server, state) = test_server().await;

    server
        .post("/favorite/people/1")
        .await
        .assert_status(StatusCode::CREATED);
    server
        .post("/favorite/planet/1")
        .await
        .assert_status(StatusCode::CREATED);

    assert!(Character::delete(&state.db, 1).await.unwrap());
    let left = Favorite::list_for_user(&state.db, 1).await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].target, FavoriteTarget::Planet(1));

    assert!(Planet::find_by_id(&state.db, 1).await.unwrap().is_some());
    assert!(User::delete(&state.db, 1).await.unwrap());
    assert!(Favorite::list_for_user(&state.db, 1).await.unwrap().is_empty());
    assert!(Planet::delete(&state.db, 1).await.unwrap());
    assert!(!Planet::delete(&state.db, 1).await.unwrap());
}

#[tokio::test]
async fn storage_rejects_invalid_favorite_rows() {
    let state = test_state().await;

    let both = sqlx::query(
        r#"INSERT INTO "favorite" (user_id, character_id, planet_id) VALUES (1, 1, 1)"#,
    )
    .execute(&state.db)
    .await;
    assert!(both.is_err());

    let neither = sqlx::query(r#"INSERT INTO "favorite" (user_id) VALUES (1)"#)
        .execute(&state.db)
        .await;
    assert!(neither.is_err());

    Favorite::insert(&state.db, 1, FavoriteTarget::Character(2))
        .await
        .unwrap();
    let dup = Favorite::insert(&state.db, 1, FavoriteTarget::Character(2))
        .await
        .unwrap_err();
    assert!(favorites_api::error::is_unique_violation(&dup));
}

#[tokio::test]
async fn seeding_is_idempotent() {
    let state = test_state().await;

    seed::seed_demo_data(&state.db).await.unwrap();
    assert_eq!(User::list_all(&state.db).await.unwrap().len(), 2);
    assert_eq!(Planet::list_all(&state.db).await.unwrap().len(), 3);
}

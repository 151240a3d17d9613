//! Machine-readable listing of every route the service answers.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RouteInfo {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

pub const ROUTES: &[RouteInfo] = &[
    RouteInfo { method: "GET", path: "/", description: "this listing" },
    RouteInfo { method: "GET", path: "/health", description: "liveness and database check" },
    RouteInfo { method: "GET", path: "/users", description: "active users" },
    RouteInfo { method: "GET", path: "/users/favorites", description: "favorites of the acting user" },
    RouteInfo { method: "GET", path: "/people", description: "all characters" },
    RouteInfo { method: "GET", path: "/people/{id}", description: "one character" },
    RouteInfo { method: "GET", path: "/planets", description: "all planets" },
    RouteInfo { method: "GET", path: "/planets/{id}", description: "one planet" },
    RouteInfo { method: "POST", path: "/favorite/people/{id}", description: "favorite a character" },
    RouteInfo { method: "DELETE", path: "/favorite/people/{id}", description: "unfavorite a character" },
    RouteInfo { method: "POST", path: "/favorite/planet/{id}", description: "favorite a planet" },
    RouteInfo { method: "DELETE", path: "/favorite/planet/{id}", description: "unfavorite a planet" },
];

#[derive(Debug, Serialize)]
pub struct Sitemap {
    pub routes: &'static [RouteInfo],
}

pub async fn sitemap() -> Json<Sitemap> {
    Json(Sitemap { routes: ROUTES })
}

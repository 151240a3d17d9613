use axum::{routing::get, Router};
use tower::Layer;
use tower_http::{cors::CorsLayer, normalize_path::NormalizePathLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::routes::{health::health, sitemap::sitemap};
use crate::state::AppState;
use crate::{favorites, people, planets, users};

pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(sitemap))
        .route("/health", get(health))
        .merge(users::router())
        .merge(people::router())
        .merge(planets::router())
        .merge(favorites::router())
        .with_state(state)
}

/// Full application: trailing slashes are trimmed before routing, so
/// `/people/` and `/people` hit the same handler.
pub fn build_app(state: AppState) -> Router {
    let api = NormalizePathLayer::trim_trailing_slash().layer(api_router(state));
    Router::new()
        .fallback_service(api)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri, status = tracing::field::Empty)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr()?;
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

// HTTP + WebSocket routes for the presentation layer

mod error;
mod http;
mod ws;

pub use error::ApiError;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};

use crate::session::SessionClient;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) session: SessionClient,
}

pub fn app(session: SessionClient) -> Router {
    let state = AppState { session };
    Router::new()
        .route("/", get(|| async { "pingboard: live latency dashboard" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/stats", get(http::stats_handler)) // GET /api/stats
        .route(
            "/api/targets",
            post(http::add_target_handler).get(http::list_targets_handler),
        ) // GET|POST /api/targets
        .route(
            "/api/targets/{address}",
            get(http::target_status_handler).delete(http::remove_target_handler),
        ) // GET|DELETE /api/targets/{address}
        .route("/api/targets/{address}/series", get(http::series_handler)) // GET .../series
        .route("/api/targets/{address}/route", get(http::route_handler)) // GET .../route
        .route("/ws/dashboard", get(ws::ws_dashboard)) // WS /ws/dashboard
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

// Presentation layer - HTTP routes
pub mod app_state;
pub mod error;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    add_entry, get_chart, get_theme, health_check, refresh, remove_entry, stream_dashboard,
    toggle_theme,
};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/charts/:metric", get(get_chart))
        .route("/dashboards/:metric", get(stream_dashboard))
        .route("/entries/:metric", post(add_entry).delete(remove_entry))
        .route("/refresh/:metric", put(refresh))
        .route("/theme", get(get_theme))
        .route("/theme/toggle", post(toggle_theme))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

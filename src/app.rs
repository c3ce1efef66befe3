use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/status", post(handlers::set_status_form))
        .route("/api/schedule", get(handlers::get_schedule))
        .route("/api/today", get(handlers::get_today))
        .route("/api/status", post(handlers::set_status))
        .route("/api/months", get(handlers::get_months))
        .route("/api/analytics", get(handlers::get_analytics))
        .with_state(state)
}

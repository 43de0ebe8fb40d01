use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/polls", get(handlers::list_polls))
        .route("/api/polls/:poll_id", get(handlers::get_poll))
        .route("/api/polls/:poll_id/vote", post(handlers::vote))
        .route("/api/overview", get(handlers::get_overview))
        .with_state(state)
}

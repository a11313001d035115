pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::interview::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/start-interview", post(handlers::handle_start_interview))
        .route("/answer", post(handlers::handle_answer))
        .with_state(state)
}

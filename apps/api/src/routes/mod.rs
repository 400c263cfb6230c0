pub mod health;
pub mod layout;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/fonts", get(layout::handle_list_fonts))
        .route("/api/v1/layout", post(layout::handle_layout))
        .with_state(state)
}

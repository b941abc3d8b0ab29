use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use ethers::providers::Middleware;

use crate::state::AppState;

pub async fn handler<M: Middleware + 'static>(
    State(state): State<Arc<AppState<M>>>,
) -> impl IntoResponse {
    (
        StatusCode::OK,
        format!(
            "OK v{}, contract: {:?}, uptime: {:?} seconds",
            env!("CARGO_PKG_VERSION"),
            state.order_book.address(),
            state.uptime.elapsed().as_secs()
        ),
    )
}

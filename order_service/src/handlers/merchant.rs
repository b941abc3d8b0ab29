use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    Json,
};
use ethers::providers::Middleware;

use super::{ApiError, Params, WriteTransactionResponse};
use crate::state::AppState;

/// Cancels an order, signed by the wallet of the customer who placed it.
pub async fn cancel_order<M: Middleware + 'static>(
    State(state): State<Arc<AppState<M>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<WriteTransactionResponse>, ApiError> {
    let params = Params::require(query, &["customer_id", "order_id"])?;

    let customer = state.main_wallet.customer_wallet(params.str("customer_id"))?;
    let calldata = state
        .order_book
        .cancel_order_calldata(params.str("order_id"))?;
    let tx_hash = state.order_book.submit(&customer, calldata).await?;

    Ok(Json(WriteTransactionResponse::new(tx_hash)))
}

//! Token supply and transaction lookups.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    Json,
};
use ethers::{providers::Middleware, types::TransactionReceipt};
use serde::Serialize;

use super::{ApiError, Params, WriteTransactionResponse};
use crate::state::AppState;

#[derive(Serialize, Debug)]
pub struct TransactionStatusResponse {
    #[serde(rename = "Receipt")]
    pub receipt: Option<TransactionReceipt>,
}

pub async fn get_transaction_status<M: Middleware + 'static>(
    State(state): State<Arc<AppState<M>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<TransactionStatusResponse>, ApiError> {
    let params = Params::require(query, &["transaction_hash"])?;
    let tx_hash = params.tx_hash("transaction_hash")?;

    let receipt = state.order_book.transaction_receipt(tx_hash).await?;
    Ok(Json(TransactionStatusResponse { receipt }))
}

/// Mints new tokens into a customer's wallet. The customer's own wallet signs
/// and pays for gas.
pub async fn mint_tokens<M: Middleware + 'static>(
    State(state): State<Arc<AppState<M>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<WriteTransactionResponse>, ApiError> {
    let params = Params::require(query, &["customer_id", "token_id", "quantity"])?;
    let token_id = params.u256("token_id")?;
    let quantity = params.u256("quantity")?;

    let customer = state.main_wallet.customer_wallet(params.str("customer_id"))?;
    let calldata = state
        .order_book
        .mint_calldata(customer.address(), token_id, quantity)?;
    let tx_hash = state.order_book.submit(&customer, calldata).await?;

    Ok(Json(WriteTransactionResponse::new(tx_hash)))
}

pub async fn transfer_tokens<M: Middleware + 'static>(
    State(state): State<Arc<AppState<M>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<WriteTransactionResponse>, ApiError> {
    let params = Params::require(query, &["to", "token_id", "quantity"])?;
    let to = params.address("to")?;
    let token_id = params.u256("token_id")?;
    let quantity = params.u256("quantity")?;

    let treasury = state.main_wallet.treasury()?;
    let calldata = state
        .order_book
        .transfer_calldata(treasury.address(), to, token_id, quantity)?;
    let tx_hash = state.order_book.submit(&treasury, calldata).await?;

    Ok(Json(WriteTransactionResponse::new(tx_hash)))
}

//! Routes acting on behalf of a customer, identified by an opaque id.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    Json,
};
use ethers::providers::Middleware;
use serde::Serialize;

use super::{ApiError, Params, WriteTransactionResponse};
use crate::state::AppState;

#[derive(Serialize, Debug)]
pub struct BalanceResponse {
    pub balance: String,
}

#[derive(Serialize, Debug)]
pub struct OrderStatusResponse {
    pub status: u8,
}

#[derive(Serialize, Debug)]
pub struct PublicAddressResponse {
    pub public_address: String,
}

pub async fn get_available_balance<M: Middleware + 'static>(
    State(state): State<Arc<AppState<M>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<BalanceResponse>, ApiError> {
    let params = Params::require(query, &["customer_id", "token_id"])?;
    let token_id = params.u256("token_id")?;

    let customer = state.main_wallet.customer_wallet(params.str("customer_id"))?;
    let balance = state
        .order_book
        .balance_of(customer.address(), token_id)
        .await?;

    Ok(Json(BalanceResponse {
        balance: balance.to_string(),
    }))
}

pub async fn create_order<M: Middleware + 'static>(
    State(state): State<Arc<AppState<M>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<WriteTransactionResponse>, ApiError> {
    let params = Params::require(
        query,
        &["customer_id", "order_id", "amount", "merchant_address"],
    )?;
    let amount = params.u256("amount")?;
    let merchant = params.address("merchant_address")?;

    let customer = state.main_wallet.customer_wallet(params.str("customer_id"))?;
    let calldata = state
        .order_book
        .create_order_calldata(params.str("order_id"), amount, merchant)?;
    let tx_hash = state.order_book.submit(&customer, calldata).await?;

    Ok(Json(WriteTransactionResponse::new(tx_hash)))
}

pub async fn get_order_status<M: Middleware + 'static>(
    State(state): State<Arc<AppState<M>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<OrderStatusResponse>, ApiError> {
    let params = Params::require(query, &["order_id"])?;
    let status = state.order_book.order_status(params.str("order_id")).await?;

    Ok(Json(OrderStatusResponse { status }))
}

/// Offline: the address is derived from the main wallet, the node is not asked.
pub async fn get_public_address<M: Middleware + 'static>(
    State(state): State<Arc<AppState<M>>>,
    Query(query): Query<HashMap<String, String>>,
) -> Result<Json<PublicAddressResponse>, ApiError> {
    let params = Params::require(query, &["customer_id"])?;
    let customer = state.main_wallet.customer_wallet(params.str("customer_id"))?;

    Ok(Json(PublicAddressResponse {
        public_address: ethers::utils::to_checksum(&customer.address(), None),
    }))
}

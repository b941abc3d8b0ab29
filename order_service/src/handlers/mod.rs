use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ethers::{
    signers::WalletError,
    types::{Address, H256, U256},
};
use order_book::{utils, OrderBookError};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

pub mod customer;
pub mod health;
pub mod merchant;
pub mod utilities;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing GET parameters: {}", .0.join(", "))]
    MissingParams(Vec<&'static str>),

    #[error("Invalid parameter {name}: {reason}")]
    InvalidParam { name: &'static str, reason: String },

    #[error("Failed to load customer wallet: {0}")]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    OrderBook(#[from] OrderBookError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingParams(_)
            | ApiError::InvalidParam { .. }
            | ApiError::OrderBook(OrderBookError::InvalidAddress(_)) => StatusCode::BAD_REQUEST,
            _ => {
                error!("HTTP server error: {self}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

/// Query-string parameters of a request, checked against what the route needs.
pub struct Params(HashMap<String, String>);

impl Params {
    /// Fails with every missing (or empty) name, in the order given.
    pub fn require(
        query: HashMap<String, String>,
        required: &[&'static str],
    ) -> Result<Self, ApiError> {
        let params = Self(query);
        let missing: Vec<_> = required
            .iter()
            .copied()
            .filter(|name| params.str(name).is_empty())
            .collect();

        if !missing.is_empty() {
            return Err(ApiError::MissingParams(missing));
        }
        Ok(params)
    }

    pub fn str(&self, name: &str) -> &str {
        self.0.get(name).map(|v| v.trim()).unwrap_or_default()
    }

    pub fn u256(&self, name: &'static str) -> Result<U256, ApiError> {
        U256::from_dec_str(self.str(name)).map_err(|e| ApiError::InvalidParam {
            name,
            reason: e.to_string(),
        })
    }

    pub fn address(&self, name: &'static str) -> Result<Address, ApiError> {
        utils::parse_address(self.str(name)).map_err(|e| ApiError::InvalidParam {
            name,
            reason: e.to_string(),
        })
    }

    pub fn tx_hash(&self, name: &'static str) -> Result<H256, ApiError> {
        utils::parse_tx_hash(self.str(name)).ok_or_else(|| ApiError::InvalidParam {
            name,
            reason: "expected a 32 byte hex hash".to_owned(),
        })
    }
}

/// Response of every route that writes to the contract.
#[derive(Serialize, Debug)]
pub struct WriteTransactionResponse {
    pub transaction: String,
}

impl WriteTransactionResponse {
    pub fn new(tx_hash: H256) -> Self {
        Self {
            transaction: format!("{tx_hash:?}"),
        }
    }
}

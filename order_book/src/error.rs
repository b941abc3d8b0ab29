use ethers::signers::WalletError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrderBookError {
    #[error("Invalid address {0}")]
    InvalidAddress(String),

    #[error("Contract call failed: {0}")]
    Contract(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Wallet error: {0}")]
    Wallet(#[from] WalletError),

    #[error("Could not encode calldata for {0}")]
    Calldata(&'static str),
}

pub type OrderBookResult<T> = Result<T, OrderBookError>;

pub mod config;
pub mod contracts;
pub mod error;
pub mod utils;
pub mod wallet;

pub use contracts::order_book::OrderBook;
pub use error::{OrderBookError, OrderBookResult};
pub use wallet::{DerivedWallet, MainWallet};

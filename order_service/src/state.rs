use std::time::Instant;

use order_book::{MainWallet, OrderBook};

pub struct AppState<M> {
    pub order_book: OrderBook<M>,
    pub main_wallet: MainWallet,
    pub uptime: Instant,
}

impl<M> AppState<M> {
    pub fn new(order_book: OrderBook<M>, main_wallet: MainWallet) -> Self {
        Self {
            order_book,
            main_wallet,
            uptime: Instant::now(),
        }
    }
}

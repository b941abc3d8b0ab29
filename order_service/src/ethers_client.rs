use std::sync::Arc;

use deploy_config::{NetworkProfile, Secrets};
use ethers::providers::{Http, Middleware, Provider};
use order_book::{config::ContractNetworkConfig, MainWallet, OrderBook};

/// Connects the order book through the deployment profile's provider factory,
/// and derives the main wallet from the same mnemonic.
pub fn get_order_book_client(
    profile: &NetworkProfile,
    secrets: &Secrets,
    contract_config: &ContractNetworkConfig,
) -> anyhow::Result<(OrderBook<Provider<Http>>, MainWallet)> {
    let signer = profile.provider(secrets)?;
    tracing::info!("deployer account is {:?}", signer.address());

    let provider = signer.inner().clone();
    let order_book = OrderBook::new(contract_config, Arc::new(provider))?;
    let main_wallet = MainWallet::from_mnemonic(&secrets.mnemonic)?;

    Ok((order_book, main_wallet))
}

/// Warns when the node serves a different chain than the profile declares.
pub async fn check_chain_id<M: Middleware>(order_book: &OrderBook<M>, profile: &NetworkProfile) {
    match order_book.chain_id().await {
        Ok(chain_id) if profile.network_id.matches(chain_id) => {
            tracing::info!("Connected to EVM node successfully, chain id {chain_id}");
        }
        Ok(chain_id) => {
            tracing::warn!(
                "node reports chain id {chain_id} but the profile declares network_id {}",
                profile.network_id
            );
        }
        Err(e) => tracing::warn!("could not reach the EVM node: {e}"),
    }
}

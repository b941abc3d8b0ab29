use std::sync::Arc;

use ethers::{
    providers::Middleware,
    types::{
        transaction::eip2718::TypedTransaction, Address, BlockNumber, Bytes, TransactionReceipt,
        TransactionRequest, H256, U256,
    },
};

use crate::{
    config::{ContractNetworkConfig, TransactionOptions},
    error::{OrderBookError, OrderBookResult},
    utils::parse_address,
    wallet::DerivedWallet,
};

// Include generated contract types from build script
include!(concat!(env!("OUT_DIR"), "/order_book_contract.rs"));

/// Client for the deployed order book: ERC-1155 balances plus customer orders.
///
/// Reads go straight to the node. Writes are encoded offline, then signed by a
/// wallet derived from the service mnemonic and broadcast as raw legacy
/// transactions.
pub struct OrderBook<M> {
    contract: OrderBookContract<M>,
    client: Arc<M>,
    options: TransactionOptions,
}

impl<M> OrderBook<M>
where
    M: Middleware,
{
    pub fn new(config: &ContractNetworkConfig, client: Arc<M>) -> OrderBookResult<Self> {
        let contract_address = parse_address(&config.contract_address)?;

        Ok(Self {
            contract: OrderBookContract::new(contract_address, client.clone()),
            client,
            options: config.tx,
        })
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    pub async fn balance_of(&self, account: Address, token_id: U256) -> OrderBookResult<U256> {
        self.contract
            .balance_of(account, token_id)
            .call()
            .await
            .map_err(|e| OrderBookError::Contract(e.to_string()))
    }

    pub async fn order_status(&self, order_id: &str) -> OrderBookResult<u8> {
        self.contract
            .get_order_status(order_id.to_owned())
            .call()
            .await
            .map_err(|e| OrderBookError::Contract(e.to_string()))
    }

    /// `None` while the transaction is pending or unknown to the node.
    pub async fn transaction_receipt(
        &self,
        tx_hash: H256,
    ) -> OrderBookResult<Option<TransactionReceipt>> {
        self.client
            .get_transaction_receipt(tx_hash)
            .await
            .map_err(|e| OrderBookError::Provider(e.to_string()))
    }

    pub fn create_order_calldata(
        &self,
        order_id: &str,
        amount: U256,
        merchant: Address,
    ) -> OrderBookResult<Bytes> {
        self.contract
            .create_order(order_id.to_owned(), amount, merchant)
            .calldata()
            .ok_or(OrderBookError::Calldata("createOrder"))
    }

    pub fn cancel_order_calldata(&self, order_id: &str) -> OrderBookResult<Bytes> {
        self.contract
            .cancel_order(order_id.to_owned())
            .calldata()
            .ok_or(OrderBookError::Calldata("cancelOrder"))
    }

    pub fn mint_calldata(
        &self,
        to: Address,
        token_id: U256,
        quantity: U256,
    ) -> OrderBookResult<Bytes> {
        self.contract
            .mint(to, token_id, quantity, Bytes::new())
            .calldata()
            .ok_or(OrderBookError::Calldata("mint"))
    }

    pub fn transfer_calldata(
        &self,
        from: Address,
        to: Address,
        token_id: U256,
        quantity: U256,
    ) -> OrderBookResult<Bytes> {
        self.contract
            .safe_transfer_from(from, to, token_id, quantity, Bytes::new())
            .calldata()
            .ok_or(OrderBookError::Calldata("safeTransferFrom"))
    }

    pub async fn chain_id(&self) -> OrderBookResult<u64> {
        let chain_id = self
            .client
            .get_chainid()
            .await
            .map_err(|e| OrderBookError::Provider(format!("error getting chain id: {e}")))?;
        Ok(chain_id.as_u64())
    }

    /// Builds the unsigned call to the contract: pending nonce of `from`,
    /// the node's suggested gas price scaled by the configured multiplier.
    pub async fn prepare_transaction(
        &self,
        from: Address,
        calldata: Bytes,
    ) -> OrderBookResult<TypedTransaction> {
        let nonce = self
            .client
            .get_transaction_count(from, Some(BlockNumber::Pending.into()))
            .await
            .map_err(|e| OrderBookError::Provider(format!("error getting nonce: {e}")))?;
        tracing::debug!("retrieved nonce {nonce} for {from:?}");

        let suggested = self
            .client
            .get_gas_price()
            .await
            .map_err(|e| OrderBookError::Provider(format!("error suggesting gas price: {e}")))?;
        let gas_price = suggested * U256::from(self.options.gas_price_multiplier_pct) / 100;
        tracing::debug!("suggested gas price {suggested}, using {gas_price}");

        Ok(TransactionRequest::new()
            .from(from)
            .to(self.address())
            .nonce(nonce)
            .gas(self.options.gas_limit)
            .gas_price(gas_price)
            .value(0)
            .data(calldata)
            .into())
    }

    /// The raw EIP-155 transaction calling the contract with `calldata`,
    /// signed by `wallet` for the chain the node reports.
    pub async fn signed_transaction(
        &self,
        wallet: &DerivedWallet,
        calldata: Bytes,
    ) -> OrderBookResult<Bytes> {
        let tx = self.prepare_transaction(wallet.address(), calldata).await?;
        let chain_id = self.chain_id().await?;
        Ok(wallet.sign(chain_id, &tx)?)
    }

    /// Signs `calldata` as a call from `wallet` and broadcasts it.
    /// The wallet must hold enough native token to pay for gas.
    pub async fn submit(&self, wallet: &DerivedWallet, calldata: Bytes) -> OrderBookResult<H256> {
        let raw_tx = self.signed_transaction(wallet, calldata).await?;

        let pending = self
            .client
            .send_raw_transaction(raw_tx)
            .await
            .map_err(|e| OrderBookError::Provider(format!("error submitting transaction: {e}")))?;

        let tx_hash = pending.tx_hash();
        tracing::info!("submitted transaction {tx_hash:?} from {:?}", wallet.address());
        Ok(tx_hash)
    }
}

#[cfg(test)]
mod tests {
    use ethers::{abi::AbiDecode, providers::MockProvider, types::U64, utils::rlp};

    use crate::contracts::test_utils::{mocked_order_book, test_main_wallet, TEST_CONTRACT_ADDRESS};

    use super::*;

    #[test]
    fn test_rejects_invalid_contract_address() {
        let (provider, _mock) = ethers::providers::Provider::mocked();
        let config = ContractNetworkConfig {
            contract_address: "not-an-address".to_owned(),
            tx: TransactionOptions::default(),
        };

        assert!(matches!(
            OrderBook::new(&config, Arc::new(provider)),
            Err(OrderBookError::InvalidAddress(_))
        ));
    }

    #[test]
    fn test_create_order_calldata() {
        let (order_book, _mock) = mocked_order_book();
        let merchant: Address = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8".parse().unwrap();

        let calldata = order_book
            .create_order_calldata("order-1", U256::from(25), merchant)
            .unwrap();

        let decoded = CreateOrderCall::decode(&calldata).unwrap();
        assert_eq!(decoded.order_id, "order-1");
        assert_eq!(decoded.amount, U256::from(25));
        assert_eq!(decoded.merchant, merchant);
    }

    #[test]
    fn test_mint_and_transfer_calldata() {
        let (order_book, _mock) = mocked_order_book();
        let treasury = test_main_wallet().treasury().unwrap().address();
        let customer = test_main_wallet().customer_wallet("alice").unwrap().address();

        let mint = order_book
            .mint_calldata(customer, U256::from(2), U256::from(3))
            .unwrap();
        let decoded = MintCall::decode(&mint).unwrap();
        assert_eq!(decoded.to, customer);
        assert_eq!(decoded.id, U256::from(2));
        assert_eq!(decoded.amount, U256::from(3));
        assert!(decoded.data.is_empty());

        let transfer = order_book
            .transfer_calldata(treasury, customer, U256::from(2), U256::from(3))
            .unwrap();
        let decoded = SafeTransferFromCall::decode(&transfer).unwrap();
        assert_eq!(decoded.from, treasury);
        assert_eq!(decoded.to, customer);
    }

    #[test]
    fn test_cancel_order_calldata() {
        let (order_book, _mock) = mocked_order_book();

        let calldata = order_book.cancel_order_calldata("order-1").unwrap();
        assert_eq!(
            CancelOrderCall::decode(&calldata).unwrap().order_id,
            "order-1"
        );
    }

    #[tokio::test]
    async fn test_prepare_transaction_scales_gas_price() {
        let (order_book, mock) = mocked_order_book();
        let wallet = test_main_wallet().customer_wallet("alice").unwrap();
        // nonce and gas price are both answered with 10
        mock.push(U256::from(10)).unwrap();
        mock.push(U256::from(10)).unwrap();

        let calldata = order_book.cancel_order_calldata("order-1").unwrap();
        let tx = order_book
            .prepare_transaction(wallet.address(), calldata.clone())
            .await
            .unwrap();

        assert_eq!(tx.nonce(), Some(&U256::from(10)));
        assert_eq!(tx.gas_price(), Some(U256::from(15)));
        assert_eq!(tx.gas(), Some(&U256::from(300_000)));
        assert_eq!(tx.value(), Some(&U256::zero()));
        assert_eq!(tx.data(), Some(&calldata));
        assert_eq!(
            tx.to_addr(),
            Some(&TEST_CONTRACT_ADDRESS.parse::<Address>().unwrap())
        );
    }

    // responses are served last-pushed first
    fn queue_submission(mock: &MockProvider, nonce: u64, gas_price: u64, chain_id: u64) {
        mock.push::<U256, _>(U256::from(chain_id)).unwrap();
        mock.push::<U256, _>(U256::from(gas_price)).unwrap();
        mock.push::<U256, _>(U256::from(nonce)).unwrap();
    }

    #[tokio::test]
    async fn test_signed_transaction_is_eip155_for_node_chain() {
        let (order_book, mock) = mocked_order_book();
        let wallet = test_main_wallet().customer_wallet("alice").unwrap();
        queue_submission(&mock, 7, 10, 5);

        let calldata = order_book.cancel_order_calldata("order-1").unwrap();
        let raw = order_book
            .signed_transaction(&wallet, calldata.clone())
            .await
            .unwrap();

        let (decoded, signature) = TypedTransaction::decode_signed(&rlp::Rlp::new(&raw)).unwrap();
        assert_eq!(signature.recover(decoded.sighash()).unwrap(), wallet.address());
        assert_eq!(decoded.chain_id(), Some(U64::from(5)));
        assert_eq!(decoded.nonce(), Some(&U256::from(7)));
        assert_eq!(decoded.gas_price(), Some(U256::from(15)));
        assert_eq!(decoded.data(), Some(&calldata));
        assert_eq!(decoded.to_addr(), Some(&order_book.address()));
    }

    #[tokio::test]
    async fn test_submit_broadcasts_signed_transaction() {
        let (order_book, mock) = mocked_order_book();
        let wallet = test_main_wallet().treasury().unwrap();
        let tx_hash = H256::repeat_byte(0x11);
        mock.push::<H256, _>(tx_hash).unwrap();
        queue_submission(&mock, 3, 20, 5);

        let customer = test_main_wallet().customer_wallet("alice").unwrap().address();
        let calldata = order_book
            .mint_calldata(customer, U256::from(1), U256::from(10))
            .unwrap();

        assert_eq!(
            order_book.submit(&wallet, calldata.clone()).await.unwrap(),
            tx_hash
        );

        let expected_tx: TypedTransaction = TransactionRequest::new()
            .from(wallet.address())
            .to(order_book.address())
            .nonce(3)
            .gas(300_000)
            .gas_price(30)
            .value(0)
            .data(calldata)
            .into();
        let expected_raw = wallet.sign(5, &expected_tx).unwrap();

        mock.assert_request("eth_getTransactionCount", (wallet.address(), "pending"))
            .unwrap();
        mock.assert_request("eth_gasPrice", ()).unwrap();
        mock.assert_request("eth_chainId", ()).unwrap();
        mock.assert_request("eth_sendRawTransaction", [expected_raw])
            .unwrap();
    }

    #[tokio::test]
    async fn test_chain_id() {
        let (order_book, mock) = mocked_order_book();
        mock.push(U64::from(5)).unwrap();

        assert_eq!(order_book.chain_id().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_pending_receipt_is_none() {
        let (order_book, mock) = mocked_order_book();
        mock.push(serde_json::Value::Null).unwrap();

        let receipt = order_book.transaction_receipt(H256::zero()).await.unwrap();
        assert!(receipt.is_none());
    }

    #[tokio::test]
    async fn test_provider_errors_are_reported() {
        let (order_book, _mock) = mocked_order_book();

        // no mocked response queued
        let err = order_book.chain_id().await.unwrap_err();
        assert!(matches!(err, OrderBookError::Provider(_)));
    }
}

use std::fmt;

use coins_bip32::{
    ecdsa::SigningKey as Bip32SigningKey,
    xkeys::{Parent, XPriv},
};
use ethers::{
    core::k256::ecdsa::SigningKey,
    signers::{
        coins_bip39::{English, Mnemonic},
        LocalWallet, Signer, WalletError,
    },
    types::{transaction::eip2718::TypedTransaction, Address, Bytes},
};

use crate::utils::customer_index;

/// BIP-44 root of every account the service signs with.
pub const ACCOUNT_ROOT_PATH: &str = "m/44'/60'/0'/0";

/// Index of the service's own account under the wallet root.
pub const TREASURY_INDEX: u32 = 0;

/// The service's HD wallet. Every account lives under `m/44'/60'/0'/0`;
/// customers are mapped onto child indexes by id.
///
/// The root key is stretched from the phrase once, children are cheap.
#[derive(Clone)]
pub struct MainWallet {
    root: XPriv,
}

impl MainWallet {
    pub fn from_mnemonic(phrase: &str) -> Result<Self, WalletError> {
        let mnemonic = Mnemonic::<English>::new_from_phrase(phrase.trim())?;
        let root = mnemonic.derive_key(ACCOUNT_ROOT_PATH, None)?;

        Ok(Self { root })
    }

    pub fn treasury(&self) -> Result<DerivedWallet, WalletError> {
        self.derive(TREASURY_INDEX)
    }

    pub fn customer_wallet(&self, customer_id: &str) -> Result<DerivedWallet, WalletError> {
        let index = customer_index(customer_id);
        tracing::debug!("converted customer id {customer_id} to index {index}");

        let wallet = self.derive(index)?;
        tracing::debug!("customer wallet address is {:?}", wallet.address());
        Ok(wallet)
    }

    fn derive(&self, index: u32) -> Result<DerivedWallet, WalletError> {
        // indexes >= 2^31 are hardened children
        let child = self.root.derive_child(index)?;
        let key: &Bip32SigningKey = child.as_ref();
        let signer = SigningKey::from_bytes(&key.to_bytes())?;

        Ok(DerivedWallet {
            index,
            wallet: LocalWallet::from(signer),
        })
    }
}

impl fmt::Debug for MainWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainWallet").finish_non_exhaustive()
    }
}

/// One account of the main wallet. Signs offline; the customer is never prompted.
#[derive(Clone, Debug)]
pub struct DerivedWallet {
    index: u32,
    wallet: LocalWallet,
}

impl DerivedWallet {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// EIP-155 sign `tx` for `chain_id`, returning the raw signed transaction.
    pub fn sign(&self, chain_id: u64, tx: &TypedTransaction) -> Result<Bytes, WalletError> {
        let mut tx = tx.clone();
        tx.set_chain_id(chain_id);

        let signature = self.wallet.sign_transaction_sync(&tx)?;
        Ok(tx.rlp_signed(&signature))
    }
}

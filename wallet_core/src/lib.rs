//! Wallet core library for the Contentos chain.
//!
//! Provides everything a client application needs:
//! - Transaction assembly: chain state in, signed and validated transaction out
//! - Accounts with one method per chain operation
//! - In-memory and key-store-backed wallets
//! - Paginated and direct chain queries
//! - Key import/export and mnemonics
//! - TOML configuration

pub mod account;
pub mod assembler;
pub mod config;
pub mod error;
pub mod keys;
pub mod keystore;
pub mod queries;
pub mod wallet;

pub use account::{Account, ContentBroadcast};
pub use assembler::TransactionAssembler;
pub use config::WalletConfig;
pub use error::WalletError;
pub use keystore::{
    decrypt_keystore, encrypt_keystore, load_keystore, save_keystore, KdfParams, KeystoreFile,
};
pub use queries::Queries;
pub use wallet::{KeyStoreWallet, MemWallet};

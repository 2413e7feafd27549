//! Fundamental types for the Contentos chain client.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! account names, coin and vest amounts, chain timestamps, block and transaction ids,
//! key material, the chain-domain identifier and chain-wide constants.

pub mod account;
pub mod amount;
pub mod block;
mod bytes;
pub mod chain;
pub mod error;
pub mod hash;
pub mod keys;
pub mod params;
pub mod state;
pub mod time;

pub use account::AccountName;
pub use amount::{Coin, Vest};
pub use block::BlockId;
pub use chain::ChainId;
pub use error::TypeError;
pub use hash::TrxId;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use state::ChainState;
pub use time::TimePointSec;

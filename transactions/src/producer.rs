//! Block producer operations.

use cos_types::{AccountName, Coin, PublicKey};
use serde::{Deserialize, Serialize};

/// Chain parameters a block producer proposes.
///
/// The effective value of each field is the median over the active producers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainProperties {
    pub account_creation_fee: Coin,
    pub stamina_free: u64,
    pub tps_expected: u64,
    pub epoch_duration: u64,
    pub top_n_acquire_free_token: u32,
    pub per_ticket_price: Coin,
    pub per_ticket_weight: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpRegisterOp {
    pub owner: AccountName,
    pub url: String,
    pub desc: String,
    pub block_signing_key: PublicKey,
    pub props: ChainProperties,
}

/// Enable block production for `owner`, or disable it when `cancel` is set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpEnableOp {
    pub owner: AccountName,
    pub cancel: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpUpdateOp {
    pub owner: AccountName,
    pub props: ChainProperties,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpVoteOp {
    pub voter: AccountName,
    pub block_producer: AccountName,
    pub cancel: bool,
}

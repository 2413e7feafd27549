//! Typed node responses.
//!
//! Fields the node may omit carry `#[serde(default)]` so older nodes still
//! decode.

use cos_transactions::producer::ChainProperties;
use cos_transactions::{BeneficiaryRoute, SignedTransaction};
use cos_types::{AccountName, BlockId, Coin, TimePointSec, TrxId, Vest};
use serde::{Deserialize, Serialize};

use crate::order::{FollowerCreatedOrder, FollowingCreatedOrder};

/// Status code of an accepted broadcast.
pub const STATUS_SUCCESS: u32 = 200;

/// Execution receipt of a transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrxReceipt {
    pub status: u32,
    #[serde(default)]
    pub net_usage: u64,
    #[serde(default)]
    pub cpu_usage: u64,
    #[serde(default)]
    pub error_info: String,
}

/// Reply to `broadcast_trx`, returned to callers as the node sent it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BroadcastResponse {
    pub status: u32,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub invoice: Option<TrxReceipt>,
}

impl BroadcastResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub account_name: AccountName,
    /// `COS`-prefixed public key text.
    #[serde(default)]
    pub public_key: String,
    #[serde(default)]
    pub coin: Coin,
    #[serde(default)]
    pub vest: Vest,
    #[serde(default)]
    pub created_time: TimePointSec,
    #[serde(default)]
    pub post_count: u64,
    #[serde(default)]
    pub follower_count: u64,
    #[serde(default)]
    pub following_count: u64,
    #[serde(default)]
    pub bp_vote_count: u32,
    #[serde(default)]
    pub stake_vest_for_me: Vest,
    #[serde(default)]
    pub stake_vest_from_me: Vest,
    #[serde(default)]
    pub withdraw_remains: Vest,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowCount {
    pub follower_count: u32,
    pub following_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockProducerInfo {
    pub owner: AccountName,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub block_signing_key: String,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub props: ChainProperties,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostInfo {
    pub post_id: u64,
    pub author: AccountName,
    #[serde(default)]
    pub parent_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created: TimePointSec,
    #[serde(default)]
    pub children: u32,
    #[serde(default)]
    pub vote_count: u64,
    #[serde(default)]
    pub rewards: Vest,
    #[serde(default)]
    pub beneficiaries: Vec<BeneficiaryRoute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrxInfo {
    pub trx_id: TrxId,
    pub block_height: u64,
    pub block_time: TimePointSec,
    #[serde(default)]
    pub trx: Option<SignedTransaction>,
    #[serde(default)]
    pub receipt: Option<TrxReceipt>,
}

/// One row of `get_block_list`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSummary {
    pub block_id: BlockId,
    pub block_height: u64,
    pub block_time: TimePointSec,
    #[serde(default)]
    pub trx_count: u32,
    #[serde(default)]
    pub producer: AccountName,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBlockInfo {
    pub block_id: BlockId,
    pub previous: BlockId,
    pub block_height: u64,
    pub block_time: TimePointSec,
    pub producer: AccountName,
    #[serde(default)]
    pub transactions: Vec<SignedTransaction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowerEntry {
    pub create_order: FollowerCreatedOrder,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowingEntry {
    pub create_order: FollowingCreatedOrder,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractInfo {
    pub owner: AccountName,
    pub contract: String,
    #[serde(default)]
    pub created_time: TimePointSec,
    #[serde(default)]
    pub balance: Coin,
    #[serde(default)]
    pub apply_count: u64,
    #[serde(default)]
    pub upgradeable: bool,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub describe: String,
}

/// Transaction count for one day, keyed by the day's start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTrxInfo {
    pub date: TimePointSec,
    pub count: u64,
}

/// A stake from `creditor` to `debtor`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeInfo {
    pub creditor: AccountName,
    pub debtor: AccountName,
    pub amount: Vest,
    #[serde(default)]
    pub last_stake_time: TimePointSec,
}

/// Rows of a contract table, each a JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableContent {
    #[serde(default)]
    pub rows: Vec<serde_json::Value>,
}

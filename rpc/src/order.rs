//! Ordering keys for range queries.
//!
//! Each list the node serves is sorted by one of these keys. Fields are
//! declared primary key first so the derived `Ord` matches the node's order;
//! trailing fields break ties between entries with equal primary values.

use cos_types::{AccountName, Coin, TimePointSec, TrxId, Vest};
use serde::{Deserialize, Serialize};

/// Followers of `account`, by follow time.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FollowerCreatedOrder {
    pub account: AccountName,
    pub created_time: TimePointSec,
    pub follower: AccountName,
}

/// Accounts `account` follows, by follow time.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FollowingCreatedOrder {
    pub account: AccountName,
    pub created_time: TimePointSec,
    pub following: AccountName,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountBalanceOrder {
    pub balance: Coin,
    pub name: AccountName,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountVestOrder {
    pub vest: Vest,
    pub name: AccountName,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AccountCreatedOrder {
    pub created_time: TimePointSec,
    pub name: AccountName,
}

/// Transactions by block time.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrxTimeOrder {
    pub block_time: TimePointSec,
    pub trx_id: TrxId,
}

/// Posts by creation time.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostCreatedOrder {
    pub created: TimePointSec,
    pub post_id: u64,
}

/// Posts by accumulated reward.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostVestOrder {
    pub rewards: Vest,
    pub post_id: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BpVoteCountOrder {
    pub vote_count: u64,
    pub owner: AccountName,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContractCreatedOrder {
    pub created_time: TimePointSec,
    pub owner: AccountName,
    pub contract: String,
}

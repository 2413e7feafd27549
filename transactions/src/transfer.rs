//! Value-moving operations: liquid transfers, vesting, staking and vest delegation.

use cos_types::{AccountName, Coin, Vest};
use serde::{Deserialize, Serialize};

/// Move liquid COS between accounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOp {
    pub from: AccountName,
    pub to: AccountName,
    pub amount: Coin,
    pub memo: String,
}

/// Convert liquid COS from `from` into vesting shares credited to `to`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferToVestOp {
    pub from: AccountName,
    pub to: AccountName,
    pub amount: Coin,
    pub memo: String,
}

/// Start converting vesting shares back into liquid COS.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertVestOp {
    pub from: AccountName,
    pub amount: Vest,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeOp {
    pub from: AccountName,
    pub to: AccountName,
    pub amount: Coin,
}

/// Withdraw a stake. `creditor` is the account that staked, `debtor` the one staked to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnStakeOp {
    pub creditor: AccountName,
    pub debtor: AccountName,
    pub amount: Coin,
}

/// Lend vesting shares to another account for `expiration` blocks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelegateVestOp {
    pub from: AccountName,
    pub to: AccountName,
    pub amount: Vest,
    pub expiration: u64,
}

/// Cancel a vest delegation order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnDelegateVestOp {
    pub account: AccountName,
    pub order_id: u64,
}

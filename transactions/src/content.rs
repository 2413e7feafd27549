//! Social content operations: posts, replies, votes and follows.

use cos_types::AccountName;
use serde::{Deserialize, Serialize};

use crate::beneficiary::BeneficiaryRoute;

/// Publish a post. `uuid` identifies the post on chain and is chosen client side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostOp {
    pub uuid: u64,
    pub owner: AccountName,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    /// Sorted by account name.
    pub beneficiaries: Vec<BeneficiaryRoute>,
}

/// Reply to the post or reply identified by `parent_uuid`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyOp {
    pub uuid: u64,
    pub owner: AccountName,
    pub content: String,
    pub parent_uuid: u64,
    pub beneficiaries: Vec<BeneficiaryRoute>,
}

/// Upvote the post with uuid `idx`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOp {
    pub voter: AccountName,
    pub idx: u64,
}

/// Follow `f_account`, or stop following it when `cancel` is set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowOp {
    pub account: AccountName,
    pub f_account: AccountName,
    pub cancel: bool,
}

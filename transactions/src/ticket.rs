//! Vote ticket operations.

use cos_types::AccountName;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquireTicketOp {
    pub account: AccountName,
    pub count: u64,
}

/// Spend `count` tickets voting for the post with uuid `idx`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteByTicketOp {
    pub account: AccountName,
    pub idx: u64,
    pub count: u64,
}

//! Snapshot of node-reported chain state.

use serde::{Deserialize, Serialize};

use crate::block::BlockId;
use crate::time::TimePointSec;

/// Head-of-chain values read right before a transaction is signed.
///
/// Only meaningful at the moment it was fetched; never cached.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainState {
    pub head_block_id: BlockId,
    pub head_block_number: u64,
    pub head_block_time: TimePointSec,
    pub last_irreversible_block_number: u64,
}

impl ChainState {
    /// A node that has not produced a head block yet reports an all-zero state.
    pub fn is_empty(&self) -> bool {
        self.head_block_id.is_zero() && self.head_block_number == 0
    }
}

//! Transaction-as-proof-of-stake reference fields.
//!
//! A transaction names a recent block by the low bits of its number and four
//! bytes of its id; the node rejects it unless that block is on its chain
//! within the last [`TAPOS_MAX_BLOCK_COUNT`] blocks. Every function here is a
//! pure function of a [`ChainState`] snapshot.

use cos_types::params::TAPOS_MAX_BLOCK_COUNT;
use cos_types::{BlockId, ChainState, TimePointSec};

/// Low 11 bits of the head block number.
pub fn ref_block_num(head_block_number: u64) -> u32 {
    (head_block_number & (TAPOS_MAX_BLOCK_COUNT - 1)) as u32
}

/// Little-endian `u32` read from bytes `8..12` of the head block id.
pub fn ref_block_prefix(head_block_id: &BlockId) -> u32 {
    let mut prefix = [0u8; 4];
    prefix.copy_from_slice(&head_block_id.as_bytes()[8..12]);
    u32::from_le_bytes(prefix)
}

/// `head_block_time + window_secs`, saturating.
pub fn expiration(head_block_time: TimePointSec, window_secs: u32) -> TimePointSec {
    head_block_time.saturating_add(window_secs)
}

/// All three fields for one snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaposFields {
    pub ref_block_num: u32,
    pub ref_block_prefix: u32,
    pub expiration: TimePointSec,
}

impl TaposFields {
    pub fn from_state(state: &ChainState, window_secs: u32) -> Self {
        Self {
            ref_block_num: ref_block_num(state.head_block_number),
            ref_block_prefix: ref_block_prefix(&state.head_block_id),
            expiration: expiration(state.head_block_time, window_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ref_block_num_wraps_at_window() {
        assert_eq!(ref_block_num(0), 0);
        assert_eq!(ref_block_num(2047), 2047);
        assert_eq!(ref_block_num(2048), 0);
        assert_eq!(ref_block_num(2049), 1);
        assert_eq!(ref_block_num(1_000_000), (1_000_000 % 2048) as u32);
    }

    #[test]
    fn ref_block_prefix_reads_bytes_8_to_12() {
        let mut id = [0u8; 32];
        id[8..12].copy_from_slice(&[0x78, 0x56, 0x34, 0x12]);
        id[12] = 0xFF;
        assert_eq!(ref_block_prefix(&BlockId::new(id)), 0x1234_5678);
    }

    #[test]
    fn expiration_adds_window() {
        let t = TimePointSec::new(1_000);
        assert_eq!(expiration(t, 30), TimePointSec::new(1_030));
        assert_eq!(expiration(TimePointSec::MAX, 30), TimePointSec::MAX);
    }
}

//! Blake2b-256, used for transaction ids, signing digests and key checksums.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

/// Digest of several byte strings fed in order, as if concatenated.
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    parts
        .iter()
        .fold(Blake2b::<U32>::new(), |hasher, part| hasher.chain_update(part))
        .finalize()
        .into()
}

pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[data])
}

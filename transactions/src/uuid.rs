//! Client-chosen ids for posts and replies.
//!
//! Not cryptographic: the id is the current second scaled to nanoseconds plus
//! a CRC32 of the seed and a random salt, which keeps ids from one author in
//! the same second apart with high probability.

use cos_crypto::crc32_content;
use rand::Rng;
use std::time::{SystemTime, UNIX_EPOCH};

/// Salts are drawn uniformly from `0..SALT_RANGE`.
pub const SALT_RANGE: u32 = 100_000;

/// Generate an id for content seeded by `seed` (typically author name plus title).
pub fn generate_uuid(seed: &str) -> u64 {
    let unix_secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    let salt = rand::thread_rng().gen_range(0..SALT_RANGE);
    generate_uuid_with(seed, unix_secs, salt)
}

/// Deterministic core of [`generate_uuid`].
pub fn generate_uuid_with(seed: &str, unix_secs: u64, salt: u32) -> u64 {
    let content = format!("{seed}{salt}");
    unix_secs
        .saturating_mul(1_000_000_000)
        .saturating_add(u64::from(crc32_content(content.as_bytes())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic_for_fixed_inputs() {
        let a = generate_uuid_with("alice1hello", 1_600_000_000, 42);
        let b = generate_uuid_with("alice1hello", 1_600_000_000, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn salt_is_appended_in_decimal() {
        let id = generate_uuid_with("alice1", 1_600_000_000, 7);
        assert_eq!(
            id,
            1_600_000_000 * 1_000_000_000 + u64::from(crc32_content(b"alice17"))
        );
    }

    #[test]
    fn salt_changes_the_id() {
        let a = generate_uuid_with("alice1", 1_600_000_000, 1);
        let b = generate_uuid_with("alice1", 1_600_000_000, 2);
        assert_ne!(a, b);
    }

    #[test]
    fn live_id_is_recent() {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let id = generate_uuid("alice1");
        let secs = id / 1_000_000_000;
        assert!(secs >= now && secs <= now + 5);
    }
}

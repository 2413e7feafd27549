//! `COS…` public key text.
//!
//! `COS` + base32(key bytes) + base32(first 5 bytes of Blake2b-256(key)),
//! 3 + 52 + 8 = 63 characters. The base32 alphabet leaves out characters
//! that are easy to misread (`0 2 l v`).

use cos_types::PublicKey;

use crate::hash::blake2b_256;

pub const PREFIX: &str = "COS";

const ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";
const CHECKSUM_LEN: usize = 5;
const KEY_CHARS: usize = 52;
const CHECKSUM_CHARS: usize = 8;

fn symbol_value(c: u8) -> Option<u8> {
    ALPHABET.iter().position(|&a| a == c).map(|i| i as u8)
}

/// Most significant bit first; a trailing partial group is zero-padded.
fn to_base32(bytes: &[u8]) -> String {
    let total_bits = bytes.len() * 8;
    (0..total_bits.div_ceil(5))
        .map(|group| {
            let value = (0..5).fold(0u8, |acc, offset| {
                let bit = group * 5 + offset;
                let set = bit < total_bits && bytes[bit / 8] & (0x80 >> (bit % 8)) != 0;
                (acc << 1) | set as u8
            });
            ALPHABET[value as usize] as char
        })
        .collect()
}

/// Inverse of [`to_base32`] for exactly `N` bytes. Padding bits are ignored.
fn from_base32<const N: usize>(text: &str) -> Option<[u8; N]> {
    if text.len() != (N * 8).div_ceil(5) {
        return None;
    }
    let mut out = [0u8; N];
    for (group, c) in text.bytes().enumerate() {
        let value = symbol_value(c)?;
        for offset in 0..5 {
            let bit = group * 5 + offset;
            if bit < N * 8 && value & (0x10 >> offset) != 0 {
                out[bit / 8] |= 0x80 >> (bit % 8);
            }
        }
    }
    Some(out)
}

fn checksum(key: &[u8; 32]) -> [u8; CHECKSUM_LEN] {
    let mut sum = [0u8; CHECKSUM_LEN];
    sum.copy_from_slice(&blake2b_256(key)[..CHECKSUM_LEN]);
    sum
}

pub fn encode_public_key(public_key: &PublicKey) -> String {
    let key = public_key.as_bytes();
    format!("{PREFIX}{}{}", to_base32(key), to_base32(&checksum(key)))
}

/// `None` unless the prefix, length, alphabet and checksum are all right.
pub fn decode_public_key(text: &str) -> Option<PublicKey> {
    let body = text.strip_prefix(PREFIX)?;
    if body.len() != KEY_CHARS + CHECKSUM_CHARS || !body.is_ascii() {
        return None;
    }
    let (key_text, sum_text) = body.split_at(KEY_CHARS);
    let key: [u8; 32] = from_base32(key_text)?;
    let sum: [u8; CHECKSUM_LEN] = from_base32(sum_text)?;
    (sum == checksum(&key)).then_some(PublicKey(key))
}

pub fn validate_public_key(text: &str) -> bool {
    decode_public_key(text).is_some()
}

//! BIP39 recovery phrases for Contentos keys.
//!
//! A phrase is turned into a BIP39 seed (empty passphrase). The seed is run
//! through HMAC-SHA512 keyed with the Contentos path `m/44'/3077'/0'/0/0`
//! and the first half of the MAC becomes the Ed25519 secret.

use bip39::Mnemonic;
use cos_types::{KeyPair, PrivateKey};
use hmac::{Hmac, Mac};
use sha2::Sha512;
use thiserror::Error;

use crate::keys::keypair_from_private;

/// Path string the account key is bound to (3077 is the Contentos coin type).
pub const DERIVATION_PATH: &str = "m/44'/3077'/0'/0/0";

/// Words in a generated phrase.
pub const GENERATED_WORDS: usize = 24;

#[derive(Debug, Error)]
pub enum MnemonicError {
    #[error("invalid mnemonic phrase: {0}")]
    InvalidMnemonic(String),

    #[error("key derivation failed: {0}")]
    DerivationFailed(String),
}

/// A fresh 24-word phrase from 256 bits of OS entropy.
pub fn generate_mnemonic() -> Result<String, MnemonicError> {
    let entropy: [u8; 32] = rand::random();
    Mnemonic::from_entropy(&entropy)
        .map(|m| m.to_string())
        .map_err(|e| MnemonicError::DerivationFailed(e.to_string()))
}

fn parse(phrase: &str) -> Result<Mnemonic, MnemonicError> {
    Mnemonic::parse_normalized(phrase).map_err(|e| MnemonicError::InvalidMnemonic(e.to_string()))
}

/// Ed25519 secret for a BIP39 seed.
fn secret_from_seed(seed: &[u8]) -> Result<[u8; 32], MnemonicError> {
    let mut mac = Hmac::<Sha512>::new_from_slice(DERIVATION_PATH.as_bytes())
        .map_err(|e| MnemonicError::DerivationFailed(e.to_string()))?;
    mac.update(seed);
    let digest = mac.finalize().into_bytes();
    let mut secret = [0u8; 32];
    secret.copy_from_slice(&digest[..32]);
    Ok(secret)
}

/// Account key pair recovered from any valid BIP39 phrase.
pub fn keypair_from_mnemonic(phrase: &str) -> Result<KeyPair, MnemonicError> {
    let seed = parse(phrase)?.to_seed_normalized("");
    let secret = secret_from_seed(&seed)?;
    Ok(keypair_from_private(PrivateKey(secret)))
}

pub fn validate_mnemonic(phrase: &str) -> bool {
    parse(phrase).is_ok()
}

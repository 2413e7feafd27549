//! Cryptographic primitives for the Contentos chain client.
//!
//! - **Ed25519** for signing and signature verification
//! - **Blake2b** for hashing (transaction ids, signing digests, key checksums)
//! - Chain-domain signing: the chain id is mixed into every signed digest
//! - Public key text encoding with `COS` prefix and base32 encoding
//! - BIP39 mnemonics for key backup
//! - A table-driven CRC32 for non-cryptographic content ids

pub mod checksum;
pub mod hash;
pub mod keys;
pub mod mnemonic;
pub mod pubkey;
pub mod sign;

pub use checksum::{crc32_content, Crc32Table};
pub use hash::{blake2b_256, blake2b_256_multi};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use mnemonic::{generate_mnemonic, keypair_from_mnemonic, validate_mnemonic, MnemonicError};
pub use pubkey::{decode_public_key, encode_public_key, validate_public_key};
pub use sign::{chain_digest, sign_for_chain, sign_message, verify_for_chain, verify_signature};

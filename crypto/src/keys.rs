//! Ed25519 account keys.

use cos_types::{KeyPair, PrivateKey, PublicKey};
use ed25519_dalek::SigningKey;

fn pair_of(signing_key: &SigningKey) -> KeyPair {
    KeyPair {
        public: PublicKey(signing_key.verifying_key().to_bytes()),
        private: PrivateKey(signing_key.to_bytes()),
    }
}

/// A new random account key from the OS generator.
pub fn generate_keypair() -> KeyPair {
    pair_of(&SigningKey::generate(&mut rand::rngs::OsRng))
}

pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    PublicKey(SigningKey::from_bytes(&private.0).verifying_key().to_bytes())
}

pub fn keypair_from_private(private: PrivateKey) -> KeyPair {
    KeyPair {
        public: public_from_private(&private),
        private,
    }
}

/// The 32 seed bytes are used directly as the Ed25519 secret.
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    pair_of(&SigningKey::from_bytes(seed))
}

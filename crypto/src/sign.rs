//! Ed25519 signatures, plain and bound to a chain.
//!
//! Transactions are never signed directly. They are signed through
//! [`chain_digest`], which prefixes a domain tag and the chain name, so a
//! signature made for `test` does not verify on `main`.

use cos_types::{ChainId, PrivateKey, PublicKey, Signature};
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};

use crate::hash::blake2b_256_multi;

const CHAIN_DIGEST_TAG: &[u8] = b"cos-chain-id";

pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    Signature(SigningKey::from_bytes(&private_key.0).sign(message).to_bytes())
}

/// False for a bad signature and for a public key that is not a curve point.
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    VerifyingKey::from_bytes(&public_key.0)
        .map(|key| {
            key.verify(message, &ed25519_dalek::Signature::from_bytes(&signature.0))
                .is_ok()
        })
        .unwrap_or(false)
}

/// `Blake2b-256(tag ‖ chain name ‖ 0x00 ‖ payload)`.
pub fn chain_digest(chain_id: ChainId, payload: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[
        CHAIN_DIGEST_TAG,
        chain_id.as_str().as_bytes(),
        &[0u8],
        payload,
    ])
}

pub fn sign_for_chain(payload: &[u8], chain_id: ChainId, private_key: &PrivateKey) -> Signature {
    sign_message(&chain_digest(chain_id, payload), private_key)
}

pub fn verify_for_chain(
    payload: &[u8],
    chain_id: ChainId,
    signature: &Signature,
    public_key: &PublicKey,
) -> bool {
    verify_signature(&chain_digest(chain_id, payload), signature, public_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::keypair_from_seed;

    const TRX: &[u8] = b"serialized transaction";

    #[test]
    fn plain_signature_checks_message_and_key() {
        let alice = keypair_from_seed(&[1u8; 32]);
        let bob = keypair_from_seed(&[2u8; 32]);
        let sig = sign_message(b"hello", &alice.private);

        assert!(verify_signature(b"hello", &sig, &alice.public));
        assert!(!verify_signature(b"hellp", &sig, &alice.public));
        assert!(!verify_signature(b"hello", &sig, &bob.public));
    }

    #[test]
    fn signatures_are_deterministic() {
        let pair = keypair_from_seed(&[99u8; 32]);
        assert_eq!(
            sign_for_chain(TRX, ChainId::Main, &pair.private),
            sign_for_chain(TRX, ChainId::Main, &pair.private)
        );
    }

    #[test]
    fn off_curve_public_key_is_rejected_not_panicking() {
        let pair = keypair_from_seed(&[4u8; 32]);
        let sig = sign_message(TRX, &pair.private);
        assert!(!verify_signature(TRX, &sig, &PublicKey([0xff; 32])));
    }

    #[test]
    fn chain_signature_is_bound_to_its_chain() {
        let pair = keypair_from_seed(&[5u8; 32]);
        let sig = sign_for_chain(TRX, ChainId::Test, &pair.private);

        assert!(verify_for_chain(TRX, ChainId::Test, &sig, &pair.public));
        assert!(!verify_for_chain(TRX, ChainId::Main, &sig, &pair.public));
        assert!(!verify_for_chain(TRX, ChainId::Dev, &sig, &pair.public));
        assert!(!verify_signature(TRX, &sig, &pair.public));
    }

    #[test]
    fn digest_layout() {
        let expected = crate::hash::blake2b_256(b"cos-chain-idmain\x00payload");
        assert_eq!(chain_digest(ChainId::Main, b"payload"), expected);
    }
}

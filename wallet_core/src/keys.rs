//! Key import and export in the text formats wallets exchange.

use cos_crypto::{encode_public_key, generate_mnemonic, keypair_from_mnemonic, public_from_private};
use cos_types::PrivateKey;

use crate::error::WalletError;

/// Parse a 64-character hex private key.
pub fn parse_private_key(hex_key: &str) -> Result<PrivateKey, WalletError> {
    PrivateKey::from_hex(hex_key).map_err(|e| WalletError::Key(e.to_string()))
}

/// `COS`-prefixed public key text for `private_key`.
pub fn public_key_text(private_key: &PrivateKey) -> String {
    encode_public_key(&public_from_private(private_key))
}

/// A fresh 24-word mnemonic.
pub fn new_mnemonic() -> Result<String, WalletError> {
    Ok(generate_mnemonic()?)
}

/// Key pair derived from a mnemonic, in text form.
pub struct MnemonicKeys {
    /// Hex private key. Handle as a secret.
    pub private_key: String,
    /// `COS`-prefixed public key.
    pub public_key: String,
}

pub fn keys_from_mnemonic(phrase: &str) -> Result<MnemonicKeys, WalletError> {
    let pair = keypair_from_mnemonic(phrase)?;
    Ok(MnemonicKeys {
        private_key: pair.private.to_hex(),
        public_key: encode_public_key(&pair.public),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cos_crypto::decode_public_key;

    #[test]
    fn mnemonic_keys_are_deterministic() {
        let phrase = new_mnemonic().unwrap();
        let a = keys_from_mnemonic(&phrase).unwrap();
        let b = keys_from_mnemonic(&phrase).unwrap();
        assert_eq!(a.private_key, b.private_key);
        assert_eq!(a.public_key, b.public_key);
        assert!(a.public_key.starts_with("COS"));
    }

    #[test]
    fn derived_public_key_matches_private() {
        let phrase = new_mnemonic().unwrap();
        let keys = keys_from_mnemonic(&phrase).unwrap();
        let private = parse_private_key(&keys.private_key).unwrap();
        assert_eq!(public_key_text(&private), keys.public_key);
        assert_eq!(
            decode_public_key(&keys.public_key),
            Some(public_from_private(&private))
        );
    }

    #[test]
    fn bad_inputs_are_key_errors() {
        assert!(matches!(parse_private_key("xyz"), Err(WalletError::Key(_))));
        assert!(matches!(
            keys_from_mnemonic("not a real phrase"),
            Err(WalletError::Key(_))
        ));
    }
}

//! Password-encrypted key store holding an account name → private key map.
//!
//! The map is JSON, encrypted with AES-256-GCM under a key stretched from the
//! password with Argon2id. Salt, nonce and KDF cost are kept next to the
//! ciphertext in the file.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use zeroize::Zeroizing;

use crate::error::WalletError;

const SALT_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

const KEYSTORE_VERSION: u32 = 1;
const CIPHER: &str = "aes-256-gcm";
const KDF: &str = "argon2id";

/// Plaintext of a key store: account name → hex private key.
pub type AccountMap = BTreeMap<String, String>;

/// On-disk key store: `{version, crypto: {...}}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeystoreFile {
    pub version: u32,
    pub crypto: KeystoreCrypto,
}

/// Everything needed to decrypt, except the password. Byte fields are hex.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeystoreCrypto {
    pub cipher: String,
    pub kdf: String,
    pub kdf_params: KdfParams,
    pub salt: String,
    pub nonce: String,
    pub ciphertext: String,
}

/// Argon2id cost. Stored per file, so files written with other costs still open.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Memory in KiB.
    pub memory: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for KdfParams {
    /// 64 MiB, 3 passes, 1 lane.
    fn default() -> Self {
        Self {
            memory: 64 * 1024,
            iterations: 3,
            parallelism: 1,
        }
    }
}

fn keystore_err<E: std::fmt::Display>(what: &'static str) -> impl FnOnce(E) -> WalletError {
    move |e| WalletError::Keystore(format!("{what}: {e}"))
}

fn aes(key: &[u8; KEY_LEN]) -> Result<Aes256Gcm, WalletError> {
    Aes256Gcm::new_from_slice(key).map_err(keystore_err("cipher init failed"))
}

fn unhex(field: &'static str, text: &str) -> Result<Vec<u8>, WalletError> {
    hex::decode(text).map_err(keystore_err(field))
}

/// Encrypt `plaintext` under `password` with a fresh salt and nonce.
pub fn encrypt_keystore(
    plaintext: &[u8],
    password: &str,
    kdf_params: &KdfParams,
) -> Result<KeystoreFile, WalletError> {
    let mut salt = [0u8; SALT_LEN];
    let mut nonce = [0u8; NONCE_LEN];
    let mut rng = rand::thread_rng();
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut nonce);

    let key = derive_key(password, &salt, kdf_params)?;
    let ciphertext = aes(&key)?
        .encrypt(Nonce::from_slice(&nonce), plaintext)
        .map_err(keystore_err("encryption failed"))?;

    Ok(KeystoreFile {
        version: KEYSTORE_VERSION,
        crypto: KeystoreCrypto {
            cipher: CIPHER.to_string(),
            kdf: KDF.to_string(),
            kdf_params: kdf_params.clone(),
            salt: hex::encode(salt),
            nonce: hex::encode(nonce),
            ciphertext: hex::encode(ciphertext),
        },
    })
}

/// Decrypt with the parameters recorded in the file.
///
/// A wrong password and a modified file are indistinguishable: both fail the
/// GCM tag check.
pub fn decrypt_keystore(
    keystore: &KeystoreFile,
    password: &str,
) -> Result<Zeroizing<Vec<u8>>, WalletError> {
    let crypto = &keystore.crypto;
    if keystore.version != KEYSTORE_VERSION {
        return Err(WalletError::Keystore(format!(
            "unsupported keystore version {}",
            keystore.version
        )));
    }
    if crypto.cipher != CIPHER || crypto.kdf != KDF {
        return Err(WalletError::Keystore(format!(
            "unsupported scheme {}/{}",
            crypto.kdf, crypto.cipher
        )));
    }

    let salt = unhex("salt", &crypto.salt)?;
    let nonce = unhex("nonce", &crypto.nonce)?;
    let ciphertext = unhex("ciphertext", &crypto.ciphertext)?;
    if nonce.len() != NONCE_LEN {
        return Err(WalletError::Keystore(format!(
            "nonce is {} bytes, expected {NONCE_LEN}",
            nonce.len()
        )));
    }

    let key = derive_key(password, &salt, &crypto.kdf_params)?;
    aes(&key)?
        .decrypt(Nonce::from_slice(&nonce), ciphertext.as_slice())
        .map(Zeroizing::new)
        .map_err(|_| WalletError::Keystore("wrong password or corrupted key store".to_string()))
}

pub fn seal_accounts(
    accounts: &AccountMap,
    password: &str,
    kdf_params: &KdfParams,
) -> Result<KeystoreFile, WalletError> {
    let plaintext =
        Zeroizing::new(serde_json::to_vec(accounts).map_err(keystore_err("encoding accounts"))?);
    encrypt_keystore(&plaintext, password, kdf_params)
}

pub fn open_accounts(keystore: &KeystoreFile, password: &str) -> Result<AccountMap, WalletError> {
    let plaintext = decrypt_keystore(keystore, password)?;
    serde_json::from_slice(&plaintext).map_err(keystore_err("decoding accounts"))
}

/// Write via a sibling temp file and rename, so a crash never leaves half a file.
pub fn save_keystore(keystore: &KeystoreFile, path: &Path) -> Result<(), WalletError> {
    let json = serde_json::to_string_pretty(keystore).map_err(keystore_err("encoding file"))?;
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, json).map_err(keystore_err("writing key store"))?;
    std::fs::rename(&tmp, path).map_err(keystore_err("replacing key store"))
}

pub fn load_keystore(path: &Path) -> Result<KeystoreFile, WalletError> {
    let json = std::fs::read_to_string(path).map_err(keystore_err("reading key store"))?;
    serde_json::from_str(&json).map_err(keystore_err("parsing key store"))
}

fn derive_key(
    password: &str,
    salt: &[u8],
    cost: &KdfParams,
) -> Result<Zeroizing<[u8; KEY_LEN]>, WalletError> {
    let params = Params::new(cost.memory, cost.iterations, cost.parallelism, Some(KEY_LEN))
        .map_err(keystore_err("bad Argon2 parameters"))?;
    let mut key = Zeroizing::new([0u8; KEY_LEN]);
    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password_into(password.as_bytes(), salt, key.as_mut())
        .map_err(keystore_err("key derivation failed"))?;
    Ok(key)
}

//! Wallets: named accounts plus a node handle.
//!
//! [`MemWallet`] keeps keys in memory only. [`KeyStoreWallet`] wraps one and
//! re-encrypts its key store file after every change to the account set.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cos_crypto::keypair_from_mnemonic;
use cos_rpc::NodeClient;
use cos_transactions::TransactionError;
use cos_types::{AccountName, ChainId, PrivateKey};
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::account::Account;
use crate::assembler::TransactionAssembler;
use crate::config::WalletConfig;
use crate::error::WalletError;
use crate::keys::parse_private_key;
use crate::keystore::{
    load_keystore, open_accounts, save_keystore, seal_accounts, AccountMap, KdfParams,
};
use crate::queries::Queries;

fn checked_name(name: &str) -> Result<AccountName, WalletError> {
    let name = AccountName::new(name);
    if !name.is_valid() {
        return Err(WalletError::Construction(
            TransactionError::InvalidAccountName(name.to_string()),
        ));
    }
    Ok(name)
}

/// In-memory wallet.
pub struct MemWallet {
    accounts: BTreeMap<AccountName, PrivateKey>,
    assembler: TransactionAssembler,
    queries: Queries,
}

impl MemWallet {
    pub fn new(client: NodeClient, chain_id: ChainId) -> Self {
        Self {
            accounts: BTreeMap::new(),
            assembler: TransactionAssembler::new(client.clone(), chain_id),
            queries: Queries::new(client),
        }
    }

    /// Connect over HTTP with the timeouts, window and page size from `config`.
    pub fn from_config(config: &WalletConfig) -> Result<Self, WalletError> {
        let client = NodeClient::connect(
            &config.node_url,
            config.request_timeout(),
            config.connect_timeout(),
        )?;
        let mut wallet = Self::new(client, config.chain_id);
        wallet.assembler = wallet
            .assembler
            .with_expiration_window(config.expiration_secs);
        wallet.queries = wallet.queries.with_page_size(config.page_size);
        Ok(wallet)
    }

    pub fn chain_id(&self) -> ChainId {
        self.assembler.chain_id()
    }

    pub fn assembler(&self) -> &TransactionAssembler {
        &self.assembler
    }

    pub fn queries(&self) -> &Queries {
        &self.queries
    }

    /// Replace the node handle used for signing and queries.
    pub fn connect(&mut self, client: NodeClient) {
        self.assembler.set_client(client.clone());
        self.queries.set_client(client);
        info!("wallet reconnected");
    }

    /// Import an account by its hex private key, replacing any previous key.
    pub fn add(&mut self, name: &str, private_key_hex: &str) -> Result<(), WalletError> {
        let name = checked_name(name)?;
        let key = parse_private_key(private_key_hex)?;
        debug!(account = %name, "account added");
        self.accounts.insert(name, key);
        Ok(())
    }

    /// Import an account whose key is derived from a mnemonic.
    pub fn add_by_mnemonic(&mut self, name: &str, mnemonic: &str) -> Result<(), WalletError> {
        let name = checked_name(name)?;
        let pair = keypair_from_mnemonic(mnemonic)?;
        debug!(account = %name, "account added from mnemonic");
        self.accounts.insert(name, pair.private);
        Ok(())
    }

    /// Forget an account. Returns whether it was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.accounts.remove(&AccountName::new(name)).is_some()
    }

    pub fn account(&self, name: &str) -> Result<Account, WalletError> {
        let name = AccountName::new(name);
        let key = self
            .accounts
            .get(&name)
            .ok_or_else(|| WalletError::UnknownAccount(name.to_string()))?;
        Ok(Account::new(name, key.duplicate(), self.assembler.clone()))
    }

    /// Names of all held accounts, sorted.
    pub fn accounts(&self) -> Vec<AccountName> {
        self.accounts.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.accounts.contains_key(&AccountName::new(name))
    }

    /// Drop every key held in memory.
    pub fn close(&mut self) {
        self.accounts.clear();
        info!("wallet closed");
    }

    fn account_map(&self) -> AccountMap {
        self.accounts
            .iter()
            .map(|(name, key)| (name.to_string(), key.to_hex()))
            .collect()
    }

    fn load_map(&mut self, map: &AccountMap) -> Result<(), WalletError> {
        for (name, key) in map {
            self.add(name, key)?;
        }
        Ok(())
    }
}

/// Wallet persisted to an encrypted key store file.
///
/// Read access goes through [`Deref`](std::ops::Deref) to the inner
/// [`MemWallet`]; mutations are only available here so each one is saved.
pub struct KeyStoreWallet {
    inner: MemWallet,
    path: PathBuf,
    password: Zeroizing<String>,
    kdf_params: KdfParams,
    closed: bool,
}

impl KeyStoreWallet {
    /// Load the key store at `path`, or create an empty one if it does not exist.
    pub fn open(
        path: impl AsRef<Path>,
        password: &str,
        client: NodeClient,
        chain_id: ChainId,
    ) -> Result<Self, WalletError> {
        let inner = MemWallet::new(client, chain_id);
        Self::open_with_params(path, password, inner, KdfParams::default())
    }

    /// Like [`open`](Self::open) around an existing wallet and with explicit
    /// KDF parameters for newly written files.
    pub fn open_with_params(
        path: impl AsRef<Path>,
        password: &str,
        mut inner: MemWallet,
        kdf_params: KdfParams,
    ) -> Result<Self, WalletError> {
        let path = path.as_ref().to_path_buf();
        if path.exists() {
            let keystore = load_keystore(&path)?;
            let map = open_accounts(&keystore, password)?;
            inner.load_map(&map)?;
            info!(path = %path.display(), accounts = map.len(), "key store loaded");
            Ok(Self {
                inner,
                path,
                password: Zeroizing::new(password.to_string()),
                kdf_params: keystore.crypto.kdf_params,
                closed: false,
            })
        } else {
            let wallet = Self {
                inner,
                path,
                password: Zeroizing::new(password.to_string()),
                kdf_params,
                closed: false,
            };
            wallet.save()?;
            info!(path = %wallet.path.display(), "key store created");
            Ok(wallet)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn add(&mut self, name: &str, private_key_hex: &str) -> Result<(), WalletError> {
        self.ensure_open()?;
        let name = checked_name(name)?;
        let key = parse_private_key(private_key_hex)?;
        self.commit_insert(name, key)
    }

    pub fn add_by_mnemonic(&mut self, name: &str, mnemonic: &str) -> Result<(), WalletError> {
        self.ensure_open()?;
        let name = checked_name(name)?;
        let pair = keypair_from_mnemonic(mnemonic)?;
        self.commit_insert(name, pair.private)
    }

    pub fn remove(&mut self, name: &str) -> Result<bool, WalletError> {
        self.ensure_open()?;
        if !self.inner.contains(name) {
            return Ok(false);
        }
        let mut map = self.inner.account_map();
        map.remove(name);
        self.save_map(&map)?;
        Ok(self.inner.remove(name))
    }

    pub fn connect(&mut self, client: NodeClient) {
        self.inner.connect(client);
    }

    /// Drop keys from memory. The file on disk keeps its last saved content
    /// and every later mutation fails with [`WalletError::Closed`].
    pub fn close(&mut self) {
        self.inner.close();
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<(), WalletError> {
        if self.closed {
            return Err(WalletError::Closed);
        }
        Ok(())
    }

    /// Memory only changes once the file holding the new key is written.
    fn commit_insert(&mut self, name: AccountName, key: PrivateKey) -> Result<(), WalletError> {
        let mut map = self.inner.account_map();
        map.insert(name.to_string(), key.to_hex());
        self.save_map(&map)?;
        debug!(account = %name, "account stored");
        self.inner.accounts.insert(name, key);
        Ok(())
    }

    fn save(&self) -> Result<(), WalletError> {
        self.save_map(&self.inner.account_map())
    }

    fn save_map(&self, map: &AccountMap) -> Result<(), WalletError> {
        let keystore = seal_accounts(map, &self.password, &self.kdf_params)?;
        save_keystore(&keystore, &self.path)?;
        debug!(path = %self.path.display(), accounts = map.len(), "key store saved");
        Ok(())
    }
}

impl std::ops::Deref for KeyStoreWallet {
    type Target = MemWallet;

    fn deref(&self) -> &MemWallet {
        &self.inner
    }
}

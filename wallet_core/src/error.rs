use cos_crypto::MnemonicError;
use cos_rpc::{PageError, RpcError};
use cos_transactions::TransactionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    /// An operation could not be built; nothing was sent.
    #[error("invalid operation: {0}")]
    Construction(TransactionError),

    #[error("failed to fetch chain state: {0}")]
    StateFetch(RpcError),

    #[error("signing failed: {0}")]
    Signing(TransactionError),

    #[error("transaction failed validation: {0}")]
    Validation(TransactionError),

    #[error("broadcast failed: {0}")]
    Broadcast(RpcError),

    #[error("key error: {0}")]
    Key(String),

    #[error("unknown account: {0}")]
    UnknownAccount(String),

    #[error("wallet is closed")]
    Closed,

    #[error("keystore error: {0}")]
    Keystore(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("node RPC error: {0}")]
    Node(#[from] RpcError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error("{0}")]
    Other(String),
}

impl From<MnemonicError> for WalletError {
    fn from(e: MnemonicError) -> Self {
        WalletError::Key(e.to_string())
    }
}

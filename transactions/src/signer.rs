//! Signing backends.

use cos_crypto::{public_from_private, sign_for_chain};
use cos_types::{ChainId, PrivateKey};

use crate::error::TransactionError;
use crate::transaction::{SignedTransaction, Transaction};

/// Produces a chain-scoped signature over a transaction.
pub trait TransactionSigner: Send + Sync {
    fn sign(
        &self,
        trx: Transaction,
        key: &PrivateKey,
        chain_id: ChainId,
    ) -> Result<SignedTransaction, TransactionError>;
}

/// Signs in process with an Ed25519 key.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Signer;

impl TransactionSigner for Ed25519Signer {
    fn sign(
        &self,
        trx: Transaction,
        key: &PrivateKey,
        chain_id: ChainId,
    ) -> Result<SignedTransaction, TransactionError> {
        let bytes = trx.signing_bytes()?;
        let signature = sign_for_chain(&bytes, chain_id, key);
        Ok(SignedTransaction {
            trx,
            signature,
            signer: public_from_private(key),
        })
    }
}

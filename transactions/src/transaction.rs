//! Transaction envelope and its signed form.

use cos_crypto::{blake2b_256, verify_for_chain};
use cos_types::{ChainId, ChainState, PublicKey, Signature, TimePointSec, TrxId};
use serde::{Deserialize, Serialize};

use crate::error::TransactionError;
use crate::tapos::TaposFields;
use crate::Operation;

/// An unsigned transaction: reference-block fields, expiration and the operations
/// to apply atomically, in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub ref_block_num: u32,
    pub ref_block_prefix: u32,
    pub expiration: TimePointSec,
    pub operations: Vec<Operation>,
}

impl Transaction {
    /// Fill the reference fields from `state` and attach `operations` as given.
    pub fn from_state(state: &ChainState, window_secs: u32, operations: Vec<Operation>) -> Self {
        let tapos = TaposFields::from_state(state, window_secs);
        Self {
            ref_block_num: tapos.ref_block_num,
            ref_block_prefix: tapos.ref_block_prefix,
            expiration: tapos.expiration,
            operations,
        }
    }

    /// Canonical bytes covered by the signature.
    pub fn signing_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        bincode::serialize(self).map_err(|e| TransactionError::Encoding(e.to_string()))
    }

    /// Blake2b-256 of [`Transaction::signing_bytes`].
    pub fn id(&self) -> Result<TrxId, TransactionError> {
        Ok(TrxId::new(blake2b_256(&self.signing_bytes()?)))
    }
}

/// A transaction with the signature and public key of its signer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub trx: Transaction,
    pub signature: Signature,
    pub signer: PublicKey,
}

impl SignedTransaction {
    pub fn id(&self) -> Result<TrxId, TransactionError> {
        self.trx.id()
    }

    /// Check the signature against `signer` for `chain_id`.
    ///
    /// Only proves who signed; chain rules such as account authority are the
    /// node's business.
    pub fn verify(&self, chain_id: ChainId) -> bool {
        match self.trx.signing_bytes() {
            Ok(bytes) => verify_for_chain(&bytes, chain_id, &self.signature, &self.signer),
            Err(_) => false,
        }
    }
}

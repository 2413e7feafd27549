//! Operations plus live chain state in, signed and validated transaction out.
//!
//! Pipeline: fetch chain state, fill TaPoS fields and expiration, attach the
//! operations in caller order, sign for the configured chain, validate, and
//! optionally broadcast. Nothing is retried; on any failure the caller starts
//! over from a fresh state fetch.

use std::sync::Arc;

use cos_rpc::responses::BroadcastResponse;
use cos_rpc::{NodeClient, RpcError};
use cos_transactions::{
    validate_signed_transaction, Ed25519Signer, Operation, SignedTransaction, Transaction,
    TransactionSigner,
};
use cos_types::params::DEFAULT_EXPIRATION_SECS;
use cos_types::{ChainId, ChainState, PrivateKey};
use tracing::{debug, info, warn};

use crate::error::WalletError;

#[derive(Clone)]
pub struct TransactionAssembler {
    client: NodeClient,
    chain_id: ChainId,
    signer: Arc<dyn TransactionSigner>,
    expiration_secs: u32,
}

impl TransactionAssembler {
    /// Ed25519 signing with the default expiration window.
    pub fn new(client: NodeClient, chain_id: ChainId) -> Self {
        Self {
            client,
            chain_id,
            signer: Arc::new(Ed25519Signer),
            expiration_secs: DEFAULT_EXPIRATION_SECS,
        }
    }

    pub fn with_signer(mut self, signer: impl TransactionSigner + 'static) -> Self {
        self.signer = Arc::new(signer);
        self
    }

    /// Seconds past the head block time at which transactions expire.
    pub fn with_expiration_window(mut self, secs: u32) -> Self {
        self.expiration_secs = secs;
        self
    }

    pub fn client(&self) -> &NodeClient {
        &self.client
    }

    /// Swap the node handle, e.g. after reconnecting.
    pub fn set_client(&mut self, client: NodeClient) {
        self.client = client;
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    /// Read the head state the next transaction will reference.
    pub fn fetch_state(&self) -> Result<ChainState, WalletError> {
        let state = self
            .client
            .get_chain_state()
            .map_err(WalletError::StateFetch)?;
        if state.is_empty() {
            return Err(WalletError::StateFetch(RpcError::EmptyResponse));
        }
        debug!(
            head = state.head_block_number,
            time = state.head_block_time.utc_seconds(),
            "chain state fetched"
        );
        Ok(state)
    }

    /// Build, sign and validate against a state snapshot. No network access.
    pub fn assemble_from_state(
        &self,
        state: &ChainState,
        key: &PrivateKey,
        operations: Vec<Operation>,
    ) -> Result<SignedTransaction, WalletError> {
        let trx = Transaction::from_state(state, self.expiration_secs, operations);
        let signed = self
            .signer
            .sign(trx, key, self.chain_id)
            .map_err(WalletError::Signing)?;
        validate_signed_transaction(&signed).map_err(WalletError::Validation)?;
        Ok(signed)
    }

    /// Fetch fresh state, then [`assemble_from_state`](Self::assemble_from_state).
    pub fn assemble(
        &self,
        key: &PrivateKey,
        operations: Vec<Operation>,
    ) -> Result<SignedTransaction, WalletError> {
        let state = self.fetch_state()?;
        self.assemble_from_state(&state, key, operations)
    }

    /// Assemble and submit. The node's reply is returned as received.
    pub fn broadcast(
        &self,
        key: &PrivateKey,
        operations: Vec<Operation>,
    ) -> Result<BroadcastResponse, WalletError> {
        let signed = self.assemble(key, operations)?;
        let response = self
            .client
            .broadcast_trx(&signed)
            .map_err(WalletError::Broadcast)?;
        if response.is_success() {
            info!(status = response.status, "transaction accepted");
        } else {
            warn!(status = response.status, msg = %response.msg, "transaction rejected");
        }
        Ok(response)
    }
}

impl std::fmt::Debug for TransactionAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionAssembler")
            .field("chain_id", &self.chain_id)
            .field("expiration_secs", &self.expiration_secs)
            .finish_non_exhaustive()
    }
}

//! An account bound to its key, with one method per operation.
//!
//! Every method builds a single operation acting as this account, checks it
//! locally, and broadcasts it through the [`TransactionAssembler`]. Local
//! failures surface as [`WalletError::Construction`] before any node call.

use cos_crypto::decode_public_key;
use cos_rpc::responses::BroadcastResponse;
use cos_transactions::account::{AccountCreateOp, AccountUpdateOp};
use cos_transactions::content::{FollowOp, PostOp, ReplyOp, VoteOp};
use cos_transactions::contract::{ContractApplyOp, ContractDeployOp};
use cos_transactions::producer::{BpEnableOp, BpRegisterOp, BpUpdateOp, BpVoteOp, ChainProperties};
use cos_transactions::ticket::{AcquireTicketOp, VoteByTicketOp};
use cos_transactions::transfer::{
    ConvertVestOp, DelegateVestOp, StakeOp, TransferOp, TransferToVestOp, UnDelegateVestOp,
    UnStakeOp,
};
use cos_transactions::{beneficiaries, generate_uuid, validate_operation, Operation};
use cos_types::{AccountName, Coin, PrivateKey, PublicKey, Vest};
use tracing::info;

use crate::assembler::TransactionAssembler;
use crate::error::WalletError;

/// Broadcast result of a post or reply, with the id chosen for it.
#[derive(Debug, Clone)]
pub struct ContentBroadcast {
    pub uuid: u64,
    pub response: BroadcastResponse,
}

pub struct Account {
    name: AccountName,
    private_key: PrivateKey,
    assembler: TransactionAssembler,
}

fn parse_public_key(text: &str) -> Result<PublicKey, WalletError> {
    decode_public_key(text).ok_or_else(|| WalletError::Key(format!("invalid public key: {text}")))
}

impl Account {
    pub fn new(
        name: impl Into<AccountName>,
        private_key: PrivateKey,
        assembler: TransactionAssembler,
    ) -> Self {
        Self {
            name: name.into(),
            private_key,
            assembler,
        }
    }

    pub fn name(&self) -> &AccountName {
        &self.name
    }

    pub fn private_key(&self) -> &PrivateKey {
        &self.private_key
    }

    pub fn assembler(&self) -> &TransactionAssembler {
        &self.assembler
    }

    /// Send several operations atomically in one transaction.
    pub fn broadcast_operations(
        &self,
        operations: Vec<Operation>,
    ) -> Result<BroadcastResponse, WalletError> {
        operations
            .iter()
            .try_for_each(validate_operation)
            .map_err(WalletError::Construction)?;
        self.assembler.broadcast(&self.private_key, operations)
    }

    fn send(&self, op: impl Into<Operation>) -> Result<BroadcastResponse, WalletError> {
        self.broadcast_operations(vec![op.into()])
    }

    // ── Accounts ─────────────────────────────────────────────────────────

    /// Create `new_account_name`, owned by `pub_key` (`COS`-prefixed text).
    pub fn create_account(
        &self,
        fee: u64,
        new_account_name: &str,
        pub_key: &str,
        json_metadata: &str,
    ) -> Result<BroadcastResponse, WalletError> {
        self.send(AccountCreateOp {
            creator: self.name.clone(),
            fee: Coin::new(fee),
            new_account_name: new_account_name.into(),
            pub_key: parse_public_key(pub_key)?,
            json_metadata: json_metadata.to_string(),
        })
    }

    pub fn account_update(&self, pub_key: &str) -> Result<BroadcastResponse, WalletError> {
        self.send(AccountUpdateOp {
            owner: self.name.clone(),
            pub_key: parse_public_key(pub_key)?,
        })
    }

    // ── Value ────────────────────────────────────────────────────────────

    pub fn transfer(
        &self,
        to: &str,
        amount: u64,
        memo: &str,
    ) -> Result<BroadcastResponse, WalletError> {
        self.send(TransferOp {
            from: self.name.clone(),
            to: to.into(),
            amount: Coin::new(amount),
            memo: memo.to_string(),
        })
    }

    pub fn transfer_to_vest(
        &self,
        to: &str,
        amount: u64,
        memo: &str,
    ) -> Result<BroadcastResponse, WalletError> {
        self.send(TransferToVestOp {
            from: self.name.clone(),
            to: to.into(),
            amount: Coin::new(amount),
            memo: memo.to_string(),
        })
    }

    pub fn convert_vest(&self, amount: u64) -> Result<BroadcastResponse, WalletError> {
        self.send(ConvertVestOp {
            from: self.name.clone(),
            amount: Vest::new(amount),
        })
    }

    pub fn stake(&self, to: &str, amount: u64) -> Result<BroadcastResponse, WalletError> {
        self.send(StakeOp {
            from: self.name.clone(),
            to: to.into(),
            amount: Coin::new(amount),
        })
    }

    pub fn un_stake(&self, debtor: &str, amount: u64) -> Result<BroadcastResponse, WalletError> {
        self.send(UnStakeOp {
            creditor: self.name.clone(),
            debtor: debtor.into(),
            amount: Coin::new(amount),
        })
    }

    pub fn delegate_vest(
        &self,
        to: &str,
        amount: u64,
        expiration: u64,
    ) -> Result<BroadcastResponse, WalletError> {
        self.send(DelegateVestOp {
            from: self.name.clone(),
            to: to.into(),
            amount: Vest::new(amount),
            expiration,
        })
    }

    pub fn un_delegate_vest(&self, order_id: u64) -> Result<BroadcastResponse, WalletError> {
        self.send(UnDelegateVestOp {
            account: self.name.clone(),
            order_id,
        })
    }

    // ── Content ──────────────────────────────────────────────────────────

    pub fn vote(&self, post_id: u64) -> Result<BroadcastResponse, WalletError> {
        self.send(VoteOp {
            voter: self.name.clone(),
            idx: post_id,
        })
    }

    /// Publish a post. `routes` are `(account, weight)` pairs in basis points.
    pub fn post<I, N>(
        &self,
        title: &str,
        content: &str,
        tags: Vec<String>,
        routes: I,
    ) -> Result<ContentBroadcast, WalletError>
    where
        I: IntoIterator<Item = (N, u32)>,
        N: Into<AccountName>,
    {
        let beneficiaries = beneficiaries(routes).map_err(WalletError::Construction)?;
        let uuid = generate_uuid(&format!("{}{}", self.name, title));
        let response = self.send(PostOp {
            uuid,
            owner: self.name.clone(),
            title: title.to_string(),
            content: content.to_string(),
            tags,
            beneficiaries,
        })?;
        info!(uuid, author = %self.name, "post broadcast");
        Ok(ContentBroadcast { uuid, response })
    }

    /// Reply to the post or reply `parent_uuid`.
    pub fn reply<I, N>(
        &self,
        content: &str,
        parent_uuid: u64,
        routes: I,
    ) -> Result<ContentBroadcast, WalletError>
    where
        I: IntoIterator<Item = (N, u32)>,
        N: Into<AccountName>,
    {
        let beneficiaries = beneficiaries(routes).map_err(WalletError::Construction)?;
        let uuid = generate_uuid(self.name.as_str());
        let response = self.send(ReplyOp {
            uuid,
            owner: self.name.clone(),
            content: content.to_string(),
            parent_uuid,
            beneficiaries,
        })?;
        info!(uuid, parent_uuid, author = %self.name, "reply broadcast");
        Ok(ContentBroadcast { uuid, response })
    }

    pub fn follow(&self, following: &str, cancel: bool) -> Result<BroadcastResponse, WalletError> {
        self.send(FollowOp {
            account: self.name.clone(),
            f_account: following.into(),
            cancel,
        })
    }

    // ── Block producers ──────────────────────────────────────────────────

    pub fn bp_register(
        &self,
        url: &str,
        desc: &str,
        block_signing_key: &str,
        props: ChainProperties,
    ) -> Result<BroadcastResponse, WalletError> {
        self.send(BpRegisterOp {
            owner: self.name.clone(),
            url: url.to_string(),
            desc: desc.to_string(),
            block_signing_key: parse_public_key(block_signing_key)?,
            props,
        })
    }

    pub fn bp_enable(&self, cancel: bool) -> Result<BroadcastResponse, WalletError> {
        self.send(BpEnableOp {
            owner: self.name.clone(),
            cancel,
        })
    }

    pub fn bp_update(&self, props: ChainProperties) -> Result<BroadcastResponse, WalletError> {
        self.send(BpUpdateOp {
            owner: self.name.clone(),
            props,
        })
    }

    pub fn bp_vote(
        &self,
        block_producer: &str,
        cancel: bool,
    ) -> Result<BroadcastResponse, WalletError> {
        self.send(BpVoteOp {
            voter: self.name.clone(),
            block_producer: block_producer.into(),
            cancel,
        })
    }

    // ── Contracts ────────────────────────────────────────────────────────

    pub fn contract_deploy(
        &self,
        contract: &str,
        abi: Vec<u8>,
        code: Vec<u8>,
        upgradeable: bool,
        url: &str,
        describe: &str,
    ) -> Result<BroadcastResponse, WalletError> {
        self.send(ContractDeployOp {
            owner: self.name.clone(),
            contract: contract.to_string(),
            abi,
            code,
            upgradeable,
            url: url.to_string(),
            describe: describe.to_string(),
        })
    }

    /// Call `method` on `owner`'s `contract` with JSON `params`, paying `amount`.
    pub fn contract_apply(
        &self,
        owner: &str,
        contract: &str,
        method: &str,
        params: &str,
        amount: u64,
    ) -> Result<BroadcastResponse, WalletError> {
        self.send(ContractApplyOp {
            caller: self.name.clone(),
            owner: owner.into(),
            amount: Coin::new(amount),
            contract: contract.to_string(),
            method: method.to_string(),
            params: params.to_string(),
        })
    }

    // ── Tickets ──────────────────────────────────────────────────────────

    pub fn acquire_ticket(&self, count: u64) -> Result<BroadcastResponse, WalletError> {
        self.send(AcquireTicketOp {
            account: self.name.clone(),
            count,
        })
    }

    pub fn vote_by_ticket(
        &self,
        post_id: u64,
        count: u64,
    ) -> Result<BroadcastResponse, WalletError> {
        self.send(VoteByTicketOp {
            account: self.name.clone(),
            idx: post_id,
            count,
        })
    }
}

impl std::fmt::Debug for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Account").field("name", &self.name).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cos_crypto::{encode_public_key, keypair_from_seed};
    use cos_nullables::NullTransport;
    use cos_rpc::NodeClient;
    use cos_transactions::{SignedTransaction, TransactionError};
    use cos_types::{BlockId, ChainId, ChainState, TimePointSec};
    use serde_json::json;

    fn setup() -> (NullTransport, Account) {
        let transport = NullTransport::new();
        transport.respond_with(
            "get_chain_state",
            &ChainState {
                head_block_id: BlockId::new([9u8; 32]),
                head_block_number: 100,
                head_block_time: TimePointSec::new(1_600_000_000),
                last_irreversible_block_number: 90,
            },
        );
        transport.respond("broadcast_trx", json!({ "status": 200 }));
        let client = NodeClient::new(transport.clone());
        let assembler = TransactionAssembler::new(client, ChainId::Dev);
        let key = keypair_from_seed(&[4u8; 32]).private;
        (transport, Account::new("alice1", key, assembler))
    }

    fn sent_operations(transport: &NullTransport) -> Vec<Operation> {
        transport
            .calls_to("broadcast_trx")
            .into_iter()
            .flat_map(|params| {
                let trx: SignedTransaction =
                    serde_json::from_value(params["transaction"].clone()).unwrap();
                trx.trx.operations
            })
            .collect()
    }

    #[test]
    fn transfer_builds_and_sends_one_operation() {
        let (transport, account) = setup();
        let reply = account.transfer("bobbob", 10, "rent").unwrap();
        assert!(reply.is_success());

        let ops = sent_operations(&transport);
        assert_eq!(ops.len(), 1);
        match &ops[0] {
            Operation::Transfer(op) => {
                assert_eq!(op.from.as_str(), "alice1");
                assert_eq!(op.to.as_str(), "bobbob");
                assert_eq!(op.amount, Coin::new(10));
                assert_eq!(op.memo, "rent");
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn post_with_valid_beneficiaries() {
        let (transport, account) = setup();
        let sent = account
            .post("hello", "world", vec!["intro".into()], [("bobbob", 5_000), ("carol1", 5_000)])
            .unwrap();
        let ops = sent_operations(&transport);
        match &ops[0] {
            Operation::Post(op) => {
                assert_eq!(op.uuid, sent.uuid);
                assert_eq!(op.beneficiaries.len(), 2);
                assert_eq!(op.beneficiaries[0].name.as_str(), "bobbob");
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn overweight_beneficiaries_fail_before_any_call() {
        let (transport, account) = setup();
        let err = account
            .reply("nice", 42, [("bobbob", 6_000), ("carol1", 5_000)])
            .unwrap_err();
        assert!(matches!(
            err,
            WalletError::Construction(TransactionError::InvalidBeneficiary(_))
        ));
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn malformed_operation_is_construction_error() {
        let (transport, account) = setup();
        let err = account.stake("bobbob", 0).unwrap_err();
        assert!(matches!(
            err,
            WalletError::Construction(TransactionError::ZeroAmount("stake"))
        ));
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn bad_public_key_is_key_error() {
        let (transport, account) = setup();
        assert!(matches!(
            account.account_update("COSnotakey"),
            Err(WalletError::Key(_))
        ));
        assert!(transport.calls().is_empty());
    }

    #[test]
    fn create_account_carries_decoded_key() {
        let (transport, account) = setup();
        let new_key = keypair_from_seed(&[8u8; 32]).public;
        account
            .create_account(1, "newbie1", &encode_public_key(&new_key), "{}")
            .unwrap();
        match &sent_operations(&transport)[0] {
            Operation::AccountCreate(op) => {
                assert_eq!(op.pub_key, new_key);
                assert_eq!(op.creator.as_str(), "alice1");
            }
            other => panic!("unexpected operation {other:?}"),
        }
    }

    #[test]
    fn every_builder_acts_as_the_account() {
        let (transport, account) = setup();
        let key_text = encode_public_key(&keypair_from_seed(&[8u8; 32]).public);
        account.transfer_to_vest("bobbob", 1, "").unwrap();
        account.convert_vest(1).unwrap();
        account.un_stake("bobbob", 1).unwrap();
        account.delegate_vest("bobbob", 1, 100).unwrap();
        account.un_delegate_vest(3).unwrap();
        account.vote(7).unwrap();
        account.follow("bobbob", false).unwrap();
        account
            .bp_register("https://bp", "desc", &key_text, ChainProperties::default())
            .unwrap();
        account.bp_enable(false).unwrap();
        account.bp_update(ChainProperties::default()).unwrap();
        account.bp_vote("bobbob", false).unwrap();
        account
            .contract_deploy("token", vec![1], vec![0, 97, 115, 109], false, "", "")
            .unwrap();
        account.contract_apply("bobbob", "token", "transfer", "[]", 0).unwrap();
        account.acquire_ticket(2).unwrap();
        account.vote_by_ticket(7, 1).unwrap();

        let ops = sent_operations(&transport);
        assert_eq!(ops.len(), 15);
        assert!(ops.iter().all(|op| op.signer_account().as_str() == "alice1"));
    }

    #[test]
    fn several_operations_in_one_transaction() {
        let (transport, account) = setup();
        let ops: Vec<Operation> = vec![
            VoteOp {
                voter: "alice1".into(),
                idx: 1,
            }
            .into(),
            VoteOp {
                voter: "alice1".into(),
                idx: 2,
            }
            .into(),
        ];
        account.broadcast_operations(ops.clone()).unwrap();
        assert_eq!(transport.call_count("broadcast_trx"), 1);
        assert_eq!(sent_operations(&transport), ops);
    }
}

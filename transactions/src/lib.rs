//! Contentos operations and the transaction envelope that carries them.
//!
//! Operation groups:
//! - **Account**: create an account, rotate its key
//! - **Transfer**: liquid transfers, vesting conversion, staking, vest delegation
//! - **Content**: posts, replies, votes, follows
//! - **Producer**: block producer registration, enablement, parameters, votes
//! - **Contract**: contract deployment and calls
//! - **Ticket**: vote tickets
//!
//! A [`Transaction`] bundles one or more operations with TaPoS reference
//! fields and an expiration; a [`TransactionSigner`] turns it into a
//! [`SignedTransaction`] bound to one chain.

pub mod account;
pub mod beneficiary;
pub mod content;
pub mod contract;
pub mod error;
pub mod producer;
pub mod signer;
pub mod tapos;
pub mod ticket;
pub mod transaction;
pub mod transfer;
pub mod uuid;
pub mod validation;

pub use beneficiary::{beneficiaries, build_beneficiaries, BeneficiaryRoute};
pub use error::TransactionError;
pub use signer::{Ed25519Signer, TransactionSigner};
pub use transaction::{SignedTransaction, Transaction};
pub use uuid::{generate_uuid, generate_uuid_with};
pub use validation::{validate_operation, validate_signed_transaction, validate_transaction};

use cos_types::AccountName;
use serde::{Deserialize, Serialize};

/// The closed set of ledger mutations a transaction can carry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    AccountCreate(account::AccountCreateOp),
    AccountUpdate(account::AccountUpdateOp),
    Transfer(transfer::TransferOp),
    TransferToVest(transfer::TransferToVestOp),
    ConvertVest(transfer::ConvertVestOp),
    Stake(transfer::StakeOp),
    UnStake(transfer::UnStakeOp),
    DelegateVest(transfer::DelegateVestOp),
    UnDelegateVest(transfer::UnDelegateVestOp),
    Vote(content::VoteOp),
    Post(content::PostOp),
    Reply(content::ReplyOp),
    Follow(content::FollowOp),
    BpRegister(producer::BpRegisterOp),
    BpEnable(producer::BpEnableOp),
    BpUpdate(producer::BpUpdateOp),
    BpVote(producer::BpVoteOp),
    ContractDeploy(contract::ContractDeployOp),
    ContractApply(contract::ContractApplyOp),
    AcquireTicket(ticket::AcquireTicketOp),
    VoteByTicket(ticket::VoteByTicketOp),
}

impl Operation {
    /// Wire name of the variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AccountCreate(_) => "account_create",
            Self::AccountUpdate(_) => "account_update",
            Self::Transfer(_) => "transfer",
            Self::TransferToVest(_) => "transfer_to_vest",
            Self::ConvertVest(_) => "convert_vest",
            Self::Stake(_) => "stake",
            Self::UnStake(_) => "un_stake",
            Self::DelegateVest(_) => "delegate_vest",
            Self::UnDelegateVest(_) => "un_delegate_vest",
            Self::Vote(_) => "vote",
            Self::Post(_) => "post",
            Self::Reply(_) => "reply",
            Self::Follow(_) => "follow",
            Self::BpRegister(_) => "bp_register",
            Self::BpEnable(_) => "bp_enable",
            Self::BpUpdate(_) => "bp_update",
            Self::BpVote(_) => "bp_vote",
            Self::ContractDeploy(_) => "contract_deploy",
            Self::ContractApply(_) => "contract_apply",
            Self::AcquireTicket(_) => "acquire_ticket",
            Self::VoteByTicket(_) => "vote_by_ticket",
        }
    }

    /// The account whose key must sign this operation.
    pub fn signer_account(&self) -> &AccountName {
        match self {
            Self::AccountCreate(op) => &op.creator,
            Self::AccountUpdate(op) => &op.owner,
            Self::Transfer(op) => &op.from,
            Self::TransferToVest(op) => &op.from,
            Self::ConvertVest(op) => &op.from,
            Self::Stake(op) => &op.from,
            Self::UnStake(op) => &op.creditor,
            Self::DelegateVest(op) => &op.from,
            Self::UnDelegateVest(op) => &op.account,
            Self::Vote(op) => &op.voter,
            Self::Post(op) => &op.owner,
            Self::Reply(op) => &op.owner,
            Self::Follow(op) => &op.account,
            Self::BpRegister(op) => &op.owner,
            Self::BpEnable(op) => &op.owner,
            Self::BpUpdate(op) => &op.owner,
            Self::BpVote(op) => &op.voter,
            Self::ContractDeploy(op) => &op.owner,
            Self::ContractApply(op) => &op.caller,
            Self::AcquireTicket(op) => &op.account,
            Self::VoteByTicket(op) => &op.account,
        }
    }
}

macro_rules! impl_from_op {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Operation {
                fn from(op: $ty) -> Self {
                    Self::$variant(op)
                }
            }
        )*
    };
}

impl_from_op! {
    account::AccountCreateOp => AccountCreate,
    account::AccountUpdateOp => AccountUpdate,
    transfer::TransferOp => Transfer,
    transfer::TransferToVestOp => TransferToVest,
    transfer::ConvertVestOp => ConvertVest,
    transfer::StakeOp => Stake,
    transfer::UnStakeOp => UnStake,
    transfer::DelegateVestOp => DelegateVest,
    transfer::UnDelegateVestOp => UnDelegateVest,
    content::VoteOp => Vote,
    content::PostOp => Post,
    content::ReplyOp => Reply,
    content::FollowOp => Follow,
    producer::BpRegisterOp => BpRegister,
    producer::BpEnableOp => BpEnable,
    producer::BpUpdateOp => BpUpdate,
    producer::BpVoteOp => BpVote,
    contract::ContractDeployOp => ContractDeploy,
    contract::ContractApplyOp => ContractApply,
    ticket::AcquireTicketOp => AcquireTicket,
    ticket::VoteByTicketOp => VoteByTicket,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cos_crypto::keypair_from_seed;
    use cos_types::{BlockId, ChainId, ChainState, Coin, TimePointSec};

    fn state() -> ChainState {
        let mut id = [0u8; 32];
        id[8..12].copy_from_slice(&7u32.to_le_bytes());
        ChainState {
            head_block_id: BlockId::new(id),
            head_block_number: 5000,
            head_block_time: TimePointSec::new(1_600_000_000),
            last_irreversible_block_number: 4990,
        }
    }

    fn transfer() -> Operation {
        transfer::TransferOp {
            from: "alice1".into(),
            to: "bobbob".into(),
            amount: Coin::new(10),
            memo: "hi".into(),
        }
        .into()
    }

    #[test]
    fn operation_json_is_tagged_by_wire_name() {
        let json = serde_json::to_value(transfer()).unwrap();
        assert_eq!(json["transfer"]["from"], "alice1");
        assert_eq!(json["transfer"]["amount"], 10);
    }

    #[test]
    fn envelope_from_state() {
        let trx = Transaction::from_state(&state(), 30, vec![transfer()]);
        assert_eq!(trx.ref_block_num, 5000 & 0x7ff);
        assert_eq!(trx.ref_block_prefix, 7);
        assert_eq!(trx.expiration, TimePointSec::new(1_600_000_030));
        assert_eq!(trx.operations.len(), 1);
    }

    #[test]
    fn signed_envelope_verifies_only_on_its_chain() {
        let kp = keypair_from_seed(&[3u8; 32]);
        let trx = Transaction::from_state(&state(), 30, vec![transfer()]);
        let signed = Ed25519Signer.sign(trx, &kp.private, ChainId::Test).unwrap();
        assert_eq!(signed.signer, kp.public);
        assert!(signed.verify(ChainId::Test));
        assert!(!signed.verify(ChainId::Main));
    }

    #[test]
    fn tampered_envelope_fails_verification() {
        let kp = keypair_from_seed(&[3u8; 32]);
        let trx = Transaction::from_state(&state(), 30, vec![transfer()]);
        let mut signed = Ed25519Signer.sign(trx, &kp.private, ChainId::Main).unwrap();
        signed.trx.expiration = TimePointSec::new(1);
        assert!(!signed.verify(ChainId::Main));
    }

    #[test]
    fn id_ignores_signature() {
        let kp = keypair_from_seed(&[3u8; 32]);
        let trx = Transaction::from_state(&state(), 30, vec![transfer()]);
        let expected = trx.id().unwrap();
        let signed = Ed25519Signer.sign(trx, &kp.private, ChainId::Main).unwrap();
        assert_eq!(signed.id().unwrap(), expected);
    }

    #[test]
    fn signer_account_is_acting_account() {
        assert_eq!(transfer().signer_account().as_str(), "alice1");
        assert_eq!(transfer().name(), "transfer");
    }
}

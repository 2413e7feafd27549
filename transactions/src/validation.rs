//! Stateless structural validation.
//!
//! Balance, authority and existence checks need chain state and are left to
//! the node.

use cos_types::params::{MAX_OPERATIONS_PER_TRX, PERCENT};
use cos_types::AccountName;

use crate::beneficiary::check_beneficiaries;
use crate::error::TransactionError;
use crate::transaction::{SignedTransaction, Transaction};
use crate::Operation;

fn check_name(name: &AccountName) -> Result<(), TransactionError> {
    if name.is_valid() {
        Ok(())
    } else {
        Err(TransactionError::InvalidAccountName(name.as_str().to_string()))
    }
}

fn check_nonzero(op: &'static str, is_zero: bool) -> Result<(), TransactionError> {
    if is_zero {
        Err(TransactionError::ZeroAmount(op))
    } else {
        Ok(())
    }
}

fn check_not_empty(
    op: &'static str,
    field: &'static str,
    value: &[u8],
) -> Result<(), TransactionError> {
    if value.is_empty() {
        Err(TransactionError::EmptyField(op, field))
    } else {
        Ok(())
    }
}

/// Validate one operation in isolation.
pub fn validate_operation(op: &Operation) -> Result<(), TransactionError> {
    let name = op.name();
    match op {
        Operation::AccountCreate(o) => {
            check_name(&o.creator)?;
            check_name(&o.new_account_name)
        }
        Operation::AccountUpdate(o) => check_name(&o.owner),
        Operation::Transfer(o) => {
            check_name(&o.from)?;
            check_name(&o.to)?;
            check_nonzero(name, o.amount.is_zero())
        }
        Operation::TransferToVest(o) => {
            check_name(&o.from)?;
            check_name(&o.to)?;
            check_nonzero(name, o.amount.is_zero())
        }
        Operation::ConvertVest(o) => {
            check_name(&o.from)?;
            check_nonzero(name, o.amount.is_zero())
        }
        Operation::Stake(o) => {
            check_name(&o.from)?;
            check_name(&o.to)?;
            check_nonzero(name, o.amount.is_zero())
        }
        Operation::UnStake(o) => {
            check_name(&o.creditor)?;
            check_name(&o.debtor)?;
            check_nonzero(name, o.amount.is_zero())
        }
        Operation::DelegateVest(o) => {
            check_name(&o.from)?;
            check_name(&o.to)?;
            check_nonzero(name, o.amount.is_zero())
        }
        Operation::UnDelegateVest(o) => check_name(&o.account),
        Operation::Vote(o) => check_name(&o.voter),
        Operation::Post(o) => {
            check_name(&o.owner)?;
            check_not_empty(name, "title", o.title.as_bytes())?;
            check_not_empty(name, "content", o.content.as_bytes())?;
            check_beneficiaries(&o.beneficiaries, PERCENT)
        }
        Operation::Reply(o) => {
            check_name(&o.owner)?;
            check_not_empty(name, "content", o.content.as_bytes())?;
            check_beneficiaries(&o.beneficiaries, PERCENT)
        }
        Operation::Follow(o) => {
            check_name(&o.account)?;
            check_name(&o.f_account)
        }
        Operation::BpRegister(o) => check_name(&o.owner),
        Operation::BpEnable(o) => check_name(&o.owner),
        Operation::BpUpdate(o) => check_name(&o.owner),
        Operation::BpVote(o) => {
            check_name(&o.voter)?;
            check_name(&o.block_producer)
        }
        Operation::ContractDeploy(o) => {
            check_name(&o.owner)?;
            check_not_empty(name, "contract", o.contract.as_bytes())?;
            check_not_empty(name, "code", &o.code)
        }
        Operation::ContractApply(o) => {
            check_name(&o.caller)?;
            check_name(&o.owner)?;
            check_not_empty(name, "contract", o.contract.as_bytes())?;
            check_not_empty(name, "method", o.method.as_bytes())
        }
        Operation::AcquireTicket(o) => {
            check_name(&o.account)?;
            check_nonzero(name, o.count == 0)
        }
        Operation::VoteByTicket(o) => {
            check_name(&o.account)?;
            check_nonzero(name, o.count == 0)
        }
    }
}

/// Validate an unsigned transaction: operation count, expiration and each operation.
pub fn validate_transaction(trx: &Transaction) -> Result<(), TransactionError> {
    if trx.operations.is_empty() {
        return Err(TransactionError::NoOperations);
    }
    if trx.operations.len() > MAX_OPERATIONS_PER_TRX {
        return Err(TransactionError::TooManyOperations {
            count: trx.operations.len(),
            max: MAX_OPERATIONS_PER_TRX,
        });
    }
    if trx.expiration.utc_seconds() == 0 {
        return Err(TransactionError::ZeroExpiration);
    }
    trx.operations.iter().try_for_each(validate_operation)
}

/// [`validate_transaction`] plus a non-zero signature.
pub fn validate_signed_transaction(signed: &SignedTransaction) -> Result<(), TransactionError> {
    if signed.signature.is_zero() {
        return Err(TransactionError::MissingSignature);
    }
    validate_transaction(&signed.trx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beneficiary::BeneficiaryRoute;
    use crate::content::PostOp;
    use crate::contract::ContractDeployOp;
    use crate::ticket::AcquireTicketOp;
    use crate::transfer::TransferOp;
    use cos_types::{Coin, PublicKey, Signature, TimePointSec};

    fn transfer(amount: u64) -> Operation {
        Operation::Transfer(TransferOp {
            from: "alice1".into(),
            to: "bobbob".into(),
            amount: Coin::new(amount),
            memo: String::new(),
        })
    }

    fn trx(operations: Vec<Operation>) -> Transaction {
        Transaction {
            ref_block_num: 1,
            ref_block_prefix: 2,
            expiration: TimePointSec::new(1_000),
            operations,
        }
    }

    fn signed(trx: Transaction) -> SignedTransaction {
        SignedTransaction {
            trx,
            signature: Signature([1u8; 64]),
            signer: PublicKey([2u8; 32]),
        }
    }

    #[test]
    fn accepts_well_formed_transaction() {
        assert!(validate_signed_transaction(&signed(trx(vec![transfer(5)]))).is_ok());
    }

    #[test]
    fn rejects_empty_operation_list() {
        assert_eq!(
            validate_signed_transaction(&signed(trx(vec![]))),
            Err(TransactionError::NoOperations)
        );
    }

    #[test]
    fn rejects_too_many_operations() {
        let ops = vec![transfer(1); MAX_OPERATIONS_PER_TRX + 1];
        assert!(matches!(
            validate_transaction(&trx(ops)),
            Err(TransactionError::TooManyOperations { .. })
        ));
        let ops = vec![transfer(1); MAX_OPERATIONS_PER_TRX];
        assert!(validate_transaction(&trx(ops)).is_ok());
    }

    #[test]
    fn rejects_zero_expiration() {
        let mut t = trx(vec![transfer(1)]);
        t.expiration = TimePointSec::MIN;
        assert_eq!(validate_transaction(&t), Err(TransactionError::ZeroExpiration));
    }

    #[test]
    fn rejects_unsigned() {
        let mut s = signed(trx(vec![transfer(1)]));
        s.signature = Signature::ZERO;
        assert_eq!(
            validate_signed_transaction(&s),
            Err(TransactionError::MissingSignature)
        );
    }

    #[test]
    fn rejects_zero_transfer() {
        assert_eq!(
            validate_operation(&transfer(0)),
            Err(TransactionError::ZeroAmount("transfer"))
        );
    }

    #[test]
    fn rejects_bad_account_name() {
        let op = Operation::Transfer(TransferOp {
            from: "al".into(),
            to: "bobbob".into(),
            amount: Coin::new(1),
            memo: String::new(),
        });
        assert!(matches!(
            validate_operation(&op),
            Err(TransactionError::InvalidAccountName(_))
        ));
    }

    #[test]
    fn rejects_post_with_overweight_beneficiaries() {
        let op = Operation::Post(PostOp {
            uuid: 1,
            owner: "alice1".into(),
            title: "t".into(),
            content: "c".into(),
            tags: vec![],
            beneficiaries: vec![
                BeneficiaryRoute {
                    name: "bobbob".into(),
                    weight: 6_000,
                },
                BeneficiaryRoute {
                    name: "carol1".into(),
                    weight: 5_000,
                },
            ],
        });
        assert!(matches!(
            validate_operation(&op),
            Err(TransactionError::InvalidBeneficiary(_))
        ));
    }

    #[test]
    fn rejects_contract_without_code() {
        let op = Operation::ContractDeploy(ContractDeployOp {
            owner: "alice1".into(),
            contract: "token".into(),
            abi: vec![],
            code: vec![],
            upgradeable: false,
            url: String::new(),
            describe: String::new(),
        });
        assert_eq!(
            validate_operation(&op),
            Err(TransactionError::EmptyField("contract_deploy", "code"))
        );
    }

    #[test]
    fn rejects_zero_ticket_count() {
        let op = Operation::AcquireTicket(AcquireTicketOp {
            account: "alice1".into(),
            count: 0,
        });
        assert!(validate_operation(&op).is_err());
    }
}

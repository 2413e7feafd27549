use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("invalid beneficiary route: {0}")]
    InvalidBeneficiary(String),

    #[error("invalid account name: {0:?}")]
    InvalidAccountName(String),

    #[error("{0}: amount must be positive")]
    ZeroAmount(&'static str),

    #[error("{0}: {1} must not be empty")]
    EmptyField(&'static str, &'static str),

    #[error("transaction carries no operations")]
    NoOperations,

    #[error("transaction carries {count} operations, at most {max} allowed")]
    TooManyOperations { count: usize, max: usize },

    #[error("transaction expiration is zero")]
    ZeroExpiration,

    #[error("transaction is not signed")]
    MissingSignature,

    #[error("signature does not match transaction")]
    InvalidSignature,

    #[error("encoding failed: {0}")]
    Encoding(String),

    #[error("{0}")]
    Other(String),
}

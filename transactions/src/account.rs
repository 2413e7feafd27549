//! Account lifecycle operations: create an account, rotate its key.

use cos_types::{AccountName, Coin, PublicKey};
use serde::{Deserialize, Serialize};

/// Create a new account, paid for by `creator`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreateOp {
    pub creator: AccountName,
    pub fee: Coin,
    pub new_account_name: AccountName,
    /// Key that will own the new account.
    pub pub_key: PublicKey,
    pub json_metadata: String,
}

/// Replace the owner key of an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdateOp {
    pub owner: AccountName,
    pub pub_key: PublicKey,
}

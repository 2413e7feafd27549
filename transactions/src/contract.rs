//! Smart contract operations.

use cos_types::{AccountName, Coin};
use serde::{Deserialize, Serialize};

/// Deploy (or upgrade, if the existing contract allows it) a contract under `owner`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractDeployOp {
    pub owner: AccountName,
    pub contract: String,
    pub abi: Vec<u8>,
    pub code: Vec<u8>,
    pub upgradeable: bool,
    pub url: String,
    pub describe: String,
}

/// Call `method` on `owner`'s contract, attaching `amount` COS.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractApplyOp {
    pub caller: AccountName,
    pub owner: AccountName,
    pub amount: Coin,
    pub contract: String,
    pub method: String,
    /// JSON-encoded argument list.
    pub params: String,
}

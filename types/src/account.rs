//! Account name type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An on-chain account name.
///
/// Construction never fails so that range-query bounds can use the empty name
/// as a minimum key. Operations check [`AccountName::is_valid`] before signing.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountName(String);

impl AccountName {
    /// Shortest name the chain accepts.
    pub const MIN_LEN: usize = 6;
    /// Longest name the chain accepts.
    pub const MAX_LEN: usize = 16;

    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The empty name, the lowest possible key in name-ordered ranges.
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `MIN_LEN..=MAX_LEN` characters from `[a-z0-9]`.
    pub fn is_valid(&self) -> bool {
        (Self::MIN_LEN..=Self::MAX_LEN).contains(&self.0.len())
            && self
                .0
                .bytes()
                .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AccountName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for AccountName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

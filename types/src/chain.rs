//! Chain-domain identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TypeError;

/// Selects which network's signatures a transaction is valid for.
///
/// The identifier is mixed into every signing digest, so a transaction signed
/// for one network is rejected by the others.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainId {
    /// The production network.
    #[default]
    Main,
    /// The public test network.
    Test,
    /// Local development network.
    Dev,
}

impl ChainId {
    /// Human-readable name, as configured on the node.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Test => "test",
            Self::Dev => "dev",
        }
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChainId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "main" => Ok(Self::Main),
            "test" => Ok(Self::Test),
            "dev" => Ok(Self::Dev),
            other => Err(TypeError::UnknownChainId(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_names() {
        assert_eq!("main".parse::<ChainId>().unwrap(), ChainId::Main);
        assert_eq!("TEST".parse::<ChainId>().unwrap(), ChainId::Test);
        assert_eq!(" dev ".parse::<ChainId>().unwrap(), ChainId::Dev);
    }

    #[test]
    fn parse_unknown_name_fails() {
        assert!(matches!(
            "live".parse::<ChainId>(),
            Err(TypeError::UnknownChainId(_))
        ));
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&ChainId::Test).unwrap(), "\"test\"");
    }
}

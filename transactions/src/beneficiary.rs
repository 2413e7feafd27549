//! Beneficiary routes: shares of a post's or reply's reward paid to other accounts.
//!
//! Weights are in basis points of [`PERCENT`] (10 000 = 100.00%). A single route
//! and the sum over all routes of one operation may each reach the ceiling but
//! never exceed it.

use cos_types::params::PERCENT;
use cos_types::AccountName;
use serde::{Deserialize, Serialize};

use crate::error::TransactionError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeneficiaryRoute {
    pub name: AccountName,
    pub weight: u32,
}

/// Build routes from `(name, weight)` pairs, checking them against `ceiling`.
///
/// The result is sorted by account name so the encoded operation does not
/// depend on the caller's iteration order.
pub fn build_beneficiaries<I, N>(
    routes: I,
    ceiling: u32,
) -> Result<Vec<BeneficiaryRoute>, TransactionError>
where
    I: IntoIterator<Item = (N, u32)>,
    N: Into<AccountName>,
{
    let mut built: Vec<BeneficiaryRoute> = routes
        .into_iter()
        .map(|(name, weight)| BeneficiaryRoute {
            name: name.into(),
            weight,
        })
        .collect();
    built.sort_by(|a, b| a.name.cmp(&b.name));
    check_beneficiaries(&built, ceiling)?;
    Ok(built)
}

/// [`build_beneficiaries`] with the chain ceiling, [`PERCENT`].
pub fn beneficiaries<I, N>(routes: I) -> Result<Vec<BeneficiaryRoute>, TransactionError>
where
    I: IntoIterator<Item = (N, u32)>,
    N: Into<AccountName>,
{
    build_beneficiaries(routes, PERCENT)
}

/// Check per-route and cumulative weights, names and duplicates.
pub fn check_beneficiaries(
    routes: &[BeneficiaryRoute],
    ceiling: u32,
) -> Result<(), TransactionError> {
    let mut accumulated: u64 = 0;
    for (i, route) in routes.iter().enumerate() {
        if !route.name.is_valid() {
            return Err(TransactionError::InvalidAccountName(
                route.name.as_str().to_string(),
            ));
        }
        if routes[..i].iter().any(|r| r.name == route.name) {
            return Err(TransactionError::InvalidBeneficiary(format!(
                "{} listed more than once",
                route.name
            )));
        }
        if route.weight > ceiling {
            return Err(TransactionError::InvalidBeneficiary(format!(
                "weight {} for {} exceeds {}",
                route.weight, route.name, ceiling
            )));
        }
        accumulated += u64::from(route.weight);
        if accumulated > u64::from(ceiling) {
            return Err(TransactionError::InvalidBeneficiary(format!(
                "accumulated weight {} exceeds {}",
                accumulated, ceiling
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn sum_at_ceiling_is_accepted() {
        let routes = build_beneficiaries([("alice1", 5), ("bobbob", 5)], 10).unwrap();
        assert_eq!(routes.len(), 2);
    }

    #[test]
    fn sum_over_ceiling_is_rejected() {
        let err = build_beneficiaries([("alice1", 6), ("bobbob", 5)], 10).unwrap_err();
        assert!(matches!(err, TransactionError::InvalidBeneficiary(_)));
    }

    #[test]
    fn single_weight_over_ceiling_is_rejected() {
        assert!(beneficiaries([("alice1", PERCENT + 1)]).is_err());
        assert!(beneficiaries([("alice1", PERCENT)]).is_ok());
    }

    #[test]
    fn routes_sorted_by_name() {
        let mut map = HashMap::new();
        map.insert("zedzed", 100u32);
        map.insert("alice1", 200);
        map.insert("mallory", 300);
        let routes = beneficiaries(map).unwrap();
        let names: Vec<_> = routes.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["alice1", "mallory", "zedzed"]);
    }

    #[test]
    fn empty_routes_are_fine() {
        assert!(beneficiaries(Vec::<(&str, u32)>::new()).unwrap().is_empty());
    }

    #[test]
    fn duplicate_names_rejected() {
        let routes = vec![
            BeneficiaryRoute {
                name: "alice1".into(),
                weight: 1,
            },
            BeneficiaryRoute {
                name: "alice1".into(),
                weight: 1,
            },
        ];
        assert!(check_beneficiaries(&routes, PERCENT).is_err());
    }

    #[test]
    fn malformed_name_rejected() {
        let err = beneficiaries([("Bob", 1)]).unwrap_err();
        assert_eq!(err, TransactionError::InvalidAccountName("Bob".into()));
    }
}

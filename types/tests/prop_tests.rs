use proptest::prelude::*;

use cos_types::{AccountName, BlockId, Coin, TimePointSec, TrxId};

proptest! {
    /// BlockId bincode serialization roundtrip.
    #[test]
    fn block_id_bincode_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let id = BlockId::new(bytes);
        let encoded = bincode::serialize(&id).unwrap();
        let decoded: BlockId = bincode::deserialize(&encoded).unwrap();
        prop_assert_eq!(decoded, id);
    }

    /// TrxId JSON roundtrip goes through a 64-character hex string.
    #[test]
    fn trx_id_json_roundtrip(bytes in prop::array::uniform32(0u8..)) {
        let id = TrxId::new(bytes);
        let json = serde_json::to_string(&id).unwrap();
        prop_assert_eq!(json.len(), 64 + 2);
        let decoded: TrxId = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded, id);
    }

    /// TimePointSec ordering matches the underlying seconds.
    #[test]
    fn time_point_ordering(a in any::<u32>(), b in any::<u32>()) {
        prop_assert_eq!(TimePointSec::new(a) <= TimePointSec::new(b), a <= b);
    }

    /// saturating_add never wraps.
    #[test]
    fn time_point_saturating_add(base in any::<u32>(), delta in any::<u32>()) {
        let shifted = TimePointSec::new(base).saturating_add(delta);
        prop_assert!(shifted >= TimePointSec::new(base));
        prop_assert_eq!(shifted.utc_seconds(), base.saturating_add(delta));
    }

    /// Coin::checked_add agrees with u64 arithmetic.
    #[test]
    fn coin_checked_add(a in any::<u64>(), b in any::<u64>()) {
        let sum = Coin::new(a).checked_add(Coin::new(b));
        prop_assert_eq!(sum.map(|c| c.value()), a.checked_add(b));
    }

    /// Names drawn from the chain alphabet with a legal length are valid.
    #[test]
    fn well_formed_names_are_valid(name in "[a-z0-9]{6,16}") {
        prop_assert!(AccountName::new(name).is_valid());
    }

    /// Names that are too short are rejected regardless of alphabet.
    #[test]
    fn short_names_are_invalid(name in "[a-z0-9]{0,5}") {
        prop_assert!(!AccountName::new(name).is_valid());
    }
}

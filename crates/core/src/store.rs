//! Reward store catalog (PRD-06).
//!
//! The catalog is a fixed set of real-world rewards priced in gold coins.
//! Each item can be redeemed at most once per calendar day per user; the
//! uniqueness is enforced by the purchase table, not here.

use serde::Serialize;

use crate::error::CoreError;
use crate::types::DbId;

/// A redeemable reward.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StoreItem {
    pub id: DbId,
    pub name: &'static str,
    pub cost: i64,
}

/// Every item the store sells.
pub const CATALOG: [StoreItem; 5] = [
    StoreItem { id: 1, name: "看电视一小时", cost: 200 },
    StoreItem { id: 2, name: "零食一份", cost: 150 },
    StoreItem { id: 3, name: "新玩具一个", cost: 300 },
    StoreItem { id: 4, name: "新图书一本", cost: 250 },
    StoreItem { id: 5, name: "户外游戏一次", cost: 400 },
];

/// Look an item up by id.
pub fn find_item(item_id: DbId) -> Option<&'static StoreItem> {
    CATALOG.iter().find(|item| item.id == item_id)
}

/// Check that a balance covers an item's cost.
pub fn check_affordable(gold_coins: i64, item: &StoreItem) -> Result<(), CoreError> {
    if gold_coins < item.cost {
        return Err(CoreError::Validation(format!(
            "insufficient gold coins: have {}, need {}",
            gold_coins, item.cost
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn catalog_ids_are_unique_and_dense() {
        let mut ids: Vec<_> = CATALOG.iter().map(|i| i.id).collect();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn lookup_finds_known_items() {
        let item = find_item(3).unwrap();
        assert_eq!(item.name, "新玩具一个");
        assert_eq!(item.cost, 300);
    }

    #[test]
    fn lookup_misses_unknown_items() {
        assert!(find_item(0).is_none());
        assert!(find_item(6).is_none());
    }

    #[test]
    fn exact_balance_is_affordable() {
        let item = find_item(2).unwrap();
        assert!(check_affordable(150, item).is_ok());
    }

    #[test]
    fn short_balance_is_rejected() {
        let item = find_item(5).unwrap();
        assert_matches!(check_affordable(399, item), Err(CoreError::Validation(_)));
    }
}

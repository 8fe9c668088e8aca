use serde::{Deserialize, Serialize};

use stockwise_core::ItemId;

use crate::tier::Tier;

/// Per-tier id lists, each ordered by descending consumption value
/// (ties keep input order).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierAssignments {
    #[serde(rename = "A")]
    pub a: Vec<ItemId>,
    #[serde(rename = "B")]
    pub b: Vec<ItemId>,
    #[serde(rename = "C")]
    pub c: Vec<ItemId>,
}

impl TierAssignments {
    pub fn push(&mut self, tier: Tier, item_id: ItemId) {
        match tier {
            Tier::A => self.a.push(item_id),
            Tier::B => self.b.push(item_id),
            Tier::C => self.c.push(item_id),
        }
    }

    pub fn bucket(&self, tier: Tier) -> &[ItemId] {
        match tier {
            Tier::A => &self.a,
            Tier::B => &self.b,
            Tier::C => &self.c,
        }
    }

    /// Total number of placed items.
    pub fn assigned(&self) -> usize {
        self.a.len() + self.b.len() + self.c.len()
    }

    /// The tier an item landed in, if any.
    pub fn tier_of(&self, item_id: ItemId) -> Option<Tier> {
        Tier::ALL
            .into_iter()
            .find(|&tier| self.bucket(tier).contains(&item_id))
    }
}

/// Result of one classification call.
///
/// Transient: built per invocation, never persisted, holds no references to
/// caller data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbcReport {
    pub categories: TierAssignments,

    /// Sum of all items' clamped consumption values, including items without
    /// a resolvable id. Zero for an empty input.
    pub total_value: f64,

    /// Number of input items processed (id-less items included).
    pub count: usize,
}

impl AbcReport {
    pub fn empty() -> Self {
        Self {
            categories: TierAssignments::default(),
            total_value: 0.0,
            count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_of_finds_placed_items() {
        let mut assignments = TierAssignments::default();
        assignments.push(Tier::A, ItemId::new(1));
        assignments.push(Tier::C, ItemId::new(2));

        assert_eq!(assignments.tier_of(ItemId::new(1)), Some(Tier::A));
        assert_eq!(assignments.tier_of(ItemId::new(2)), Some(Tier::C));
        assert_eq!(assignments.tier_of(ItemId::new(3)), None);
        assert_eq!(assignments.assigned(), 2);
    }

    #[test]
    fn report_serializes_with_tier_letter_keys() {
        let mut report = AbcReport::empty();
        report.categories.push(Tier::B, ItemId::new(9));
        report.count = 1;

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["categories"]["B"][0], 9);
        assert_eq!(json["totalValue"], 0.0);
        assert_eq!(json["count"], 1);
    }
}

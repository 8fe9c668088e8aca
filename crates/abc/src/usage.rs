use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

use stockwise_core::ItemId;

use crate::tier::Tier;

/// Per-item usage record for one classification call.
///
/// Mirrors the analytics backend's payload: fields are sparse and loosely
/// typed, so every one defaults and deserialization degrades field-by-field
/// instead of rejecting the record — a null or non-numeric quantity becomes
/// zero, an unrecognized tier string becomes "no override". Coercion happens
/// once here rather than defensively at each access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUsage {
    /// Backend item key. Items without one still count toward totals but are
    /// excluded from the output tier lists (downstream consumers index by id).
    #[serde(default, deserialize_with = "lenient_item_id")]
    pub item_id: Option<ItemId>,

    /// Units consumed over the observation period.
    #[serde(default, deserialize_with = "lenient_number")]
    pub quantity_used: f64,

    /// Average cost per unit.
    #[serde(default, deserialize_with = "lenient_number")]
    pub unit_cost: f64,

    /// Precomputed consumption value; authoritative when present.
    #[serde(default, deserialize_with = "lenient_opt_number")]
    pub consumption_value: Option<f64>,

    /// When true, `manual_category` forces the item's tier.
    #[serde(default)]
    pub is_manual_override: bool,

    /// Pinned tier; consulted only when `is_manual_override` is set.
    /// Unrecognized values deserialize to `None`, so a bad pin falls through
    /// to computed classification instead of failing the payload.
    #[serde(default, deserialize_with = "lenient_tier")]
    pub manual_category: Option<Tier>,
}

/// Anything that is not a number (null, string, object) becomes zero; the
/// clamp in [`ItemUsage::effective_value`] handles the rest.
fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Other(IgnoredAny),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Number(v) => v,
        Raw::Other(_) => 0.0,
    })
}

fn lenient_opt_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Other(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(v)) => Some(v),
        _ => None,
    })
}

/// Ids that do not parse as integers are unresolvable, not errors.
fn lenient_item_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<ItemId>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Id(ItemId),
        Other(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Id(id)) => Some(id),
        _ => None,
    })
}

fn lenient_tier<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Tier>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Tier(Tier),
        Other(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Tier(tier)) => Some(tier),
        _ => None,
    })
}

impl ItemUsage {
    /// Automatic-classification record with an explicit value.
    pub fn valued(item_id: i64, consumption_value: f64) -> Self {
        Self {
            item_id: Some(ItemId::new(item_id)),
            quantity_used: 0.0,
            unit_cost: 0.0,
            consumption_value: Some(consumption_value),
            is_manual_override: false,
            manual_category: None,
        }
    }

    /// Automatic-classification record from quantity and unit cost.
    pub fn from_movement(item_id: i64, quantity_used: f64, unit_cost: f64) -> Self {
        Self {
            item_id: Some(ItemId::new(item_id)),
            quantity_used,
            unit_cost,
            consumption_value: None,
            is_manual_override: false,
            manual_category: None,
        }
    }

    pub fn with_pinned_tier(mut self, tier: Tier) -> Self {
        self.is_manual_override = true;
        self.manual_category = Some(tier);
        self
    }

    /// Consumption value used for ranking.
    ///
    /// `consumption_value` wins when present; otherwise `quantity_used * unit_cost`
    /// with each factor clamped first. Negative or non-finite results clamp to
    /// zero so a malformed record can never skew totals negatively.
    pub fn effective_value(&self) -> f64 {
        let raw = match self.consumption_value {
            Some(v) => v,
            None => clamp_non_negative(self.quantity_used) * clamp_non_negative(self.unit_cost),
        };
        clamp_non_negative(raw)
    }

    /// The forced tier, if the override is actually in effect.
    ///
    /// An override flag without a category is ignored and the item falls
    /// through to computed classification.
    pub fn pinned_tier(&self) -> Option<Tier> {
        if self.is_manual_override {
            self.manual_category
        } else {
            None
        }
    }
}

fn clamp_non_negative(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_consumption_value_wins_over_movement() {
        let mut usage = ItemUsage::from_movement(1, 10.0, 10.0);
        usage.consumption_value = Some(500.0);
        assert_eq!(usage.effective_value(), 500.0);
    }

    #[test]
    fn movement_value_is_quantity_times_cost() {
        let usage = ItemUsage::from_movement(1, 4.0, 2.5);
        assert_eq!(usage.effective_value(), 10.0);
    }

    #[test]
    fn malformed_numerics_clamp_to_zero() {
        let mut usage = ItemUsage::valued(1, f64::NAN);
        assert_eq!(usage.effective_value(), 0.0);

        usage.consumption_value = Some(-12.0);
        assert_eq!(usage.effective_value(), 0.0);

        usage.consumption_value = Some(f64::INFINITY);
        assert_eq!(usage.effective_value(), 0.0);

        // Two negative factors must not multiply into a positive value.
        let usage = ItemUsage::from_movement(2, -3.0, -4.0);
        assert_eq!(usage.effective_value(), 0.0);
    }

    #[test]
    fn override_flag_without_category_is_not_a_pin() {
        let mut usage = ItemUsage::valued(1, 100.0);
        usage.is_manual_override = true;
        assert_eq!(usage.pinned_tier(), None);

        usage.manual_category = Some(Tier::B);
        assert_eq!(usage.pinned_tier(), Some(Tier::B));
    }

    #[test]
    fn category_without_flag_is_not_a_pin() {
        let mut usage = ItemUsage::valued(1, 100.0);
        usage.manual_category = Some(Tier::C);
        assert_eq!(usage.pinned_tier(), None);
    }

    #[test]
    fn deserializes_sparse_backend_payload() {
        let usage: ItemUsage = serde_json::from_str(r#"{"itemId": 7, "quantityUsed": 3.0}"#).unwrap();
        assert_eq!(usage.item_id, Some(ItemId::new(7)));
        assert_eq!(usage.unit_cost, 0.0);
        assert!(!usage.is_manual_override);
    }

    #[test]
    fn unrecognized_manual_category_is_ignored_not_rejected() {
        let usage: ItemUsage = serde_json::from_str(
            r#"{"itemId": 1, "consumptionValue": 800.0, "isManualOverride": true, "manualCategory": "D"}"#,
        )
        .unwrap();

        assert!(usage.is_manual_override);
        assert_eq!(usage.manual_category, None);
        // The bad pin falls through to computed classification.
        assert_eq!(usage.pinned_tier(), None);
        assert_eq!(usage.effective_value(), 800.0);
    }

    #[test]
    fn null_and_non_numeric_fields_degrade_to_zero() {
        let usage: ItemUsage = serde_json::from_str(
            r#"{"itemId": 2, "quantityUsed": null, "unitCost": "n/a", "consumptionValue": null}"#,
        )
        .unwrap();

        assert_eq!(usage.quantity_used, 0.0);
        assert_eq!(usage.unit_cost, 0.0);
        assert_eq!(usage.consumption_value, None);
        assert_eq!(usage.effective_value(), 0.0);
    }

    #[test]
    fn unresolvable_item_id_deserializes_as_absent() {
        let usage: ItemUsage =
            serde_json::from_str(r#"{"itemId": null, "quantityUsed": 5.0, "unitCost": 1.0}"#).unwrap();
        assert_eq!(usage.item_id, None);

        let usage: ItemUsage =
            serde_json::from_str(r#"{"itemId": "seven", "quantityUsed": 5.0, "unitCost": 1.0}"#).unwrap();
        assert_eq!(usage.item_id, None);
        assert_eq!(usage.effective_value(), 5.0);
    }
}

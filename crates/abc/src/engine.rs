use stockwise_core::{DomainError, DomainResult};

use crate::result::{AbcReport, TierAssignments};
use crate::tier::Tier;
use crate::usage::ItemUsage;

/// Cumulative-percentage cutoffs for the A and B tiers.
///
/// An item is A while the running cumulative share is `<= a_cutoff`, B while
/// `<= b_cutoff`, C beyond that. Both bounds are inclusive.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AbcThresholds {
    a_cutoff: f64,
    b_cutoff: f64,
}

impl AbcThresholds {
    /// Build validated cutoffs (percent, `0 < a <= b <= 100`).
    pub fn new(a_cutoff: f64, b_cutoff: f64) -> DomainResult<Self> {
        if !(a_cutoff.is_finite() && b_cutoff.is_finite()) {
            return Err(DomainError::validation("thresholds must be finite"));
        }
        if !(a_cutoff > 0.0 && a_cutoff <= b_cutoff && b_cutoff <= 100.0) {
            return Err(DomainError::validation(format!(
                "thresholds must satisfy 0 < a <= b <= 100 (got a={a_cutoff}, b={b_cutoff})"
            )));
        }
        Ok(Self { a_cutoff, b_cutoff })
    }

    pub fn a_cutoff(&self) -> f64 {
        self.a_cutoff
    }

    pub fn b_cutoff(&self) -> f64 {
        self.b_cutoff
    }
}

impl Default for AbcThresholds {
    /// Standard 80/15/5 Pareto split.
    fn default() -> Self {
        Self {
            a_cutoff: 80.0,
            b_cutoff: 95.0,
        }
    }
}

/// Deterministic ABC classifier.
///
/// Pure function of its input: no clock, no randomness, no hidden state, and
/// it never fails (malformed numerics clamp to zero, id-less items are
/// filtered from the output lists).
#[derive(Debug, Copy, Clone)]
pub struct AbcEngine {
    thresholds: AbcThresholds,
    /// Whether a manually pinned item's value still advances the running
    /// cumulative sum used for later items' percentage positions. `running`
    /// represents "value consumed so far" regardless of pinning, so this
    /// defaults to true; flip it only for parity with deployments that read
    /// the rule the other way.
    overrides_feed_cumulative: bool,
}

impl AbcEngine {
    pub fn new(thresholds: AbcThresholds) -> Self {
        Self {
            thresholds,
            overrides_feed_cumulative: true,
        }
    }

    pub fn with_thresholds(mut self, thresholds: AbcThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_overrides_feed_cumulative(mut self, enabled: bool) -> Self {
        self.overrides_feed_cumulative = enabled;
        self
    }

    /// Partition `items` into A/B/C by cumulative share of total consumption
    /// value, honoring manual pins.
    pub fn classify(&self, items: &[ItemUsage]) -> AbcReport {
        // Rank by clamped value, descending. The sort is stable, so equal
        // values keep their input order and repeat calls reproduce output
        // exactly.
        let mut ranked: Vec<(usize, f64)> = items
            .iter()
            .enumerate()
            .map(|(idx, item)| (idx, item.effective_value()))
            .collect();
        ranked.sort_by(|(_, lhs), (_, rhs)| rhs.total_cmp(lhs));

        let total_value: f64 = ranked.iter().map(|&(_, value)| value).sum();

        let mut categories = TierAssignments::default();
        let mut running = 0.0;

        for &(idx, value) in &ranked {
            let item = &items[idx];
            let pinned = item.pinned_tier();

            if pinned.is_none() || self.overrides_feed_cumulative {
                running += value;
            }

            let tier = match pinned {
                Some(tier) => tier,
                None if total_value <= 0.0 => {
                    // No usable value data: default-safe bucket, and no
                    // division by zero.
                    Tier::C
                }
                None => {
                    let pct = (running / total_value) * 100.0;
                    if pct <= self.thresholds.a_cutoff {
                        Tier::A
                    } else if pct <= self.thresholds.b_cutoff {
                        Tier::B
                    } else {
                        Tier::C
                    }
                }
            };

            if let Some(item_id) = item.item_id {
                categories.push(tier, item_id);
            }
        }

        AbcReport {
            categories,
            total_value,
            count: items.len(),
        }
    }
}

impl Default for AbcEngine {
    fn default() -> Self {
        Self::new(AbcThresholds::default())
    }
}

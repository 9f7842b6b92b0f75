use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use super::GapResult;

/// Admission tiers, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Safe,
    Target,
    Dream,
}

impl Tier {
    pub const fn ordered() -> [Tier; 3] {
        [Tier::Safe, Tier::Target, Tier::Dream]
    }

    pub const fn label(self, labels: TierLabels) -> &'static str {
        match (labels, self) {
            (TierLabels::Classic, Tier::Safe) => "Safe",
            (TierLabels::Classic, Tier::Target) => "Target",
            (TierLabels::Classic, Tier::Dream) => "Dream",
            (TierLabels::Growth, Tier::Safe) => "Safe-to-Target",
            (TierLabels::Growth, Tier::Target) => "Needs Strengthening",
            (TierLabels::Growth, Tier::Dream) => "Significant Gap",
        }
    }

    pub fn is_better_than(self, other: Tier) -> bool {
        self < other
    }
}

/// Two naming schemes for the same three tiers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierLabels {
    #[default]
    Classic,
    Growth,
}

/// Order of institutions inside a tier, applied to every tier alike.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierOrdering {
    /// Smallest gap first (gap descending).
    #[default]
    ClosestGapFirst,
    /// Most selective first (benchmark descending).
    PrestigeFirst,
}

impl TierOrdering {
    pub(crate) fn compare(self, a: &GapResult, b: &GapResult) -> Ordering {
        let primary = match self {
            TierOrdering::ClosestGapFirst => b.gap_percent.total_cmp(&a.gap_percent),
            TierOrdering::PrestigeFirst => b.benchmark.total_cmp(&a.benchmark),
        };
        primary.then_with(|| a.institution.cmp(&b.institution))
    }
}

/// Gaps are compared against thresholds at a resolution of `1 / GAP_SCALE` percentage points.
pub const GAP_SCALE: f64 = 1e9;

/// Gap thresholds and presentation choices for classification.
///
/// Intervals are closed on the better side: `gap >= safe_threshold` is Safe,
/// `target_threshold <= gap < safe_threshold` is Target, anything lower is Dream.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierPolicy {
    pub safe_threshold: f64,
    pub target_threshold: f64,
    #[serde(default)]
    pub ordering: TierOrdering,
    #[serde(default)]
    pub labels: TierLabels,
}

impl Default for TierPolicy {
    fn default() -> Self {
        Self {
            safe_threshold: -3.0,
            target_threshold: -15.0,
            ordering: TierOrdering::default(),
            labels: TierLabels::default(),
        }
    }
}

impl TierPolicy {
    pub fn new(safe_threshold: f64, target_threshold: f64) -> Result<Self, TierPolicyError> {
        let policy = Self {
            safe_threshold,
            target_threshold,
            ..Self::default()
        };
        policy.validate()?;
        Ok(policy)
    }

    pub fn with_ordering(mut self, ordering: TierOrdering) -> Self {
        self.ordering = ordering;
        self
    }

    pub fn with_labels(mut self, labels: TierLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn validate(&self) -> Result<(), TierPolicyError> {
        if !self.safe_threshold.is_finite() || !self.target_threshold.is_finite() {
            return Err(TierPolicyError::NonFinite);
        }
        if self.safe_threshold < self.target_threshold {
            return Err(TierPolicyError::Inverted {
                safe: self.safe_threshold,
                target: self.target_threshold,
            });
        }
        Ok(())
    }

    /// The gap is rounded to `1 / GAP_SCALE` first so a mathematically exact boundary gap
    /// is not pushed into the worse tier by floating-point error.
    pub fn tier_for(&self, gap_percent: f64) -> Tier {
        let gap_percent = (gap_percent * GAP_SCALE).round() / GAP_SCALE;
        if gap_percent >= self.safe_threshold {
            Tier::Safe
        } else if gap_percent >= self.target_threshold {
            Tier::Target
        } else {
            Tier::Dream
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TierPolicyError {
    #[error("tier thresholds must be finite numbers")]
    NonFinite,
    #[error("safe threshold {safe} must not be below target threshold {target}")]
    Inverted { safe: f64, target: f64 },
}

/// Signed percentage difference between a score and a benchmark.
pub fn gap_percent(score: f64, benchmark: f64) -> f64 {
    100.0 * (score - benchmark) / benchmark
}

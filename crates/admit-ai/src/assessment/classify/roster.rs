use super::super::catalog::{CategoryId, Region};
use super::policy::Tier;
use serde::Serialize;
use std::collections::BTreeMap;

/// Category where the student earns less than the institution's sub-benchmark.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShortfall {
    pub category: CategoryId,
    pub earned: f64,
    pub benchmark: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapResult {
    pub institution: String,
    pub region: Region,
    pub benchmark: f64,
    pub gap_percent: f64,
    pub tier: Tier,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub category_shortfalls: Vec<CategoryShortfall>,
}

/// Classified institutions for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTiers {
    pub region: Region,
    pub readiness: f64,
    pub safe: Vec<GapResult>,
    pub target: Vec<GapResult>,
    pub dream: Vec<GapResult>,
}

impl RegionTiers {
    pub(crate) fn empty(region: Region, readiness: f64) -> Self {
        Self {
            region,
            readiness,
            safe: Vec::new(),
            target: Vec::new(),
            dream: Vec::new(),
        }
    }

    pub fn tier(&self, tier: Tier) -> &[GapResult] {
        match tier {
            Tier::Safe => &self.safe,
            Tier::Target => &self.target,
            Tier::Dream => &self.dream,
        }
    }

    pub(crate) fn tier_mut(&mut self, tier: Tier) -> &mut Vec<GapResult> {
        match tier {
            Tier::Safe => &mut self.safe,
            Tier::Target => &mut self.target,
            Tier::Dream => &mut self.dream,
        }
    }

    /// The first `limit` entries of a tier, in roster order.
    pub fn shortlist(&self, tier: Tier, limit: usize) -> &[GapResult] {
        let entries = self.tier(tier);
        &entries[..entries.len().min(limit)]
    }

    pub fn count(&self, tier: Tier) -> usize {
        self.tier(tier).len()
    }

    pub fn len(&self) -> usize {
        self.safe.len() + self.target.len() + self.dream.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tier_of(&self, institution: &str) -> Option<Tier> {
        Tier::ordered().into_iter().find(|&tier| {
            self.tier(tier)
                .iter()
                .any(|result| result.institution == institution)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnratableReason {
    MissingBenchmark,
    NonPositiveBenchmark,
}

/// Institution skipped because its benchmark cannot anchor a percentage gap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnratableInstitution {
    pub institution: String,
    pub region: Region,
    pub benchmark: Option<f64>,
    pub reason: UnratableReason,
}

/// Region -> tier -> ordered results, plus the institutions that could not be rated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TierRoster {
    pub regions: BTreeMap<Region, RegionTiers>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<UnratableInstitution>,
}

impl TierRoster {
    pub fn region(&self, region: &Region) -> Option<&RegionTiers> {
        self.regions.get(region)
    }
}

use super::catalog::Region;
use super::classify::{RegionTiers, Tier, TierRoster};
use serde::Serialize;
use std::collections::BTreeSet;

/// Tier counts on both sides of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierCountDelta {
    pub tier: Tier,
    pub before: usize,
    pub after: usize,
}

/// An institution that landed in a different tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierMove {
    pub institution: String,
    pub from: Tier,
    pub to: Tier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionShift {
    pub region: Region,
    pub score_before: Option<f64>,
    pub score_after: Option<f64>,
    pub tier_counts: Vec<TierCountDelta>,
    pub promotions: Vec<TierMove>,
    pub demotions: Vec<TierMove>,
}

impl RegionShift {
    pub fn is_unchanged(&self) -> bool {
        self.promotions.is_empty()
            && self.demotions.is_empty()
            && self.score_before == self.score_after
    }
}

/// Pure diff of two rosters, typically the current answers against a tuned copy.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RosterComparison {
    pub regions: Vec<RegionShift>,
}

impl RosterComparison {
    pub fn between(before: &TierRoster, after: &TierRoster) -> Self {
        let regions: BTreeSet<&Region> = before.regions.keys().chain(after.regions.keys()).collect();

        let regions = regions
            .into_iter()
            .map(|region| region_shift(region, before.region(region), after.region(region)))
            .collect();

        Self { regions }
    }

    pub fn region(&self, region: &Region) -> Option<&RegionShift> {
        self.regions.iter().find(|shift| &shift.region == region)
    }

    pub fn promotions(&self) -> usize {
        self.regions.iter().map(|shift| shift.promotions.len()).sum()
    }
}

fn region_shift(
    region: &Region,
    before: Option<&RegionTiers>,
    after: Option<&RegionTiers>,
) -> RegionShift {
    let count = |tiers: Option<&RegionTiers>, tier| tiers.map_or(0, |tiers| tiers.count(tier));

    let tier_counts = Tier::ordered()
        .into_iter()
        .map(|tier| TierCountDelta {
            tier,
            before: count(before, tier),
            after: count(after, tier),
        })
        .collect();

    let mut promotions = Vec::new();
    let mut demotions = Vec::new();
    if let (Some(before), Some(after)) = (before, after) {
        for tier in Tier::ordered() {
            for result in after.tier(tier) {
                let Some(previous) = before.tier_of(&result.institution) else {
                    continue;
                };
                let moved = TierMove {
                    institution: result.institution.clone(),
                    from: previous,
                    to: tier,
                };
                if tier.is_better_than(previous) {
                    promotions.push(moved);
                } else if previous.is_better_than(tier) {
                    demotions.push(moved);
                }
            }
        }
    }

    RegionShift {
        region: region.clone(),
        score_before: before.map(|tiers| tiers.readiness),
        score_after: after.map(|tiers| tiers.readiness),
        tier_counts,
        promotions,
        demotions,
    }
}

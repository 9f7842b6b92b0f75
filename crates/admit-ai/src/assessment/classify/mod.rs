mod policy;
mod roster;

pub use policy::{gap_percent, Tier, TierLabels, TierOrdering, TierPolicy, TierPolicyError};
pub use roster::{
    CategoryShortfall, GapResult, RegionTiers, TierRoster, UnratableInstitution, UnratableReason,
};

use super::catalog::{BenchmarkCatalog, Institution};
use super::scoring::ReadinessScore;
use tracing::warn;

/// Stateless classifier that buckets institutions by their gap to a readiness score.
#[derive(Debug, Clone, Default)]
pub struct GapClassifier {
    policy: TierPolicy,
}

impl GapClassifier {
    pub fn new(policy: TierPolicy) -> Result<Self, TierPolicyError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &TierPolicy {
        &self.policy
    }

    /// Classify the institutions of the score's region.
    pub fn classify(&self, score: &ReadinessScore, catalog: &BenchmarkCatalog) -> TierRoster {
        self.classify_all(std::slice::from_ref(score), catalog)
    }

    /// Classify each region independently. A later score for the same region replaces an
    /// earlier one.
    pub fn classify_all(&self, scores: &[ReadinessScore], catalog: &BenchmarkCatalog) -> TierRoster {
        let mut roster = TierRoster::default();

        for score in scores {
            roster
                .warnings
                .retain(|warning| warning.region != score.region);

            let mut tiers = RegionTiers::empty(score.region.clone(), score.value);
            for institution in catalog.for_region(&score.region) {
                match self.rate(score, institution) {
                    Ok(result) => tiers.tier_mut(result.tier).push(result),
                    Err(unratable) => {
                        warn!(
                            institution = %unratable.institution,
                            region = %unratable.region,
                            reason = ?unratable.reason,
                            "skipping institution without a usable benchmark"
                        );
                        roster.warnings.push(unratable);
                    }
                }
            }

            for tier in Tier::ordered() {
                tiers
                    .tier_mut(tier)
                    .sort_by(|a, b| self.policy.ordering.compare(a, b));
            }

            roster.regions.insert(score.region.clone(), tiers);
        }

        roster
    }

    fn rate(
        &self,
        score: &ReadinessScore,
        institution: &Institution,
    ) -> Result<GapResult, UnratableInstitution> {
        let unratable = |reason| UnratableInstitution {
            institution: institution.name.clone(),
            region: institution.region.clone(),
            benchmark: institution.benchmark,
            reason,
        };

        let benchmark = match institution.benchmark {
            Some(value) if value.is_finite() => value,
            _ => return Err(unratable(UnratableReason::MissingBenchmark)),
        };
        if benchmark <= 0.0 {
            return Err(unratable(UnratableReason::NonPositiveBenchmark));
        }

        let gap = gap_percent(score.value, benchmark);
        let category_shortfalls = institution
            .category_benchmarks
            .iter()
            .filter_map(|(&category, &required)| {
                let earned = score.earned(category)?;
                (earned < required).then_some(CategoryShortfall {
                    category,
                    earned,
                    benchmark: required,
                })
            })
            .collect();

        Ok(GapResult {
            institution: institution.name.clone(),
            region: institution.region.clone(),
            benchmark,
            gap_percent: gap,
            tier: self.policy.tier_for(gap),
            category_shortfalls,
        })
    }
}

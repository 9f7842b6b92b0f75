mod rules;

use super::catalog::{CategoryId, InvalidCatalogError, QuestionCatalog, Region};
use super::responses::ResponseSet;
use super::weights::RegionalWeightProfile;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Stateless scorer bound to a shared, read-only question catalog.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    catalog: Arc<QuestionCatalog>,
}

impl ScoringEngine {
    pub fn new(catalog: Arc<QuestionCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// Region-calibrated readiness on a 0-100 scale.
    ///
    /// A region whose weighted caps sum to zero has nothing to measure; it scores 0 and is
    /// flagged as degenerate instead of failing.
    pub fn score(
        &self,
        responses: &ResponseSet,
        profile: &RegionalWeightProfile,
    ) -> Result<ReadinessScore, InvalidCatalogError> {
        let components = rules::score_components(&self.catalog, responses, profile)?;
        let region = profile.region().clone();

        let (value, degenerate) = match rules::weighted_ratio(&components) {
            Some(value) => (value, false),
            None => {
                warn!(%region, "weighted cap sum is zero; readiness score defaults to 0");
                (0.0, true)
            }
        };

        debug!(%region, score = value, "readiness score computed");

        Ok(ReadinessScore {
            region,
            value,
            degenerate,
            components,
            responses: responses.clone(),
        })
    }
}

/// Per-category contribution, kept so reports can show where points came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreComponent {
    pub category: CategoryId,
    pub label: String,
    pub earned: f64,
    pub cap: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessScore {
    pub region: Region,
    pub value: f64,
    /// Set when the region's weighted cap sum was zero.
    pub degenerate: bool,
    pub components: Vec<ScoreComponent>,
    #[serde(skip)]
    pub responses: ResponseSet,
}

impl ReadinessScore {
    pub fn earned(&self, category: CategoryId) -> Option<f64> {
        self.components
            .iter()
            .find(|component| component.category == category)
            .map(|component| component.earned)
    }
}

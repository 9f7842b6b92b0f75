use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::catalog::{BenchmarkCatalog, CategoryId, InvalidCatalogError, QuestionCatalog, Region};
use super::classify::{GapClassifier, TierPolicy, TierPolicyError, TierRoster};
use super::compare::RosterComparison;
use super::responses::{ResponseError, ResponseSet};
use super::scoring::{ReadinessScore, ScoringEngine};
use super::weights::WeightProfiles;

/// Who the assessment is for. Carried through to the report unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentProfile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intended_major: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub counsellor: Option<String>,
}

/// Everything needed to assess one student; no state outlives the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub student: StudentProfile,
    pub regions: Vec<Region>,
    /// Option label per category. Omitted categories stay unanswered.
    #[serde(default)]
    pub answers: BTreeMap<CategoryId, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssessmentReport {
    pub student: StudentProfile,
    pub generated_at: DateTime<Utc>,
    pub responses: ResponseSet,
    pub scores: Vec<ReadinessScore>,
    pub roster: TierRoster,
}

impl AssessmentReport {
    pub fn score(&self, region: &Region) -> Option<&ReadinessScore> {
        self.scores.iter().find(|score| &score.region == region)
    }
}

/// Baseline and simulated reports with the difference between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TuningReport {
    pub baseline: AssessmentReport,
    pub tuned: AssessmentReport,
    pub comparison: RosterComparison,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvisorSettings {
    pub tier_policy: TierPolicy,
    pub max_regions: usize,
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            tier_policy: TierPolicy::default(),
            max_regions: 3,
        }
    }
}

/// Request-level facade over the scoring engine and gap classifier.
pub struct AdmissionAdvisor {
    questions: Arc<QuestionCatalog>,
    weights: Arc<WeightProfiles>,
    benchmarks: Arc<BenchmarkCatalog>,
    engine: ScoringEngine,
    classifier: GapClassifier,
    max_regions: usize,
}

impl AdmissionAdvisor {
    pub fn new(
        questions: Arc<QuestionCatalog>,
        weights: Arc<WeightProfiles>,
        benchmarks: Arc<BenchmarkCatalog>,
        settings: AdvisorSettings,
    ) -> Result<Self, AssessmentError> {
        weights.check_against(&questions)?;
        let classifier = GapClassifier::new(settings.tier_policy)?;
        let engine = ScoringEngine::new(questions.clone());

        Ok(Self {
            questions,
            weights,
            benchmarks,
            engine,
            classifier,
            max_regions: settings.max_regions.max(1),
        })
    }

    pub fn questions(&self) -> &QuestionCatalog {
        &self.questions
    }

    pub fn weights(&self) -> &WeightProfiles {
        &self.weights
    }

    pub fn benchmarks(&self) -> &BenchmarkCatalog {
        &self.benchmarks
    }

    pub fn policy(&self) -> &TierPolicy {
        self.classifier.policy()
    }

    pub fn max_regions(&self) -> usize {
        self.max_regions
    }

    pub fn assess(&self, request: &AssessmentRequest) -> Result<AssessmentReport, AssessmentError> {
        self.validate(request)?;
        let responses = ResponseSet::resolve(&self.questions, &request.answers)?;
        self.assess_responses(request, responses)
    }

    /// Re-run the assessment with some answers changed and report what moved.
    pub fn tune(
        &self,
        request: &AssessmentRequest,
        adjustments: &BTreeMap<CategoryId, String>,
    ) -> Result<TuningReport, AssessmentError> {
        let baseline = self.assess(request)?;
        let tuned_responses = baseline
            .responses
            .with_adjustments(&self.questions, adjustments)?;
        let tuned = self.assess_responses(request, tuned_responses)?;
        let comparison = RosterComparison::between(&baseline.roster, &tuned.roster);

        info!(
            student = %request.student.name,
            adjustments = adjustments.len(),
            promotions = comparison.promotions(),
            "tuning simulation completed"
        );

        Ok(TuningReport {
            baseline,
            tuned,
            comparison,
        })
    }

    fn assess_responses(
        &self,
        request: &AssessmentRequest,
        responses: ResponseSet,
    ) -> Result<AssessmentReport, AssessmentError> {
        let scores = request
            .regions
            .iter()
            .map(|region| {
                let profile = self.weights.profile(region)?;
                self.engine.score(&responses, profile)
            })
            .collect::<Result<Vec<_>, InvalidCatalogError>>()?;

        let roster = self.classifier.classify_all(&scores, &self.benchmarks);

        info!(
            student = %request.student.name,
            regions = scores.len(),
            answered = responses.answered(),
            unratable = roster.warnings.len(),
            "assessment completed"
        );

        Ok(AssessmentReport {
            student: request.student.clone(),
            generated_at: Utc::now(),
            responses,
            scores,
            roster,
        })
    }

    fn validate(&self, request: &AssessmentRequest) -> Result<(), AssessmentError> {
        if request.student.name.trim().is_empty() {
            return Err(AssessmentError::MissingStudentName);
        }
        if request.regions.is_empty() {
            return Err(AssessmentError::NoRegions);
        }
        if request.regions.len() > self.max_regions {
            return Err(AssessmentError::TooManyRegions {
                requested: request.regions.len(),
                max: self.max_regions,
            });
        }

        let mut seen = HashSet::new();
        for region in &request.regions {
            if !seen.insert(region) {
                return Err(AssessmentError::DuplicateRegion(region.clone()));
            }
            self.weights.profile(region)?;
        }

        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentError {
    #[error("student name is required")]
    MissingStudentName,
    #[error("at least one target region is required")]
    NoRegions,
    #[error("{requested} regions requested; at most {max} are supported")]
    TooManyRegions { requested: usize, max: usize },
    #[error("region {0} was requested more than once")]
    DuplicateRegion(Region),
    #[error(transparent)]
    Response(#[from] ResponseError),
    #[error(transparent)]
    Catalog(#[from] InvalidCatalogError),
    #[error(transparent)]
    Policy(#[from] TierPolicyError),
}

impl AssessmentError {
    /// True when the request itself is at fault rather than the reference data.
    pub fn is_client_error(&self) -> bool {
        !matches!(
            self,
            AssessmentError::Catalog(InvalidCatalogError::WeightOutOfRange { .. })
                | AssessmentError::Catalog(InvalidCatalogError::UnknownWeightCategory { .. })
                | AssessmentError::Catalog(InvalidCatalogError::DuplicateCategory(_))
                | AssessmentError::Catalog(InvalidCatalogError::MissingCap(_))
                | AssessmentError::Catalog(InvalidCatalogError::InvalidPoints { .. })
                | AssessmentError::Catalog(InvalidCatalogError::DuplicateOption { .. })
                | AssessmentError::Catalog(InvalidCatalogError::DuplicateWeightProfile(_))
                | AssessmentError::Catalog(InvalidCatalogError::DuplicateWeight { .. })
                | AssessmentError::Catalog(InvalidCatalogError::DuplicateInstitution { .. })
                | AssessmentError::Policy(_)
        )
    }
}

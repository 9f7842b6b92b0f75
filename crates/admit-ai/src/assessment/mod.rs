//! Profile scoring and benchmark matching.
//!
//! Answers are resolved against the question catalog, scored per region with that region's
//! weight profile, and compared against institutional benchmarks to build a tiered roster.
//! Everything here is a pure function of the request and the read-only catalogs.

pub mod advisor;
pub mod catalog;
pub mod classify;
pub mod compare;
pub mod loader;
pub mod responses;
pub mod router;
pub mod scoring;
pub mod weights;

#[cfg(test)]
mod tests;

pub use advisor::{
    AdmissionAdvisor, AdvisorSettings, AssessmentError, AssessmentReport, AssessmentRequest,
    StudentProfile, TuningReport,
};
pub use catalog::{
    AnswerOption, BenchmarkCatalog, Category, CategoryId, Institution, InvalidCatalogError,
    QuestionCatalog, Region,
};
pub use classify::{
    GapClassifier, GapResult, RegionTiers, Tier, TierLabels, TierOrdering, TierPolicy,
    TierPolicyError, TierRoster, UnratableInstitution, UnratableReason,
};
pub use compare::{RegionShift, RosterComparison, TierCountDelta, TierMove};
pub use loader::{
    BenchmarkCatalogLoader, CatalogLoadError, QuestionCatalogLoader, WeightProfileLoader,
};
pub use responses::{Choice, ResponseError, ResponseSet};
pub use router::assessment_router;
pub use scoring::{ReadinessScore, ScoreComponent, ScoringEngine};
pub use weights::{RegionalWeightProfile, WeightProfiles};

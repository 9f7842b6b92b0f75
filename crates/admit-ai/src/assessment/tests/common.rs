use std::collections::BTreeMap;
use std::sync::Arc;

use crate::assessment::advisor::{AdmissionAdvisor, AdvisorSettings, AssessmentRequest, StudentProfile};
use crate::assessment::catalog::{
    AnswerOption, BenchmarkCatalog, Category, CategoryId, Institution, QuestionCatalog, Region,
};
use crate::assessment::classify::GapClassifier;
use crate::assessment::responses::ResponseSet;
use crate::assessment::scoring::{ReadinessScore, ScoringEngine};
use crate::assessment::weights::{RegionalWeightProfile, WeightProfiles};

pub(super) fn region(name: &str) -> Region {
    Region::new(name).expect("valid region")
}

/// Two categories capped at 10, with a half-mark option each.
pub(super) fn question_catalog() -> QuestionCatalog {
    QuestionCatalog::new(vec![
        Category::new(
            CategoryId(1),
            "Academic Performance",
            vec![
                AnswerOption::new("Half", 5.0),
                AnswerOption::new("Full", 10.0),
            ],
        ),
        Category::new(
            CategoryId(2),
            "Extracurricular Leadership",
            vec![
                AnswerOption::new("Half", 5.0),
                AnswerOption::new("Full", 10.0),
            ],
        ),
    ])
    .expect("valid catalog")
}

/// Four categories with uneven caps, for properties that should not depend on the caps.
pub(super) fn uneven_catalog() -> QuestionCatalog {
    fn category(id: u16, label: &str, points: &[f64]) -> Category {
        let options = points
            .iter()
            .enumerate()
            .map(|(index, &value)| AnswerOption::new(format!("Level {index}"), value))
            .collect();
        Category::new(CategoryId(id), label, options)
    }

    QuestionCatalog::new(vec![
        category(1, "Grades", &[2.0, 5.0, 8.0, 10.0]),
        category(2, "Testing", &[0.0, 3.0, 6.0]),
        category(3, "Research", &[1.0, 7.0]),
        category(4, "Essays", &[0.0, 1.0, 2.0, 4.0, 5.0]),
    ])
    .expect("valid catalog")
}

pub(super) fn weights(region_name: &str, weights: &[(u16, f64)]) -> RegionalWeightProfile {
    let weights = weights
        .iter()
        .map(|&(id, weight)| (CategoryId(id), weight))
        .collect();
    RegionalWeightProfile::new(region(region_name), weights).expect("valid weights")
}

pub(super) fn weight_profiles() -> WeightProfiles {
    WeightProfiles::new([
        weights("USA", &[(1, 1.0), (2, 1.0)]),
        weights("UK", &[(1, 1.0), (2, 0.2)]),
        weights("Europe", &[(1, 0.0), (2, 0.0)]),
    ])
    .expect("valid profiles")
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(Arc::new(question_catalog()))
}

pub(super) fn answers(pairs: &[(u16, &str)]) -> BTreeMap<CategoryId, String> {
    pairs
        .iter()
        .map(|&(id, label)| (CategoryId(id), label.to_string()))
        .collect()
}

/// Scores 75.0 in the USA: full marks in category 1, half in category 2.
pub(super) fn usa_score_of_75() -> ReadinessScore {
    let engine = engine();
    let responses = ResponseSet::resolve(engine.catalog(), &answers(&[(1, "Full"), (2, "Half")]))
        .expect("answers resolve");
    engine
        .score(&responses, &weights("USA", &[(1, 1.0), (2, 1.0)]))
        .expect("scores")
}

pub(super) fn benchmark_catalog() -> BenchmarkCatalog {
    let usa = region("USA");
    let uk = region("UK");
    BenchmarkCatalog::new(vec![
        Institution::new("Purdue University", usa.clone(), 70.0),
        Institution::new("Carnegie Mellon University", usa.clone(), 80.0),
        Institution::new("Stanford University", usa.clone(), 100.0),
        Institution::new("University of Illinois", usa.clone(), 77.0),
        Institution::new("Community College", usa.clone(), 0.0),
        Institution::without_benchmark("Unlisted Institute", usa),
        Institution::new("University of Edinburgh", uk.clone(), 74.0),
        Institution::new("Imperial College London", uk, 86.0),
    ])
    .expect("valid benchmarks")
}

pub(super) fn classifier() -> GapClassifier {
    GapClassifier::default()
}

pub(super) fn student_request(regions: &[&str], pairs: &[(u16, &str)]) -> AssessmentRequest {
    AssessmentRequest {
        student: StudentProfile {
            name: "Asha Raman".to_string(),
            intended_major: Some("Computer Science".to_string()),
            counsellor: None,
        },
        regions: regions.iter().map(|name| region(name)).collect(),
        answers: answers(pairs),
    }
}

pub(super) fn advisor() -> AdmissionAdvisor {
    AdmissionAdvisor::new(
        Arc::new(question_catalog()),
        Arc::new(weight_profiles()),
        Arc::new(benchmark_catalog()),
        AdvisorSettings::default(),
    )
    .expect("advisor builds")
}

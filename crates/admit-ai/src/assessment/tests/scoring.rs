use std::collections::BTreeMap;
use std::sync::Arc;

use super::common::*;
use crate::assessment::catalog::{CategoryId, InvalidCatalogError, QuestionCatalog};
use crate::assessment::responses::ResponseSet;
use crate::assessment::scoring::ScoringEngine;

fn full_marks(catalog: &QuestionCatalog) -> ResponseSet {
    let answers: BTreeMap<CategoryId, String> = catalog
        .categories()
        .iter()
        .map(|category| {
            let best = category
                .options
                .iter()
                .max_by(|a, b| a.points.total_cmp(&b.points))
                .expect("category has options");
            (category.id, best.label.clone())
        })
        .collect();
    ResponseSet::resolve(catalog, &answers).expect("answers resolve")
}

#[test]
fn concrete_scenario_scores_seventy_five() {
    let score = usa_score_of_75();

    assert_eq!(score.value, 75.0);
    assert!(!score.degenerate);
    assert_eq!(score.earned(CategoryId(1)), Some(10.0));
    assert_eq!(score.earned(CategoryId(2)), Some(5.0));
}

#[test]
fn full_marks_score_one_hundred_in_every_region() {
    let catalog = uneven_catalog();
    let engine = ScoringEngine::new(Arc::new(catalog.clone()));
    let responses = full_marks(&catalog);

    let profiles = [
        weights("USA", &[(1, 0.9), (2, 0.8), (3, 0.4), (4, 0.7)]),
        weights("UK", &[(1, 1.0), (2, 1.0), (3, 0.1), (4, 0.3)]),
        weights("Singapore", &[(1, 0.3), (3, 1.0)]),
    ];

    for profile in &profiles {
        let score = engine.score(&responses, profile).expect("scores");
        assert!(
            (score.value - 100.0).abs() < 1e-9,
            "{} scored {}",
            profile.region(),
            score.value
        );
    }
}

#[test]
fn unanswered_profile_scores_zero() {
    let catalog = uneven_catalog();
    let engine = ScoringEngine::new(Arc::new(catalog.clone()));
    let responses = ResponseSet::unanswered(&catalog);

    let score = engine
        .score(&responses, &weights("UK", &[(1, 1.0), (2, 0.5), (3, 0.5), (4, 0.2)]))
        .expect("scores");

    assert_eq!(score.value, 0.0);
    assert!(!score.degenerate);
}

#[test]
fn raising_one_answer_never_lowers_the_score() {
    let catalog = uneven_catalog();
    let engine = ScoringEngine::new(Arc::new(catalog.clone()));
    let profile = weights("Canada", &[(1, 0.6), (2, 0.2), (3, 0.9), (4, 0.05)]);
    let baseline = ResponseSet::unanswered(&catalog)
        .with_choice(&catalog, CategoryId(1), "Level 1")
        .expect("resolves");

    for category in catalog.categories() {
        let mut options = category.options.clone();
        options.sort_by(|a, b| a.points.total_cmp(&b.points));

        let mut previous = f64::NEG_INFINITY;
        for option in options {
            let responses = baseline
                .with_choice(&catalog, category.id, &option.label)
                .expect("resolves");
            let score = engine.score(&responses, &profile).expect("scores").value;
            assert!(
                score >= previous,
                "category {} option {} dropped the score to {score}",
                category.id,
                option.label
            );
            previous = score;
        }
    }
}

#[test]
fn region_caps_come_from_each_category() {
    let catalog = uneven_catalog();
    let engine = ScoringEngine::new(Arc::new(catalog.clone()));
    let responses = ResponseSet::unanswered(&catalog)
        .with_choice(&catalog, CategoryId(3), "Level 1")
        .expect("resolves");

    let score = engine
        .score(&responses, &weights("Australia", &[(2, 1.0), (3, 1.0)]))
        .expect("scores");

    // 7 of a possible 6 + 7
    assert!((score.value - 100.0 * 7.0 / 13.0).abs() < 1e-9);
    let caps: Vec<f64> = score.components.iter().map(|c| c.cap).collect();
    assert_eq!(caps, vec![10.0, 6.0, 7.0, 5.0]);
}

#[test]
fn earned_points_come_from_the_catalog() {
    let engine = engine();
    let profiles = weight_profiles();
    let usa = profiles.profile(&region("USA")).expect("usa profile");

    let tampered: ResponseSet = serde_json::from_value(serde_json::json!({
        "1": { "state": "selected", "option": "Full", "points": -50.0 },
        "2": { "state": "unanswered" }
    }))
    .expect("response set deserializes");

    let score = engine.score(&tampered, usa).expect("labels resolve");
    assert_eq!(score.earned(CategoryId(1)), Some(10.0));
    assert_eq!(score.value, 50.0);
}

#[test]
fn answers_outside_the_catalog_fail_fast() {
    let engine = engine();
    let profiles = weight_profiles();
    let usa = profiles.profile(&region("USA")).expect("usa profile");

    let unknown_option: ResponseSet = serde_json::from_value(serde_json::json!({
        "1": { "state": "selected", "option": "Triple", "points": 30.0 }
    }))
    .expect("response set deserializes");
    assert!(matches!(
        engine.score(&unknown_option, usa),
        Err(InvalidCatalogError::UnknownAnswerOption { category: CategoryId(1), .. })
    ));

    let unknown_category: ResponseSet = serde_json::from_value(serde_json::json!({
        "9": { "state": "selected", "option": "Full", "points": 10.0 }
    }))
    .expect("response set deserializes");
    assert_eq!(
        engine.score(&unknown_category, usa).map(|score| score.value),
        Err(InvalidCatalogError::UnknownAnswerCategory(CategoryId(9)))
    );
}

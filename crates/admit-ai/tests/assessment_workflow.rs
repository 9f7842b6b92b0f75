use admit_ai::assessment::{
    AdmissionAdvisor, AdvisorSettings, AnswerOption, AssessmentError, AssessmentRequest,
    BenchmarkCatalog, Category, CategoryId, Institution, QuestionCatalog, Region,
    RegionalWeightProfile, StudentProfile, Tier, TierLabels, TierOrdering, TierPolicy,
    WeightProfiles,
};
use std::collections::BTreeMap;
use std::sync::Arc;

fn region(name: &str) -> Region {
    Region::new(name).expect("valid region")
}

fn questions() -> QuestionCatalog {
    let options = || {
        vec![
            AnswerOption::new("None", 0.0),
            AnswerOption::new("Half", 5.0),
            AnswerOption::new("Full", 10.0),
        ]
    };
    QuestionCatalog::new(vec![
        Category::new(CategoryId(1), "Academics", options()),
        Category::new(CategoryId(2), "Activities", options()),
    ])
    .expect("valid catalog")
}

fn weights() -> WeightProfiles {
    let even = BTreeMap::from([(CategoryId(1), 1.0), (CategoryId(2), 1.0)]);
    let academic = BTreeMap::from([(CategoryId(1), 1.0), (CategoryId(2), 0.0)]);
    WeightProfiles::new(vec![
        RegionalWeightProfile::new(region("USA"), even).expect("usa weights"),
        RegionalWeightProfile::new(region("UK"), academic).expect("uk weights"),
    ])
    .expect("distinct regions")
}

fn benchmarks() -> BenchmarkCatalog {
    let usa = region("USA");
    let uk = region("UK");
    BenchmarkCatalog::new(vec![
        Institution::new("Purdue", usa.clone(), 70.0),
        Institution::new("Carnegie Mellon", usa.clone(), 80.0),
        Institution::new("Stanford", usa.clone(), 100.0),
        Institution::new("Edinburgh", uk.clone(), 74.0),
        Institution::new("Imperial", uk, 86.0),
    ])
    .expect("valid benchmarks")
}

fn advisor(settings: AdvisorSettings) -> AdmissionAdvisor {
    AdmissionAdvisor::new(
        Arc::new(questions()),
        Arc::new(weights()),
        Arc::new(benchmarks()),
        settings,
    )
    .expect("advisor builds")
}

fn request(regions: &[&str], answers: &[(u16, &str)]) -> AssessmentRequest {
    AssessmentRequest {
        student: StudentProfile {
            name: "Priya".to_string(),
            intended_major: Some("Economics".to_string()),
            counsellor: Some("Mr. Okafor".to_string()),
        },
        regions: regions.iter().map(|name| region(name)).collect(),
        answers: answers
            .iter()
            .map(|(id, label)| (CategoryId(*id), label.to_string()))
            .collect(),
    }
}

#[test]
fn assessment_places_institutions_by_gap() {
    let advisor = advisor(AdvisorSettings::default());
    let report = advisor
        .assess(&request(&["USA"], &[(1, "Full"), (2, "Half")]))
        .expect("assessment succeeds");

    let score = report.score(&region("USA")).expect("usa score");
    assert_eq!(score.value, 75.0);
    assert!(!score.degenerate);

    let usa = report.roster.region(&region("USA")).expect("usa tiers");
    assert_eq!(usa.tier_of("Purdue"), Some(Tier::Safe));
    assert_eq!(usa.tier_of("Carnegie Mellon"), Some(Tier::Target));
    assert_eq!(usa.tier_of("Stanford"), Some(Tier::Dream));

    let cmu = &usa.target[0];
    assert_eq!(cmu.gap_percent, -6.25);
    assert_eq!(usa.dream[0].gap_percent, -25.0);
    assert!((usa.safe[0].gap_percent - 7.142857).abs() < 1e-4);

    assert_eq!(report.student.counsellor.as_deref(), Some("Mr. Okafor"));
    assert!(report.roster.warnings.is_empty());
}

#[test]
fn regions_use_their_own_weights() {
    let advisor = advisor(AdvisorSettings::default());
    let report = advisor
        .assess(&request(&["USA", "UK"], &[(1, "Full"), (2, "None")]))
        .expect("assessment succeeds");

    assert_eq!(report.score(&region("USA")).map(|score| score.value), Some(50.0));
    assert_eq!(report.score(&region("UK")).map(|score| score.value), Some(100.0));

    let uk = report.roster.region(&region("UK")).expect("uk tiers");
    assert_eq!(uk.count(Tier::Safe), 2);
    let usa = report.roster.region(&region("USA")).expect("usa tiers");
    assert_eq!(usa.count(Tier::Dream), 3);
}

#[test]
fn benchmark_three_percent_above_score_is_still_safe() {
    let questions = QuestionCatalog::new(vec![Category::new(
        CategoryId(1),
        "Overall",
        vec![
            AnswerOption::new("97", 97.0),
            AnswerOption::new("100", 100.0),
        ],
    )])
    .expect("valid catalog");
    let usa = region("USA");
    let weights = WeightProfiles::new(vec![RegionalWeightProfile::new(
        usa.clone(),
        BTreeMap::from([(CategoryId(1), 1.0)]),
    )
    .expect("weights")])
    .expect("profiles");
    let benchmarks = BenchmarkCatalog::new(vec![Institution::new("Boundary", usa.clone(), 100.0)])
        .expect("valid benchmarks");

    let advisor = AdmissionAdvisor::new(
        Arc::new(questions),
        Arc::new(weights),
        Arc::new(benchmarks),
        AdvisorSettings::default(),
    )
    .expect("advisor builds");
    let report = advisor
        .assess(&request(&["USA"], &[(1, "97")]))
        .expect("assessment succeeds");

    let tiers = report.roster.region(&usa).expect("usa tiers");
    assert_eq!(tiers.safe.len(), 1);
    assert_eq!(tiers.safe[0].gap_percent, -3.0);
}

#[test]
fn fractional_score_on_the_safe_boundary_is_safe() {
    let questions = QuestionCatalog::new(vec![Category::new(
        CategoryId(1),
        "Overall",
        vec![
            AnswerOption::new("Strong", 77.6),
            AnswerOption::new("Perfect", 100.0),
        ],
    )])
    .expect("valid catalog");
    let usa = region("USA");
    let weights = WeightProfiles::new(vec![RegionalWeightProfile::new(
        usa.clone(),
        BTreeMap::from([(CategoryId(1), 0.7)]),
    )
    .expect("weights")])
    .expect("profiles");
    let benchmarks = BenchmarkCatalog::new(vec![Institution::new("Monash", usa.clone(), 80.0)])
        .expect("valid benchmarks");

    let advisor = AdmissionAdvisor::new(
        Arc::new(questions),
        Arc::new(weights),
        Arc::new(benchmarks),
        AdvisorSettings::default(),
    )
    .expect("advisor builds");
    let report = advisor
        .assess(&request(&["USA"], &[(1, "Strong")]))
        .expect("assessment succeeds");

    let tiers = report.roster.region(&usa).expect("usa tiers");
    assert_eq!(tiers.tier_of("Monash"), Some(Tier::Safe));
    assert!((tiers.safe[0].gap_percent + 3.0).abs() < 1e-9);
}

#[test]
fn tuning_reports_promotions_without_touching_baseline() {
    let advisor = advisor(AdvisorSettings::default());
    let base = request(&["USA"], &[(1, "Half"), (2, "Half")]);
    let adjustments = BTreeMap::from([(CategoryId(1), "Full".to_string())]);

    let tuning = advisor.tune(&base, &adjustments).expect("tuning succeeds");

    assert_eq!(
        tuning.baseline.score(&region("USA")).map(|score| score.value),
        Some(50.0)
    );
    assert_eq!(
        tuning.tuned.score(&region("USA")).map(|score| score.value),
        Some(75.0)
    );

    let shift = tuning
        .comparison
        .region(&region("USA"))
        .expect("usa shift");
    assert!(shift.demotions.is_empty());
    assert!(shift
        .promotions
        .iter()
        .any(|movement| movement.institution == "Purdue"
            && movement.from == Tier::Dream
            && movement.to == Tier::Safe));
    assert_eq!(tuning.comparison.promotions(), shift.promotions.len());
}

#[test]
fn prestige_ordering_and_growth_labels_are_configurable() {
    let policy = TierPolicy::default()
        .with_ordering(TierOrdering::PrestigeFirst)
        .with_labels(TierLabels::Growth);
    let advisor = advisor(AdvisorSettings {
        tier_policy: policy,
        max_regions: 3,
    });

    let report = advisor
        .assess(&request(&["USA"], &[]))
        .expect("assessment succeeds");
    let usa = report.roster.region(&region("USA")).expect("usa tiers");
    let names: Vec<&str> = usa
        .dream
        .iter()
        .map(|result| result.institution.as_str())
        .collect();
    assert_eq!(names, vec!["Stanford", "Carnegie Mellon", "Purdue"]);
    assert_eq!(Tier::Dream.label(advisor.policy().labels), "Significant Gap");
}

#[test]
fn invalid_requests_are_client_errors() {
    let advisor = advisor(AdvisorSettings {
        tier_policy: TierPolicy::default(),
        max_regions: 1,
    });

    let err = advisor
        .assess(&request(&["USA", "UK"], &[]))
        .expect_err("too many regions");
    assert!(matches!(
        err,
        AssessmentError::TooManyRegions {
            requested: 2,
            max: 1
        }
    ));
    assert!(err.is_client_error());

    let err = advisor
        .assess(&request(&["Canada"], &[]))
        .expect_err("no weight profile");
    assert!(err.is_client_error());

    let err = advisor
        .assess(&request(&["USA"], &[(7, "Full")]))
        .expect_err("unknown category");
    assert!(matches!(err, AssessmentError::Response(_)));
}

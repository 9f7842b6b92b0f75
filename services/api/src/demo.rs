use crate::infra::{load_advisor, parse_answer, parse_region};
use admit_ai::assessment::{
    AdmissionAdvisor, AssessmentReport, AssessmentRequest, CategoryId, Region, RosterComparison,
    StudentProfile, Tier, TuningReport, UnratableReason,
};
use admit_ai::config::AppConfig;
use admit_ai::error::AppError;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

const DEFAULT_PER_TIER: usize = 5;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Student name shown on the report
    #[arg(long)]
    pub(crate) name: String,
    /// Intended major, carried through to the report
    #[arg(long)]
    pub(crate) major: Option<String>,
    /// Counsellor responsible for the student
    #[arg(long)]
    pub(crate) counsellor: Option<String>,
    /// Target region (repeatable, e.g. --region USA --region UK)
    #[arg(long = "region", required = true, value_parser = parse_region)]
    pub(crate) regions: Vec<Region>,
    /// Answer as CATEGORY_ID=OPTION (repeatable)
    #[arg(long = "answer", value_parser = parse_answer)]
    pub(crate) answers: Vec<(CategoryId, String)>,
    /// Simulate a changed answer as CATEGORY_ID=OPTION and compare rosters (repeatable)
    #[arg(long = "tune", value_parser = parse_answer)]
    pub(crate) tune: Vec<(CategoryId, String)>,
    /// Institutions listed per tier
    #[arg(long, default_value_t = DEFAULT_PER_TIER)]
    pub(crate) per_tier: usize,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Institutions listed per tier
    #[arg(long, default_value_t = DEFAULT_PER_TIER)]
    pub(crate) per_tier: usize,
    /// Print the demo reports as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        name,
        major,
        counsellor,
        regions,
        answers,
        tune,
        per_tier,
        json,
    } = args;

    let advisor = configured_advisor()?;
    let request = AssessmentRequest {
        student: StudentProfile {
            name,
            intended_major: major,
            counsellor,
        },
        regions,
        answers: answers.into_iter().collect(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if tune.is_empty() {
        let report = advisor.assess(&request)?;
        if json {
            write_json(&mut out, &report)?;
        } else {
            render_report(&mut out, &advisor, &report, per_tier)?;
        }
    } else {
        let adjustments: BTreeMap<CategoryId, String> = tune.into_iter().collect();
        let tuning = advisor.tune(&request, &adjustments)?;
        if json {
            write_json(&mut out, &tuning)?;
        } else {
            render_tuning(&mut out, &advisor, &tuning, per_tier)?;
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { per_tier, json } = args;

    let advisor = configured_advisor()?;
    let request = demo_request(&advisor);
    let adjustments = demo_adjustments();
    let tuning = advisor.tune(&request, &adjustments)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        write_json(&mut out, &tuning)?;
        return Ok(());
    }

    writeln!(out, "Admission readiness demo")?;
    render_report(&mut out, &advisor, &tuning.baseline, per_tier)?;
    writeln!(out, "\nWhat if the weakest answers improved?")?;
    for (category, label) in &adjustments {
        writeln!(out, "- {}: {}", category_label(&advisor, *category), label)?;
    }
    render_comparison(&mut out, &advisor, &tuning.comparison)?;
    Ok(())
}

fn configured_advisor() -> Result<AdmissionAdvisor, AppError> {
    let config = AppConfig::load()?;
    load_advisor(&config.catalog, config.advisor)
}

fn demo_request(advisor: &AdmissionAdvisor) -> AssessmentRequest {
    let answers = [
        (1, "85-95%"),
        (2, "SAT 1200-1400"),
        (3, "Some advanced courses"),
        (4, "School level"),
        (5, "Independent project"),
        (6, "Club officer"),
        (7, "50-100 hours"),
        (8, "Short placement"),
        (9, "Reviewed draft"),
        (10, "IELTS 7.0"),
    ]
    .into_iter()
    .map(|(id, label)| (CategoryId(id), label.to_string()))
    .collect();

    let regions = ["USA", "UK", "Singapore"]
        .into_iter()
        .filter_map(|name| Region::new(name).ok())
        .filter(|region| advisor.weights().profile(region).is_ok())
        .take(advisor.max_regions())
        .collect();

    AssessmentRequest {
        student: StudentProfile {
            name: "Sample Student".to_string(),
            intended_major: Some("Computer Science".to_string()),
            counsellor: None,
        },
        regions,
        answers,
    }
}

fn demo_adjustments() -> BTreeMap<CategoryId, String> {
    [
        (2, "SAT 1400-1500"),
        (3, "Mostly AP/IB/A-Level"),
        (9, "Polished"),
    ]
    .into_iter()
    .map(|(id, label)| (CategoryId(id), label.to_string()))
    .collect()
}

fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).map_err(io::Error::other)?;
    writeln!(out)
}

fn category_label(advisor: &AdmissionAdvisor, category: CategoryId) -> String {
    advisor
        .questions()
        .category(category)
        .map(|category| category.label.clone())
        .unwrap_or_else(|| format!("Category {category}"))
}

pub(crate) fn render_report<W: Write>(
    out: &mut W,
    advisor: &AdmissionAdvisor,
    report: &AssessmentReport,
    per_tier: usize,
) -> io::Result<()> {
    let labels = advisor.policy().labels;

    writeln!(out, "Student: {}", report.student.name)?;
    if let Some(major) = &report.student.intended_major {
        writeln!(out, "Intended major: {major}")?;
    }
    if let Some(counsellor) = &report.student.counsellor {
        writeln!(out, "Counsellor: {counsellor}")?;
    }
    writeln!(
        out,
        "Generated: {} | {} of {} categories answered",
        report.generated_at.format("%Y-%m-%d %H:%M UTC"),
        report.responses.answered(),
        advisor.questions().len()
    )?;

    for score in &report.scores {
        let degenerate = if score.degenerate {
            " (no weighted categories for this region)"
        } else {
            ""
        };
        writeln!(
            out,
            "\n{} readiness: {:.1}/100{}",
            score.region, score.value, degenerate
        )?;

        let Some(tiers) = report.roster.region(&score.region) else {
            continue;
        };
        for tier in Tier::ordered() {
            writeln!(out, "{} ({})", tier.label(labels), tiers.count(tier))?;
            let shortlist = tiers.shortlist(tier, per_tier);
            if shortlist.is_empty() {
                writeln!(out, "  No current matches in this tier for this region.")?;
            }
            for result in shortlist {
                writeln!(
                    out,
                    "  - {} (benchmark {:.0}, gap {:+.1}%)",
                    result.institution, result.benchmark, result.gap_percent
                )?;
                for shortfall in &result.category_shortfalls {
                    writeln!(
                        out,
                        "      {} below benchmark: {:.0} vs {:.0}",
                        category_label(advisor, shortfall.category),
                        shortfall.earned,
                        shortfall.benchmark
                    )?;
                }
            }
        }
    }

    if !report.roster.warnings.is_empty() {
        writeln!(out, "\nSkipped institutions")?;
        for warning in &report.roster.warnings {
            let reason = match warning.reason {
                UnratableReason::MissingBenchmark => "no benchmark".to_string(),
                UnratableReason::NonPositiveBenchmark => format!(
                    "benchmark {} cannot anchor a gap",
                    warning.benchmark.unwrap_or_default()
                ),
            };
            writeln!(
                out,
                "- {} ({}): {}",
                warning.institution, warning.region, reason
            )?;
        }
    }

    Ok(())
}

pub(crate) fn render_tuning<W: Write>(
    out: &mut W,
    advisor: &AdmissionAdvisor,
    tuning: &TuningReport,
    per_tier: usize,
) -> io::Result<()> {
    writeln!(out, "Current answers")?;
    render_report(out, advisor, &tuning.baseline, per_tier)?;
    writeln!(out, "\nWith adjusted answers")?;
    render_report(out, advisor, &tuning.tuned, per_tier)?;
    render_comparison(out, advisor, &tuning.comparison)
}

pub(crate) fn render_comparison<W: Write>(
    out: &mut W,
    advisor: &AdmissionAdvisor,
    comparison: &RosterComparison,
) -> io::Result<()> {
    let labels = advisor.policy().labels;

    writeln!(out, "\nRoster changes")?;
    for shift in &comparison.regions {
        if shift.is_unchanged() {
            writeln!(out, "- {}: no change", shift.region)?;
            continue;
        }

        writeln!(
            out,
            "- {}: readiness {} -> {}",
            shift.region,
            format_score(shift.score_before),
            format_score(shift.score_after)
        )?;
        let counts: Vec<String> = shift
            .tier_counts
            .iter()
            .map(|delta| {
                format!(
                    "{} {} -> {}",
                    delta.tier.label(labels),
                    delta.before,
                    delta.after
                )
            })
            .collect();
        writeln!(out, "  {}", counts.join(" | "))?;

        for (heading, moves) in [("Up", &shift.promotions), ("Down", &shift.demotions)] {
            for movement in moves {
                writeln!(
                    out,
                    "  {heading}: {} ({} -> {})",
                    movement.institution,
                    movement.from.label(labels),
                    movement.to.label(labels)
                )?;
            }
        }
    }

    Ok(())
}

fn format_score(score: Option<f64>) -> String {
    score.map_or_else(|| "n/a".to_string(), |value| format!("{value:.1}"))
}

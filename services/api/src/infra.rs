use admit_ai::assessment::{
    AdmissionAdvisor, AdvisorSettings, BenchmarkCatalogLoader, CategoryId,
    QuestionCatalogLoader, Region, WeightProfileLoader,
};
use admit_ai::config::CatalogConfig;
use admit_ai::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

const SAMPLE_QUESTIONS: &str = include_str!("../data/questions.csv");
const SAMPLE_WEIGHTS: &str = include_str!("../data/weights.csv");
const SAMPLE_BENCHMARKS: &str = include_str!("../data/benchmarks.csv");

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Build the advisor from configured CSV files, falling back to the bundled sample data for
/// any catalog without a path.
pub(crate) fn load_advisor(
    catalog: &CatalogConfig,
    settings: AdvisorSettings,
) -> Result<AdmissionAdvisor, AppError> {
    let questions = match &catalog.questions_csv {
        Some(path) => QuestionCatalogLoader::from_path(path)?,
        None => QuestionCatalogLoader::from_reader(SAMPLE_QUESTIONS.as_bytes())?,
    };
    let weights = match &catalog.weights_csv {
        Some(path) => WeightProfileLoader::from_path(path)?,
        None => WeightProfileLoader::from_reader(SAMPLE_WEIGHTS.as_bytes())?,
    };
    let benchmarks = match &catalog.benchmarks_csv {
        Some(path) => BenchmarkCatalogLoader::from_path(path)?,
        None => BenchmarkCatalogLoader::from_reader(SAMPLE_BENCHMARKS.as_bytes())?,
    };

    let advisor = AdmissionAdvisor::new(
        Arc::new(questions),
        Arc::new(weights),
        Arc::new(benchmarks),
        settings,
    )?;
    Ok(advisor)
}

#[cfg(test)]
pub(crate) fn sample_advisor() -> Result<AdmissionAdvisor, AppError> {
    load_advisor(&CatalogConfig::default(), AdvisorSettings::default())
}

/// Parses `ID=LABEL`, e.g. `3=Mostly AP/IB/A-Level`.
pub(crate) fn parse_answer(raw: &str) -> Result<(CategoryId, String), String> {
    let (id, label) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ID=OPTION, got '{raw}'"))?;
    let id = id
        .trim()
        .parse::<u16>()
        .map_err(|err| format!("invalid category id in '{raw}' ({err})"))?;
    Ok((CategoryId(id), label.trim().to_string()))
}

pub(crate) fn parse_region(raw: &str) -> Result<Region, String> {
    Region::new(raw).map_err(|err| err.to_string())
}

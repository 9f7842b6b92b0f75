use crate::cli::ServeArgs;
use crate::infra::{load_advisor, AppState};
use crate::routes::with_assessment_routes;
use admit_ai::config::AppConfig;
use admit_ai::error::AppError;
use admit_ai::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let advisor = Arc::new(load_advisor(&config.catalog, config.advisor.clone())?);
    info!(
        categories = advisor.questions().len(),
        regions = advisor.weights().len(),
        institutions = advisor.benchmarks().len(),
        "reference catalogs loaded"
    );

    let app = with_assessment_routes(advisor)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "admission readiness service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

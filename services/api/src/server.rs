use crate::cli::ServeArgs;
use crate::infra::{load_directory, AppState};
use crate::routes::with_eligibility_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use placement_ai::config::AppConfig;
use placement_ai::error::AppError;
use placement_ai::telemetry;
use placement_ai::workflows::placement::{BatchOptions, EligibilityService};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

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

    let repository = Arc::new(load_directory(&config.seed)?);
    if config.evaluation.parallel && !cfg!(feature = "parallel") {
        warn!("APP_PARALLEL_EVALUATION is set but this build lacks the parallel feature");
    }
    let options = BatchOptions {
        parallel: config.evaluation.parallel,
    };
    let eligibility_service = Arc::new(EligibilityService::new(repository).with_options(options));

    let app = with_eligibility_routes(eligibility_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        parallel = config.evaluation.parallel,
        "placement eligibility service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_screening_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hiring_ai::config::AppConfig;
use hiring_ai::error::AppError;
use hiring_ai::telemetry;
use hiring_ai::workflows::screening::{InMemoryApplicationStore, ScreeningService};
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(InMemoryApplicationStore::default());
    let screening_service = Arc::new(ScreeningService::new(store, config.scoring));

    let app = with_screening_routes(screening_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        match_weight = config.scoring.match_weight,
        ats_weight = config.scoring.ats_weight,
        shortlist_threshold = config.scoring.shortlist_threshold,
        requalify_threshold = config.scoring.requalify_threshold,
        "screening service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_scorer_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use disc_scorer::config::AppConfig;
use disc_scorer::error::AppError;
use disc_scorer::{load_state, telemetry};
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

    let scorer_state = Arc::new(load_state(&config)?);
    info!(
        stats = scorer_state.engine.catalog().stats().len(),
        builds = scorer_state.advisor.library().characters().len(),
        build_version = scorer_state.advisor.library().version(),
        "scorer data loaded"
    );

    let app = with_scorer_routes(scorer_state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "disc scorer ready");

    axum::serve(listener, app).await?;
    Ok(())
}

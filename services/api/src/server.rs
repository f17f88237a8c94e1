use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCooperativeRepository};
use crate::routes::with_sourcing_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use sourcing_intel::config::AppConfig;
use sourcing_intel::error::AppError;
use sourcing_intel::regions::peru_regions;
use sourcing_intel::sourcing::{SourcingAnalyzer, SourcingDataset, StaticPriceFeed};
use sourcing_intel::telemetry;
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

    let repository = match &config.dataset.path {
        Some(path) => {
            let dataset = SourcingDataset::from_path(path)?;
            info!(
                path = %path.display(),
                cooperatives = dataset.cooperatives.len(),
                regions = dataset.regions.len(),
                "seeding store from dataset"
            );
            InMemoryCooperativeRepository::from_dataset(dataset)
        }
        None => InMemoryCooperativeRepository::seeded(Vec::new(), peru_regions()),
    };

    let analyzer = Arc::new(SourcingAnalyzer::new(
        Arc::new(repository),
        Arc::new(StaticPriceFeed),
        config.sourcing.clone(),
    ));

    let app = with_sourcing_routes(analyzer)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "sourcing intelligence service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

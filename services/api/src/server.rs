use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryEvaluationRepository, LoggingNotificationPublisher};
use crate::routes::with_hunt_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hunt_ai::config::AppConfig;
use hunt_ai::error::AppError;
use hunt_ai::telemetry;
use hunt_ai::workflows::matching::{JobMatchingService, MatchEngine, MatchSettings};
use hunt_ai::workflows::negotiation::{MarketCache, MarketDataEngine, NegotiationPlanner};
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

    telemetry::init(&config)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let repository = Arc::new(InMemoryEvaluationRepository::default());
    let notifications = Arc::new(LoggingNotificationPublisher::default());
    let engine = MatchEngine::new(MatchSettings::from(&config.pipeline));
    let matching_service = Arc::new(JobMatchingService::new(repository, notifications, engine));
    let market_cache = Arc::new(MarketCache::default());
    let planner = Arc::new(NegotiationPlanner::new(MarketDataEngine::with_cache(
        market_cache,
    )));

    let app = with_hunt_routes(matching_service, planner)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job hunt pipeline ready");

    axum::serve(listener, app).await.map_err(AppError::Server)?;
    Ok(())
}

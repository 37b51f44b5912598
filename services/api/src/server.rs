use crate::cli::ServeArgs;
use crate::infra::{seed_demo, AppState, Application, Stores};
use crate::routes::with_console_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use hireboard::auth::TokenIssuer;
use hireboard::config::AppConfig;
use hireboard::error::AppError;
use hireboard::matching::MatchEngine;
use hireboard::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
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
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let stores = Stores::default();
    if args.seed_demo {
        if config.environment.is_production() {
            warn!("seeding demo data into a production environment");
        }
        seed_demo(&stores)?;
    }

    let engine = MatchEngine::new(config.matching.clone())?;
    let weights = engine.config().weights;
    info!(
        skills = weights.skills,
        experience = weights.experience,
        education = weights.education,
        "match scoring weights loaded"
    );
    let tokens = TokenIssuer::from_config(&config.auth);
    let application = Application::new(&stores, tokens, engine);

    let app = with_console_routes(&application)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "hireboard console api ready");

    axum::serve(listener, app).await?;
    Ok(())
}

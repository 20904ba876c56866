//! # Slate API Server
//!
//! The main entry point for the Actix-web HTTP server and the background
//! publish scheduler.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod background;
mod config;
mod handlers;
mod middleware;
mod services;
mod state;

use background::{PublishScheduler, SchedulerConfig};
use config::AppConfig;
use slate_infra::RandomOutcomeSource;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing();

    // Load configuration
    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Slate API Server on {}:{}",
        config.host,
        config.port
    );

    // Build application state
    let state = AppState::new(&config).await;

    // Background publish scheduler: one catch-up pass at startup, then a
    // fixed-interval due-post scan.
    let scheduler_config = SchedulerConfig::from_env();
    let outcomes = Arc::new(RandomOutcomeSource::new(scheduler_config.failure_rate));
    let scheduler = Arc::new(PublishScheduler::new(
        scheduler_config,
        state.posts.clone(),
        outcomes,
    ));

    if let Err(e) = scheduler.start().await {
        tracing::error!(error = %e, "Failed to start publish scheduler");
    }

    // Start HTTP server
    let result = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await;

    // Let in-flight publish jobs reach a commit boundary before exiting.
    if let Err(e) = scheduler.stop().await {
        tracing::error!(error = %e, "Error during scheduler shutdown");
    }

    result
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,slate_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

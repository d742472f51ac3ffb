mod config;
mod telemetry;

use anyhow::Context;
use config::ServiceConfig;
use forecast_api::AppState;
use forecast_domain::ObservationIngestionService;
use forecast_nats::{NatsClient, NatsObservationCreatedProducer};
use forecast_postgres::{PostgresClient, PostgresConfig, PostgresObservationRepository};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() {
    let config = match ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    telemetry::init_telemetry(&config.log_level);

    info!(
        http_host = %config.http_host,
        http_port = config.http_port,
        "Starting forecast-service"
    );
    debug!("Configuration: {:?}", config);

    if let Err(e) = run(config).await {
        error!(error = %e, "forecast-service exited with error");
        std::process::exit(1);
    }
}

async fn run(config: ServiceConfig) -> anyhow::Result<()> {
    let startup_timeout = Duration::from_secs(config.startup_timeout_secs);

    // Record store
    let postgres = PostgresClient::new(&PostgresConfig {
        host: config.postgres_host.clone(),
        port: config.postgres_port,
        database: config.postgres_database.clone(),
        username: config.postgres_username.clone(),
        password: config.postgres_password.clone(),
        max_pool_size: config.postgres_max_pool_size,
    })
    .context("Failed to create PostgreSQL client")?;

    tokio::time::timeout(startup_timeout, postgres.ping())
        .await
        .context("Timed out connecting to PostgreSQL")?
        .context("Failed to ping PostgreSQL")?;

    // Notification channel
    let nats = NatsClient::connect(&config.nats_url, startup_timeout)
        .await
        .context("Failed to connect to NATS")?;
    nats.ensure_stream(&config.weather_data_stream)
        .await
        .context("Failed to ensure weather data stream")?;

    // Domain wiring
    let repository = Arc::new(PostgresObservationRepository::new(postgres));
    let producer = Arc::new(NatsObservationCreatedProducer::new(
        nats.create_publisher_client(),
        config.weather_data_stream.clone(),
    ));
    let ingestion_service = Arc::new(ObservationIngestionService::new(repository, producer));

    let state = AppState { ingestion_service };

    let addr = format!("{}:{}", config.http_host, config.http_port);
    forecast_api::serve(&addr, state).await
}

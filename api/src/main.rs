use actix_web::{web, HttpServer};
use ag_api::create_app;
use ag_shared::{AppConfig, LogFormat, LoggingConfig};
use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod bootstrap;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid configuration")?;

    tracing::info!(
        environment = %config.environment,
        backend = ?config.storage.backend,
        mail = ?config.mail.provider,
        "Starting AccessGate API server"
    );

    let state = web::Data::new(bootstrap::build_state(&config).await?);
    let bind_address = config.server.bind_address();
    let cors = config.cors.clone();
    let environment = config.environment;

    tracing::info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || create_app(state.clone(), &cors, environment));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
fn init_tracing(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().flatten_event(true))
            .init(),
        LogFormat::Compact => registry.with(fmt::layer().compact()).init(),
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            )
            .init(),
    }
}

pub mod api;
pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use anyhow::Context;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;
use state::SharedState;

/// Resolves configuration for the given CLI invocation: an explicit
/// `--config` file, otherwise the default search paths. Environment
/// overrides apply in both cases.
pub fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let config = match &cli.config {
        Some(path) => {
            let mut config = Config::load_from_path(path)?;
            config.apply_env_overrides()?;
            config
        }
        None => Config::load()?,
    };
    config.validate()?;
    Ok(config)
}

fn init_tracing(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_new(&config.general.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    // Logs go to stderr so CLI output on stdout stays machine-readable.
    if config.general.log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    init_tracing(&config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server(config).await,
        Commands::Seed => cli::cmd_seed(&config).await,
        Commands::Search {
            latitude,
            longitude,
            distance,
            prize_value,
        } => {
            cli::cmd_search(
                &config,
                &latitude,
                &longitude,
                &distance,
                prize_value.as_deref(),
            )
            .await
        }
        Commands::Init => cli::cmd_init(),
    }
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    info!(
        "Treasure Hunt v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        info!("Prometheus metrics recorder initialized");
        Some(handle)
    } else {
        None
    };

    let port = config.server.port;
    let shared = Arc::new(SharedState::new(config).await?);
    let app_state = api::create_app_state(shared, prometheus_handle);
    let app = api::router(app_state);

    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    info!("Web server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Web server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}

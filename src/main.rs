use std::sync::{Arc, RwLock};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tempus::config::{self, Config};
use tempus::monitor::{Monitor, SharedSnapshot};
use tempus::api;

#[derive(Parser)]
#[command(name = "tempus")]
#[command(about = "Calendar, season, and daylight facts exporter for Prometheus")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the exporter
    Serve {
        /// Port for the HTTP endpoints (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "tempus=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::from_env()?;
    if let Some(Commands::Serve { port: Some(port) }) = cli.command {
        config.port = port;
    }

    serve(config).await
}

async fn serve(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting Tempus exporter");
    tracing::info!(
        "Location: {}, {} ({}, {} hemisphere)",
        config.latitude,
        config.longitude,
        config.timezone,
        config.hemisphere.as_str()
    );

    let schedule = config::load_schedule(&config.schedule_file);
    let port = config.port;

    let monitor = Monitor::new(config, schedule);
    let shared: SharedSnapshot = Arc::new(RwLock::new(Arc::new(monitor.snapshot_now())));

    let app = api::create_router(shared.clone());
    tokio::spawn(monitor.run(shared));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    tracing::info!("Metrics at http://0.0.0.0:{}/metrics", port);
    tracing::info!("JSON context at http://0.0.0.0:{}/context", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Tempus exporter stopped");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to listen for shutdown signal");
    tracing::info!("Shutdown signal received");
}

//! Fieldnet Server - Field Network Reconciler

use clap::{Parser, Subcommand};
use fieldnet_core::ObservedStatus;
use fieldnet_server::{
    access_point::{parse_readings, AccessPoint},
    api,
    config::{AccessPointConfig, UnifiConfig},
    device::{DeviceHandle, UnifiClient},
    observability::{init_metrics, init_tracing, shutdown_tracing, TracingConfig},
    switch::Switch,
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "fieldnet-server")]
#[command(about = "Keeps field access point and switch team networks converged")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reconciler and HTTP API
    Serve {
        /// Address for the HTTP API
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
        bind_addr: String,
    },
    /// Read the controller once and print the observed slots as JSON
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider
    rustls::crypto::ring::default_provider()
        .install_default()
        .map_err(|_| anyhow::anyhow!("failed to install rustls crypto provider"))?;

    let cli = Cli::parse();

    init_tracing(TracingConfig::from_env())
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = match cli.command {
        Commands::Serve { bind_addr } => serve(&bind_addr).await,
        Commands::Status => print_status().await,
    };

    shutdown_tracing();
    result
}

async fn serve(bind_addr: &str) -> anyhow::Result<()> {
    info!("Starting fieldnet-server");

    let metrics_state = match init_metrics() {
        Ok(state) => Some(state),
        Err(e) => {
            warn!(error = %e, "Failed to initialize metrics, /metrics disabled");
            None
        }
    };

    let unifi_config = UnifiConfig::from_env()?;
    let ap_config = AccessPointConfig::from_env()?;
    info!(
        controller = %unifi_config.address,
        site = %unifi_config.site,
        poll_interval_secs = ap_config.poll_interval.as_secs(),
        retry_interval_secs = ap_config.retry_interval.as_secs(),
        "Loaded configuration"
    );

    // One actor per physical controller; the access point and switch share it.
    let address = unifi_config.address.clone();
    let device = DeviceHandle::spawn(address, UnifiClient::new(unifi_config)?);
    let (access_point, reconciler) = AccessPoint::spawn("access-point", device.clone(), ap_config);
    let switch = Switch::new("switch", device.clone());

    let state = api::AppState {
        access_point,
        switch,
        metrics_state,
    };
    let app = api::create_router(state);

    info!(bind_addr = %bind_addr, "Starting API server");
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // A reconciliation in progress may retry forever; shutdown cancels it.
    reconciler.abort();
    device.stop().await;

    info!("fieldnet-server stopped");
    Ok(())
}

async fn print_status() -> anyhow::Result<()> {
    let device = DeviceHandle::spawn("status", UnifiClient::new(UnifiConfig::from_env()?)?);
    device.login().await?;
    let reading = device.read_status().await?;
    device.stop().await;

    let mut observed = ObservedStatus::default();
    observed.record(parse_readings(&reading));
    println!("{}", serde_json::to_string_pretty(&observed)?);
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

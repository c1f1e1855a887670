//! Matchmaking orchestrator control-loop binary.
//!
//! Loads config, wires up the state store and scheduler clients, starts the
//! metrics server and logging, then hands off to [`ControlLoop::run`].

mod metrics_server;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::sync::watch;

use mmf_orchestrator::ControlLoop;
use mmf_orchestrator::OrchestratorContext;
use mmf_protocol::defaults::METADATA_NAMESPACE_ENV_VAR;
use mmf_scheduler::HttpSchedulerClient;
use mmf_state_store::RedisStateStore;

#[derive(Parser, Debug)]
#[command(name = "mmforc", about = "Matchmaking orchestrator control loop")]
struct Args {
    /// Path to a config file (without extension; the `config` crate resolves
    /// `.yaml`/`.json`/`.toml` next to it). Defaults to `mmforc` in the
    /// working directory.
    #[arg(long)]
    config: Option<String>,

    /// Raise log verbosity regardless of the configured `debug` flag.
    #[arg(long)]
    verbose: bool,

    /// Bind address for the `/metrics` Prometheus exposition endpoint.
    #[arg(long, default_value = "0.0.0.0:9090")]
    metrics_addr: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = mmf_protocol::load_config(args.config.as_deref()).unwrap_or_else(|err| {
        eprintln!("unable to load config file, proceeding with defaults: {err}");
        mmf_protocol::OrchestratorConfig::default()
    });

    mmf_logging::init_logging(mmf_logging::LogConfig {
        app_name: "mmforc",
        verbose: args.verbose || config.debug,
    })
    .context("failed to initialize logging")?;

    tracing::info!(
        profile_queue_name = %config.queues.profiles.name,
        pull_count = config.queues.profiles.pull_count,
        "starting mmforc"
    );

    let store = RedisStateStore::connect(&config.state_store_url)
        .await
        .context("unable to connect to state store")?;

    let scheduler = HttpSchedulerClient::new(config.scheduler_url.clone());

    let namespace = std::env::var(METADATA_NAMESPACE_ENV_VAR)
        .ok()
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "default".to_string());

    let ctx = OrchestratorContext::new(
        Arc::new(store),
        Arc::new(scheduler),
        Arc::new(config),
        namespace,
    );

    let metrics_addr = args.metrics_addr.clone();
    std::thread::spawn(move || {
        if let Err(err) = metrics_server::serve(&metrics_addr) {
            tracing::error!(error = %err, "metrics server exited");
        }
    });

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        tracing::info!("shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    let mut control_loop = ControlLoop::new(ctx);
    control_loop.run(shutdown_rx).await
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}

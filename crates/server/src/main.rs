use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nearby_core::{
    load_config, validate_config, CompletionWatcher, FetchOrchestrator, FsArtifactStore,
    ProcessWorker, WorkerConfig,
};
use nearby_server::{api::create_router, state::AppState};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("NEARBY_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Artifact directory: {:?}", config.artifacts.dir);
    info!(
        "Watcher: poll every {}ms, budget {}ms",
        config.watcher.poll_interval_ms, config.watcher.budget_ms
    );

    // Create artifact store
    let store = FsArtifactStore::open(&config.artifacts.dir)
        .await
        .context("Failed to open artifact directory")?;

    // Create worker runner
    let worker_config = WorkerConfig {
        program: resolve_worker_program(&config.worker.program),
        args: config.worker.args.clone(),
    };
    info!("Using fetch worker {:?}", worker_config.program);
    let worker = ProcessWorker::new(worker_config).with_envs(config.provider.worker_env());

    // Create orchestrator
    let orchestrator = FetchOrchestrator::new(
        config.search.clone(),
        Arc::new(store),
        Arc::new(worker),
        CompletionWatcher::from_config(&config.watcher),
    );
    let categories: Vec<String> = orchestrator
        .categories()
        .iter()
        .map(ToString::to_string)
        .collect();
    info!("Location search categories: {:?}", categories);

    if let Some(dir) = &config.server.static_dir {
        info!("Serving front-end from {:?}", dir);
    }

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), Arc::new(orchestrator)));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

/// Prefers a worker binary installed next to this executable when the
/// configured program is a bare name.
fn resolve_worker_program(program: &Path) -> PathBuf {
    if program.components().count() != 1 {
        return program.to_path_buf();
    }

    let sibling = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(program)))
        .filter(|path| path.is_file());

    sibling.unwrap_or_else(|| program.to_path_buf())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

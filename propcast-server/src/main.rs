use std::process::ExitCode;

use propcast_core::{ArgsSource, EnvSource};
use propcast_server::{startup, ServerConfig, ServerResult};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing subscriber for logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("propcast_server=info,propcast_core=info,tower_http=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server exited with error");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> ServerResult<()> {
    info!("Initializing propcast server...");

    // Snapshot the environment once; the same view feeds both server settings
    // and property resolution.
    let env = EnvSource::from_process();
    let config = ServerConfig::from_source(&env)?;
    info!(addr = %config.socket_addr(), placeholder = %config.placeholder, "Loaded server configuration");

    let resolver = startup::build_resolver(&config, ArgsSource::from_process(), env)?;
    let state = startup::resolve_state(&config, &resolver)?;

    let listener = startup::bind(&config).await?;
    startup::serve(listener, state, shutdown_signal()).await?;

    info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>(); // On non-Unix, just wait for Ctrl+C

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        },
    }
}

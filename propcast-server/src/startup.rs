//! Startup wiring: source chain, one-time resolution, and serving.

use std::future::Future;
use std::path::Path;

use propcast_core::{ArgsSource, ConfigResolver, EnvSource, PropertiesSource};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::{ServerConfig, DEFAULT_PROPERTIES_FILE};
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// Builds the source chain: command line, then environment, then the
/// properties file.
///
/// An explicitly configured properties file must exist. The default
/// `application.properties` is skipped when missing.
pub fn build_resolver(
    config: &ServerConfig,
    args: ArgsSource,
    env: EnvSource,
) -> ServerResult<ConfigResolver> {
    let mut resolver = ConfigResolver::new().with_source(args).with_source(env);

    let properties = match &config.properties_file {
        Some(path) => Some(PropertiesSource::load(path)?),
        None => PropertiesSource::load_optional(Path::new(DEFAULT_PROPERTIES_FILE))?,
    };
    if let Some(properties) = properties {
        resolver.push_source(properties);
    }

    info!(sources = ?resolver.source_names(), "Configuration sources ready");
    Ok(resolver)
}

/// Resolves the configured placeholder once and wraps it in shared state.
pub fn resolve_state(config: &ServerConfig, resolver: &ConfigResolver) -> ServerResult<AppState> {
    let property = resolver.resolve_placeholder(&config.placeholder)?;
    Ok(AppState::new(property))
}

pub async fn bind(config: &ServerConfig) -> ServerResult<TcpListener> {
    let addr = config.socket_addr();
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serves `state` on `listener` until `shutdown` completes.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> ServerResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("Starting server on {}", addr);
    }
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)
}

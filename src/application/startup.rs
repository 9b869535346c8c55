use std::future::Future;

use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use crate::{
    application::{
        config::{Args, RuntimeConfig},
        state::SharedState,
    },
    domain::error::DomainError,
    interfaces::http,
};

pub async fn run(args: Args) -> Result<(), DomainError> {
    let config = RuntimeConfig::from_args(args)
        .map_err(|error| DomainError::InvalidRequest(format!("configuration error: {error}")))?;

    init_logging(&config.log_filter, config.json_logs)?;
    if !config.model_path.is_file() {
        warn!(
            "service model {} is not readable yet; catalog requests fail until it exists",
            config.model_path.display()
        );
    }

    let listener = TcpListener::bind(config.bind_addr()).await.map_err(|error| {
        DomainError::Unavailable(format!(
            "failed to bind catalog listener {} for model {}: {error}",
            config.bind_addr(),
            config.model_path.display()
        ))
    })?;

    let signal = shutdown_signal();
    run_with_listener(listener, config, signal).await
}

pub async fn run_with_listener(
    listener: TcpListener,
    config: RuntimeConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), DomainError> {
    info!(
        "starting opscope-server host={} port={} model={} base_endpoint={}",
        config.host,
        config.port,
        config.model_path.display(),
        config.base_endpoint
    );

    let state = SharedState::new(config);
    http::serve(listener, state, shutdown).await
}

fn init_logging(filter: &str, json_logs: bool) -> Result<(), DomainError> {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = fmt().with_env_filter(env_filter).with_target(false);

    if json_logs {
        builder.json().try_init().map_err(|error| {
            DomainError::Unavailable(format!("failed to initialize logger: {error}"))
        })?;
    } else {
        builder.compact().try_init().map_err(|error| {
            DomainError::Unavailable(format!("failed to initialize logger: {error}"))
        })?;
    }

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

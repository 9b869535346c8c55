use std::{
    net::{IpAddr, SocketAddr},
    path::PathBuf,
};

use clap::Parser;

pub const DEFAULT_BASE_ENDPOINT: &str = "https://management.azure.com";

#[derive(Debug, Clone, Parser)]
#[command(
    name = "opscope-core",
    version,
    about = "Opscope Core: serves the HTTP operation catalog of a generated service model"
)]
pub struct Args {
    #[arg(long, env = "OPSCOPE_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    #[arg(long, env = "OPSCOPE_PORT", default_value_t = 18790)]
    pub port: u16,

    /// Substituted for the `{BaseUri}` root token in every operation URL.
    #[arg(long, env = "OPSCOPE_BASE_ENDPOINT", default_value = DEFAULT_BASE_ENDPOINT)]
    pub base_endpoint: String,

    /// Service model description (`.json` or `.toml`).
    #[arg(long, env = "OPSCOPE_MODEL")]
    pub model: PathBuf,

    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,

    #[arg(long, env = "OPSCOPE_JSON_LOGS", default_value_t = false)]
    pub json_logs: bool,
}

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub host: IpAddr,
    pub port: u16,
    pub base_endpoint: String,
    pub model_path: PathBuf,
    pub log_filter: String,
    pub json_logs: bool,
}

impl RuntimeConfig {
    pub fn from_args(args: Args) -> Result<Self, String> {
        if args.port == 0 {
            return Err("port must be greater than 0".to_owned());
        }
        let base_endpoint = normalize_base_endpoint(&args.base_endpoint)?;

        Ok(Self {
            host: args.host,
            port: args.port,
            base_endpoint,
            model_path: args.model,
            log_filter: args.log_filter,
            json_logs: args.json_logs,
        })
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    #[must_use]
    pub fn for_test(host: IpAddr, port: u16, model_path: PathBuf) -> Self {
        Self {
            host,
            port,
            base_endpoint: "https://management.test".to_owned(),
            model_path,
            log_filter: "warn".to_owned(),
            json_logs: false,
        }
    }
}

fn normalize_base_endpoint(input: &str) -> Result<String, String> {
    let trimmed = input.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err("base_endpoint must not be empty".to_owned());
    }
    Ok(trimmed.to_owned())
}

//! Server CLI command

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use clap::Args;

use crate::api::{self, state::AppState};
use crate::error::{Result, TaskboardError};
use crate::storage::config::Config;

/// Flags for `taskboard serve`; each one overrides the config file.
#[derive(Debug, Default, Args)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,
    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,
    /// Frontend build directory to serve for non-API paths
    #[arg(long)]
    pub static_dir: Option<PathBuf>,
}

impl ServeArgs {
    /// Fold the flags into `config`.
    pub fn apply(self, mut config: Config) -> Config {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.static_dir.is_some() {
            config.server.static_dir = self.static_dir;
        }
        config
    }
}

/// Resolve the listen address from config
pub fn listen_addr(config: &Config) -> Result<SocketAddr> {
    let ip: IpAddr = config.server.host.parse().map_err(|_| {
        TaskboardError::config(format!(
            "server.host '{}' is not an IP address",
            config.server.host
        ))
    })?;
    Ok(SocketAddr::new(ip, config.server.port))
}

/// Execute the server
pub async fn execute(config: Config) -> Result<()> {
    let addr = listen_addr(&config)?;

    let static_dir = match config.server.static_dir.clone() {
        Some(dir) if dir.exists() => Some(dir),
        Some(dir) => {
            tracing::warn!(static_dir = %dir.display(), "static dir not found, serving API only");
            None
        }
        None => api::find_static_dir(),
    };

    let state = AppState::from_config(&config);
    api::start_server(addr, state, static_dir).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = ServeArgs {
            host: Some("127.0.0.1".to_string()),
            port: Some(9001),
            static_dir: None,
        };
        let mut base = Config::default();
        base.server.static_dir = Some(PathBuf::from("web"));

        let config = args.apply(base);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.server.static_dir, Some(PathBuf::from("web")));
    }

    #[test]
    fn test_listen_addr() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 8080;
        assert_eq!(
            listen_addr(&config).unwrap(),
            "127.0.0.1:8080".parse::<SocketAddr>().unwrap()
        );

        config.server.host = "localhost".to_string();
        assert!(matches!(
            listen_addr(&config),
            Err(TaskboardError::Config(_))
        ));
    }
}

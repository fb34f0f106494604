use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

const BIND_ADDR_VAR: &str = "SCOREBOARD_BIND_ADDR";
const SEED_PATH_VAR: &str = "SCOREBOARD_SEED_PATH";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid {var}: {value}")]
    InvalidValue { var: &'static str, value: String },
}

/// Server settings read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// JSON file of collections published at startup
    pub seed_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_addr = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                var: BIND_ADDR_VAR,
                value: raw_addr.clone(),
            })?;

        let seed_path = lookup(SEED_PATH_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            seed_path,
        })
    }
}

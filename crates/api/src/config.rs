//! Process configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use jewelstore_observability::LogFormat;

pub const ENV_CATALOG_PATH: &str = "JEWELSTORE_CATALOG_PATH";
pub const ENV_BIND_ADDR: &str = "JEWELSTORE_BIND_ADDR";
pub const ENV_MODE: &str = "JEWELSTORE_ENV";
pub const ENV_SESSION_TTL_SECS: &str = "JEWELSTORE_SESSION_TTL_SECS";
pub const ENV_LOG_FORMAT: &str = "JEWELSTORE_LOG_FORMAT";

const DEFAULT_CATALOG_PATH: &str = "price.xlsx";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_SESSION_TTL_SECS: i64 = 7 * 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub catalog_path: PathBuf,
    pub bind_addr: SocketAddr,
    /// Production mode marks the session cookie `Secure`.
    pub production: bool,
    pub session_ttl: chrono::Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            catalog_path: PathBuf::from(DEFAULT_CATALOG_PATH),
            bind_addr: default_bind_addr(),
            production: false,
            session_ttl: chrono::Duration::seconds(DEFAULT_SESSION_TTL_SECS),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

impl StoreConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparseable values keep their
    /// defaults and are logged.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_CATALOG_PATH).filter(|v| !v.trim().is_empty()) {
            config.catalog_path = PathBuf::from(path.trim());
        }

        if let Some(addr) = lookup(ENV_BIND_ADDR) {
            match addr.trim().parse() {
                Ok(addr) => config.bind_addr = addr,
                Err(e) => tracing::warn!(
                    "{ENV_BIND_ADDR}={addr:?} is not a socket address ({e}); using {DEFAULT_BIND_ADDR}"
                ),
            }
        }

        config.production = lookup(ENV_MODE)
            .is_some_and(|mode| mode.trim().eq_ignore_ascii_case("production"));

        if let Some(ttl) = lookup(ENV_SESSION_TTL_SECS) {
            match ttl.trim().parse::<i64>() {
                Ok(secs) if secs > 0 => config.session_ttl = chrono::Duration::seconds(secs),
                _ => tracing::warn!(
                    "{ENV_SESSION_TTL_SECS}={ttl:?} is not a positive integer; using {DEFAULT_SESSION_TTL_SECS}"
                ),
            }
        }

        config
    }
}

/// Log format is read separately: logging must be up before the rest of the
/// configuration can report problems.
pub fn log_format_from_env() -> LogFormat {
    std::env::var(ENV_LOG_FORMAT)
        .map(|v| LogFormat::parse(&v))
        .unwrap_or_default()
}

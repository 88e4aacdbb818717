//! Gateway configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`). The resulting [`GatewayConfig`] is
//! passed explicitly to the service layer and the listener.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::sync::Semaphore;

use crate::domain::CommandSpec;

/// Default listen address.
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8888";
/// Default randomization command line.
pub const DEFAULT_RANDOMIZE_COMMAND: &str = "./randomization/randomize";
/// Default simulation command line.
pub const DEFAULT_SIMULATE_COMMAND: &str = "./simulator/simulator/simulate";

/// Configuration loading failure.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `LISTEN_ADDR` is not a valid socket address.
    #[error("invalid LISTEN_ADDR {value:?}: {source}")]
    InvalidListenAddr {
        /// Raw value read from the environment.
        value: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },

    /// A command variable is set but contains no program.
    #[error("{key} must name an executable")]
    EmptyCommand {
        /// Environment variable that was blank.
        key: &'static str,
    },

    /// `MAX_CONCURRENT_PROCESSES` exceeds what the process limiter can hold.
    #[error("MAX_CONCURRENT_PROCESSES={value} exceeds the maximum of {max}")]
    ProcessLimitTooLarge {
        /// Requested limit.
        value: usize,
        /// Largest supported limit.
        max: usize,
    },
}

/// Top-level gateway configuration.
///
/// Loaded once at startup via [`GatewayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Socket address to bind the server to (e.g. `0.0.0.0:8888`).
    pub listen_addr: SocketAddr,

    /// Command run for `randomization` requests.
    pub randomize_command: CommandSpec,

    /// Command run for `simulation` requests.
    pub simulate_command: CommandSpec,

    /// Maximum number of child processes alive at once (0 = unlimited).
    pub max_concurrent_processes: usize,

    /// Seconds a child may run before it is killed (0 = no timeout).
    pub command_timeout_secs: u64,
}

impl GatewayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to the defaults above when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `LISTEN_ADDR` cannot be parsed as a
    /// [`SocketAddr`], a command variable is blank, or
    /// `MAX_CONCURRENT_PROCESSES` is too large.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let raw_addr =
            std::env::var("LISTEN_ADDR").unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = raw_addr
            .parse()
            .map_err(|source| ConfigError::InvalidListenAddr {
                value: raw_addr.clone(),
                source,
            })?;

        let randomize_command = command_env("RANDOMIZE_COMMAND", DEFAULT_RANDOMIZE_COMMAND)?;
        let simulate_command = command_env("SIMULATE_COMMAND", DEFAULT_SIMULATE_COMMAND)?;

        let max_concurrent_processes =
            check_process_limit(parse_env("MAX_CONCURRENT_PROCESSES", 0))?;
        let command_timeout_secs = parse_env("COMMAND_TIMEOUT_SECS", 0);

        Ok(Self {
            listen_addr,
            randomize_command,
            simulate_command,
            max_concurrent_processes,
            command_timeout_secs,
        })
    }

    /// Builds a configuration with explicit commands and default limits.
    #[must_use]
    pub fn with_commands(
        listen_addr: SocketAddr,
        randomize_command: CommandSpec,
        simulate_command: CommandSpec,
    ) -> Self {
        Self {
            listen_addr,
            randomize_command,
            simulate_command,
            max_concurrent_processes: 0,
            command_timeout_secs: 0,
        }
    }

    /// Concurrency cap, or `None` when unlimited.
    #[must_use]
    pub const fn process_limit(&self) -> Option<usize> {
        if self.max_concurrent_processes == 0 {
            None
        } else {
            Some(self.max_concurrent_processes)
        }
    }

    /// Child timeout, or `None` when children may run forever.
    #[must_use]
    pub const fn command_timeout(&self) -> Option<Duration> {
        if self.command_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.command_timeout_secs))
        }
    }
}

/// Reads a command line from `key`, falling back to `default`.
fn command_env(key: &'static str, default: &str) -> Result<CommandSpec, ConfigError> {
    let line = std::env::var(key).unwrap_or_else(|_| default.to_string());
    CommandSpec::parse(&line).ok_or(ConfigError::EmptyCommand { key })
}

/// Rejects process limits the semaphore cannot represent.
fn check_process_limit(value: usize) -> Result<usize, ConfigError> {
    if value > Semaphore::MAX_PERMITS {
        return Err(ConfigError::ProcessLimitTooLarge {
            value,
            max: Semaphore::MAX_PERMITS,
        });
    }
    Ok(value)
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

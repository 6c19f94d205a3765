//! # DHCPv6 Telemetry
//!
//! Log subscriber installation for processes that host the DHCPv6
//! authentication subsystem. Library crates only emit `tracing` events; the
//! binary calls [`init_logging`] once at start-up.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dhcp6_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config).expect("logging already initialized");
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `DHCP6_SERVICE_NAME` | `dhcp6` | Service name attached to the start-up event |
//! | `DHCP6_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `DHCP6_CONSOLE_OUTPUT` | `true` | Write events to stderr |
//! | `DHCP6_JSON_LOGS` | `false` (`true` in containers) | One JSON object per event |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The log level string is not a valid `EnvFilter` directive.
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Filter as configured.
        filter: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// A global subscriber is already installed.
    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,
}

//! Core library for the Wi-Fi access-point connector.
//! This crate defines the Wi-Fi subsystem trait and data structures, the
//! pure security/password/configuration logic, the connect orchestration,
//! and backends (Wi-Fi control) selected by feature flags.

pub mod backends;
pub mod config;
pub mod connector;
pub mod network_config;
pub mod scan;
pub mod security;
pub mod traits;
pub mod web_server;

pub use connector::{ConnectOutcome, Connector, SsidMatch};
pub use network_config::{build_configuration, NetworkConfiguration};
pub use scan::{order_scan_results, DedupMode};
pub use security::{classify_security, format_password, SecurityType};

// Shared Error and Result type for the entire crate.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command failed: {0}")]
    CommandFailed(String),

    /// The subsystem refused to register the configuration (no id assigned).
    #[error("Network registration rejected for SSID '{ssid}'")]
    RegistrationFailed { ssid: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// A specialized `Result` type for this crate's operations.
pub type Result<T> = std::result::Result<T, Error>;

use crate::connector::SsidMatch;
use crate::scan::DedupMode;
use crate::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;

const DEFAULT_IFACE: &str = "wlan0";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// 启动策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Connect to the configured network as soon as the daemon starts.
    #[default]
    OnStart,
    /// Connect only when Wi-Fi is not already connected.
    IfDisconnected,
}

/// Network the daemon connects to on `run`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TargetNetwork {
    pub ssid: String,
    #[serde(default)]
    pub capabilities: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorConfig {
    pub interface: String,
    pub bind_addr: SocketAddr,
    pub policy: Policy,
    pub ssid_match: SsidMatch,
    pub dedup: DedupMode,
    pub network: Option<TargetNetwork>,
}

#[derive(Deserialize)]
struct ConnectorConfigFile {
    interface: Option<String>,
    bind_addr: Option<String>,
    #[serde(default)]
    policy: Policy,
    #[serde(default)]
    ssid_match: SsidMatch,
    #[serde(default)]
    dedup: DedupMode,
    network: Option<TargetNetwork>,
}

impl TryFrom<ConnectorConfigFile> for ConnectorConfig {
    type Error = Error;

    fn try_from(t: ConnectorConfigFile) -> Result<Self> {
        let bind_addr = t.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        let bind_addr = SocketAddr::from_str(bind_addr)
            .map_err(|e| Error::InvalidInput(format!("Invalid bind_addr '{}': {}", bind_addr, e)))?;
        Ok(ConnectorConfig {
            interface: t.interface.unwrap_or_else(|| DEFAULT_IFACE.to_string()),
            bind_addr,
            policy: t.policy,
            ssid_match: t.ssid_match,
            dedup: t.dedup,
            network: t.network,
        })
    }
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        ConnectorConfig {
            interface: DEFAULT_IFACE.to_string(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            policy: Policy::default(),
            ssid_match: SsidMatch::default(),
            dedup: DedupMode::default(),
            network: None,
        }
    }
}

impl ConnectorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let parsed: ConnectorConfigFile = toml::from_str(s)?;
        ConnectorConfig::try_from(parsed)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), "Loaded connector config");
        Ok(config)
    }
}

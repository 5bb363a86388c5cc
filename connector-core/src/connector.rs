use crate::network_config::{build_configuration, unquote};
use crate::scan::{order_scan_results, DedupMode};
use crate::traits::{ConfiguredNetwork, NetworkId, ScanResult, WifiSubsystem};
use crate::{Error, Result};
use serde::Deserialize;
use std::sync::Arc;

/// How a target SSID is matched against networks already registered on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SsidMatch {
    /// The stored SSID contains the target anywhere. "Home" also picks "\"Home5G\"".
    #[default]
    Substring,
    /// The unquoted stored SSID equals the target.
    Exact,
}

impl SsidMatch {
    fn matches(self, stored: &str, target: &str) -> bool {
        match self {
            SsidMatch::Substring => stored.contains(target),
            SsidMatch::Exact => unquote(stored) == target,
        }
    }
}

/// What `connect` ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectOutcome {
    /// The network was already registered and has been re-enabled.
    Reconnected { network_id: NetworkId },
    /// A new configuration was registered and enabled.
    Registered { network_id: NetworkId },
}

impl ConnectOutcome {
    pub fn network_id(&self) -> NetworkId {
        match *self {
            ConnectOutcome::Reconnected { network_id } | ConnectOutcome::Registered { network_id } => {
                network_id
            }
        }
    }
}

/// Lists access points and connects to them through an injected Wi-Fi subsystem.
///
/// Every operation runs its subsystem calls strictly in sequence; callers are
/// expected to serialize access (see `web_server`).
#[derive(Clone)]
pub struct Connector {
    subsystem: Arc<dyn WifiSubsystem>,
    ssid_match: SsidMatch,
    dedup: DedupMode,
}

impl Connector {
    pub fn new(subsystem: Arc<dyn WifiSubsystem>) -> Self {
        Self {
            subsystem,
            ssid_match: SsidMatch::default(),
            dedup: DedupMode::default(),
        }
    }

    pub fn with_ssid_match(mut self, ssid_match: SsidMatch) -> Self {
        self.ssid_match = ssid_match;
        self
    }

    pub fn with_dedup(mut self, dedup: DedupMode) -> Self {
        self.dedup = dedup;
        self
    }

    /// Turns the radio on.
    pub async fn enable(&self) -> Result<()> {
        self.subsystem.set_enabled(true).await
    }

    pub async fn is_connected(&self) -> Result<bool> {
        self.subsystem.is_connected().await
    }

    /// Scans and returns the filtered, ordered access-point list.
    /// A scan the subsystem refuses to start yields an empty list.
    pub async fn list_access_points(&self) -> Result<Vec<ScanResult>> {
        if !self.subsystem.start_scan().await? {
            tracing::warn!("Subsystem refused to start a scan, returning no access points");
            return Ok(Vec::new());
        }
        let raw = self.subsystem.scan_results().await?;
        let ordered = order_scan_results(raw, self.dedup);
        tracing::debug!(count = ordered.len(), dedup = ?self.dedup, "Access points listed");
        Ok(ordered)
    }

    /// Makes sure `ssid` is registered and becomes the only enabled network.
    ///
    /// An already-registered network is reused. Otherwise a configuration is
    /// built and registered; if the subsystem rejects it nothing else is
    /// touched and `Error::RegistrationFailed` is returned.
    pub async fn connect(&self, ssid: &str, capabilities: &str, password: &str) -> Result<ConnectOutcome> {
        if ssid.is_empty() {
            return Err(Error::InvalidInput("SSID must not be empty".into()));
        }

        let registered = self.subsystem.configured_networks().await?;
        if let Some(existing) = self.find_registered(&registered, ssid) {
            tracing::info!(ssid, network_id = existing.network_id, "Network already registered, reconnecting");
            self.switch_to(existing.network_id).await?;
            return Ok(ConnectOutcome::Reconnected {
                network_id: existing.network_id,
            });
        }

        let config = build_configuration(ssid, capabilities, password);
        tracing::debug!(?config, "Registering new network");
        match self.subsystem.add_network(&config).await? {
            Some(network_id) => {
                tracing::info!(ssid, network_id, security = ?config.security, "Network registered, connecting");
                self.switch_to(network_id).await?;
                Ok(ConnectOutcome::Registered { network_id })
            }
            None => {
                tracing::warn!(ssid, "Subsystem rejected the network configuration");
                Err(Error::RegistrationFailed { ssid: ssid.to_string() })
            }
        }
    }

    /// Disables every registered network. Individual failures are logged, not returned.
    pub async fn disconnect_all(&self) -> Result<()> {
        for network in self.subsystem.configured_networks().await? {
            if let Err(e) = self.subsystem.disable_network(network.network_id).await {
                tracing::warn!(network_id = network.network_id, error = %e, "Failed to disable network");
            }
        }
        Ok(())
    }

    // The last match wins, in the order the subsystem lists networks.
    fn find_registered<'a>(&self, registered: &'a [ConfiguredNetwork], ssid: &str) -> Option<&'a ConfiguredNetwork> {
        registered
            .iter()
            .rev()
            .find(|n| self.ssid_match.matches(&n.ssid, ssid))
    }

    async fn switch_to(&self, network_id: NetworkId) -> Result<()> {
        self.disconnect_all().await?;
        self.subsystem.enable_network(network_id).await
    }
}

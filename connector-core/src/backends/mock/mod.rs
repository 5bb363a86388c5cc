use crate::{Error, Result};
use crate::network_config::NetworkConfiguration;
use crate::traits::{ConfiguredNetwork, NetworkId, ScanResult, WifiSubsystem};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// A call made against the mock, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    SetEnabled(bool),
    IsConnected,
    StartScan,
    ScanResults,
    ConfiguredNetworks,
    AddNetwork(String),
    EnableNetwork(NetworkId),
    DisableNetwork(NetworkId),
}

#[derive(Debug, Default)]
struct State {
    enabled: bool,
    connected: bool,
    refuse_scan: bool,
    reject_registration: bool,
    failing_disable: Vec<NetworkId>,
    scan_results: Vec<ScanResult>,
    networks: Vec<ConfiguredNetwork>,
    next_id: NetworkId,
    calls: Vec<Call>,
}

/// An in-memory Wi-Fi subsystem for testing and local development.
/// It simulates scanning and registration without any real hardware interaction.
#[derive(Debug, Default)]
pub struct MockSubsystem {
    state: Mutex<State>,
}

impl MockSubsystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock pre-filled with a few access points, used by the daemon.
    pub fn with_sample_networks() -> Self {
        Self::new().with_scan_results(vec![
            ScanResult::new("MyHomeWiFi", "aa:bb:cc:00:00:01", "[WPA2-PSK-CCMP][ESS]", -45),
            ScanResult::new("MyHomeWiFi", "aa:bb:cc:00:00:01", "[WPA2-PSK-CCMP][ESS]", -52),
            ScanResult::new("CafeGuest", "aa:bb:cc:00:00:02", "[ESS]", -61),
            ScanResult::new("OldRouter", "aa:bb:cc:00:00:03", "[WEP][ESS]", -77),
            ScanResult::new("", "aa:bb:cc:00:00:04", "[WPA2-PSK-CCMP][ESS]", -80),
        ])
    }

    pub fn with_scan_results(mut self, results: Vec<ScanResult>) -> Self {
        self.state.get_mut().scan_results = results;
        self
    }

    /// Registers networks with ids 0..n; `ssids` are stored quoted.
    pub fn with_configured(mut self, ssids: &[&str]) -> Self {
        let s = self.state.get_mut();
        for ssid in ssids {
            s.networks.push(ConfiguredNetwork {
                network_id: s.next_id,
                ssid: format!("\"{}\"", ssid),
            });
            s.next_id += 1;
        }
        self
    }

    pub fn with_connected(mut self, connected: bool) -> Self {
        self.state.get_mut().connected = connected;
        self
    }

    pub fn refusing_scan(mut self) -> Self {
        self.state.get_mut().refuse_scan = true;
        self
    }

    pub fn rejecting_registration(mut self) -> Self {
        self.state.get_mut().reject_registration = true;
        self
    }

    /// Makes `disable_network(network_id)` fail.
    pub fn failing_disable(mut self, network_id: NetworkId) -> Self {
        self.state.get_mut().failing_disable.push(network_id);
        self
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.state.lock().await.calls.clone()
    }

    pub async fn is_enabled(&self) -> bool {
        self.state.lock().await.enabled
    }

    pub async fn registered(&self) -> Vec<ConfiguredNetwork> {
        self.state.lock().await.networks.clone()
    }
}

#[async_trait]
impl WifiSubsystem for MockSubsystem {
    async fn set_enabled(&self, enabled: bool) -> Result<()> {
        let mut s = self.state.lock().await;
        s.calls.push(Call::SetEnabled(enabled));
        s.enabled = enabled;
        tracing::debug!(enabled, "[MockSubsystem] radio toggled");
        Ok(())
    }

    async fn is_connected(&self) -> Result<bool> {
        let mut s = self.state.lock().await;
        s.calls.push(Call::IsConnected);
        Ok(s.connected)
    }

    async fn start_scan(&self) -> Result<bool> {
        let mut s = self.state.lock().await;
        s.calls.push(Call::StartScan);
        Ok(!s.refuse_scan)
    }

    async fn scan_results(&self) -> Result<Vec<ScanResult>> {
        let mut s = self.state.lock().await;
        s.calls.push(Call::ScanResults);
        tracing::debug!(count = s.scan_results.len(), "[MockSubsystem] returning scan results");
        Ok(s.scan_results.clone())
    }

    async fn configured_networks(&self) -> Result<Vec<ConfiguredNetwork>> {
        let mut s = self.state.lock().await;
        s.calls.push(Call::ConfiguredNetworks);
        Ok(s.networks.clone())
    }

    async fn add_network(&self, config: &NetworkConfiguration) -> Result<Option<NetworkId>> {
        let mut s = self.state.lock().await;
        s.calls.push(Call::AddNetwork(config.ssid.clone()));
        if s.reject_registration {
            tracing::debug!(ssid = %config.ssid, "[MockSubsystem] registration rejected (simulated)");
            return Ok(None);
        }
        let id = s.next_id;
        s.next_id += 1;
        s.networks.push(ConfiguredNetwork {
            network_id: id,
            ssid: config.ssid.clone(),
        });
        Ok(Some(id))
    }

    async fn enable_network(&self, network_id: NetworkId) -> Result<()> {
        let mut s = self.state.lock().await;
        s.calls.push(Call::EnableNetwork(network_id));
        s.connected = true;
        Ok(())
    }

    async fn disable_network(&self, network_id: NetworkId) -> Result<()> {
        let mut s = self.state.lock().await;
        s.calls.push(Call::DisableNetwork(network_id));
        if s.failing_disable.contains(&network_id) {
            return Err(Error::CommandFailed(format!("disable_network {} failed (simulated)", network_id)));
        }
        Ok(())
    }
}

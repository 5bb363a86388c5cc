use crate::network_config::NetworkConfiguration;
use async_trait::async_trait;
use serde::Serialize;

// 在这里定义共享的数据结构，和所有后端需要实现的 trait。

/// One access point observed during a scan.
/// 扫描时单个接入点的具体信息，收到后不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    pub ssid: String,
    pub bssid: String,
    /// Security descriptor, e.g. "[WPA2-PSK-CCMP][ESS]".
    pub capabilities: String,
    /// 信号强度 (dBm)，越大越强
    pub level: i32,
}

impl ScanResult {
    pub fn new(ssid: &str, bssid: &str, capabilities: &str, level: i32) -> Self {
        Self {
            ssid: ssid.to_string(),
            bssid: bssid.to_string(),
            capabilities: capabilities.to_string(),
            level,
        }
    }
}

/// Identifier the subsystem assigns to a registered network.
pub type NetworkId = u32;

/// A network already registered on the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfiguredNetwork {
    pub network_id: NetworkId,
    /// SSID as stored by the subsystem, usually wrapped in double quotes.
    pub ssid: String,
}

/// Wi-Fi 子系统接口：由操作系统提供，核心逻辑只通过它访问无线网卡。
#[async_trait]
pub trait WifiSubsystem: Send + Sync {
    /// Turns the radio on or off.
    async fn set_enabled(&self, enabled: bool) -> crate::Result<()>;

    /// 检查设备当前是否已通过 Wi-Fi 连接
    async fn is_connected(&self) -> crate::Result<bool>;

    /// Requests a scan. `false` means the subsystem refused to start one.
    async fn start_scan(&self) -> crate::Result<bool>;

    /// Results of the most recent scan.
    async fn scan_results(&self) -> crate::Result<Vec<ScanResult>>;

    /// Networks currently registered on the device.
    async fn configured_networks(&self) -> crate::Result<Vec<ConfiguredNetwork>>;

    /// Registers a configuration. `None` means no identifier was assigned.
    async fn add_network(&self, config: &NetworkConfiguration) -> crate::Result<Option<NetworkId>>;

    async fn enable_network(&self, network_id: NetworkId) -> crate::Result<()>;

    async fn disable_network(&self, network_id: NetworkId) -> crate::Result<()>;
}

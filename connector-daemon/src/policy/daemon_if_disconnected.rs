use connector_core::config::TargetNetwork;
use connector_core::Connector;

/// 守护进程策略：仅当未连接 Wi-Fi 时才连接
pub async fn run(connector: &Connector, target: &TargetNetwork) -> anyhow::Result<()> {
    tracing::info!("🚀 Policy: Daemon (If-Disconnected).");
    if connector.is_connected().await? {
        tracing::info!("🛡️ Wi-Fi is ALREADY CONNECTED. Leaving the current network alone.");
        return Ok(());
    }
    tracing::info!(ssid = %target.ssid, "🛡️ Wi-Fi is NOT connected. Connecting...");
    crate::runner::connect(connector, &target.ssid, &target.capabilities, &target.password).await
}

use connector_core::config::TargetNetwork;
use connector_core::Connector;

/// On-Start 策略：程序启动时立即连接
pub async fn run(connector: &Connector, target: &TargetNetwork) -> anyhow::Result<()> {
    tracing::info!(ssid = %target.ssid, "🚀 Policy: On-Start. Connecting immediately.");
    crate::runner::connect(connector, &target.ssid, &target.capabilities, &target.password).await
}

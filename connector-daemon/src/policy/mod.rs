use connector_core::config::{ConnectorConfig, Policy};
use connector_core::Connector;

pub mod daemon_if_disconnected;
pub mod on_start;

/// 策略调度器：根据配置中的 policy 调用对应实现。
pub async fn dispatch(connector: &Connector, config: &ConnectorConfig) -> anyhow::Result<()> {
    let Some(target) = &config.network else {
        anyhow::bail!("No [network] section in config, nothing to connect to");
    };

    match config.policy {
        Policy::OnStart => on_start::run(connector, target).await,
        Policy::IfDisconnected => daemon_if_disconnected::run(connector, target).await,
    }
}

#[cfg(all(test, feature = "backend_mock"))]
mod tests {
    use super::*;
    use connector_core::backends::mock::{Call, MockSubsystem};
    use connector_core::config::TargetNetwork;
    use std::sync::Arc;

    fn config(policy: Policy) -> ConnectorConfig {
        ConnectorConfig {
            policy,
            network: Some(TargetNetwork {
                ssid: "Home".into(),
                capabilities: "[WPA2-PSK-CCMP]".into(),
                password: "hunter22".into(),
            }),
            ..ConnectorConfig::default()
        }
    }

    #[tokio::test]
    async fn if_disconnected_leaves_a_connected_device_alone() {
        let mock = Arc::new(MockSubsystem::new().with_connected(true));
        dispatch(&Connector::new(mock.clone()), &config(Policy::IfDisconnected))
            .await
            .unwrap();
        assert_eq!(mock.calls().await, vec![Call::IsConnected]);
    }

    #[tokio::test]
    async fn if_disconnected_connects_when_offline() {
        let mock = Arc::new(MockSubsystem::new());
        dispatch(&Connector::new(mock.clone()), &config(Policy::IfDisconnected))
            .await
            .unwrap();
        assert_eq!(mock.registered().await.len(), 1);
        assert!(mock.calls().await.contains(&Call::EnableNetwork(0)));
    }

    #[tokio::test]
    async fn on_start_connects_even_when_connected() {
        let mock = Arc::new(MockSubsystem::new().with_connected(true).with_configured(&["Home"]));
        dispatch(&Connector::new(mock.clone()), &config(Policy::OnStart))
            .await
            .unwrap();
        assert!(mock.calls().await.contains(&Call::EnableNetwork(0)));
        assert!(!mock.calls().await.contains(&Call::IsConnected));
    }

    #[tokio::test]
    async fn missing_network_section_is_an_error() {
        let mock = Arc::new(MockSubsystem::new());
        let config = ConnectorConfig::default();
        assert!(dispatch(&Connector::new(mock), &config).await.is_err());
    }
}

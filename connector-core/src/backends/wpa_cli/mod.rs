// 后端：通过 wpa_cli 驱动 wpa_supplicant。
// 每个 trait 方法对应一到几条 wpa_cli 命令，按顺序执行。

use super::utils::{parse_list_networks, parse_network_id, parse_scan_results, ssid_value, status_is_connected};
use crate::network_config::{AuthAlgorithm, KeyManagement, NetworkConfiguration};
use crate::traits::{ConfiguredNetwork, NetworkId, ScanResult, WifiSubsystem};
use crate::{Error, Result};
use async_trait::async_trait;
use tokio::process::Command;

#[derive(Debug, Clone)]
pub struct WpaCliSubsystem {
    iface: String,
    program: String,
}

impl WpaCliSubsystem {
    pub fn new(iface: impl Into<String>) -> Self {
        Self {
            iface: iface.into(),
            program: "wpa_cli".to_string(),
        }
    }

    /// Uses another `wpa_cli` executable, e.g. one outside `PATH`.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Runs `wpa_cli -i <iface> <args..>` and returns stdout.
    async fn wpa_cli(&self, args: &[&str]) -> Result<String> {
        tracing::debug!(iface = %self.iface, ?args, "[WpaCli] running");
        let output = Command::new(&self.program)
            .arg("-i")
            .arg(&self.iface)
            .args(args)
            .output()
            .await?;

        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            return Err(Error::CommandFailed(format!(
                "wpa_cli {} failed: {}",
                args.first().unwrap_or(&""),
                error_msg
            )));
        }
        Ok(String::from_utf8(output.stdout)?)
    }

    /// Like `wpa_cli`, but also fails when the command answers "FAIL".
    async fn wpa_cli_ok(&self, args: &[&str]) -> Result<()> {
        let stdout = self.wpa_cli(args).await?;
        if stdout.trim() == "FAIL" {
            return Err(Error::CommandFailed(format!("wpa_cli {} returned FAIL", args.join(" "))));
        }
        Ok(())
    }

    async fn set_network(&self, id: &str, key: &str, value: &str) -> Result<()> {
        self.wpa_cli_ok(&["set_network", id, key, value]).await
    }

    async fn remove_network(&self, id: &str) {
        if let Err(e) = self.wpa_cli_ok(&["remove_network", id]).await {
            tracing::warn!(network_id = id, error = %e, "[WpaCli] remove_network failed");
        }
    }

    async fn apply_configuration(&self, id: &str, config: &NetworkConfiguration) -> Result<()> {
        self.set_network(id, "ssid", &ssid_value(config.raw_ssid())).await?;
        self.set_network(id, "scan_ssid", if config.hidden_ssid { "1" } else { "0" })
            .await?;

        match config.key_management {
            KeyManagement::None => self.set_network(id, "key_mgmt", "NONE").await?,
            KeyManagement::WpaPsk => self.set_network(id, "key_mgmt", "WPA-PSK").await?,
        }

        if !config.auth_algorithms.is_empty() {
            let algs: Vec<&str> = config
                .auth_algorithms
                .iter()
                .map(|alg| match alg {
                    AuthAlgorithm::Open => "OPEN",
                    AuthAlgorithm::Shared => "SHARED",
                })
                .collect();
            self.set_network(id, "auth_alg", &algs.join(" ")).await?;
        }

        for (slot, key) in config.wep_keys.iter().enumerate() {
            if let Some(key) = key {
                self.set_network(id, &format!("wep_key{}", slot), key).await?;
            }
        }
        if config.wep_keys.iter().any(Option::is_some) {
            self.set_network(id, "wep_tx_keyidx", &config.wep_tx_key_index.to_string())
                .await?;
        }

        if let Some(psk) = &config.pre_shared_key {
            self.set_network(id, "psk", psk).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl WifiSubsystem for WpaCliSubsystem {
    async fn set_enabled(&self, enabled: bool) -> Result<()> {
        let state = if enabled { "up" } else { "down" };
        let output = Command::new("ip")
            .arg("link")
            .arg("set")
            .arg(&self.iface)
            .arg(state)
            .output()
            .await?;
        if !output.status.success() {
            let error_msg = String::from_utf8_lossy(&output.stderr);
            return Err(Error::CommandFailed(format!(
                "Failed to set {} {}: {}",
                self.iface, state, error_msg
            )));
        }
        Ok(())
    }

    async fn is_connected(&self) -> Result<bool> {
        let stdout = self.wpa_cli(&["status"]).await?;
        Ok(status_is_connected(&stdout))
    }

    async fn start_scan(&self) -> Result<bool> {
        let stdout = self.wpa_cli(&["scan"]).await?;
        Ok(stdout.trim() == "OK")
    }

    async fn scan_results(&self) -> Result<Vec<ScanResult>> {
        let stdout = self.wpa_cli(&["scan_results"]).await?;
        Ok(parse_scan_results(&stdout))
    }

    async fn configured_networks(&self) -> Result<Vec<ConfiguredNetwork>> {
        let stdout = self.wpa_cli(&["list_networks"]).await?;
        Ok(parse_list_networks(&stdout))
    }

    /// 子系统拒绝（FAIL 或无法解析的 id）时移除半配置的网络，并返回 `None`。
    /// 无法启动 wpa_cli 等错误直接向上传递。
    async fn add_network(&self, config: &NetworkConfiguration) -> Result<Option<NetworkId>> {
        let stdout = self.wpa_cli(&["add_network"]).await?;
        let network_id = match parse_network_id(&stdout) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(error = %e, "[WpaCli] add_network gave no id");
                return Ok(None);
            }
        };
        let id = network_id.to_string();

        match self.apply_configuration(&id, config).await {
            Ok(()) => {}
            Err(Error::CommandFailed(msg)) => {
                tracing::warn!(network_id, error = %msg, "[WpaCli] configuration rejected, removing network");
                self.remove_network(&id).await;
                return Ok(None);
            }
            Err(e) => {
                self.remove_network(&id).await;
                return Err(e);
            }
        }

        if let Err(e) = self.wpa_cli_ok(&["save_config"]).await {
            tracing::warn!(network_id, error = %e, "[WpaCli] save_config failed");
        }
        Ok(Some(network_id))
    }

    async fn enable_network(&self, network_id: NetworkId) -> Result<()> {
        self.wpa_cli_ok(&["enable_network", &network_id.to_string()]).await
    }

    async fn disable_network(&self, network_id: NetworkId) -> Result<()> {
        self.wpa_cli_ok(&["disable_network", &network_id.to_string()]).await
    }
}

use anyhow::Context;
use connector_core::{ConnectOutcome, Connector};

/// Connects and reports what happened.
pub async fn connect(connector: &Connector, ssid: &str, capabilities: &str, password: &str) -> anyhow::Result<()> {
    connector.enable().await?;
    let outcome = connector
        .connect(ssid, capabilities, password)
        .await
        .with_context(|| format!("Failed to connect to '{}'", ssid))?;

    match outcome {
        ConnectOutcome::Reconnected { network_id } => {
            tracing::info!(ssid, network_id, "✅ Re-enabled registered network");
        }
        ConnectOutcome::Registered { network_id } => {
            tracing::info!(ssid, network_id, "✅ Registered and enabled new network");
        }
    }
    Ok(())
}

/// Capabilities of the first scanned access point named `ssid`.
pub async fn lookup_capabilities(connector: &Connector, ssid: &str) -> anyhow::Result<String> {
    connector.enable().await?;
    let found = connector
        .list_access_points()
        .await?
        .into_iter()
        .find(|ap| ap.ssid == ssid);

    match found {
        Some(ap) => Ok(ap.capabilities),
        None => {
            tracing::warn!(ssid, "Access point not in scan results, treating it as open");
            Ok(String::new())
        }
    }
}

mod policy;
mod runner;

use anyhow::Context;
use clap::{Parser, Subcommand};
use connector_core::config::ConnectorConfig;
use connector_core::traits::WifiSubsystem;
use connector_core::{web_server, Connector};
use std::path::PathBuf;
use std::sync::Arc;

// --- 1. 选择后端实现 (编译时) ---
const BACKEND_COUNT: usize =
    cfg!(feature = "backend_mock") as usize + cfg!(feature = "backend_wpa_cli") as usize;
const _: () = assert!(
    BACKEND_COUNT == 1,
    "Select exactly ONE backend feature (backend_mock or backend_wpa_cli)."
);

#[cfg(feature = "backend_mock")]
fn get_backend(_config: &ConnectorConfig) -> Arc<dyn WifiSubsystem> {
    tracing::info!("🤖 Using Mock backend");
    Arc::new(connector_core::backends::mock::MockSubsystem::with_sample_networks())
}

#[cfg(feature = "backend_wpa_cli")]
fn get_backend(config: &ConnectorConfig) -> Arc<dyn WifiSubsystem> {
    tracing::info!(iface = %config.interface, "📡 Using wpa_cli backend");
    Arc::new(connector_core::backends::wpa_cli::WpaCliSubsystem::new(&config.interface))
}

/// List nearby Wi-Fi access points and connect to one of them
#[derive(Parser, Debug)]
#[command(name = "wifi-connector", version, about)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Enable the radio and print the access-point list
    Scan,
    /// Print whether Wi-Fi is connected
    Status,
    /// Connect to a network
    Connect {
        #[arg(long)]
        ssid: String,
        #[arg(long, default_value = "")]
        password: String,
        /// Security descriptor; looked up from a scan when omitted
        #[arg(long)]
        capabilities: Option<String>,
    },
    /// Apply the configured start-up policy to the configured network
    Run,
    /// Serve the JSON API
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 初始化日志（这是入口点的职责）
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // 2. 调用核心逻辑
    if let Err(e) = run(args).await {
        // 3. 处理顶层错误
        tracing::error!("❌ wifi-connector failed: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = match &args.config {
        Some(path) => ConnectorConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ConnectorConfig::default(),
    };

    let connector = Connector::new(get_backend(&config))
        .with_ssid_match(config.ssid_match)
        .with_dedup(config.dedup);

    match args.command {
        Command::Scan => {
            connector.enable().await?;
            for ap in connector.list_access_points().await? {
                println!("{:<32} {:<17} {:>5}  {}", ap.ssid, ap.bssid, ap.level, ap.capabilities);
            }
        }
        Command::Status => {
            let connected = connector.is_connected().await?;
            println!("{}", if connected { "connected" } else { "disconnected" });
        }
        Command::Connect {
            ssid,
            password,
            capabilities,
        } => {
            let capabilities = match capabilities {
                Some(c) => c,
                None => runner::lookup_capabilities(&connector, &ssid).await?,
            };
            runner::connect(&connector, &ssid, &capabilities, &password).await?;
        }
        Command::Run => policy::dispatch(&connector, &config).await?,
        Command::Serve => {
            web_server::start_web_server(connector, config.bind_addr).await??;
        }
    }
    Ok(())
}

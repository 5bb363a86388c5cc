use crate::connector::{ConnectOutcome, Connector};
use crate::Error;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

// The shared state for the web server. The mutex makes sure only one
// request at a time drives the Wi-Fi subsystem.
pub type WebServerState = State<Arc<AppState>>;

pub struct AppState {
    pub connector: Mutex<Connector>,
}

/// Builds the JSON API router used by an external UI.
pub fn router(connector: Connector) -> Router {
    let app_state = Arc::new(AppState {
        connector: Mutex::new(connector),
    });

    Router::new()
        .route("/api/scan", get(api_scan_wifi))
        .route("/api/status", get(api_status))
        .route("/api/connect", post(api_connect_wifi))
        .with_state(app_state)
}

/// Starts the Axum web server.
///
/// # Returns
/// A `JoinHandle` for the server task.
pub fn start_web_server(connector: Connector, addr: SocketAddr) -> JoinHandle<crate::Result<()>> {
    let app = router(connector);

    tokio::spawn(async move {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "🌐 Web server listening");
        axum::serve(listener, app.into_make_service()).await?;
        Ok(())
    })
}

fn error_response(e: Error) -> Response {
    let status = match e {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        Error::RegistrationFailed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
}

// --- Route Handlers ---

/// API endpoint listing access points.
async fn api_scan_wifi(State(state): WebServerState) -> impl IntoResponse {
    let connector = state.connector.lock().await;
    match connector.list_access_points().await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(e) => error_response(e),
    }
}

async fn api_status(State(state): WebServerState) -> impl IntoResponse {
    let connector = state.connector.lock().await;
    match connector.is_connected().await {
        Ok(connected) => (StatusCode::OK, Json(serde_json::json!({ "connected": connected }))).into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Deserialize)]
pub struct ConnectRequest {
    ssid: String,
    #[serde(default)]
    capabilities: String,
    #[serde(default)]
    password: String,
}

/// API endpoint to connect to a Wi-Fi network.
async fn api_connect_wifi(
    State(state): WebServerState,
    Json(payload): Json<ConnectRequest>,
) -> impl IntoResponse {
    let connector = state.connector.lock().await;
    match connector
        .connect(&payload.ssid, &payload.capabilities, &payload.password)
        .await
    {
        Ok(outcome) => {
            let status = match outcome {
                ConnectOutcome::Registered { .. } => "registered",
                ConnectOutcome::Reconnected { .. } => "reconnected",
            };
            (
                StatusCode::OK,
                Json(serde_json::json!({ "status": status, "network_id": outcome.network_id() })),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

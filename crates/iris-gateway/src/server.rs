use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{DefaultBodyLimit, Path, State, WebSocketUpgrade};
use axum::http::{HeaderValue, StatusCode};
use axum::middleware;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use iris_runtime::{BridgeEndpoint, Call, CapabilityError};
use serde_json::Value;
use tokio::sync::{mpsc, Semaphore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::auth::{auth_middleware, AuthConfig};
use crate::types::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub endpoint: BridgeEndpoint,
    pub auth_config: Arc<AuthConfig>,
    pub allowed_origins: Vec<String>,
}

const MAX_MESSAGE_LENGTH: usize = 64 * 1024; // 64KB

/// Create the Axum router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = if state.allowed_origins.is_empty() {
        // Permissive for development
        CorsLayer::permissive()
    } else {
        let origins: Vec<HeaderValue> = state
            .allowed_origins
            .iter()
            .filter_map(|s| match s.parse() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    warn!(origin = %s, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let auth_config = state.auth_config.clone();

    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/channels/{channel}", post(invoke_method))
        .route("/ws/channels/{channel}", get(ws_upgrade))
        .layer(DefaultBodyLimit::max(MAX_MESSAGE_LENGTH))
        .layer(middleware::from_fn(move |req, next| {
            auth_middleware(auth_config.clone(), req, next)
        }))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Start the gateway server
pub async fn start_server(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
    let router = create_router(state);
    let addr = format!("{}:{}", host, port);

    info!(addr = %addr, "Starting gateway server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received, draining connections...");
}

fn unknown_channel(channel: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: format!("Unknown channel: {}", channel),
        }),
    )
        .into_response()
}

// --- REST Handlers ---

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        channel: state.endpoint.channel().to_string(),
        provider: state.endpoint.provider_name().to_string(),
    })
}

async fn invoke_method(
    State(state): State<AppState>,
    Path(channel): Path<String>,
    body: Bytes,
) -> Response {
    if channel != state.endpoint.channel() {
        return unknown_channel(&channel);
    }

    let reply = match serde_json::from_slice::<Call>(&body) {
        Ok(call) => MethodReply::from(state.endpoint.dispatch(&call).await),
        Err(e) => MethodReply::from(CapabilityError::invalid_arguments(format!(
            "Malformed call: {}",
            e
        ))),
    };

    (reply.status_code(), Json(reply)).into_response()
}

// --- WebSocket Handler ---

async fn ws_upgrade(
    State(state): State<AppState>,
    Path(channel): Path<String>,
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Response {
    // Channel is checked before the upgrade so a bad name is a plain 404
    if channel != state.endpoint.channel() {
        return unknown_channel(&channel);
    }
    match ws {
        Ok(ws) => ws.on_upgrade(move |socket| handle_ws_connection(socket, state.endpoint)),
        Err(rejection) => rejection.into_response(),
    }
}

/// Answer one raw WebSocket text frame.
///
/// Malformed or oversized frames get an `INVALID_ARGUMENTS` reply with a
/// null id, since no id could be recovered.
pub async fn reply_to_frame(endpoint: &BridgeEndpoint, text: &str) -> ServerFrame {
    if text.len() > MAX_MESSAGE_LENGTH {
        return ServerFrame {
            id: Value::Null,
            reply: CapabilityError::invalid_arguments(format!(
                "Frame exceeds maximum length of {} bytes",
                MAX_MESSAGE_LENGTH
            ))
            .into(),
        };
    }

    match serde_json::from_str::<ClientFrame>(text) {
        Ok(frame) => ServerFrame {
            id: frame.id,
            reply: endpoint.dispatch(&frame.call).await.into(),
        },
        Err(e) => ServerFrame {
            id: Value::Null,
            reply: CapabilityError::invalid_arguments(format!("Malformed frame: {}", e)).into(),
        },
    }
}

const WS_IDLE_TIMEOUT: tokio::time::Duration = tokio::time::Duration::from_secs(300);
const MAX_IN_FLIGHT_PER_CONNECTION: usize = 8;

/// Dispatches frames of one WebSocket connection, each in its own task,
/// with at most `limit` calls running at once.
struct FrameDispatcher {
    endpoint: BridgeEndpoint,
    permits: Arc<Semaphore>,
    limit: usize,
    reply_tx: mpsc::Sender<ServerFrame>,
}

impl FrameDispatcher {
    fn new(endpoint: BridgeEndpoint, limit: usize, reply_tx: mpsc::Sender<ServerFrame>) -> Self {
        Self {
            endpoint,
            permits: Arc::new(Semaphore::new(limit)),
            limit,
            reply_tx,
        }
    }

    /// Wait for a free slot, then dispatch the frame in the background.
    async fn spawn(&self, text: String) {
        let Ok(permit) = self.permits.clone().acquire_owned().await else {
            return;
        };
        let endpoint = self.endpoint.clone();
        let reply_tx = self.reply_tx.clone();
        tokio::spawn(async move {
            let frame = reply_to_frame(&endpoint, &text).await;
            drop(permit);
            let _ = reply_tx.send(frame).await;
        });
    }

    /// Calls dispatched but not yet answered
    fn in_flight(&self) -> usize {
        self.limit - self.permits.available_permits()
    }
}

async fn handle_ws_connection(socket: WebSocket, endpoint: BridgeEndpoint) {
    use futures_util::{SinkExt, StreamExt};
    use tokio::time::timeout;

    let connection_id = uuid::Uuid::new_v4();
    info!(%connection_id, channel = endpoint.channel(), "WebSocket connected");

    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (reply_tx, mut reply_rx) = mpsc::channel::<ServerFrame>(32);
    let dispatcher = FrameDispatcher::new(endpoint, MAX_IN_FLIGHT_PER_CONNECTION, reply_tx);

    // Forward replies to the client as they complete
    let send_task = tokio::spawn(async move {
        while let Some(frame) = reply_rx.recv().await {
            match serde_json::to_string(&frame) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(e) => warn!(error = %e, "Failed to encode reply frame"),
            }
        }
    });

    // Replies may arrive out of order
    loop {
        match timeout(WS_IDLE_TIMEOUT, ws_receiver.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => {
                dispatcher.spawn(text.as_str().to_owned()).await;
            }
            Ok(Some(Ok(Message::Close(_)))) | Ok(None) => {
                info!(%connection_id, "WebSocket connection closed by client");
                break;
            }
            Ok(Some(Ok(_))) => {}
            Ok(Some(Err(_))) => {
                info!(%connection_id, "WebSocket error, closing connection");
                break;
            }
            // A client waiting on a slow call is not idle
            Err(_) if dispatcher.in_flight() > 0 => {}
            Err(_) => {
                info!(
                    %connection_id,
                    "WebSocket idle timeout ({}s), closing connection",
                    WS_IDLE_TIMEOUT.as_secs()
                );
                break;
            }
        }
    }

    // Let pending calls deliver their replies before the socket goes away
    drop(dispatcher);
    let _ = send_task.await;
}

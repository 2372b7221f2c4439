//! A2A agent server powered by axum.
//!
//! Serves:
//! - `GET /.well-known/agent.json`: Agent Card discovery
//! - `POST /`: JSON-RPC 2.0 `tasks/send`

pub mod handler;

pub use handler::{responder_fn, FnResponder, Responder, SessionTaskHandler, TaskHandler};

use std::{any::Any, panic::AssertUnwindSafe, sync::Arc};

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use futures::FutureExt;
use serde_json::Value;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::protocol::{A2ACall, AgentCard, JsonRpcError, JsonRpcResponse, AGENT_CARD_PATH};

/// Server bind configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// `host:port` to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new("0.0.0.0", 5000)
    }
}

#[derive(Clone)]
struct ServerState {
    card: Arc<AgentCard>,
    handler: Arc<dyn TaskHandler>,
}

/// An agent exposed over A2A: its card plus a task handler
pub struct A2AServer {
    config: ServerConfig,
    state: ServerState,
}

impl A2AServer {
    pub fn new(config: ServerConfig, card: AgentCard, handler: impl TaskHandler + 'static) -> Self {
        Self::with_shared_handler(config, card, Arc::new(handler))
    }

    /// Serve a handler that is also used elsewhere
    pub fn with_shared_handler(
        config: ServerConfig,
        card: AgentCard,
        handler: Arc<dyn TaskHandler>,
    ) -> Self {
        Self {
            config,
            state: ServerState {
                card: Arc::new(card),
                handler,
            },
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn card(&self) -> &AgentCard {
        &self.state.card
    }

    /// Build the axum router for this agent
    pub fn router(&self) -> Router {
        Router::new()
            .route(AGENT_CARD_PATH, get(get_agent_card))
            .route("/", post(handle_rpc))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Bind the configured address and serve until the process stops
    pub async fn serve(self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.config.bind_addr()).await?;
        self.serve_on(listener).await
    }

    /// Serve on an already bound listener
    pub async fn serve_on(self, listener: TcpListener) -> std::io::Result<()> {
        let addr = listener.local_addr()?;
        tracing::info!(agent = %self.state.card.name, "A2A server listening on http://{}", addr);
        tracing::info!("   Agent Card: http://{}{}", addr, AGENT_CARD_PATH);

        axum::serve(listener, self.router()).await
    }
}

/// GET /.well-known/agent.json: Agent Card discovery.
async fn get_agent_card(State(state): State<ServerState>) -> Json<AgentCard> {
    tracing::debug!(agent = %state.card.name, "publishing agent card");
    Json((*state.card).clone())
}

fn reject(id: Value, error: JsonRpcError) -> (StatusCode, Json<JsonRpcResponse>) {
    tracing::debug!(code = error.code, message = %error.message, "rejecting request");
    (StatusCode::BAD_REQUEST, Json(JsonRpcResponse::error(id, error)))
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}

/// POST /: JSON-RPC 2.0 endpoint.
///
/// Malformed requests and handler panics answer 400; anything that reached the
/// handler answers 200 with either `result` or `error`.
async fn handle_rpc(
    State(state): State<ServerState>,
    body: Bytes,
) -> (StatusCode, Json<JsonRpcResponse>) {
    let body: Value = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(e) => {
            return reject(
                Value::Null,
                JsonRpcError::invalid_request(format!("Invalid JSON: {}", e)),
            )
        }
    };

    let call = match A2ACall::parse(body) {
        Ok(call) => call,
        Err((id, error)) => return reject(id, error),
    };
    tracing::debug!(method = call.method(), id = %call.id(), "received JSON-RPC request");

    match call {
        A2ACall::SendTask { id, params } => {
            let task_id = params.id.clone();
            let handler = state.handler.clone();
            let outcome = AssertUnwindSafe(async move { handler.on_send_task(params).await })
                .catch_unwind()
                .await;

            match outcome {
                Ok(Ok(task)) => match serde_json::to_value(&task) {
                    Ok(result) => (StatusCode::OK, Json(JsonRpcResponse::success(id, result))),
                    Err(e) => (
                        StatusCode::OK,
                        Json(JsonRpcResponse::error(
                            id,
                            JsonRpcError::internal(format!("Unserializable task: {}", e)),
                        )),
                    ),
                },
                Ok(Err(e)) => {
                    tracing::warn!(task_id = %task_id, error = %e, "task handler failed");
                    (StatusCode::OK, Json(JsonRpcResponse::error(id, e.into())))
                }
                Err(panic) => {
                    let message = panic_message(panic.as_ref());
                    tracing::error!(task_id = %task_id, panic = %message, "task handler panicked");
                    reject(id, JsonRpcError::internal(message))
                }
            }
        }
    }
}

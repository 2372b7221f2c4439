//! Error types for A2A protocol operations

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::jsonrpc::{error_codes, JsonRpcError};

/// Main error type for A2A protocol operations
#[derive(Debug, Error)]
pub enum A2AError {
    /// Transport-level error (network, connection, etc.)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote agent answered with something that is not a valid response body
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Request timeout error
    #[error("Request timeout")]
    Timeout,

    /// Protocol-level error (unexpected response shape, unsupported operation, etc.)
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Validation error (invalid request, response or agent card)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication or authorization error
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The remote agent rejected the request as malformed (HTTP 400 + JSON-RPC error)
    #[error("Request rejected ({}): {}", .0.code, .0.message)]
    Rejected(JsonRpcError),

    /// The remote agent understood the request but its handler failed
    #[error("Task error: {source}")]
    Task {
        #[from]
        source: TaskError,
    },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No connector is registered under this agent name
    #[error("Unknown agent: {0}")]
    UnknownAgent(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl A2AError {
    /// Whether the remote agent should be considered unreachable
    ///
    /// Transport errors, timeouts and unreadable bodies mean the request never produced
    /// a protocol answer. Everything else came back from an agent that is up.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            A2AError::Transport(_) | A2AError::MalformedResponse(_) | A2AError::Timeout
        )
    }

    /// The JSON-RPC error object carried by this error, if the agent sent one
    pub fn rpc_error(&self) -> Option<JsonRpcError> {
        match self {
            A2AError::Rejected(error) => Some(error.clone()),
            A2AError::Task { source } => Some(source.clone().into()),
            _ => None,
        }
    }
}

/// Handler-level failure of a task submission
///
/// Returned by task handlers and sent back in-band as the JSON-RPC `error` object of an
/// HTTP 200 response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("{message} (code {code})")]
pub struct TaskError {
    /// JSON-RPC error code
    pub code: i64,

    /// Human-readable error message
    pub message: String,

    /// Additional error details as structured data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl TaskError {
    /// Create a new task error
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// The handler failed for a reason of its own
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(error_codes::INTERNAL_ERROR, message)
    }

    /// The submitted task could not be acted on (no usable text, unknown target, ...)
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::new(error_codes::INVALID_PARAMS, message)
    }

    /// Add details to the task error
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<JsonRpcError> for TaskError {
    fn from(error: JsonRpcError) -> Self {
        Self {
            code: error.code,
            message: error.message,
            data: error.data,
        }
    }
}

impl From<TaskError> for JsonRpcError {
    fn from(error: TaskError) -> Self {
        Self {
            code: error.code,
            message: error.message,
            data: error.data,
        }
    }
}

impl From<reqwest::Error> for A2AError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            A2AError::Timeout
        } else if err.is_connect() {
            A2AError::Transport(format!("Connection error: {}", err))
        } else if err.is_decode() {
            A2AError::MalformedResponse(err.to_string())
        } else {
            A2AError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for A2AError {
    fn from(err: url::ParseError) -> Self {
        A2AError::Validation(format!("Invalid agent URL: {}", err))
    }
}

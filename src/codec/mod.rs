//! Serialization codecs for the A2A HTTP binding

pub mod jsonrpc;

pub use jsonrpc::JsonRpcCodec;

use bytes::Bytes;

use crate::{
    protocol::{error::A2AError, operation::A2AOperation},
    service::response::A2AResponse,
    transport::TransportResponse,
};

/// Codec trait for encoding and decoding A2A protocol messages
pub trait Codec: Send + Sync {
    /// Serialize an A2A operation to bytes for transport, tagged with `request_id`
    ///
    /// Operations without a body (discovery) encode to empty bytes.
    fn encode_request(
        &self,
        operation: &A2AOperation,
        request_id: &str,
    ) -> Result<Bytes, A2AError>;

    /// Deserialize a transport response into an A2A response
    ///
    /// The whole response is passed in because the status code is part of the
    /// protocol: a JSON-RPC error under HTTP 400 means the request was rejected, the same
    /// error under HTTP 200 means the agent's handler failed. `request_id` is the id the
    /// request was encoded with.
    fn decode_response(
        &self,
        response: &TransportResponse,
        operation: &A2AOperation,
        request_id: &str,
    ) -> Result<A2AResponse, A2AError>;

    /// Get the content type for this codec
    fn content_type(&self) -> &str;
}

/// Map a non-success response without a usable protocol body to an error
pub fn error_for_status(response: &TransportResponse) -> A2AError {
    if let Ok(json) = serde_json::from_slice::<serde_json::Value>(&response.body) {
        if let Some(message) = json.get("message").and_then(|v| v.as_str()) {
            return match response.status {
                401 | 403 => A2AError::Auth(message.to_string()),
                429 => A2AError::RateLimitExceeded,
                _ => A2AError::Transport(format!("HTTP {}: {}", response.status, message)),
            };
        }
    }

    match response.status {
        401 | 403 => A2AError::Auth(format!("HTTP {}", response.status)),
        429 => A2AError::RateLimitExceeded,
        status => A2AError::Transport(format!("HTTP error: {}", status)),
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::{
    protocol::error::A2AError,
    transport::{Transport, TransportRequest, TransportResponse},
};

type Handler = dyn Fn(TransportRequest) -> Result<TransportResponse, A2AError> + Send + Sync;

/// Mock transport for internal testing
///
/// Answers requests from a closure instead of the network.
#[derive(Clone)]
pub(crate) struct MockTransport {
    handler: Arc<Handler>,
    base_url: Url,
}

impl MockTransport {
    /// Create a new mock transport with a custom request handler
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(TransportRequest) -> TransportResponse + Send + Sync + 'static,
    {
        Self::fallible(move |req| Ok(handler(req)))
    }

    /// Create a mock transport whose handler may fail at the transport level
    pub fn fallible<F>(handler: F) -> Self
    where
        F: Fn(TransportRequest) -> Result<TransportResponse, A2AError> + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
            base_url: Url::parse("http://mock.agent/").unwrap(),
        }
    }

    /// Create a mock transport that answers every request with `status` and a JSON body
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        let bytes = serde_json::to_vec(&body).unwrap();
        Self::new(move |_| TransportResponse::new(status).body(bytes.clone()))
    }

    /// Create a mock agent that answers `status` and `envelope`, echoing the request id
    pub fn rpc(status: u16, envelope: serde_json::Value) -> Self {
        Self::new(move |req| {
            let mut envelope = envelope.clone();
            if let Ok(request) = serde_json::from_slice::<serde_json::Value>(&req.body) {
                envelope["id"] = request["id"].clone();
            }
            TransportResponse::new(status).body(serde_json::to_vec(&envelope).unwrap())
        })
    }

    /// Create a mock transport for an agent that cannot be reached
    pub fn unreachable() -> Self {
        Self::fallible(|_| Err(A2AError::Transport("Connection error: refused".into())))
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, A2AError> {
        (self.handler)(request)
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl std::fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockTransport").finish()
    }
}

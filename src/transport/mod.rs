//! Transport abstraction layer for A2A protocol

pub mod http;
#[cfg(test)]
pub mod mock;

use std::{
    collections::HashMap,
    task::{Context, Poll},
};

pub use http::HttpTransport;

use async_trait::async_trait;
use bytes::Bytes;
use url::Url;

use crate::protocol::error::A2AError;

/// Protocol-agnostic transport request
#[derive(Debug, Clone)]
pub struct TransportRequest {
    /// The endpoint path (e.g., "/", "/.well-known/agent.json")
    pub endpoint: String,

    /// HTTP method or equivalent operation (e.g., "POST", "GET")
    pub method: String,

    /// Headers or metadata for the request
    pub headers: HashMap<String, String>,

    /// Request body as bytes
    pub body: Bytes,
}

impl TransportRequest {
    /// Create a new transport request
    pub fn new(endpoint: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            method: method.into(),
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Add a header to the request
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request body
    pub fn body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }
}

/// Protocol-agnostic transport response
#[derive(Debug)]
pub struct TransportResponse {
    /// Status code (e.g., HTTP status code)
    pub status: u16,

    /// Response headers or metadata
    pub headers: HashMap<String, String>,

    /// Response body as bytes
    pub body: Bytes,
}

impl TransportResponse {
    /// Create a new transport response
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Bytes::new(),
        }
    }

    /// Add a header to the response
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the response body
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// Check if the response indicates success (2xx status code)
    pub fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Check if the response indicates a client error (4xx status code)
    pub fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }
}

/// Join an endpoint path onto an agent base URL
///
/// The base URL's trailing slash is dropped first, so `http://host/` and `http://host`
/// address the same endpoints and a base path such as `http://host/agents/reddit` is kept.
pub fn endpoint_url(base_url: &Url, endpoint: &str) -> String {
    format!("{}{}", base_url.as_str().trim_end_matches('/'), endpoint)
}

/// Core transport trait for executing protocol-agnostic requests
///
/// This trait abstracts over the network so that the A2A service layer can be exercised
/// against a real HTTP agent or an in-memory double.
#[async_trait]
pub trait Transport: Clone + Send + Sync + 'static {
    /// Check if the transport is ready to accept requests
    ///
    /// This is used by Tower's Service trait to implement backpressure
    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), A2AError>> {
        Poll::Ready(Ok(()))
    }

    /// Execute a transport request asynchronously
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, A2AError>;

    /// Get the base URL of the agent this transport talks to
    fn base_url(&self) -> &Url;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joining() {
        let root: Url = "http://localhost:10002/".parse().unwrap();
        assert_eq!(endpoint_url(&root, "/"), "http://localhost:10002/");
        assert_eq!(
            endpoint_url(&root, "/.well-known/agent.json"),
            "http://localhost:10002/.well-known/agent.json"
        );

        let nested: Url = "http://localhost:8000/agents/reddit/".parse().unwrap();
        assert_eq!(
            endpoint_url(&nested, "/.well-known/agent.json"),
            "http://localhost:8000/agents/reddit/.well-known/agent.json"
        );
    }

    #[test]
    fn test_response_status_classes() {
        assert!(TransportResponse::new(200).is_success());
        assert!(TransportResponse::new(400).is_client_error());
        assert!(!TransportResponse::new(503).is_success());
    }
}

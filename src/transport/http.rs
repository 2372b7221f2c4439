//! HTTP transport implementation for A2A protocol

use async_trait::async_trait;
use url::Url;

use crate::protocol::error::A2AError;

use super::{endpoint_url, Transport, TransportRequest, TransportResponse};

/// HTTP transport implementation using reqwest
///
/// The reqwest client is a cheap handle over a shared connection pool, so one client can
/// back the transports of every agent an orchestrator talks to.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Create a new HTTP transport
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the agent (e.g., "<http://localhost:10002/>")
    pub fn new(base_url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a new HTTP transport with a custom reqwest client
    pub fn with_client(base_url: Url, client: reqwest::Client) -> Self {
        Self { client, base_url }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, A2AError> {
        let url = endpoint_url(&self.base_url, &request.endpoint);

        let mut req_builder = match request.method.as_str() {
            "POST" => self.client.post(&url),
            "GET" => self.client.get(&url),
            _ => {
                return Err(A2AError::Transport(format!(
                    "Unsupported HTTP method: {}",
                    request.method
                )))
            }
        };

        for (key, value) in request.headers {
            req_builder = req_builder.header(key, value);
        }

        if !request.body.is_empty() {
            req_builder = req_builder.body(request.body);
        }

        tracing::debug!(%url, method = %request.method, "sending A2A request");
        let response = req_builder.send().await?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();

        let body = response.bytes().await?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }

    fn base_url(&self) -> &Url {
        &self.base_url
    }
}

//! Client builder for constructing A2A clients with composable layers

use std::{sync::Arc, time::Duration};

use tower::util::BoxCloneSyncService;
use tower_layer::Layer;
use url::Url;

use crate::{
    client::{config::DEFAULT_TIMEOUT, AgentClient, ClientConfig},
    codec::{Codec, JsonRpcCodec},
    layer::{A2AValidationLayer, AuthCredentials, AuthLayer},
    protocol::error::A2AError,
    service::{A2AProtocolService, A2AService},
    transport::{HttpTransport, Transport},
};

/// Builder for constructing A2A clients
///
/// This builder provides a fluent API for configuring a client with a transport,
/// authentication, a timeout and validation, and assembles them into a Tower stack.
///
/// # Example
///
/// ```rust,no_run
/// use a2a_runtime::prelude::*;
/// use std::time::Duration;
///
/// # async fn example() -> Result<(), A2AError> {
/// let url = "http://localhost:10002".parse().unwrap();
/// let mut client = A2AClientBuilder::new_http(url)
///     .with_timeout(Duration::from_secs(60))
///     .build()?;
///
/// let agent_card = client.discover().await?;
/// println!("Connected to: {}", agent_card.name);
/// # Ok(())
/// # }
/// ```
pub struct A2AClientBuilder<T: Transport> {
    agent_url: Url,
    transport: Option<T>,
    codec: Option<Arc<dyn Codec>>,
    auth: Option<AuthCredentials>,
    timeout: Option<Duration>,
    validate_responses: bool,
}

impl<T: Transport> A2AClientBuilder<T> {
    /// Start a builder for the agent at `agent_url`; a transport must be supplied
    pub fn new(agent_url: Url) -> Self {
        Self {
            agent_url,
            transport: None,
            codec: None,
            auth: None,
            timeout: Some(DEFAULT_TIMEOUT),
            validate_responses: true,
        }
    }

    /// Use a custom transport
    pub fn with_transport(mut self, transport: T) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom codec
    pub fn with_codec(mut self, codec: Arc<dyn Codec>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Enable bearer token authentication
    pub fn with_bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(AuthCredentials::bearer(token));
        self
    }

    /// Enable API key authentication
    ///
    /// # Arguments
    ///
    /// * `key` - The API key
    /// * `header` - The header name for the API key (e.g., "X-API-Key")
    pub fn with_api_key_auth(mut self, key: impl Into<String>, header: impl Into<String>) -> Self {
        self.auth = Some(AuthCredentials::api_key(key, header));
        self
    }

    /// Enable basic HTTP authentication
    pub fn with_basic_auth(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.auth = Some(AuthCredentials::basic(username, password));
        self
    }

    /// Set custom authentication credentials
    pub fn with_auth(mut self, credentials: AuthCredentials) -> Self {
        self.auth = Some(credentials);
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enable or disable request and response validation
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_responses = enabled;
        self
    }

    /// Build the A2A client
    ///
    /// Layers are stacked outermost first: auth, then validation, then the protocol
    /// service.
    ///
    /// # Errors
    ///
    /// Returns an error if no transport has been configured
    pub fn build(self) -> Result<AgentClient<A2AService>, A2AError> {
        let transport = self.transport.ok_or_else(|| {
            A2AError::Protocol(
                "Transport not configured. Use new_http() or with_transport()".into(),
            )
        })?;

        let codec = self.codec.unwrap_or_else(|| Arc::new(JsonRpcCodec));

        let mut service: A2AService =
            BoxCloneSyncService::new(A2AProtocolService::new(transport, codec));
        if self.validate_responses {
            service = BoxCloneSyncService::new(A2AValidationLayer::new().layer(service));
        }
        if let Some(credentials) = self.auth {
            service = BoxCloneSyncService::new(AuthLayer::new(credentials).layer(service));
        }

        let config = ClientConfig::new(self.agent_url.to_string())
            .with_timeout(self.timeout.unwrap_or(DEFAULT_TIMEOUT))
            .with_validation(self.validate_responses);

        Ok(AgentClient::new(service, config))
    }
}

impl A2AClientBuilder<HttpTransport> {
    /// Create a new client builder with HTTP transport
    ///
    /// # Arguments
    ///
    /// * `agent_url` - The base URL of the agent (e.g., "<http://localhost:10002/>")
    pub fn new_http(agent_url: Url) -> Self {
        let transport = HttpTransport::new(agent_url.clone());
        Self::new(agent_url)
            .with_transport(transport)
            .with_codec(Arc::new(JsonRpcCodec))
    }

    /// Create a client builder whose HTTP transport shares an existing reqwest client
    pub fn with_http_client(agent_url: Url, client: reqwest::Client) -> Self {
        let transport = HttpTransport::with_client(agent_url.clone(), client);
        Self::new(agent_url)
            .with_transport(transport)
            .with_codec(Arc::new(JsonRpcCodec))
    }
}

//! Client configuration

use std::time::Duration;

/// Default per-request timeout of a client
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for an A2A client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the agent
    pub agent_url: String,

    /// Request timeout; a task that does not answer in time is abandoned by the client
    pub timeout: Duration,

    /// Enable request and response validation
    pub validate_responses: bool,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(agent_url: impl Into<String>) -> Self {
        Self {
            agent_url: agent_url.into(),
            timeout: DEFAULT_TIMEOUT,
            validate_responses: true,
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Enable or disable request and response validation
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.validate_responses = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("")
    }
}

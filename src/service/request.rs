//! Requests flowing through the client service stack

use std::{collections::HashMap, time::Duration};

use uuid::Uuid;

use crate::protocol::operation::A2AOperation;

/// One operation addressed to one agent, plus how to send it
#[derive(Debug, Clone)]
pub struct A2ARequest {
    pub operation: A2AOperation,
    pub context: RequestContext,
}

impl A2ARequest {
    pub fn new(operation: A2AOperation, context: RequestContext) -> Self {
        Self { operation, context }
    }
}

/// Per-request settings shared by every layer of the stack
///
/// Layers add HTTP headers here (credentials, tracing ids); the protocol service copies
/// them onto the outgoing request as-is.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Base URL of the target agent
    pub agent_url: String,

    /// JSON-RPC id sent with the request; the response must echo it
    pub request_id: String,

    /// Bound on connect, send and reading the whole body
    pub timeout: Option<Duration>,

    /// Extra HTTP headers
    pub headers: HashMap<String, String>,
}

impl RequestContext {
    pub fn new(agent_url: impl Into<String>) -> Self {
        Self {
            agent_url: agent_url.into(),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            agent_url: String::new(),
            request_id: Uuid::now_v7().to_string(),
            timeout: Some(Duration::from_secs(30)),
            headers: HashMap::new(),
        }
    }
}

//! High-level A2A agent client

use tower::ServiceExt;
use tower_service::Service;

use crate::{
    client::config::ClientConfig,
    protocol::{A2AError, A2AOperation, AgentCard, Task, TaskSendParams},
    service::{A2ARequest, A2AResponse, A2AService, RequestContext},
};

/// High-level A2A client for interacting with one remote agent
///
/// This client wraps a Tower service and provides convenient methods for the two
/// operations an agent exposes: fetching its card and submitting a task.
///
/// # Example
///
/// ```rust,no_run
/// use a2a_runtime::prelude::*;
///
/// # async fn example() -> Result<(), A2AError> {
/// let url = "http://localhost:10002".parse().unwrap();
/// let mut client = A2AClientBuilder::new_http(url).build()?;
///
/// let task = client.send_text("What is the weather in Paris?", "session-1").await?;
/// println!("Reply: {:?}", task.reply_text());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AgentClient<S = A2AService> {
    service: S,
    config: ClientConfig,
}

impl<S> AgentClient<S>
where
    S: Service<A2ARequest, Response = A2AResponse, Error = A2AError>,
{
    /// Create a new agent client
    ///
    /// # Arguments
    ///
    /// * `service` - The Tower service that handles requests
    /// * `config` - Client configuration
    pub fn new(service: S, config: ClientConfig) -> Self {
        Self { service, config }
    }

    /// Get the client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a request context from the client configuration
    fn build_context(&self) -> RequestContext {
        // credentials are attached by the AuthLayer
        RequestContext::new(self.config.agent_url.clone()).with_timeout(self.config.timeout)
    }

    async fn execute(&mut self, operation: A2AOperation) -> Result<A2AResponse, A2AError> {
        let request = A2ARequest::new(operation, self.build_context());
        self.service.ready().await?.call(request).await
    }

    /// Submit a task and wait for the completed task
    ///
    /// # Errors
    ///
    /// * [`A2AError::Rejected`] when the agent refused the request as malformed
    /// * [`A2AError::Task`] when the agent's handler failed
    /// * a transport error (see [`A2AError::is_transport`]) when the agent could not be
    ///   reached, did not answer within the timeout, or answered with an unreadable body
    pub async fn send_task(&mut self, params: TaskSendParams) -> Result<Task, A2AError> {
        let task_id = params.id.clone();
        tracing::debug!(task_id = %task_id, session_id = %params.session_id, "sending task");

        self.execute(A2AOperation::SendTask(params))
            .await?
            .into_task()
            .ok_or_else(|| {
                A2AError::Protocol(format!("Expected task response for task {task_id}"))
            })
    }

    /// Submit `text` as a user message in `session_id` under a fresh task id
    pub async fn send_text(
        &mut self,
        text: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Result<Task, A2AError> {
        self.send_task(TaskSendParams::text(text, session_id)).await
    }

    /// Discover agent capabilities by fetching the Agent Card
    ///
    /// This retrieves the agent's metadata from `/.well-known/agent.json`
    pub async fn discover(&mut self) -> Result<AgentCard, A2AError> {
        self.execute(A2AOperation::DiscoverAgent)
            .await?
            .into_agent_card()
            .ok_or_else(|| A2AError::Protocol("Expected agent card response".into()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use crate::{
        codec::JsonRpcCodec,
        protocol::{
            agent::{AgentCapabilities, AgentCard},
            message::Message,
        },
        service::A2AProtocolService,
        transport::{mock::MockTransport, TransportResponse},
    };

    use super::*;

    fn client(transport: MockTransport) -> AgentClient<A2AProtocolService<MockTransport>> {
        let service = A2AProtocolService::new(transport, Arc::new(JsonRpcCodec));
        AgentClient::new(service, ClientConfig::new("http://mock.agent/"))
    }

    #[tokio::test]
    async fn test_send_task() {
        let transport = MockTransport::new(|req| {
            let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
            let params = &body["params"];
            let task = json!({
                "id": params["id"],
                "sessionId": params["sessionId"],
                "history": [params["message"], {"role": "agent", "parts": [{"type": "text", "text": "Sunny"}]}],
            });
            let body = json!({"jsonrpc": "2.0", "id": body["id"], "result": task});
            TransportResponse::new(200).body(serde_json::to_vec(&body).unwrap())
        });

        let params = TaskSendParams::new("task-123", "s-1", Message::user("Weather?"));
        let task = client(transport).send_task(params).await.unwrap();

        assert_eq!(task.id, "task-123");
        assert_eq!(task.session_id, "s-1");
        assert_eq!(task.reply_text().as_deref(), Some("Sunny"));
    }

    #[tokio::test]
    async fn test_send_task_rejected() {
        let transport = MockTransport::json(
            400,
            json!({"jsonrpc": "2.0", "id": null, "error": {"code": -32600, "message": "Invalid Request"}}),
        );

        let err = client(transport)
            .send_text("hello", "s-1")
            .await
            .unwrap_err();

        match err {
            A2AError::Rejected(error) => assert_eq!(error.code, -32600),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_task_handler_failure() {
        let transport = MockTransport::rpc(
            200,
            json!({"jsonrpc": "2.0", "error": {"code": -32603, "message": "boom"}}),
        );

        let err = client(transport)
            .send_text("hello", "s-1")
            .await
            .unwrap_err();

        match err {
            A2AError::Task { source } => {
                assert_eq!(source.code, -32603);
                assert_eq!(source.message, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_task_foreign_response_id() {
        let transport = MockTransport::json(
            200,
            json!({"jsonrpc": "2.0", "id": "someone-else", "error": {"code": -32603, "message": "boom"}}),
        );

        let err = client(transport)
            .send_text("hello", "s-1")
            .await
            .unwrap_err();

        assert!(matches!(err, A2AError::MalformedResponse(_)));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_send_task_unreachable() {
        let err = client(MockTransport::unreachable())
            .send_text("hello", "s-1")
            .await
            .unwrap_err();

        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_discover() {
        let card = AgentCard::new(
            "Test Agent",
            "A test agent",
            "http://mock.agent/",
            "1.0.0",
            AgentCapabilities::default(),
        );
        let transport = MockTransport::json(200, serde_json::to_value(&card).unwrap());

        let discovered = client(transport).discover().await.unwrap();

        assert_eq!(discovered, card);
    }
}

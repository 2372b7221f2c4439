//! Validation layer for A2A protocol requests and responses

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use tower_layer::Layer;
use tower_service::Service;

use crate::{
    protocol::{
        error::A2AError,
        message::{Part, Role},
        operation::A2AOperation,
        task::TaskSendParams,
    },
    service::{A2ARequest, A2AResponse},
};

/// Layer that validates A2A protocol requests and responses
#[derive(Clone, Debug, Default)]
pub struct A2AValidationLayer;

impl A2AValidationLayer {
    /// Create a new validation layer
    pub fn new() -> Self {
        Self
    }
}

impl<S> Layer<S> for A2AValidationLayer {
    type Service = A2AValidationService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        A2AValidationService { inner }
    }
}

/// Validation service that wraps an inner service
#[derive(Clone)]
pub struct A2AValidationService<S> {
    inner: S,
}

impl<S> A2AValidationService<S> {
    /// Validate an A2A request before it leaves the client
    fn validate_request(req: &A2ARequest) -> Result<(), A2AError> {
        if let A2AOperation::SendTask(params) = &req.operation {
            if params.id.is_empty() {
                return Err(A2AError::Validation("Task ID cannot be empty".into()));
            }
            if params.session_id.is_empty() {
                return Err(A2AError::Validation("Session ID cannot be empty".into()));
            }
            if params.message.role != Role::User {
                return Err(A2AError::Validation(
                    "Submitted message must have the user role".into(),
                ));
            }
            if params.message.parts.is_empty() {
                return Err(A2AError::Validation(
                    "Message must have at least one part".into(),
                ));
            }
            for part in &params.message.parts {
                if let Part::Text { text, .. } = part {
                    if text.is_empty() {
                        return Err(A2AError::Validation("Text part cannot be empty".into()));
                    }
                }
            }
        }

        if req.context.agent_url.is_empty() {
            return Err(A2AError::Validation("Agent URL cannot be empty".into()));
        }

        Ok(())
    }

    /// Validate an A2A response against the request that produced it
    fn validate_response(sent: Option<&TaskSendParams>, resp: &A2AResponse) -> Result<(), A2AError> {
        match resp {
            A2AResponse::Task(task) => {
                if let Some(params) = sent {
                    if task.id != params.id {
                        return Err(A2AError::Validation(format!(
                            "Agent answered task {} for submitted task {}",
                            task.id, params.id
                        )));
                    }
                    if task.session_id != params.session_id {
                        return Err(A2AError::Validation(format!(
                            "Agent changed session {} to {}",
                            params.session_id, task.session_id
                        )));
                    }
                }

                if task.last_role() != Some(Role::Agent) {
                    return Err(A2AError::Validation(
                        "Completed task history must end with an agent message".into(),
                    ));
                }
            }
            A2AResponse::AgentCard(card) => {
                if card.name.is_empty() {
                    return Err(A2AError::Validation("Agent name cannot be empty".into()));
                }
                if card.url.is_empty() {
                    return Err(A2AError::Validation("Agent URL cannot be empty".into()));
                }
            }
        }

        Ok(())
    }
}

impl<S> Service<A2ARequest> for A2AValidationService<S>
where
    S: Service<A2ARequest, Response = A2AResponse, Error = A2AError> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = A2AResponse;
    type Error = A2AError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: A2ARequest) -> Self::Future {
        if let Err(e) = Self::validate_request(&req) {
            return Box::pin(async move { Err(e) });
        }

        let sent = match &req.operation {
            A2AOperation::SendTask(params) => Some(params.clone()),
            A2AOperation::DiscoverAgent => None,
        };

        // take the service that was driven to readiness, leave a fresh clone behind
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        Box::pin(async move {
            let response = inner.call(req).await?;
            Self::validate_response(sent.as_ref(), &response)?;
            Ok(response)
        })
    }
}

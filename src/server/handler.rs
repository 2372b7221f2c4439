//! Task handlers: the agent-specific logic behind `tasks/send`

use std::{collections::HashMap, future::Future, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::protocol::{Message, Role, Task, TaskError, TaskSendParams, TaskState};

/// Handles one task submission
///
/// The server calls this once per valid `tasks/send` request. Returning `Err` sends the
/// error back in-band (HTTP 200 with a JSON-RPC `error`). Handlers are shared between
/// concurrent requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskHandler: Send + Sync {
    async fn on_send_task(&self, params: TaskSendParams) -> Result<Task, TaskError>;
}

#[async_trait]
impl<H: TaskHandler + ?Sized> TaskHandler for Arc<H> {
    async fn on_send_task(&self, params: TaskSendParams) -> Result<Task, TaskError> {
        (**self).on_send_task(params).await
    }
}

/// Turns the text of a user message into reply text
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, session_id: &str, query: &str) -> Result<String, TaskError>;
}

/// [`Responder`] backed by an async closure
pub struct FnResponder<F> {
    f: F,
}

/// Build a responder from `Fn(session_id, query) -> Future<Output = Result<String, TaskError>>`
pub fn responder_fn<F, Fut>(f: F) -> FnResponder<F>
where
    F: Fn(String, String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, TaskError>> + Send + 'static,
{
    FnResponder { f }
}

#[async_trait]
impl<F, Fut> Responder for FnResponder<F>
where
    F: Fn(String, String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, TaskError>> + Send + 'static,
{
    async fn respond(&self, session_id: &str, query: &str) -> Result<String, TaskError> {
        (self.f)(session_id.to_string(), query.to_string()).await
    }
}

type Sessions = Arc<RwLock<HashMap<String, Vec<Message>>>>;

/// Task handler that keeps a conversation history per session
///
/// For each submission it extracts the message text, asks the responder for a reply and
/// appends the user message and the reply to the session history in one step. The
/// returned task carries the whole session history and is marked completed.
///
/// Only user messages are accepted. Submissions on one session may run concurrently; their
/// entries are appended in the order the replies complete.
///
/// Sessions live as long as the handler: nothing expires or caps them, so a long-running
/// agent's memory grows with every session it has served.
pub struct SessionTaskHandler<R> {
    responder: R,
    sessions: Sessions,
}

impl<R: Responder> SessionTaskHandler<R> {
    pub fn new(responder: R) -> Self {
        Self {
            responder,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Snapshot of a session's history, oldest first
    pub async fn history(&self, session_id: &str) -> Vec<Message> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl<R: Responder> TaskHandler for SessionTaskHandler<R> {
    async fn on_send_task(&self, params: TaskSendParams) -> Result<Task, TaskError> {
        if params.message.role != Role::User {
            return Err(TaskError::invalid_params(
                "Submitted message must have the user role",
            ));
        }

        let query = params.message.text();
        if query.trim().is_empty() {
            return Err(TaskError::invalid_params("Message contains no text"));
        }

        tracing::debug!(task_id = %params.id, session_id = %params.session_id, "handling task");

        let reply = match self.responder.respond(&params.session_id, &query).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(task_id = %params.id, error = %e, "responder failed");
                return Err(e);
            }
        };

        let mut history = {
            let mut sessions = self.sessions.write().await;
            let session = sessions.entry(params.session_id.clone()).or_default();
            session.push(params.message);
            session.push(Message::agent(reply));
            session.clone()
        };

        // the submitted message and its reply are always returned
        if let Some(limit) = params.history_length {
            let keep = limit.max(2);
            if history.len() > keep {
                history.drain(..history.len() - keep);
            }
        }

        Ok(Task::new(params.id, params.session_id)
            .with_history(history)
            .with_state(TaskState::Completed))
    }
}

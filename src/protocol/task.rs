//! A2A task types and lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::message::{Message, Role};

/// A task in the A2A protocol
///
/// A task is one request/response unit of work. Its history is append-only: each
/// successful round trip adds the submitted user message followed by the agent reply.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Client-generated identifier of the task
    pub id: String,

    /// Conversation this task belongs to
    pub session_id: String,

    /// Explicit status, when the agent reports one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,

    /// Conversation history, oldest first
    #[serde(default)]
    pub history: Vec<Message>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl Task {
    /// Create a task with an empty history
    pub fn new(id: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            session_id: session_id.into(),
            status: None,
            history: Vec::new(),
            metadata: None,
        }
    }

    /// Set the task history
    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }

    /// Append a message to the history
    pub fn with_message(mut self, message: Message) -> Self {
        self.history.push(message);
        self
    }

    /// Update the task status, stamped with the current time
    pub fn with_state(mut self, state: TaskState) -> Self {
        self.status = Some(TaskStatus::now(state));
        self
    }

    /// Current state of the task
    ///
    /// Without an explicit status the task counts as completed once an agent message
    /// closes the history.
    pub fn state(&self) -> TaskState {
        match &self.status {
            Some(status) => status.state,
            None if self.last_role() == Some(Role::Agent) => TaskState::Completed,
            None => TaskState::Submitted,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state() == TaskState::Completed
    }

    pub fn last_role(&self) -> Option<Role> {
        self.history.last().map(|m| m.role)
    }

    /// Text of the reply that closes the history
    ///
    /// Only returned when the history holds more than the submitted message.
    pub fn reply_text(&self) -> Option<String> {
        if self.history.len() > 1 {
            self.history
                .last()
                .and_then(|m| m.first_text())
                .map(str::to_string)
        } else {
            None
        }
    }
}

/// Task status reported by an agent
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskStatus {
    pub state: TaskState,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl TaskStatus {
    pub fn now(state: TaskState) -> Self {
        Self {
            state,
            timestamp: Some(Utc::now()),
        }
    }
}

/// Task lifecycle: submitted → working → completed | failed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TaskState {
    Submitted,
    Working,
    Completed,
    Failed,
}

impl TaskState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Failed)
    }
}

fn new_session_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Parameters of a `tasks/send` call
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskSendParams {
    /// Client-generated task id
    pub id: String,

    /// Conversation id, reused across calls to keep continuity
    #[serde(default = "new_session_id")]
    pub session_id: String,

    /// The user message to act on
    pub message: Message,

    /// How many history entries the caller wants back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history_length: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl TaskSendParams {
    /// Create send parameters for an explicit task and session
    pub fn new(id: impl Into<String>, session_id: impl Into<String>, message: Message) -> Self {
        Self {
            id: id.into(),
            session_id: session_id.into(),
            message,
            history_length: None,
            metadata: None,
        }
    }

    /// Submit `text` as a new task in `session_id`, with a freshly generated task id
    pub fn text(text: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self::new(
            Uuid::new_v4().simple().to_string(),
            session_id,
            Message::user(text),
        )
    }

    /// Limit the number of history entries returned
    pub fn with_history_length(mut self, history_length: usize) -> Self {
        self.history_length = Some(history_length);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_implicit_state() {
        let task = Task::new("task-1", "s-1").with_message(Message::user("hi"));
        assert_eq!(task.state(), TaskState::Submitted);
        assert!(task.reply_text().is_none());

        let task = task.with_message(Message::agent("hello"));
        assert!(task.is_completed());
        assert_eq!(task.reply_text().as_deref(), Some("hello"));
    }

    #[test]
    fn test_explicit_state_wins() {
        let task = Task::new("task-1", "s-1")
            .with_message(Message::user("hi"))
            .with_message(Message::agent("partial"))
            .with_state(TaskState::Failed);

        assert_eq!(task.state(), TaskState::Failed);
        assert!(task.state().is_terminal());
    }

    #[test]
    fn test_task_wire_format() {
        let task = Task::new("task-123", "session-9").with_message(Message::user("Test"));
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["id"], "task-123");
        assert_eq!(json["sessionId"], "session-9");
        assert!(json["history"].is_array());
        assert!(json.get("status").is_none());
        assert!(json.get("session_id").is_none());
    }

    #[test]
    fn test_state_serialization() {
        let task = Task::new("t", "s").with_state(TaskState::Completed);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"]["state"], "completed");
        assert!(json["status"]["timestamp"].is_string());
    }

    #[test]
    fn test_send_params_default_session() {
        let params: TaskSendParams = serde_json::from_value(json!({
            "id": "task-1",
            "message": {"role": "user", "parts": [{"type": "text", "text": "hello"}]}
        }))
        .unwrap();

        assert_eq!(params.id, "task-1");
        assert!(!params.session_id.is_empty());
        assert!(params.history_length.is_none());
    }

    #[test]
    fn test_send_params_text() {
        let a = TaskSendParams::text("hello", "session-1");
        let b = TaskSendParams::text("hello", "session-1");

        assert_ne!(a.id, b.id);
        assert_eq!(a.session_id, b.session_id);
        assert_eq!(a.message.role, Role::User);
    }
}

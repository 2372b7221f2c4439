//! Core A2A protocol types and definitions

pub mod agent;
pub mod error;
pub mod jsonrpc;
pub mod message;
pub mod operation;
pub mod task;

pub use agent::{AgentCapabilities, AgentCard, AgentSkill, AGENT_CARD_PATH};
pub use error::{A2AError, TaskError};
pub use jsonrpc::{A2ACall, JsonRpcError, JsonRpcRequest, JsonRpcResponse, TASKS_SEND};
pub use message::{Message, Part, Role};
pub use operation::A2AOperation;
pub use task::{Task, TaskSendParams, TaskState, TaskStatus};

//! A2A protocol operations

use super::{agent::AGENT_CARD_PATH, task::TaskSendParams};

/// Operations a client can perform against an agent
#[derive(Debug, Clone, PartialEq)]
pub enum A2AOperation {
    /// Submit a task and wait for the agent's reply (`tasks/send`)
    SendTask(TaskSendParams),

    /// Fetch the agent's card
    DiscoverAgent,
}

impl A2AOperation {
    /// Get the HTTP endpoint path for this operation
    pub fn endpoint(&self) -> &'static str {
        match self {
            A2AOperation::SendTask(_) => "/",
            A2AOperation::DiscoverAgent => AGENT_CARD_PATH,
        }
    }

    /// Get the HTTP method for this operation
    pub fn method(&self) -> &'static str {
        match self {
            A2AOperation::SendTask(_) => "POST",
            A2AOperation::DiscoverAgent => "GET",
        }
    }
}

//! # A2A Runtime
//!
//! A Tower-based runtime for the Agent2Agent (A2A) protocol.
//!
//! An agent is an HTTP service that publishes a self-describing card at
//! `/.well-known/agent.json` and accepts JSON-RPC 2.0 `tasks/send` requests at `/`.
//! This crate provides both sides of that conversation:
//!
//! - **Server**: an axum router that serves the card and dispatches task submissions
//!   to a pluggable [`server::TaskHandler`]
//! - **Client**: a Tower service stack (transport, codec, auth, validation) wrapped in
//!   [`client::AgentClient`]
//! - **Discovery**: concurrent card fetching from a registry of base URLs
//! - **Orchestrator**: routes work to discovered agents by name
//!
//! ## Example
//!
//! ```rust,no_run
//! use a2a_runtime::prelude::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let url = "http://localhost:10002".parse()?;
//!     let mut client = A2AClientBuilder::new_http(url)
//!         .with_bearer_auth("token123")
//!         .with_timeout(Duration::from_secs(30))
//!         .build()?;
//!
//!     let agent_card = client.discover().await?;
//!     println!("Connected to: {}", agent_card.name);
//!
//!     let task = client.send_text("Hello!", "session-1").await?;
//!     println!("Reply: {}", task.reply_text().unwrap_or_default());
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod codec;
pub mod discovery;
pub mod layer;
pub mod orchestrator;
pub mod protocol;
pub mod server;
pub mod service;
pub mod transport;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        client::{A2AClientBuilder, AgentClient},
        discovery::{load_registry, DiscoveryClient, DiscoveryConfig, DiscoveryReport},
        orchestrator::Orchestrator,
        protocol::error::{A2AError, TaskError},
        protocol::{
            AgentCapabilities, AgentCard, AgentSkill, Message, Part, Role, Task,
            TaskSendParams, TaskState, TaskStatus,
        },
        server::{
            responder_fn, A2AServer, Responder, ServerConfig, SessionTaskHandler, TaskHandler,
        },
    };
}

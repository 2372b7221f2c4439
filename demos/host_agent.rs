//! A host agent that routes messages to the agents listed in a registry
//!
//! Start one or more child agents, list their base URLs in a registry file, then:
//!
//! ```sh
//! cargo run --example host_agent -- --registry demos/registry.json
//! ```
//!
//! Messages of the form `AgentName: text` are delegated to `AgentName`; `list` names
//! the known agents.

use std::{path::PathBuf, sync::Arc};

use a2a_runtime::prelude::*;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Serve an A2A host agent that delegates to discovered agents")]
struct Args {
    /// Host to bind the host agent server to
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Port for the host agent server
    #[arg(long, default_value_t = 10000)]
    port: u16,

    /// JSON file listing child agent base URLs
    #[arg(long, default_value = "registry.json")]
    registry: PathBuf,
}

async fn route(
    orchestrator: &Orchestrator,
    session_id: &str,
    query: &str,
) -> Result<String, TaskError> {
    if query.trim().eq_ignore_ascii_case("list") {
        return Ok(orchestrator.list_agents().join(", "));
    }

    let Some((agent, message)) = query.split_once(':') else {
        return Ok(format!(
            "Address an agent as 'AgentName: message'. Available agents: {}",
            orchestrator.list_agents().join(", ")
        ));
    };

    match orchestrator
        .delegate_task(agent.trim(), message.trim(), session_id)
        .await
    {
        Ok(reply) => Ok(reply),
        Err(e @ A2AError::UnknownAgent(_)) => Err(TaskError::invalid_params(e.to_string())),
        Err(e) => Err(TaskError::internal(e.to_string())),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    let urls = load_registry(&args.registry);
    let orchestrator =
        Arc::new(Orchestrator::discover(&DiscoveryClient::default(), &urls).await);

    let skill = AgentSkill::new("orchestrate_agents", "Orchestrate Agents and Tasks")
        .with_description("Routes user requests to the appropriate child agent")
        .with_tags(["routing", "orchestration"])
        .with_examples(["list", "EchoAgent: hello"]);

    let card = AgentCard::new(
        "HostAgent",
        "Coordinates the agents it discovered from its registry.",
        format!("http://{}:{}/", args.host, args.port),
        "1.0.0",
        AgentCapabilities::new(),
    )
    .with_skill(skill);

    let handler = SessionTaskHandler::new(responder_fn(move |session_id, query| {
        let orchestrator = orchestrator.clone();
        async move { route(&orchestrator, &session_id, &query).await }
    }));

    A2AServer::new(ServerConfig::new(args.host, args.port), card, handler)
        .serve()
        .await?;

    Ok(())
}

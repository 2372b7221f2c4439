//! A minimal A2A agent that echoes every message back
//!
//! ```sh
//! cargo run --example echo_agent -- --port 10001 --name EchoAgent
//! ```

use a2a_runtime::prelude::*;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Serve an A2A agent that repeats what it is told")]
struct Args {
    /// Host to bind the server to
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Port number for the server
    #[arg(long, default_value_t = 10001)]
    port: u16,

    /// Name published in the agent card
    #[arg(long, default_value = "EchoAgent")]
    name: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,a2a_runtime=debug".into()),
        )
        .init();

    let args = Args::parse();

    let skill = AgentSkill::new("echo", "Echo messages")
        .with_description("Replies with the text it received, tagged with the session id")
        .with_tags(["echo", "test"])
        .with_examples(["hello there"]);

    let card = AgentCard::new(
        args.name,
        "This agent repeats every message it receives.",
        format!("http://{}:{}/", args.host, args.port),
        "1.0.0",
        AgentCapabilities::new(),
    )
    .with_skill(skill);

    let handler = SessionTaskHandler::new(responder_fn(|session_id, query| async move {
        Ok(format!("[{session_id}] {query}"))
    }));

    A2AServer::new(ServerConfig::new(args.host, args.port), card, handler)
        .serve()
        .await?;

    Ok(())
}

//! Host-side routing of work to discovered agents

use std::{collections::BTreeMap, time::Duration};

use url::Url;

use crate::{
    client::{config::DEFAULT_TIMEOUT, A2AClientBuilder, AgentClient},
    discovery::DiscoveryClient,
    protocol::{A2AError, AgentCard},
};

struct Connector {
    card: AgentCard,
    client: AgentClient,
}

/// Routes tasks to remote agents by name
///
/// One connector is kept per card name. The orchestrator itself holds no conversation
/// state; the caller picks the session id passed to [`Orchestrator::delegate_task`].
pub struct Orchestrator {
    connectors: BTreeMap<String, Connector>,
}

impl Orchestrator {
    /// Build connectors for `cards` with the default request timeout
    pub fn new(cards: Vec<AgentCard>) -> Self {
        Self::with_client(cards, reqwest::Client::new(), DEFAULT_TIMEOUT)
    }

    /// Build connectors sharing one reqwest client
    ///
    /// A card whose URL does not parse is skipped. When two cards share a name the later
    /// one replaces the earlier.
    pub fn with_client(cards: Vec<AgentCard>, http: reqwest::Client, timeout: Duration) -> Self {
        let mut connectors = BTreeMap::new();

        for card in cards {
            let url = match Url::parse(&card.url) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!(agent = %card.name, url = %card.url, error = %e, "skipping agent with invalid url");
                    continue;
                }
            };

            let client = match A2AClientBuilder::with_http_client(url, http.clone())
                .with_timeout(timeout)
                .build()
            {
                Ok(client) => client,
                Err(e) => {
                    tracing::warn!(agent = %card.name, error = %e, "skipping agent");
                    continue;
                }
            };

            if connectors.contains_key(&card.name) {
                tracing::warn!(agent = %card.name, url = %card.url, "duplicate agent name, replacing earlier card");
            }
            connectors.insert(card.name.clone(), Connector { card, client });
        }

        if connectors.is_empty() {
            tracing::warn!("orchestrator started with no agents");
        } else {
            tracing::info!(agents = ?connectors.keys().collect::<Vec<_>>(), "orchestrator ready");
        }

        Self { connectors }
    }

    /// Discover the agents behind `base_urls` and build connectors for the reachable ones
    ///
    /// Connectors reuse the discovery client's reqwest client, so task traffic goes through
    /// the same connection pool and default headers as the card fetches.
    pub async fn discover(discovery: &DiscoveryClient, base_urls: &[String]) -> Self {
        let cards = discovery.fetch_agent_cards(base_urls).await;
        Self::with_client(cards, discovery.http().clone(), DEFAULT_TIMEOUT)
    }

    /// Names of the registered agents, sorted
    pub fn list_agents(&self) -> Vec<String> {
        self.connectors.keys().cloned().collect()
    }

    pub fn card(&self, name: &str) -> Option<&AgentCard> {
        self.connectors.get(name).map(|c| &c.card)
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    /// Send `message` to the agent called `agent_name` within `session_id`
    ///
    /// Returns the text of the reply closing the task history, or an empty string when
    /// the agent returned no reply.
    pub async fn delegate_task(
        &self,
        agent_name: &str,
        message: &str,
        session_id: &str,
    ) -> Result<String, A2AError> {
        let connector = self
            .connectors
            .get(agent_name)
            .ok_or_else(|| A2AError::UnknownAgent(agent_name.to_string()))?;

        tracing::debug!(agent = %agent_name, session_id = %session_id, "delegating task");
        let mut client = connector.client.clone();
        let task = client.send_text(message, session_id).await?;

        Ok(task.reply_text().unwrap_or_default())
    }
}

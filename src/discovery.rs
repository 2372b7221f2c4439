//! Agent discovery from a registry of base URLs
//!
//! Each base URL is asked for its card at `/.well-known/agent.json`. Fetches run
//! concurrently, and one agent failing never affects the others.

use std::{path::Path, time::Duration};

use futures::future::join_all;
use url::Url;

use crate::{
    client::A2AClientBuilder,
    protocol::{A2AError, AgentCard},
};

/// Default timeout of a single card fetch
pub const DEFAULT_DISCOVERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Load a registry file: a JSON array of agent base URLs
///
/// A missing or unparsable registry yields an empty list.
pub fn load_registry(path: impl AsRef<Path>) -> Vec<String> {
    let path = path.as_ref();

    let contents = match std::fs::read(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::info!(path = %path.display(), error = %e, "registry file not readable");
            return Vec::new();
        }
    };

    match serde_json::from_slice::<Vec<String>>(&contents) {
        Ok(urls) => {
            tracing::debug!(path = %path.display(), count = urls.len(), "loaded registry");
            urls
        }
        Err(e) => {
            tracing::info!(path = %path.display(), error = %e, "invalid JSON in registry file");
            Vec::new()
        }
    }
}

/// Discovery configuration
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Upper bound on one card fetch, connect through body
    pub timeout: Duration,
}

impl DiscoveryConfig {
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_DISCOVERY_TIMEOUT,
        }
    }

    /// Set the per-fetch timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of asking one base URL for its card
#[derive(Debug)]
pub struct DiscoveryReport {
    pub base_url: String,
    pub outcome: Result<AgentCard, A2AError>,
}

impl DiscoveryReport {
    pub fn card(&self) -> Option<&AgentCard> {
        self.outcome.as_ref().ok()
    }
}

/// Fetches agent cards from a list of base URLs
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    http: reqwest::Client,
    config: DiscoveryConfig,
}

impl DiscoveryClient {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Share an existing reqwest client (and its connection pool)
    pub fn with_client(http: reqwest::Client, config: DiscoveryConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// The reqwest client used for card fetches
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Ask every base URL for its card
    ///
    /// Returns one report per URL, in input order.
    pub async fn discover(&self, base_urls: &[String]) -> Vec<DiscoveryReport> {
        let fetches = base_urls.iter().map(|base_url| async move {
            DiscoveryReport {
                base_url: base_url.clone(),
                outcome: self.fetch_card(base_url).await,
            }
        });

        join_all(fetches).await
    }

    /// Fetch the cards of every reachable agent, in input order
    ///
    /// Failed URLs are logged and skipped; an empty result is not an error.
    pub async fn fetch_agent_cards(&self, base_urls: &[String]) -> Vec<AgentCard> {
        let cards: Vec<AgentCard> = self
            .discover(base_urls)
            .await
            .into_iter()
            .filter_map(|report| match report.outcome {
                Ok(card) => Some(card),
                Err(e) => {
                    tracing::warn!(base_url = %report.base_url, error = %e, "skipping agent");
                    None
                }
            })
            .collect();

        tracing::info!(requested = base_urls.len(), found = cards.len(), "agent discovery finished");
        cards
    }

    async fn fetch_card(&self, base_url: &str) -> Result<AgentCard, A2AError> {
        let url = Url::parse(base_url)?;
        let mut client = A2AClientBuilder::with_http_client(url, self.http.clone())
            .with_timeout(self.config.timeout)
            .with_validation(false)
            .build()?;

        client.discover().await
    }
}

impl Default for DiscoveryClient {
    fn default() -> Self {
        Self::new(DiscoveryConfig::default())
    }
}

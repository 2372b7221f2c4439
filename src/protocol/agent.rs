//! Agent discovery and capability types

use serde::{Deserialize, Serialize};

use super::error::A2AError;

/// Path an agent publishes its card under, relative to its base URL
pub const AGENT_CARD_PATH: &str = "/.well-known/agent.json";

fn default_modes() -> Vec<String> {
    vec!["text".to_string()]
}

/// Agent Card for agent discovery
///
/// The Agent Card is published at `/.well-known/agent.json` and describes the agent's
/// identity, where to reach it, what it can do and which protocol extensions it supports.
/// It is built once at startup and never changes while the agent runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    /// Name of the agent, unique among the agents an orchestrator knows
    pub name: String,

    /// Human-readable description of the agent
    pub description: String,

    /// Base URL for both discovery and task submission
    pub url: String,

    /// Agent version
    pub version: String,

    /// Agent capabilities
    pub capabilities: AgentCapabilities,

    /// Skills the agent advertises
    pub skills: Vec<AgentSkill>,

    /// Content types accepted when a skill does not say otherwise
    #[serde(default = "default_modes")]
    pub default_input_modes: Vec<String>,

    /// Content types produced when a skill does not say otherwise
    #[serde(default = "default_modes")]
    pub default_output_modes: Vec<String>,
}

impl AgentCard {
    /// Create a new agent card with no skills and text-only modes
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        version: impl Into<String>,
        capabilities: AgentCapabilities,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            url: url.into(),
            version: version.into(),
            capabilities,
            skills: Vec::new(),
            default_input_modes: default_modes(),
            default_output_modes: default_modes(),
        }
    }

    /// Add a skill to the agent card
    pub fn with_skill(mut self, skill: AgentSkill) -> Self {
        self.skills.push(skill);
        self
    }

    /// Set the default input content types
    pub fn with_input_modes(mut self, modes: Vec<String>) -> Self {
        self.default_input_modes = modes;
        self
    }

    /// Set the default output content types
    pub fn with_output_modes(mut self, modes: Vec<String>) -> Self {
        self.default_output_modes = modes;
        self
    }

    /// Parse and validate a discovery document
    ///
    /// A document that is not JSON, or that lacks one of the required fields, is a
    /// validation error.
    pub fn from_slice(body: &[u8]) -> Result<Self, A2AError> {
        serde_json::from_slice(body)
            .map_err(|e| A2AError::Validation(format!("Invalid agent card: {}", e)))
    }
}

/// Agent capabilities
///
/// Only advertised. The runtime serves the non-streaming, non-push path whatever these say.
#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    /// Supports streaming responses
    #[serde(default)]
    pub streaming: bool,

    /// Supports push notifications via webhooks
    #[serde(default)]
    pub push_notifications: bool,

    /// Reports the history of task state transitions
    #[serde(default)]
    pub state_transition_history: bool,
}

impl AgentCapabilities {
    /// Create capabilities with default values (all false)
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable streaming
    pub fn with_streaming(mut self) -> Self {
        self.streaming = true;
        self
    }

    /// Enable push notifications
    pub fn with_push_notifications(mut self) -> Self {
        self.push_notifications = true;
        self
    }

    /// Enable state transition history
    pub fn with_state_transition_history(mut self) -> Self {
        self.state_transition_history = true;
        self
    }
}

/// A single skill an agent offers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AgentSkill {
    /// Unique identifier of the skill
    pub id: String,

    /// Human-friendly name
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Keywords to aid discovery
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// Sample queries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_modes: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_modes: Option<Vec<String>>,
}

impl AgentSkill {
    /// Create a skill with only its id and name
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            tags: None,
            examples: None,
            input_modes: None,
            output_modes: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_examples<I, S>(mut self, examples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.examples = Some(examples.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_input_modes(mut self, modes: Vec<String>) -> Self {
        self.input_modes = Some(modes);
        self
    }

    pub fn with_output_modes(mut self, modes: Vec<String>) -> Self {
        self.output_modes = Some(modes);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn reddit_card() -> AgentCard {
        AgentCard::new(
            "RedditAgent",
            "Fetches the latest posts from a subreddit",
            "http://localhost:10002/",
            "1.0.0",
            AgentCapabilities::new(),
        )
        .with_skill(
            AgentSkill::new("fetch_reddit_post", "Fetch Latest Reddit Posts")
                .with_tags(["reddit", "news"])
                .with_examples(["What are the latest posts on AI_Agents?"]),
        )
    }

    #[test]
    fn test_agent_card_creation() {
        let card = reddit_card();

        assert_eq!(card.name, "RedditAgent");
        assert_eq!(card.skills.len(), 1);
        assert_eq!(card.default_input_modes, vec!["text".to_string()]);
        assert!(!card.capabilities.streaming);
    }

    #[test]
    fn test_agent_capabilities() {
        let caps = AgentCapabilities::default();
        assert!(!caps.streaming);
        assert!(!caps.push_notifications);
        assert!(!caps.state_transition_history);

        let caps = caps.with_streaming().with_state_transition_history();
        assert!(caps.streaming);
        assert!(caps.state_transition_history);
    }

    #[test]
    fn test_optional_skill_fields_omitted() {
        let card = AgentCard::new("A", "B", "http://a", "1", AgentCapabilities::new())
            .with_skill(AgentSkill::new("s", "Skill"));
        let json = serde_json::to_value(&card).unwrap();

        let skill = &json["skills"][0];
        assert!(skill.get("description").is_none());
        assert!(skill.get("examples").is_none());
        assert!(skill.get("inputModes").is_none());
        assert_eq!(json["capabilities"]["pushNotifications"], false);
        assert_eq!(json["defaultOutputModes"], json!(["text"]));
    }

    #[test]
    fn test_agent_card_round_trip() {
        let bare = AgentCard::new("A", "B", "http://a", "1", AgentCapabilities::new());
        let full = reddit_card()
            .with_input_modes(vec!["text".into(), "text/plain".into()])
            .with_skill(
                AgentSkill::new("summarize", "Summarize")
                    .with_description("Summarizes text")
                    .with_input_modes(vec!["text".into()])
                    .with_output_modes(vec!["text/markdown".into()]),
            );

        for card in [bare, full] {
            let json = serde_json::to_vec(&card).unwrap();
            assert_eq!(AgentCard::from_slice(&json).unwrap(), card);
        }
    }

    #[test]
    fn test_missing_required_field_is_validation_error() {
        let mut doc = serde_json::to_value(reddit_card()).unwrap();
        doc.as_object_mut().unwrap().remove("version");

        let err = AgentCard::from_slice(&serde_json::to_vec(&doc).unwrap()).unwrap_err();
        assert!(matches!(err, A2AError::Validation(_)));
    }

    #[test]
    fn test_default_modes_applied_on_parse() {
        let doc = json!({
            "name": "SearchAgent",
            "description": "Searches the web",
            "url": "http://localhost:10001/",
            "version": "1.0.0",
            "capabilities": {},
            "skills": []
        });

        let card = AgentCard::from_slice(&serde_json::to_vec(&doc).unwrap()).unwrap();
        assert_eq!(card.default_input_modes, vec!["text".to_string()]);
        assert_eq!(card.capabilities, AgentCapabilities::default());
    }
}

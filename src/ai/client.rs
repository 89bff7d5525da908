use super::config::{AgentConfig, Provider};
use super::prompt::Conversation;
use super::providers::{ProviderError, backend_for};
use crate::content::PortfolioContent;
use crate::types::{AgentChatMessage, Locale};
use reqwest::Client;
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("no AI provider is configured")]
    NotConfigured,

    /// Every candidate failed; carries the last failure.
    #[error("{provider} request failed: {message}")]
    RequestFailed { provider: Provider, message: String },

    #[error("failed to serialize portfolio snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}

pub type AgentResult<T> = Result<T, AgentError>;

/// One visitor question with its context.
#[derive(Clone, Copy, Debug)]
pub struct AgentRequest<'a> {
    pub locale: Locale,
    pub content: &'a PortfolioContent,
    pub user_message: &'a str,
    /// Prior turns, seed greeting already removed.
    pub history: &'a [AgentChatMessage],
}

/// Sends questions to the first provider that answers.
#[derive(Clone, Debug)]
pub struct PortfolioAgent {
    config: AgentConfig,
    http: Client,
}

impl PortfolioAgent {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(AgentConfig::from_env())
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    pub async fn ask(&self, request: &AgentRequest<'_>) -> AgentResult<String> {
        let candidates = self.config.resolve_candidates();
        if candidates.is_empty() {
            return Err(AgentError::NotConfigured);
        }

        let conversation = Conversation::new(
            request.locale,
            request.content,
            request.user_message,
            request.history,
        )?;

        let mut last_failure: Option<(Provider, ProviderError)> = None;
        for target in candidates {
            let backend = backend_for(target);
            let provider = backend.provider();
            debug!(%provider, turns = conversation.turns.len(), "sending chat request");

            match backend.complete(&self.http, &conversation).await {
                Ok(reply) => {
                    debug!(%provider, chars = reply.len(), "provider answered");
                    return Ok(reply);
                }
                Err(err) => {
                    warn!(%provider, "AI provider failed: {err}");
                    last_failure = Some((provider, err));
                }
            }
        }

        // The candidate list was non-empty, so a failure was recorded.
        match last_failure {
            Some((provider, err)) => Err(AgentError::RequestFailed {
                provider,
                message: err.to_string(),
            }),
            None => Err(AgentError::NotConfigured),
        }
    }
}

impl Default for PortfolioAgent {
    fn default() -> Self {
        Self::new(AgentConfig::default())
    }
}

/// Portfolio assistant client
///
/// Sends a visitor question, the recent conversation and a snapshot of the
/// portfolio to a hosted language model, falling back across providers.
///
/// # Architecture
///
/// - `config` - Provider routing from an explicit [`AgentConfig`]
/// - `prompt` - System prompt and bounded history
/// - `providers` - Wire formats (Gemini, OpenAI-compatible)
/// - `client` - [`PortfolioAgent`], the sequential fallback loop
///
/// # Usage
///
/// ```rust,no_run
/// use folio::ai::{AgentRequest, PortfolioAgent};
/// use folio::content::PortfolioContent;
/// use folio::types::Locale;
///
/// # async fn example() -> anyhow::Result<()> {
/// let agent = PortfolioAgent::from_env();
/// let content = PortfolioContent::bundled(Locale::En)?;
/// let reply = agent
///     .ask(&AgentRequest {
///         locale: Locale::En,
///         content: &content,
///         user_message: "How can I reach you?",
///         history: &[],
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
pub mod config;
pub mod prompt;
pub mod providers;

mod client;

pub use client::{AgentError, AgentRequest, AgentResult, PortfolioAgent};
pub use config::{
    AgentConfig, Provider, ProviderFamily, ProviderRequestConfig, provider_order,
    resolve_candidates,
};
pub use prompt::{Conversation, MAX_HISTORY_MESSAGES, build_system_prompt};
pub use providers::{ProviderBackend, ProviderError, ProviderReply};

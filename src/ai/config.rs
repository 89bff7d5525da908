//! Provider selection.
//!
//! Every setting is read from an [`AgentConfig`], an immutable snapshot of
//! named values. Turning that snapshot into an ordered list of
//! [`ProviderRequestConfig`]s is a pure function, so the routing rules can be
//! tested without touching the process environment.

use reqwest::Url;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const PROVIDER_NAMES: &[&str] = &["AI_PROVIDER", "VITE_AI_PROVIDER"];
/// Shared key from older deployments. Only the preferred provider may use it.
pub const LEGACY_KEY_NAMES: &[&str] = &["AI_API_KEY", "VITE_AI_API_KEY"];
pub const LEGACY_MODEL_NAMES: &[&str] = &["AI_MODEL", "VITE_AI_MODEL"];
pub const LEGACY_URL_NAMES: &[&str] = &["AI_API_URL", "VITE_AI_API_URL"];
pub const OPEN_ROUTER_SITE_URL: &str = "OPEN_ROUTER_SITE_URL";
pub const OPEN_ROUTER_APP_NAME: &str = "OPEN_ROUTER_APP_NAME";

pub const DEFAULT_PROVIDER: Provider = Provider::Gemini;
pub const CANONICAL_ORDER: [Provider; 4] = [
    Provider::Gemini,
    Provider::OpenRouter,
    Provider::Groq,
    Provider::OpenAi,
];

const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_OPEN_ROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Provider {
    Gemini,
    OpenRouter,
    Groq,
    OpenAi,
}

/// Wire protocol spoken by a provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderFamily {
    Gemini,
    OpenAiCompatible,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenRouter => "openrouter",
            Provider::Groq => "groq",
            Provider::OpenAi => "openai",
        }
    }

    pub fn family(self) -> ProviderFamily {
        match self {
            Provider::Gemini => ProviderFamily::Gemini,
            Provider::OpenRouter | Provider::Groq | Provider::OpenAi => {
                ProviderFamily::OpenAiCompatible
            }
        }
    }

    fn env_prefix(self) -> &'static str {
        match self {
            Provider::Gemini => "GEMINI",
            Provider::OpenRouter => "OPEN_ROUTER",
            Provider::Groq => "GROQ",
            Provider::OpenAi => "OPENAI",
        }
    }

    /// Key names for this provider, highest precedence first.
    pub fn key_names(self) -> &'static [&'static str] {
        match self {
            Provider::Gemini => &["GEMINI_API_KEY", "VITE_GEMINI_API_KEY", "GOOGLE_API_KEY"],
            Provider::OpenRouter => &[
                "OPEN_ROUTER_API_KEY",
                "OPENROUTER_API_KEY",
                "VITE_OPEN_ROUTER_API_KEY",
            ],
            Provider::Groq => &["GROQ_API_KEY", "VITE_GROQ_API_KEY"],
            Provider::OpenAi => &["OPENAI_API_KEY", "VITE_OPENAI_API_KEY"],
        }
    }

    pub fn model_name(self) -> String {
        format!("{}_MODEL", self.env_prefix())
    }

    pub fn url_name(self) -> String {
        format!("{}_API_URL", self.env_prefix())
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::Gemini => "gemini-2.5-flash",
            Provider::OpenRouter => "openrouter/auto",
            Provider::Groq => "llama-3.3-70b-versatile",
            Provider::OpenAi => "gpt-4o-mini",
        }
    }

    fn default_url(self, model: &str) -> String {
        match self {
            Provider::Gemini => {
                format!("{DEFAULT_GEMINI_API_BASE}/models/{model}:generateContent")
            }
            Provider::OpenRouter => DEFAULT_OPEN_ROUTER_API_URL.to_string(),
            Provider::Groq => DEFAULT_GROQ_API_URL.to_string(),
            Provider::OpenAi => DEFAULT_OPENAI_API_URL.to_string(),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported AI provider: {0}")]
pub struct UnknownProvider(pub String);

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(Provider::Gemini),
            "openrouter" | "open_router" | "open-router" => Ok(Provider::OpenRouter),
            "groq" => Ok(Provider::Groq),
            "openai" => Ok(Provider::OpenAi),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

/// Resolved target for one attempt.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderRequestConfig {
    pub provider: Provider,
    pub api_key: String,
    pub model: String,
    /// Final endpoint. For Gemini it already carries the `key` query parameter.
    pub api_url: String,
    pub headers: Vec<(&'static str, String)>,
}

// Keys stay out of logs.
impl fmt::Debug for ProviderRequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRequestConfig")
            .field("provider", &self.provider)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// Named configuration values, trimmed; blank values count as unset.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AgentConfig {
    values: BTreeMap<String, String>,
}

fn is_key_name(name: &str) -> bool {
    LEGACY_KEY_NAMES.contains(&name)
        || CANONICAL_ORDER
            .iter()
            .any(|provider| provider.key_names().contains(&name))
}

// Keys stay out of logs.
impl fmt::Debug for AgentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: BTreeMap<&str, &str> = self
            .values
            .iter()
            .map(|(name, value)| {
                let shown = if is_key_name(name) { "<redacted>" } else { value.as_str() };
                (name.as_str(), shown)
            })
            .collect();
        f.debug_struct("AgentConfig").field("values", &values).finish()
    }
}

impl AgentConfig {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let values = pairs
            .into_iter()
            .filter_map(|(name, value)| {
                let value = value.as_ref().trim();
                (!value.is_empty()).then(|| (name.into(), value.to_string()))
            })
            .collect();
        Self { values }
    }

    /// Snapshot of every known setting currently present in the environment.
    pub fn from_env() -> Self {
        let known = known_names();
        Self::from_pairs(std::env::vars().filter(|(name, _)| known.contains(name)))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    fn first_of<S: AsRef<str>>(&self, names: &[S]) -> Option<&str> {
        names.iter().find_map(|name| self.get(name.as_ref()))
    }

    pub fn preferred_provider(&self) -> Provider {
        match self.first_of(PROVIDER_NAMES) {
            Some(raw) => raw.parse().unwrap_or_else(|err: UnknownProvider| {
                tracing::warn!("{err}; falling back to {DEFAULT_PROVIDER}");
                DEFAULT_PROVIDER
            }),
            None => DEFAULT_PROVIDER,
        }
    }

    pub fn resolve_candidates(&self) -> Vec<ProviderRequestConfig> {
        resolve_candidates(self)
    }

    /// True when at least one provider has a usable key. No I/O.
    pub fn is_configured(&self) -> bool {
        !self.resolve_candidates().is_empty()
    }
}

/// Every variable name [`AgentConfig::from_env`] picks up.
pub fn known_names() -> Vec<String> {
    let mut names: Vec<String> = PROVIDER_NAMES
        .iter()
        .chain(LEGACY_KEY_NAMES)
        .chain(LEGACY_MODEL_NAMES)
        .chain(LEGACY_URL_NAMES)
        .chain([&OPEN_ROUTER_SITE_URL, &OPEN_ROUTER_APP_NAME])
        .map(|name| name.to_string())
        .collect();
    for provider in CANONICAL_ORDER {
        names.extend(provider.key_names().iter().map(|name| name.to_string()));
        names.push(provider.model_name());
        names.push(provider.url_name());
    }
    names
}

/// Preferred provider first, then the canonical order without duplicates.
pub fn provider_order(preferred: Provider) -> Vec<Provider> {
    let mut order = Vec::with_capacity(CANONICAL_ORDER.len());
    for provider in std::iter::once(preferred).chain(CANONICAL_ORDER) {
        if !order.contains(&provider) {
            order.push(provider);
        }
    }
    order
}

fn parse_endpoint(provider: Provider, raw: &str) -> Option<Url> {
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(err) => {
            tracing::warn!(%provider, url = raw, "ignoring provider with invalid endpoint: {err}");
            None
        }
    }
}

fn resolve_one(
    config: &AgentConfig,
    provider: Provider,
    preferred: Provider,
) -> Option<ProviderRequestConfig> {
    let is_preferred = provider == preferred;
    let api_key = config
        .first_of(provider.key_names())
        .or_else(|| {
            is_preferred
                .then(|| config.first_of(LEGACY_KEY_NAMES))
                .flatten()
        })?
        .to_string();

    let model = config
        .get(&provider.model_name())
        .or_else(|| {
            is_preferred
                .then(|| config.first_of(LEGACY_MODEL_NAMES))
                .flatten()
        })
        .unwrap_or(provider.default_model())
        .to_string();

    let configured_url = config.get(&provider.url_name()).or_else(|| {
        is_preferred
            .then(|| config.first_of(LEGACY_URL_NAMES))
            .flatten()
    });
    let raw_url = configured_url
        .map(str::to_string)
        .unwrap_or_else(|| provider.default_url(&model));
    let mut url = parse_endpoint(provider, &raw_url)?;

    if provider.family() == ProviderFamily::Gemini
        && !url.query_pairs().any(|(name, _)| name == "key")
    {
        url.query_pairs_mut().append_pair("key", &api_key);
    }

    let mut headers = Vec::new();
    if provider == Provider::OpenRouter {
        if let Some(site) = config.get(OPEN_ROUTER_SITE_URL) {
            headers.push(("HTTP-Referer", site.to_string()));
        }
        if let Some(app) = config.get(OPEN_ROUTER_APP_NAME) {
            headers.push(("X-Title", app.to_string()));
        }
    }

    Some(ProviderRequestConfig {
        provider,
        api_key,
        model,
        api_url: url.to_string(),
        headers,
    })
}

/// Ordered attempt list; providers without a key are left out.
pub fn resolve_candidates(config: &AgentConfig) -> Vec<ProviderRequestConfig> {
    let preferred = config.preferred_provider();
    provider_order(preferred)
        .into_iter()
        .filter_map(|provider| resolve_one(config, provider, preferred))
        .collect()
}

use crate::content::PortfolioContent;
use crate::types::{AgentChatMessage, Locale};

/// Prior turns forwarded with each question.
pub const MAX_HISTORY_MESSAGES: usize = 10;
pub const TEMPERATURE: f64 = 0.35;
pub const MAX_OUTPUT_TOKENS: u32 = 500;

pub const SECTION_ANCHORS: [&str; 9] = [
    "#inicio",
    "#habilidades",
    "#proyectos",
    "#logros",
    "#experiencia",
    "#formacion",
    "#timeline",
    "#articulos",
    "#contacto",
];

fn language_rule(locale: Locale) -> &'static str {
    match locale {
        Locale::Es => "Responde siempre en espanol neutro.",
        Locale::En => "Always answer in clear English.",
    }
}

/// The system instruction for one request. Same inputs, same string.
pub fn build_system_prompt(
    locale: Locale,
    content: &PortfolioContent,
) -> serde_json::Result<String> {
    let snapshot = content.snapshot_json()?;
    let lines = [
        format!(
            "You are the AI assistant for {} portfolio website.",
            content.personal.name
        ),
        language_rule(locale).to_string(),
        "Only use verified details from the provided portfolio snapshot.".to_string(),
        "If the user asks for data that is not in the snapshot, say it is unavailable and recommend direct contact.".to_string(),
        "When sharing contact details, format them as Markdown links: [LinkedIn](https://...), [Email](mailto:...), [Telefono](tel:+...).".to_string(),
        format!(
            "Guide visitors to section anchors when useful: {}.",
            SECTION_ANCHORS.join(", ")
        ),
        "Keep answers concise and actionable.".to_string(),
        format!("Portfolio snapshot JSON: {snapshot}"),
    ];
    Ok(lines.join("\n"))
}

/// The last [`MAX_HISTORY_MESSAGES`] turns, oldest first.
pub fn bounded_history(history: &[AgentChatMessage]) -> &[AgentChatMessage] {
    let start = history.len().saturating_sub(MAX_HISTORY_MESSAGES);
    &history[start..]
}

/// Everything a backend needs for one request, built once per `ask`.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversation {
    pub system: String,
    /// Bounded history followed by the new user turn.
    pub turns: Vec<AgentChatMessage>,
}

impl Conversation {
    pub fn new(
        locale: Locale,
        content: &PortfolioContent,
        user_message: &str,
        history: &[AgentChatMessage],
    ) -> serde_json::Result<Self> {
        let mut turns = bounded_history(history).to_vec();
        turns.push(AgentChatMessage::user(user_message));
        Ok(Self {
            system: build_system_prompt(locale, content)?,
            turns,
        })
    }
}

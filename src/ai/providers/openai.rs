use super::{
    ProviderBackend, ProviderError, ProviderReply, ProviderResult, join_text_parts, send_json,
};
use crate::ai::config::{Provider, ProviderRequestConfig};
use crate::ai::prompt::{Conversation, MAX_OUTPUT_TOKENS, TEMPERATURE};
use crate::types::Role;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Chat Completions over bearer auth. Serves OpenRouter, Groq and OpenAI.
pub struct OpenAiCompatibleBackend {
    target: ProviderRequestConfig,
}

#[derive(Serialize)]
struct OpenAiMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAiMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
}

fn openai_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

impl<'a> OpenAiRequest<'a> {
    fn new(model: &'a str, conversation: &'a Conversation) -> Self {
        let system = OpenAiMessage {
            role: "system",
            content: &conversation.system,
        };
        let turns = conversation.turns.iter().map(|turn| OpenAiMessage {
            role: openai_role(turn.role),
            content: &turn.content,
        });
        Self {
            model,
            messages: std::iter::once(system).chain(turns).collect(),
            temperature: TEMPERATURE,
            max_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiContentChunk {
    #[serde(rename = "type")]
    kind: Option<String>,
    text: Option<String>,
}

/// `message.content` is either a plain string or a list of typed chunks.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OpenAiContent {
    Text(String),
    Chunks(Vec<OpenAiContentChunk>),
}

#[derive(Debug, Deserialize)]
struct OpenAiResponseMessage {
    content: Option<OpenAiContent>,
}

#[derive(Debug, Deserialize)]
struct OpenAiChoice {
    message: Option<OpenAiResponseMessage>,
}

#[derive(Debug, Default, Deserialize)]
pub struct OpenAiChatResponse {
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

/// Text of the first choice.
pub(crate) fn extract_text(response: OpenAiChatResponse) -> Option<String> {
    let content = response.choices.into_iter().next()?.message?.content?;
    match content {
        OpenAiContent::Text(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        }
        OpenAiContent::Chunks(chunks) => join_text_parts(
            chunks
                .into_iter()
                .filter(|chunk| chunk.kind.as_deref() == Some("text"))
                .filter_map(|chunk| chunk.text),
        ),
    }
}

impl OpenAiCompatibleBackend {
    pub fn new(target: ProviderRequestConfig) -> Self {
        Self { target }
    }
}

#[async_trait]
impl ProviderBackend for OpenAiCompatibleBackend {
    fn provider(&self) -> Provider {
        self.target.provider
    }

    async fn complete(&self, http: &Client, conversation: &Conversation) -> ProviderResult<String> {
        let mut request = http
            .post(&self.target.api_url)
            .bearer_auth(&self.target.api_key)
            .json(&OpenAiRequest::new(&self.target.model, conversation));

        for (name, value) in &self.target.headers {
            request = request.header(*name, value);
        }

        let reply = ProviderReply::OpenAi(send_json(request).await?);
        reply.into_text().ok_or(ProviderError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AgentChatMessage;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> OpenAiChatResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn request_leads_with_system_message() {
        let conversation = Conversation {
            system: "sys".into(),
            turns: vec![
                AgentChatMessage::user("q1"),
                AgentChatMessage::assistant("a1"),
                AgentChatMessage::user("q2"),
            ],
        };
        let body = serde_json::to_value(OpenAiRequest::new("gpt-4o-mini", &conversation)).unwrap();
        assert_eq!(
            body,
            json!({
                "model": "gpt-4o-mini",
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "q1"},
                    {"role": "assistant", "content": "a1"},
                    {"role": "user", "content": "q2"}
                ],
                "temperature": 0.35,
                "max_tokens": 500
            })
        );
    }

    #[test]
    fn reads_string_content() {
        let response = parse(json!({
            "choices": [{"message": {"role": "assistant", "content": "  Hi there \n"}}]
        }));
        assert_eq!(extract_text(response), Some("Hi there".to_string()));
    }

    #[test]
    fn reads_text_chunks_only() {
        let response = parse(json!({
            "choices": [{"message": {"content": [
                {"type": "text", "text": "first"},
                {"type": "image_url", "text": "skip"},
                {"type": "text", "text": " second "}
            ]}}]
        }));
        assert_eq!(extract_text(response), Some("first\nsecond".to_string()));
    }

    #[test]
    fn null_or_missing_content_is_empty() {
        assert_eq!(extract_text(parse(json!({"choices": []}))), None);
        assert_eq!(
            extract_text(parse(json!({"choices": [{"message": {"content": null}}]}))),
            None
        );
        assert_eq!(
            extract_text(parse(json!({"choices": [{"message": {"content": "   "}}]}))),
            None
        );
    }
}

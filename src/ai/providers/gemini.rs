use super::{
    ProviderBackend, ProviderError, ProviderReply, ProviderResult, join_text_parts, send_json,
};
use crate::ai::config::{Provider, ProviderRequestConfig};
use crate::ai::prompt::{Conversation, MAX_OUTPUT_TOKENS, TEMPERATURE};
use crate::types::Role;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

/// Google Generative Language `generateContent`.
pub struct GeminiBackend {
    target: ProviderRequestConfig,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct GeminiContent<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: [GeminiPart<'a>; 1],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    max_output_tokens: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GeminiRequest<'a> {
    system_instruction: GeminiContent<'a>,
    contents: Vec<GeminiContent<'a>>,
    generation_config: GenerationConfig,
}

fn gemini_role(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "model",
    }
}

impl<'a> GeminiRequest<'a> {
    fn from_conversation(conversation: &'a Conversation) -> Self {
        Self {
            system_instruction: GeminiContent {
                role: None,
                parts: [GeminiPart {
                    text: &conversation.system,
                }],
            },
            contents: conversation
                .turns
                .iter()
                .map(|turn| GeminiContent {
                    role: Some(gemini_role(turn.role)),
                    parts: [GeminiPart {
                        text: &turn.content,
                    }],
                })
                .collect(),
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                max_output_tokens: MAX_OUTPUT_TOKENS,
            },
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GeminiResponsePart {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Default, Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiCandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GeminiChatResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

/// Text of the first candidate's parts.
pub(crate) fn extract_text(response: GeminiChatResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    join_text_parts(content.parts.into_iter().filter_map(|part| part.text))
}

impl GeminiBackend {
    pub fn new(target: ProviderRequestConfig) -> Self {
        Self { target }
    }
}

#[async_trait]
impl ProviderBackend for GeminiBackend {
    fn provider(&self) -> Provider {
        self.target.provider
    }

    async fn complete(&self, http: &Client, conversation: &Conversation) -> ProviderResult<String> {
        // The key already rides in the URL query.
        let request = http
            .post(&self.target.api_url)
            .json(&GeminiRequest::from_conversation(conversation));
        let reply = ProviderReply::Gemini(send_json(request).await?);
        reply.into_text().ok_or(ProviderError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AgentChatMessage;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> GeminiChatResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn request_maps_roles_and_config() {
        let conversation = Conversation {
            system: "sys".into(),
            turns: vec![
                AgentChatMessage::user("q1"),
                AgentChatMessage::assistant("a1"),
                AgentChatMessage::user("q2"),
            ],
        };
        let body = serde_json::to_value(GeminiRequest::from_conversation(&conversation)).unwrap();
        assert_eq!(
            body,
            json!({
                "systemInstruction": {"parts": [{"text": "sys"}]},
                "contents": [
                    {"role": "user", "parts": [{"text": "q1"}]},
                    {"role": "model", "parts": [{"text": "a1"}]},
                    {"role": "user", "parts": [{"text": "q2"}]}
                ],
                "generationConfig": {"temperature": 0.35, "maxOutputTokens": 500}
            })
        );
    }

    #[test]
    fn joins_first_candidate_parts() {
        let response = parse(json!({
            "candidates": [
                {"content": {"parts": [{"text": " Hola "}, {"text": ""}, {"text": "mundo"}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }));
        assert_eq!(extract_text(response), Some("Hola\nmundo".to_string()));
    }

    #[test]
    fn missing_or_blank_text_is_empty() {
        assert_eq!(extract_text(parse(json!({}))), None);
        assert_eq!(extract_text(parse(json!({"candidates": [{}]}))), None);
        assert_eq!(
            extract_text(parse(json!({"candidates": [{"content": {"parts": [{"text": "  "}]}}]}))),
            None
        );
    }
}

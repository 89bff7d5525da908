//! Conversation state behind the chat widget.

use crate::ai::{AgentError, AgentRequest, PortfolioAgent};
use crate::content::PortfolioContent;
use crate::i18n::chat_copy;
use crate::types::{AgentChatMessage, ChatMessage, Locale, Role};

/// What the caller should do after [`ChatSession::begin`].
#[derive(Clone, Debug, PartialEq)]
pub enum SendAction {
    /// Blank input, or a request is already in flight.
    Ignored,
    /// The missing-configuration reply was appended; nothing to send.
    NotConfigured,
    Dispatch(PendingRequest),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PendingRequest {
    pub user_message: String,
    /// Turns before `user_message`, seed excluded.
    pub history: Vec<AgentChatMessage>,
    /// Conversation the request belongs to; see [`ChatSession::complete`].
    pub generation: u64,
}

#[derive(Clone, Debug)]
pub struct ChatSession {
    locale: Locale,
    messages: Vec<ChatMessage>,
    loading: bool,
    generation: u64,
}

impl ChatSession {
    pub fn new(locale: Locale) -> Self {
        Self {
            locale,
            messages: vec![ChatMessage::seed(chat_copy(locale).intro_message)],
            loading: false,
            generation: 0,
        }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_user_messages(&self) -> bool {
        self.messages.iter().any(|message| message.role == Role::User)
    }

    pub fn history_for_agent(&self) -> Vec<AgentChatMessage> {
        AgentChatMessage::history_from(&self.messages)
    }

    pub fn begin(&mut self, text: &str, configured: bool) -> SendAction {
        let text = text.trim();
        if text.is_empty() || self.loading {
            return SendAction::Ignored;
        }

        let history = self.history_for_agent();
        self.messages.push(ChatMessage::user(text));

        if !configured {
            self.messages.push(ChatMessage::assistant(
                chat_copy(self.locale).missing_key_message,
            ));
            return SendAction::NotConfigured;
        }

        self.loading = true;
        SendAction::Dispatch(PendingRequest {
            user_message: text.to_string(),
            history,
            generation: self.generation,
        })
    }

    /// Settles the request dispatched under `generation`. The in-flight gate
    /// always opens; a reply for a conversation that was since cleared or
    /// switched to another language is dropped.
    pub fn complete(&mut self, generation: u64, result: Result<String, AgentError>) {
        self.loading = false;
        if generation != self.generation {
            tracing::debug!(
                generation,
                current = self.generation,
                "dropping reply for a cleared conversation"
            );
            return;
        }

        let copy = chat_copy(self.locale);
        let reply = match result {
            Ok(text) => text,
            Err(AgentError::NotConfigured) => copy.missing_key_message.to_string(),
            Err(err) => {
                tracing::error!("assistant request failed: {err}");
                copy.error_message.to_string()
            }
        };
        self.messages.push(ChatMessage::assistant(reply));
    }

    /// Runs a whole submit: gate, request, reply.
    pub async fn send(&mut self, agent: &PortfolioAgent, content: &PortfolioContent, text: &str) {
        let SendAction::Dispatch(pending) = self.begin(text, agent.is_configured()) else {
            return;
        };
        let result = agent
            .ask(&AgentRequest {
                locale: self.locale,
                content,
                user_message: &pending.user_message,
                history: &pending.history,
            })
            .await;
        self.complete(pending.generation, result);
    }

    /// Back to the seed. A request still in flight keeps the gate closed
    /// until it settles.
    pub fn reset(&mut self) {
        self.restart(self.locale);
    }

    /// Switching language restarts the conversation in that language.
    pub fn set_locale(&mut self, locale: Locale) {
        self.restart(locale);
    }

    fn restart(&mut self, locale: Locale) {
        self.locale = locale;
        self.messages = vec![ChatMessage::seed(chat_copy(locale).intro_message)];
        self.generation += 1;
    }
}

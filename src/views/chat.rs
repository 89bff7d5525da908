use crate::ai::{AgentRequest, PortfolioAgent};
use crate::content::PortfolioContent;
use crate::i18n::chat_copy;
use crate::markup;
use crate::session::{ChatSession, SendAction};
use crate::types::{ChatMessage, Locale, Role};
use crate::views::MessageContent;
use dioxus::prelude::*;
use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

fn format_message_timestamp(timestamp: OffsetDateTime) -> Option<String> {
    let mut datetime = timestamp;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

fn role_class(role: Role) -> &'static str {
    match role {
        Role::User => "user",
        Role::Assistant => "assistant",
    }
}

fn load_content(locale: Locale) -> PortfolioContent {
    PortfolioContent::resolve(locale).unwrap_or_else(|err| {
        tracing::error!("failed to load portfolio content: {err:#}");
        PortfolioContent::default()
    })
}

/// Plain text of a reply as the visitor sees it.
fn copy_text(content: &str) -> String {
    markup::render(content)
        .iter()
        .map(markup::Block::plain_text)
        .collect::<Vec<_>>()
        .join("\n")
}

#[component]
pub fn ChatWidget(locale: Signal<Locale>) -> Element {
    let agent = use_signal(PortfolioAgent::from_env);
    let content = use_memo(move || load_content(locale()));
    let mut session = use_signal(|| ChatSession::new(*locale.peek()));
    let mut open = use_signal(|| false);
    let mut draft = use_signal(String::new);

    use_effect(move || {
        let current = locale();
        if session.peek().locale() != current {
            session.write().set_locale(current);
        }
    });

    let mut send_message = move |text: String| {
        let action = session.write().begin(&text, agent.peek().is_configured());
        if action != SendAction::Ignored {
            draft.set(String::new());
        }
        let SendAction::Dispatch(pending) = action else {
            return;
        };

        let agent = agent.peek().clone();
        let request_locale = session.peek().locale();
        spawn(async move {
            let content = content();
            let result = agent
                .ask(&AgentRequest {
                    locale: request_locale,
                    content: &content,
                    user_message: &pending.user_message,
                    history: &pending.history,
                })
                .await;
            session.write().complete(pending.generation, result);
        });
    };

    let copy = chat_copy(locale());
    let messages: Vec<ChatMessage> = session.read().messages().to_vec();
    let loading = session.read().is_loading();
    let show_prompts = !session.read().has_user_messages();

    rsx! {
        div { class: "chat-dock",
            if open() {
                section { class: "chat-panel",
                    header { class: "chat-header",
                        div {
                            p { class: "chat-title", "{copy.title}" }
                            p { class: "chat-subtitle", "{copy.subtitle}" }
                        }
                        div {
                            button {
                                class: "btn",
                                r#type: "button",
                                title: copy.clear_label,
                                onclick: move |_| session.write().reset(),
                                "{copy.clear_label}"
                            }
                            button {
                                class: "btn",
                                r#type: "button",
                                title: copy.close_label,
                                onclick: move |_| open.set(false),
                                "×"
                            }
                        }
                    }
                    div { class: "chat-list",
                        if show_prompts {
                            div { class: "quick-prompts",
                                for prompt in copy.quick_prompts {
                                    button {
                                        class: "btn btn-pill",
                                        r#type: "button",
                                        disabled: loading,
                                        onclick: move |_| send_message(prompt.to_string()),
                                        "{prompt}"
                                    }
                                }
                            }
                        }
                        for message in messages {
                            MessageRow {
                                key: "{message.id}",
                                message: message.clone(),
                                copy_label: copy.copy_label,
                            }
                        }
                        if loading {
                            div { class: "message-row assistant",
                                p { class: "bubble assistant", "{copy.loading_label}" }
                            }
                        }
                    }
                    form {
                        class: "composer",
                        onsubmit: move |ev| {
                            ev.prevent_default();
                            send_message(draft());
                        },
                        input {
                            r#type: "text",
                            placeholder: copy.placeholder,
                            value: "{draft}",
                            disabled: loading,
                            oninput: move |ev| draft.set(ev.value()),
                        }
                        button {
                            class: "btn btn-primary",
                            r#type: "submit",
                            disabled: loading || draft().trim().is_empty(),
                            "{copy.send_label}"
                        }
                    }
                }
            } else {
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| open.set(true),
                    "{copy.open_label}"
                }
            }
        }
    }
}

#[component]
fn MessageRow(message: ChatMessage, copy_label: &'static str) -> Element {
    let class = role_class(message.role);
    rsx! {
        div { class: "message-row {class}",
            div { class: "bubble {class}",
                MessageContent { content: message.content.clone() }
            }
            div { class: "message-meta",
                if let Some(ts) = format_message_timestamp(message.created_at) {
                    span { class: "message-timestamp", "{ts}" }
                }
                if message.role == Role::Assistant && !message.seed {
                    CopyButton { content: message.content.clone(), label: copy_label }
                }
            }
        }
    }
}

#[component]
fn CopyButton(content: String, label: &'static str) -> Element {
    let on_copy = move |_| {
        let text = copy_text(&content);
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                match arboard::Clipboard::new() {
                    Ok(mut clipboard) => {
                        if let Err(err) = clipboard.set_text(text) {
                            tracing::warn!("clipboard write failed: {err}");
                        }
                    }
                    Err(err) => tracing::warn!("clipboard unavailable: {err}"),
                }
            }
            #[cfg(not(any(feature = "desktop", feature = "mobile")))]
            let _ = text;
        });
    };

    rsx! {
        button { class: "btn btn-pill", r#type: "button", onclick: on_copy, "{label}" }
    }
}

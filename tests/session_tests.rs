use folio::ai::{AgentConfig, PortfolioAgent};
use folio::content::PortfolioContent;
use folio::i18n::chat_copy;
use folio::session::{ChatSession, SendAction};
use folio::types::{Locale, Role, SEED_MESSAGE_ID};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn groq_agent(server: &MockServer) -> PortfolioAgent {
    PortfolioAgent::new(AgentConfig::from_pairs([
        ("GROQ_API_KEY".to_string(), "groq-key".to_string()),
        ("GROQ_API_URL".to_string(), format!("{}/groq", server.uri())),
    ]))
}

#[tokio::test]
async fn send_appends_user_and_assistant_turns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/groq"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"content": "Hola, soy el asistente."}}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let agent = groq_agent(&server);
    let content = PortfolioContent::bundled(Locale::Es).unwrap();
    let mut session = ChatSession::new(Locale::Es);

    session.send(&agent, &content, "  Hola  ").await;
    session.send(&agent, &content, "Y tu experiencia?").await;

    let roles: Vec<Role> = session.messages().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            Role::Assistant,
            Role::User,
            Role::Assistant,
            Role::User,
            Role::Assistant
        ]
    );
    assert_eq!(session.messages()[1].content, "Hola");
    assert!(!session.is_loading());

    // The second request carried the first exchange but not the greeting.
    let received = server.received_requests().await.unwrap();
    let body: Value = received[1].body_json().unwrap();
    let contents: Vec<&str> = body["messages"]
        .as_array()
        .unwrap()
        .iter()
        .skip(1)
        .map(|message| message["content"].as_str().unwrap())
        .collect();
    assert_eq!(
        contents,
        vec!["Hola", "Hola, soy el asistente.", "Y tu experiencia?"]
    );
}

#[tokio::test]
async fn unconfigured_send_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let agent = PortfolioAgent::new(AgentConfig::default());
    let content = PortfolioContent::bundled(Locale::En).unwrap();
    let mut session = ChatSession::new(Locale::En);
    session.send(&agent, &content, "hello").await;

    let last = session.messages().last().unwrap();
    assert_eq!(last.content, chat_copy(Locale::En).missing_key_message);
    assert_eq!(session.messages().len(), 3);
}

#[tokio::test]
async fn provider_failure_shows_generic_copy() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/groq"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {"message": "Invalid API Key"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let agent = groq_agent(&server);
    let content = PortfolioContent::bundled(Locale::En).unwrap();
    let mut session = ChatSession::new(Locale::En);
    session.send(&agent, &content, "hello").await;

    let last = session.messages().last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert_eq!(last.content, chat_copy(Locale::En).error_message);
    assert!(!last.content.contains("Invalid API Key"));
}

#[test]
fn reset_returns_to_seed() {
    let mut session = ChatSession::new(Locale::En);
    assert!(matches!(
        session.begin("question", true),
        SendAction::Dispatch(_)
    ));
    session.reset();
    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.messages()[0].id, SEED_MESSAGE_ID);
    assert!(session.messages()[0].seed);
    // The dispatched request has not settled yet.
    assert!(session.is_loading());
    assert_eq!(session.begin("again", true), SendAction::Ignored);
}

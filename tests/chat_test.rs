//! Chat session: history, sending, fallback

mod common;

use chrono::{TimeZone, Utc};
use common::{FakeLlm, FakeStore, DEADLINE};
use kisan_mitra::chat::ChatSession;
use kisan_mitra_common::{chat_fallback, chat_welcome, ChatMessage, Language, Sender};
use serde_json::json;

fn stored_message(text: &str, sender: Sender, session: &str, minute: u32) -> ChatMessage {
    let mut message = ChatMessage::new(text, sender, Language::English, session);
    message.timestamp = Utc.with_ymd_and_hms(2024, 6, 1, 9, minute, 0).unwrap();
    message
}

#[tokio::test]
async fn test_empty_history_shows_welcome() {
    let store = FakeStore::new();
    let llm = FakeLlm::new();
    let mut session = ChatSession::new(&store, &llm, Language::Hindi, DEADLINE);

    let messages = session.load_history().await.to_vec();

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender, Sender::Assistant);
    assert_eq!(messages[0].message, chat_welcome(Language::Hindi));
    // welcome is not persisted
    assert!(store.stored::<ChatMessage>().is_empty());
}

#[tokio::test]
async fn test_history_failure_shows_welcome() {
    let store = FakeStore::new();
    store.set_unavailable(true);
    let llm = FakeLlm::new();
    let mut session = ChatSession::new(&store, &llm, Language::Bengali, DEADLINE);

    let messages = session.load_history().await;

    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].message, chat_welcome(Language::Bengali));
}

#[tokio::test]
async fn test_resume_loads_only_own_session_in_order() {
    let store = FakeStore::new().with(&[
        stored_message("second", Sender::Assistant, "chat_42", 5),
        stored_message("other session", Sender::User, "chat_7", 1),
        stored_message("first", Sender::User, "chat_42", 2),
    ]);
    let llm = FakeLlm::new();
    let mut session = ChatSession::resume(&store, &llm, "chat_42", Language::English, DEADLINE);

    let texts: Vec<String> = session
        .load_history()
        .await
        .iter()
        .map(|m| m.message.clone())
        .collect();

    assert_eq!(texts, vec!["first", "second"]);
}

#[tokio::test]
async fn test_send_persists_both_messages() {
    let store = FakeStore::new();
    let llm = FakeLlm::answering(json!("Apply neem oil every 7 days."));
    let mut session = ChatSession::new(&store, &llm, Language::English, DEADLINE);
    session.load_history().await;

    let reply = session.send("How do I treat aphids?").await.cloned().expect("reply");

    assert_eq!(reply.sender, Sender::Assistant);
    assert_eq!(reply.message, "Apply neem oil every 7 days.");
    assert_eq!(session.messages().len(), 3);

    let stored = store.stored::<ChatMessage>();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].sender, Sender::User);
    assert_eq!(stored[0].message, "How do I treat aphids?");
    assert_eq!(stored[0].session_id, session.session_id());
    assert_eq!(stored[1].sender, Sender::Assistant);

    let requests = llm.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].add_context_from_internet);
    assert!(requests[0].response_json_schema.is_none());
    assert!(requests[0].prompt.contains("How do I treat aphids?"));
    assert!(requests[0].prompt.contains("English"));
}

#[tokio::test]
async fn test_send_uses_session_language() {
    let store = FakeStore::new();
    let llm = FakeLlm::answering(json!("नीम का तेल छिड़कें।"));
    let mut session = ChatSession::new(&store, &llm, Language::Hindi, DEADLINE);

    session.send("माहू का इलाज?").await;

    assert!(llm.requests()[0].prompt.contains("Hindi"));
    assert!(store
        .stored::<ChatMessage>()
        .iter()
        .all(|m| m.language == Language::Hindi));
}

#[tokio::test]
async fn test_blank_message_is_ignored() {
    let store = FakeStore::new();
    let llm = FakeLlm::new();
    let mut session = ChatSession::new(&store, &llm, Language::English, DEADLINE);

    assert!(session.send("   ").await.is_none());

    assert!(session.messages().is_empty());
    assert!(store.calls().is_empty());
    assert!(llm.requests().is_empty());
}

#[tokio::test]
async fn test_llm_failure_appends_fallback() {
    let store = FakeStore::new();
    let llm = FakeLlm::failing("llm unavailable");
    let mut session = ChatSession::new(&store, &llm, Language::Bengali, DEADLINE);

    let reply = session.send("ধানের রোগ?").await.cloned().expect("reply");

    assert_eq!(reply.sender, Sender::Assistant);
    assert_eq!(reply.message, chat_fallback(Language::Bengali));
    assert_eq!(session.messages().len(), 2);
    // only the user message reached the store
    assert_eq!(store.stored::<ChatMessage>().len(), 1);
}

#[tokio::test]
async fn test_store_failure_appends_fallback() {
    let store = FakeStore::new();
    store.set_unavailable(true);
    let llm = FakeLlm::answering(json!("unused"));
    let mut session = ChatSession::new(&store, &llm, Language::English, DEADLINE);

    let reply = session.send("When to sow wheat?").await.cloned().expect("reply");

    assert_eq!(reply.message, chat_fallback(Language::English));
    assert!(llm.requests().is_empty());
}

#[tokio::test]
async fn test_session_ids_are_distinct_per_session() {
    let store = FakeStore::new();
    let llm = FakeLlm::new();
    let first = ChatSession::new(&store, &llm, Language::English, DEADLINE);
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let second = ChatSession::new(&store, &llm, Language::English, DEADLINE);

    assert!(first.session_id().starts_with("chat_"));
    assert_ne!(first.session_id(), second.session_id());
}

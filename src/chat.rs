//! Farming assistant chat
//!
//! A session is identified by `chat_<unix-millis>` and can be resumed by
//! id. Every user message and assistant reply is stored as a
//! `ChatMessage` entity.

use crate::client::{output_text, with_deadline, EntityStore, InvokeRequest, ListQuery, LlmService};
use crate::error::{KisanMitraError, Result};
use chrono::Utc;
use dialoguer::Input;
use kisan_mitra_common::{build_chat_prompt, chat_fallback, chat_welcome, ChatMessage, Language, Sender};
use std::time::Duration;

pub fn new_session_id() -> String {
    format!("chat_{}", Utc::now().timestamp_millis())
}

pub struct ChatSession<S, L> {
    store: S,
    llm: L,
    deadline: Duration,
    session_id: String,
    language: Language,
    messages: Vec<ChatMessage>,
}

impl<S: EntityStore, L: LlmService> ChatSession<S, L> {
    pub fn new(store: S, llm: L, language: Language, deadline: Duration) -> Self {
        Self::resume(store, llm, new_session_id(), language, deadline)
    }

    pub fn resume(
        store: S,
        llm: L,
        session_id: impl Into<String>,
        language: Language,
        deadline: Duration,
    ) -> Self {
        Self {
            store,
            llm,
            deadline,
            session_id: session_id.into(),
            language,
            messages: Vec::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Replace the transcript with the stored history
    ///
    /// Falls back to a single (unsaved) welcome message when there is no
    /// history or it cannot be fetched.
    pub async fn load_history(&mut self) -> &[ChatMessage] {
        let query = ListQuery::new()
            .filter("session_id", self.session_id.as_str())
            .sort("timestamp");

        let history = with_deadline(self.deadline, self.store.list::<ChatMessage>(&query)).await;
        self.messages = match history {
            Ok(messages) if !messages.is_empty() => messages,
            Ok(_) => vec![self.welcome()],
            Err(e) => {
                tracing::warn!(session = %self.session_id, error = %e, "failed to load chat history");
                vec![self.welcome()]
            }
        };
        &self.messages
    }

    /// Send a user message and append the assistant's answer
    ///
    /// Returns the appended assistant entry, or `None` for blank input.
    pub async fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let user_message = ChatMessage::new(text, Sender::User, self.language, &self.session_id);
        self.messages.push(user_message.clone());

        let reply = match self.exchange(&user_message).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(session = %self.session_id, error = %e, "chat exchange failed");
                ChatMessage::new(
                    chat_fallback(self.language),
                    Sender::Assistant,
                    self.language,
                    &self.session_id,
                )
            }
        };
        self.messages.push(reply);
        self.messages.last()
    }

    async fn exchange(&self, user_message: &ChatMessage) -> Result<ChatMessage> {
        with_deadline(self.deadline, self.store.create(user_message)).await?;

        let request = InvokeRequest::text(build_chat_prompt(&user_message.message, self.language))
            .with_internet_context();
        let output = with_deadline(self.deadline, self.llm.invoke(&request)).await?;
        let answer = output_text(output)?;

        let reply = ChatMessage::new(answer, Sender::Assistant, self.language, &self.session_id);
        with_deadline(self.deadline, self.store.create(&reply)).await?;
        Ok(reply)
    }

    fn welcome(&self) -> ChatMessage {
        ChatMessage::new(
            chat_welcome(self.language),
            Sender::Assistant,
            self.language,
            &self.session_id,
        )
    }
}

/// REPL input
#[derive(Debug, PartialEq, Eq)]
pub enum ChatAction {
    Send(String),
    /// Reprint the transcript
    History,
    Quit,
    Empty,
}

pub fn parse_chat_action(line: &str) -> ChatAction {
    match line.trim() {
        "" => ChatAction::Empty,
        "/q" | "/quit" | "/exit" => ChatAction::Quit,
        "/h" | "/history" => ChatAction::History,
        text => ChatAction::Send(text.to_string()),
    }
}

pub fn format_message(message: &ChatMessage) -> String {
    let who = match message.sender {
        Sender::User => "🧑",
        Sender::Assistant => "🌱",
    };
    format!(
        "{} [{}] {}",
        who,
        message.timestamp.with_timezone(&chrono::Local).format("%H:%M"),
        message.message
    )
}

/// Interactive chat loop
pub async fn run_interactive_chat<S: EntityStore, L: LlmService>(
    session: &mut ChatSession<S, L>,
) -> Result<()> {
    println!("💬 Session: {}", session.session_id());
    println!("---");
    println!("Commands: /history  /quit");
    println!("---\n");

    for message in session.load_history().await {
        println!("{}", format_message(message));
    }

    loop {
        let line: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| KisanMitraError::Input(e.to_string()))?;

        match parse_chat_action(&line) {
            ChatAction::Empty => continue,
            ChatAction::Quit => break,
            ChatAction::History => {
                for message in session.messages() {
                    println!("{}", format_message(message));
                }
            }
            ChatAction::Send(text) => {
                if let Some(reply) = session.send(&text).await {
                    println!("{}\n", format_message(reply));
                }
            }
        }
    }

    println!("✔ Session saved: {}", session.session_id());
    Ok(())
}

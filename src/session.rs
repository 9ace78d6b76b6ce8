//! Per-session conversation state.
//!
//! A [`Session`] is created when the page mounts and dropped with it. It owns
//! the [`Transcript`] and the selected model; nothing here is global.

use crate::ai::{ChatError, ChatResult, TurnOutcome};
use crate::types::{ChatMessage, Role};

/// Append-only list of the messages shown to the user, in conversation order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `message` to the end. User and assistant turns must carry text.
    pub fn append(&mut self, message: ChatMessage) -> ChatResult<()> {
        let needs_text = matches!(message.role, Role::User | Role::Assistant);
        if needs_text && message.content.trim().is_empty() {
            return Err(ChatError::EmptyMessage(message.role));
        }
        self.messages.push(message);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.messages.clear();
    }

    pub fn snapshot(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    transcript: Transcript,
    model: Option<String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    pub fn select_model(&mut self, name: impl Into<String>) {
        self.model = Some(name.into());
    }

    /// Appends the user's prompt exactly as typed. Blank prompts are rejected.
    pub fn submit(&mut self, prompt: &str) -> ChatResult<()> {
        self.transcript.append(ChatMessage::user(prompt))
    }

    /// Records the assistant's side of a finished turn.
    pub fn commit(&mut self, outcome: &TurnOutcome) -> ChatResult<()> {
        self.transcript
            .append(ChatMessage::assistant(outcome.transcript_text()))
    }

    /// "New Chat": drops the conversation but keeps the selected model.
    pub fn new_chat(&mut self) {
        self.transcript.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_keeps_append_order() {
        let mut transcript = Transcript::new();
        let messages = vec![
            ChatMessage::user("first"),
            ChatMessage::assistant("second"),
            ChatMessage::user("  third  "),
            ChatMessage::assistant("fourth"),
        ];
        for msg in messages.clone() {
            transcript.append(msg).unwrap();
        }
        assert_eq!(transcript.snapshot(), messages.as_slice());
        assert_eq!(transcript.len(), 4);
    }

    #[test]
    fn reset_always_empties() {
        let mut transcript = Transcript::new();
        transcript.reset();
        assert!(transcript.is_empty());

        transcript.append(ChatMessage::user("hi")).unwrap();
        transcript.append(ChatMessage::assistant("hello")).unwrap();
        transcript.reset();
        assert!(transcript.snapshot().is_empty());
        assert!(transcript.last().is_none());
    }

    #[test]
    fn rejects_blank_user_and_assistant_turns() {
        let mut transcript = Transcript::new();
        assert!(matches!(
            transcript.append(ChatMessage::user("   ")),
            Err(ChatError::EmptyMessage(Role::User))
        ));
        assert!(matches!(
            transcript.append(ChatMessage::assistant("")),
            Err(ChatError::EmptyMessage(Role::Assistant))
        ));
        assert!(transcript.is_empty());
    }

    #[test]
    fn new_chat_keeps_model_selection() {
        let mut session = Session::new();
        session.select_model("llama3.1:latest");
        session.submit("hi").unwrap();
        assert_eq!(session.transcript().last(), Some(&ChatMessage::user("hi")));

        session.new_chat();
        assert!(session.transcript().is_empty());
        assert_eq!(session.model(), Some("llama3.1:latest"));
    }

    #[test]
    fn submit_keeps_prompt_verbatim() {
        let mut session = Session::new();
        let prompt = "    fn main() {}\n\n    println!(\"hi\");\n";
        session.submit(prompt).unwrap();
        assert_eq!(session.transcript().last(), Some(&ChatMessage::user(prompt)));

        assert!(matches!(
            session.submit(" \n\t"),
            Err(ChatError::EmptyMessage(Role::User))
        ));
        assert_eq!(session.transcript().len(), 1);
    }

    #[test]
    fn commit_writes_failures_in_band() {
        let mut session = Session::new();
        session.submit("hi").unwrap();
        session
            .commit(&TurnOutcome::Failed("connection refused".into()))
            .unwrap();
        assert_eq!(
            session.transcript().last(),
            Some(&ChatMessage::assistant("LLM ERROR: connection refused"))
        );
    }
}

use crate::types::{ChatMessage, ModelDescriptor, Role};
use async_trait::async_trait;
use futures::stream::BoxStream;
use reqwest::StatusCode;
use thiserror::Error;

// ============================================
// Error Types
// ============================================

#[derive(Debug, Error)]
pub enum ChatError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("model server returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("malformed chunk: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no models installed; pull one with `ollama pull <model>`")]
    NoModels,

    #[error("{} message must not be empty", .0.as_str())]
    EmptyMessage(Role),

    #[error("{0}")]
    Message(String),
}

impl ChatError {
    pub fn new(message: impl Into<String>) -> Self {
        ChatError::Message(message.into())
    }
}

pub type ChatResult<T> = Result<T, ChatError>;

/// Text fragments of one streaming reply, in arrival order.
pub type FragmentStream = BoxStream<'static, ChatResult<String>>;

// ============================================
// Backend Trait
// ============================================

/// A model server the chat front-end can talk to.
#[async_trait]
pub trait LLMBackend: Send + Sync {
    /// Installed models, in the order the server reports them.
    async fn list_models(&self) -> ChatResult<Vec<ModelDescriptor>>;

    /// Opens a streaming chat call. An `Err` here means the call could not be
    /// established; errors after that arrive as items of the stream.
    async fn open_stream(&self, model: &str, messages: &[ChatMessage])
    -> ChatResult<FragmentStream>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_read_plainly() {
        assert_eq!(ChatError::new("connection refused").to_string(), "connection refused");
        assert_eq!(
            ChatError::EmptyMessage(Role::User).to_string(),
            "user message must not be empty"
        );
        let status = ChatError::Status {
            status: StatusCode::NOT_FOUND,
            body: r#"{"error":"model 'nope' not found"}"#.to_string(),
        };
        assert_eq!(
            status.to_string(),
            r#"model server returned 404 Not Found: {"error":"model 'nope' not found"}"#
        );
    }
}

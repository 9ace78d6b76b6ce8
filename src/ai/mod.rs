//! Model server access for the chat front-end.
//!
//! # Architecture
//!
//! - `backend` - the `LLMBackend` trait and the shared error type
//! - `ollama` - `LLMBackend` over a local Ollama server (NDJSON streaming)
//! - `directory` - installed-model listing for the selector
//! - `relay` - system prompt + transcript out, reply fragments back
//!
//! # Usage
//!
//! ```rust,no_run
//! use ollama_chat::ai::{OllamaBackend, Relay};
//! use ollama_chat::config::AppConfig;
//! use ollama_chat::session::Session;
//! use std::sync::Arc;
//!
//! # async fn example() -> ollama_chat::ai::ChatResult<()> {
//! let config = AppConfig::default();
//! let relay = Relay::new(Arc::new(OllamaBackend::new(&config)), &config.system_prompt);
//! let mut session = Session::new();
//! session.select_model("llama3.1:latest");
//! relay.run_turn(&mut session, "Why is the sky blue?", |piece| print!("{piece}")).await?;
//! # Ok(())
//! # }
//! ```

mod backend;
mod directory;
mod ollama;
mod relay;

// Re-export main types
pub use backend::{ChatError, ChatResult, FragmentStream, LLMBackend};
pub use directory::{ModelDirectory, default_model};
pub use ollama::{OllamaBackend, ndjson_fragments, parse_ollama_stream_line};
pub use relay::{ERROR_PREFIX, Relay, ReplyStream, TurnOutcome};

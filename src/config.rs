//! Runtime configuration, read from the process environment.
//!
//! `main` loads `.env` (or the bundled `assets/config.env`) before this runs,
//! so values can come from either place; real environment variables win.

use anyhow::{Context, Result};
use reqwest::Url;
use std::env;

pub const DEFAULT_OLLAMA_HOST: &str = "http://127.0.0.1:11434";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful AI assistant.";
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    /// Base URL of the Ollama server without a trailing slash (`OLLAMA_HOST`).
    pub ollama_host: String,
    /// Model to preselect when installed (`LLM_MODEL`).
    pub preferred_model: Option<String>,
    /// Hidden instruction sent ahead of every conversation (`CHAT_SYSTEM_PROMPT`).
    pub system_prompt: String,
    /// Tracing level for the fmt subscriber (`CHAT_LOG`).
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
            preferred_model: None,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Self::default();

        if let Some(host) = get("OLLAMA_HOST") {
            // Ollama itself accepts a bare `host:port` here.
            let host = if host.contains("://") {
                host
            } else {
                format!("http://{host}")
            };
            let url =
                Url::parse(&host).with_context(|| format!("invalid OLLAMA_HOST `{host}`"))?;
            config.ollama_host = url.as_str().trim_end_matches('/').to_string();
        }
        config.preferred_model = get("LLM_MODEL");
        if let Some(prompt) = get("CHAT_SYSTEM_PROMPT") {
            config.system_prompt = prompt;
        }
        if let Some(level) = get("CHAT_LOG") {
            config.log_level = level;
        }

        Ok(config)
    }

    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

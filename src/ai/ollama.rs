use super::{ChatError, ChatResult, FragmentStream, LLMBackend};
use crate::config::AppConfig;
use crate::types::{ChatMessage, ModelDescriptor};
use async_trait::async_trait;
use futures::{Stream, StreamExt, stream};
use reqwest::Client;
use serde::Deserialize;
use std::collections::VecDeque;

pub struct OllamaBackend {
    client: Client,
    base_url: String,
}

impl OllamaBackend {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_base_url(&config.ollama_host)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[derive(serde::Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
}

#[derive(Deserialize)]
struct OllamaTagsResponse {
    models: Vec<ModelDescriptor>,
}

#[derive(Deserialize, Debug)]
pub struct StreamChunkMessage {
    pub content: String,
}

#[derive(Deserialize, Debug)]
pub struct StreamChunk {
    pub message: Option<StreamChunkMessage>,
    pub done: Option<bool>,
    pub error: Option<String>,
}

/// Parses one NDJSON line of a streaming `/api/chat` response into its text
/// fragment and `done` flag. Blank lines yield `None`.
pub fn parse_ollama_stream_line(line_with_ws: &str) -> ChatResult<Option<(String, bool)>> {
    let line = line_with_ws.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let parsed = serde_json::from_str::<StreamChunk>(line)?;
    if let Some(err) = parsed.error {
        return Err(ChatError::new(err));
    }
    let piece = parsed.message.map(|msg| msg.content).unwrap_or_default();
    Ok(Some((piece, parsed.done.unwrap_or(false))))
}

struct LineSplitter<E> {
    body: stream::BoxStream<'static, Result<Vec<u8>, E>>,
    buffer: Vec<u8>,
    pending: VecDeque<ChatResult<String>>,
    finished: bool,
}

impl<E> LineSplitter<E> {
    fn push_bytes(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            self.push_line(&line);
            if self.finished {
                return;
            }
        }
    }

    fn flush_tail(&mut self) {
        let tail = std::mem::take(&mut self.buffer);
        self.push_line(&tail);
    }

    fn push_line(&mut self, line: &[u8]) {
        let text = String::from_utf8_lossy(line);
        match parse_ollama_stream_line(&text) {
            Ok(Some((piece, done))) => {
                tracing::trace!(fragment = %piece, done, "ollama chunk");
                if !piece.is_empty() {
                    self.pending.push_back(Ok(piece));
                }
                if done {
                    self.finished = true;
                }
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "ollama stream failed");
                self.pending.push_back(Err(err));
                self.finished = true;
            }
        }
    }
}

/// Turns a raw NDJSON body into a stream of text fragments. Lines may span
/// several body chunks; the stream ends at the first `done: true` line, the
/// first malformed line, or the end of the body.
pub fn ndjson_fragments<S, B, E>(body: S) -> FragmentStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]>,
    E: Send + 'static,
    ChatError: From<E>,
{
    let splitter = LineSplitter {
        body: body.map(|item| item.map(|b| b.as_ref().to_vec())).boxed(),
        buffer: Vec::new(),
        pending: VecDeque::new(),
        finished: false,
    };

    stream::unfold(splitter, |mut state| async move {
        loop {
            if let Some(item) = state.pending.pop_front() {
                return Some((item, state));
            }
            if state.finished {
                return None;
            }
            match state.body.next().await {
                Some(Ok(bytes)) => state.push_bytes(&bytes),
                Some(Err(err)) => {
                    state.finished = true;
                    return Some((Err(ChatError::from(err)), state));
                }
                None => {
                    state.flush_tail();
                    state.finished = true;
                }
            }
        }
    })
    .boxed()
}

#[async_trait]
impl LLMBackend for OllamaBackend {
    async fn list_models(&self) -> ChatResult<Vec<ModelDescriptor>> {
        let response = self.client.get(self.endpoint("/api/tags")).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ChatError::Status { status, body });
        }

        let parsed: OllamaTagsResponse = serde_json::from_str(&body)?;
        tracing::debug!(count = parsed.models.len(), "listed ollama models");
        Ok(parsed.models)
    }

    async fn open_stream(
        &self,
        model: &str,
        messages: &[ChatMessage],
    ) -> ChatResult<FragmentStream> {
        tracing::info!(model, messages = messages.len(), "opening ollama chat stream");
        let response = self
            .client
            .post(self.endpoint("/api/chat"))
            .json(&OllamaChatRequest {
                model,
                messages,
                stream: true,
            })
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status { status, body });
        }

        Ok(ndjson_fragments(response.bytes_stream()))
    }
}

use super::{ChatError, ChatResult, FragmentStream, LLMBackend};
use crate::session::Session;
use crate::types::ChatMessage;
use futures::{Stream, StreamExt};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// Prefix of the assistant text that stands in for a failed call.
pub const ERROR_PREFIX: &str = "LLM ERROR: ";

/// How a turn ended. `Failed` carries the reason without the prefix so the
/// UI can render it apart from real model output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Completed(String),
    Failed(String),
}

impl TurnOutcome {
    /// The assistant content recorded in the transcript for this turn.
    pub fn transcript_text(&self) -> String {
        match self {
            TurnOutcome::Completed(text) => text.clone(),
            TurnOutcome::Failed(reason) => format!("{ERROR_PREFIX}{reason}"),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, TurnOutcome::Failed(_))
    }
}

enum ReplyState {
    Live(FragmentStream),
    Failed { reason: String, reported: bool },
}

/// The fragments of one reply, forwarded as they arrive.
///
/// Every poll waits on the model server for the next chunk. Fragments are
/// passed through one by one and also accumulated, so [`ReplyStream::finish`]
/// can hand back the whole reply once the stream is exhausted. When the call
/// could not be established the stream yields a single `LLM ERROR: ...`
/// fragment instead.
pub struct ReplyStream {
    state: ReplyState,
    text: String,
    broken: bool,
}

impl ReplyStream {
    fn live(inner: FragmentStream) -> Self {
        Self {
            state: ReplyState::Live(inner),
            text: String::new(),
            broken: false,
        }
    }

    fn failed(reason: String) -> Self {
        Self {
            state: ReplyState::Failed {
                reason,
                reported: false,
            },
            text: String::new(),
            broken: false,
        }
    }

    /// Text forwarded so far, including an in-band `LLM ERROR: ...` fragment.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The outcome of an exhausted stream. A broken chunk is not an outcome:
    /// callers stop at the `Err` item and record nothing.
    pub fn finish(self) -> TurnOutcome {
        match self.state {
            ReplyState::Failed { reason, .. } => TurnOutcome::Failed(reason),
            ReplyState::Live(_) => TurnOutcome::Completed(self.text),
        }
    }
}

impl Stream for ReplyStream {
    type Item = ChatResult<String>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        match &mut this.state {
            ReplyState::Live(inner) => {
                if this.broken {
                    return Poll::Ready(None);
                }
                match inner.poll_next_unpin(cx) {
                    Poll::Ready(Some(Ok(fragment))) => {
                        this.text.push_str(&fragment);
                        Poll::Ready(Some(Ok(fragment)))
                    }
                    Poll::Ready(Some(Err(err))) => {
                        this.broken = true;
                        Poll::Ready(Some(Err(err)))
                    }
                    other => other,
                }
            }
            ReplyState::Failed { reason, reported } => {
                if *reported {
                    Poll::Ready(None)
                } else {
                    *reported = true;
                    let fragment = format!("{ERROR_PREFIX}{reason}");
                    this.text.push_str(&fragment);
                    Poll::Ready(Some(Ok(fragment)))
                }
            }
        }
    }
}

/// Relays a conversation to the model server and streams the reply back.
pub struct Relay<B: ?Sized> {
    backend: Arc<B>,
    system_prompt: String,
}

impl<B: ?Sized> Clone for Relay<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            system_prompt: self.system_prompt.clone(),
        }
    }
}

impl<B: LLMBackend + ?Sized> Relay<B> {
    pub fn new(backend: Arc<B>, system_prompt: impl Into<String>) -> Self {
        Self {
            backend,
            system_prompt: system_prompt.into(),
        }
    }

    /// Messages as sent on the wire: the system instruction, then the
    /// transcript unchanged.
    pub fn outbound(&self, transcript: &[ChatMessage]) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(transcript.len() + 1);
        messages.push(ChatMessage::system(self.system_prompt.clone()));
        messages.extend_from_slice(transcript);
        messages
    }

    /// Opens a streaming reply for `transcript`, which should already end
    /// with the user's new message.
    pub async fn send(&self, model: &str, transcript: &[ChatMessage]) -> ReplyStream {
        let messages = self.outbound(transcript);
        match self.backend.open_stream(model, &messages).await {
            Ok(inner) => ReplyStream::live(inner),
            Err(err) => {
                tracing::warn!(model, error = %err, "chat call failed, reporting in-band");
                ReplyStream::failed(err.to_string())
            }
        }
    }

    /// Runs one full turn: records `prompt`, streams the reply through
    /// `on_fragment`, then records the assistant message.
    ///
    /// A chunk that breaks mid-stream aborts the turn with its error and
    /// nothing is recorded for the assistant.
    pub async fn run_turn<F>(
        &self,
        session: &mut Session,
        prompt: &str,
        mut on_fragment: F,
    ) -> ChatResult<TurnOutcome>
    where
        F: FnMut(&str),
    {
        let model = session
            .model()
            .map(str::to_string)
            .ok_or_else(|| ChatError::new("no model selected"))?;
        session.submit(prompt)?;

        let mut reply = self.send(&model, session.transcript().snapshot()).await;
        while let Some(fragment) = reply.next().await {
            on_fragment(&fragment?);
        }

        let outcome = reply.finish();
        session.commit(&outcome)?;
        Ok(outcome)
    }
}

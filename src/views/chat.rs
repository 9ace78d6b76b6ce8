use crate::ai::default_model;
use crate::session::Session;
use crate::types::{ChatMessage, ModelDescriptor, Role};
use crate::ui::ChatRelay;
use crate::views::shared::markdown_to_html;
use dioxus::events::Key;
use dioxus::prelude::*;
use futures::StreamExt;

#[component]
pub fn ChatView(models: Vec<ModelDescriptor>, preferred_model: Option<String>) -> Element {
    let relay = use_context::<ChatRelay>();
    let relay = use_signal(move || relay);
    let mut session = use_signal(|| {
        let mut session = Session::new();
        if let Some(model) = default_model(&models, preferred_model.as_deref()) {
            session.select_model(model.name.clone());
        }
        session
    });
    let mut input = use_signal(String::new);
    // Text of the reply currently streaming in, if any.
    let mut streaming = use_signal(|| Option::<String>::None);
    // Transcript positions of assistant turns that carry an error.
    let mut failed_turns = use_signal(Vec::<usize>::new);
    let mut stream_error = use_signal(|| Option::<String>::None);

    let mut send_message = move |prompt: String| {
        if prompt.trim().is_empty() || streaming.read().is_some() {
            return;
        }
        let Some(model) = session.read().model().map(str::to_string) else {
            return;
        };
        if let Err(err) = session.write().submit(&prompt) {
            tracing::warn!(error = %err, "message not sent");
            return;
        }
        input.set(String::new());
        stream_error.set(None);
        streaming.set(Some(String::new()));

        let history = session.read().transcript().snapshot().to_vec();
        let relay = relay.read().clone();
        spawn(async move {
            let mut reply = relay.send(&model, &history).await;
            while let Some(fragment) = reply.next().await {
                match fragment {
                    Ok(piece) => streaming.with_mut(|text| {
                        if let Some(text) = text {
                            text.push_str(&piece);
                        }
                    }),
                    Err(err) => {
                        tracing::error!(error = %err, "reply stream broke");
                        stream_error.set(Some(err.to_string()));
                        streaming.set(None);
                        return;
                    }
                }
            }

            let outcome = reply.finish();
            let committed = session.write().commit(&outcome);
            match committed {
                Ok(()) => {
                    if outcome.is_failure() {
                        let index = session.read().transcript().len() - 1;
                        failed_turns.with_mut(|turns| turns.push(index));
                    }
                }
                Err(err) => tracing::warn!(error = %err, "reply not recorded"),
            }
            streaming.set(None);
        });
    };

    let transcript: Vec<ChatMessage> = session.read().transcript().snapshot().to_vec();
    let current_model = session.read().model().unwrap_or_default().to_string();
    let in_flight = streaming();
    let sending = in_flight.is_some();
    let failed = failed_turns();

    rsx! {
        div { class: "main-container",
            div { class: "toolbar",
                div { class: "model-picker",
                    label { r#for: "model-select", "Select a Model" }
                    select {
                        id: "model-select",
                        disabled: sending,
                        onchange: move |ev: Event<FormData>| session.write().select_model(ev.value()),
                        for model in models.iter() {
                            option {
                                value: "{model.name}",
                                selected: model.name == current_model,
                                "{model.label()}"
                            }
                        }
                    }
                }
                button {
                    class: "btn", r#type: "button",
                    disabled: sending,
                    onclick: move |_| {
                        session.write().new_chat();
                        failed_turns.set(Vec::new());
                        stream_error.set(None);
                    },
                    "New Chat"
                }
            }

            h2 { class: "chat-title", "Chat with " em { "{current_model}" } }

            div { id: "chat-list", class: "chat-list",
                for (i, msg) in transcript.iter().enumerate() {
                    div { class: format_args!("message-row {}", msg.role.as_str()),
                        if matches!(msg.role, Role::Assistant) {
                            AssistantBubble {
                                content: msg.content.clone(),
                                is_streaming: false,
                                is_error: failed.contains(&i),
                            }
                        } else {
                            div { class: format_args!("bubble {}", msg.role.as_str()), "{msg.content}" }
                        }
                    }
                }
                if let Some(text) = in_flight {
                    div { class: "message-row assistant",
                        AssistantBubble { content: text, is_streaming: true, is_error: false }
                    }
                }
                if let Some(err) = stream_error() {
                    div { class: "error-banner", "Reply interrupted: {err}" }
                }
            }

            form { class: "composer",
                div { class: "hstack",
                    textarea {
                        rows: "1", placeholder: "Type your message",
                        value: "{input}", oninput: move |ev| input.set(ev.value()),
                        onkeydown: move |ev| {
                            if ev.key() == Key::Enter && !ev.modifiers().shift() {
                                ev.prevent_default();
                                send_message(input());
                            }
                        },
                        disabled: sending, autofocus: true,
                    }
                    button {
                        class: "btn btn-primary", r#type: "button",
                        disabled: sending || input().trim().is_empty(),
                        onclick: move |_| send_message(input()),
                        "Send"
                    }
                }
            }
        }
    }
}

#[component]
fn AssistantBubble(content: String, is_streaming: bool, is_error: bool) -> Element {
    let content_html = markdown_to_html(&content);
    let copy_payload = content.clone();
    let on_copy = move |_| {
        let raw = copy_payload.clone();
        spawn(async move {
            #[cfg(any(feature = "desktop", feature = "mobile"))]
            {
                if let Ok(mut cb) = arboard::Clipboard::new() {
                    let _ = cb.set_text(raw);
                }
            }
            #[cfg(not(any(feature = "desktop", feature = "mobile")))]
            let _ = raw;
        });
    };
    let class = if is_error { "bubble assistant error" } else { "bubble assistant" };

    rsx! {
        div { class: class,
            if !is_streaming {
                div { class: "bubble-controls",
                    button { class: "action-btn", title: "Copy markdown", onclick: on_copy, "Copy" }
                }
            }
            if is_streaming && content.is_empty() {
                div { class: "md", div { class: "shimmer-text", "Processing…" } }
            } else {
                div { class: "md", dangerous_inner_html: "{content_html}" }
            }
        }
    }
}

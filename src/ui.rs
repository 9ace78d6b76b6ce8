use crate::ai::{LLMBackend, ModelDirectory, OllamaBackend, Relay};
use crate::config::AppConfig;
use crate::theme::STYLESHEET;
use crate::views::ChatView;
use dioxus::prelude::*;
use std::sync::Arc;

/// Shared handle the views use to stream replies.
pub type ChatRelay = Relay<dyn LLMBackend>;

#[component]
pub fn App() -> Element {
    let config = use_context::<AppConfig>();
    let backend = use_hook({
        let config = config.clone();
        move || Arc::new(OllamaBackend::new(&config)) as Arc<dyn LLMBackend>
    });
    use_context_provider({
        let backend = backend.clone();
        let system_prompt = config.system_prompt.clone();
        move || ChatRelay::new(backend, system_prompt)
    });

    let models = use_resource(move || {
        let directory = ModelDirectory::new(backend.clone());
        async move { directory.list_models().await.map_err(|err| err.to_string()) }
    });

    let body = match &*models.read_unchecked() {
        None => rsx! {
            div { class: "main-container",
                p { class: "shimmer-text", "Loading models…" }
            }
        },
        Some(Err(err)) => {
            tracing::error!(error = %err, "could not list models");
            rsx! { ModelServerDown { error: err.clone() } }
        }
        Some(Ok(list)) => rsx! {
            ChatView {
                models: list.clone(),
                preferred_model: config.preferred_model.clone(),
            }
        },
    };

    rsx! {
        style { dangerous_inner_html: STYLESHEET }
        {body}
    }
}

#[component]
fn ModelServerDown(error: String) -> Element {
    rsx! {
        div { class: "main-container",
            h2 { class: "chat-title", "No models available" }
            div { class: "error-banner", "{error}" }
            p { class: "text-muted",
                "Make sure Ollama is running with "
                code { "ollama serve" }
                " and that at least one model is pulled."
            }
        }
    }
}

//! Page styles. Colours follow the OS light/dark preference.

pub const STYLESHEET: &str = r#"
:root {
    --color-bg-primary: #ffffff;
    --color-text-primary: #000000;
    --color-text-muted: #4a4a4a;
    --color-border: #c2c2c2;
    --color-input-bg: #ffffff;
    --color-chat-user-bg: #111111;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #f5f5f5;
    --color-chat-assistant-text: #000000;
    --color-error-bg: #fde8e4;
    --color-error-text: #a3200a;
    --color-shimmer-highlight: #ff3509;
}
@media (prefers-color-scheme: dark) {
    :root {
        --color-bg-primary: #000000;
        --color-text-primary: #ffffff;
        --color-text-muted: #cfcfcf;
        --color-border: #2a2a2a;
        --color-input-bg: #000000;
        --color-chat-user-bg: #ffffff;
        --color-chat-user-text: #000000;
        --color-chat-assistant-bg: #111111;
        --color-chat-assistant-text: #ffffff;
        --color-error-bg: #3a0d05;
        --color-error-text: #ffb79f;
    }
}
body { margin: 0; font-family: system-ui, sans-serif; background: var(--color-bg-primary); color: var(--color-text-primary); }
.main-container { max-width: 52rem; margin: 0 auto; padding: 1rem; display: flex; flex-direction: column; min-height: 100vh; box-sizing: border-box; }
.toolbar { display: flex; gap: 0.75rem; align-items: flex-end; }
.model-picker { display: flex; flex-direction: column; gap: 0.25rem; flex: 1; }
.model-picker label { font-size: 0.85rem; color: var(--color-text-muted); }
.model-picker select { padding: 0.4rem; border: 1px solid var(--color-border); background: var(--color-input-bg); color: var(--color-text-primary); }
.chat-title { margin: 1rem 0; }
.chat-list { flex: 1; display: flex; flex-direction: column; gap: 0.75rem; }
.message-row { display: flex; }
.message-row.user { justify-content: flex-end; }
.bubble { padding: 0.6rem 0.9rem; border-radius: 0.75rem; max-width: 85%; }
.bubble.user { background: var(--color-chat-user-bg); color: var(--color-chat-user-text); white-space: pre-wrap; }
.bubble.assistant { background: var(--color-chat-assistant-bg); color: var(--color-chat-assistant-text); }
.bubble.error { background: var(--color-error-bg); color: var(--color-error-text); }
.bubble-controls { display: flex; justify-content: flex-end; }
.action-btn { border: none; background: transparent; color: var(--color-text-muted); cursor: pointer; font-size: 0.8rem; }
.shimmer-text { color: var(--color-shimmer-highlight); }
.error-banner { padding: 0.6rem 0.9rem; background: var(--color-error-bg); color: var(--color-error-text); border-radius: 0.5rem; }
.composer { position: sticky; bottom: 0; padding-top: 0.75rem; background: var(--color-bg-primary); }
.composer .hstack { display: flex; gap: 0.5rem; align-items: flex-end; }
.composer textarea { flex: 1; resize: none; padding: 0.5rem; border: 1px solid var(--color-border); background: var(--color-input-bg); color: var(--color-text-primary); }
.btn { padding: 0.45rem 0.9rem; border: 1px solid var(--color-border); background: transparent; color: var(--color-text-primary); cursor: pointer; }
.btn:disabled { opacity: 0.5; cursor: default; }
.btn-primary { background: var(--color-chat-user-bg); color: var(--color-chat-user-text); }
"#;

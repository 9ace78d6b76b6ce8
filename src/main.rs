use ollama_chat::config::AppConfig;
use ollama_chat::ui;

/// Bundled defaults for builds that ship without a `.env` (mobile, web)
const BUNDLED_CONFIG: &str = include_str!("../assets/config.env");

#[cfg(not(target_arch = "wasm32"))]
fn load_dotenv() {
    // First try to load from .env file (desktop dev)
    if dotenvy::dotenv().is_ok() {
        return;
    }

    load_bundled_config();
}

#[cfg(target_arch = "wasm32")]
fn load_dotenv() {
    load_bundled_config();
}

fn load_bundled_config() {
    // Variables already present in the environment are left alone.
    if let Err(err) = dotenvy::from_read(BUNDLED_CONFIG.as_bytes()) {
        eprintln!("ignoring bundled config: {err}");
    }
}

fn main() {
    load_dotenv();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err:#}");
            std::process::exit(2);
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(config.tracing_level())
        .with_target(false)
        .init();
    tracing::info!(host = %config.ollama_host, "starting chat front-end");

    dioxus::LaunchBuilder::new()
        .with_context(config)
        .launch(ui::App);
}

use std::sync::Arc;

use {
    clap::Parser,
    tracing::{info, warn},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use {
    parlo_gateway::{AppState, start_server},
    parlo_media::MediaStore,
    parlo_sentiment::{GoogleSentiment, SentimentProvider},
    parlo_voice::{GoogleStt, GoogleTts, SttProvider, TtsProvider},
};

#[derive(Parser)]
#[command(name = "parlo", about = "Parlo — speech and sentiment web front end")]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,

    /// Address to bind to (overrides config value).
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on (overrides config value).
    #[arg(long)]
    port: Option<u16>,

    /// Custom config file (overrides discovery).
    #[arg(long, env = "PARLO_CONFIG")]
    config: Option<std::path::PathBuf>,
}

/// Initialise tracing from the CLI flags.
fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if cli.json_logs {
        registry
            .with(fmt::layer().json().with_target(true))
            .init();
    } else {
        registry.with(fmt::layer().with_target(false)).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "parlo starting");

    let config = match cli.config {
        Some(ref path) => parlo_config::load_config(path)?,
        None => parlo_config::discover_and_load(),
    };

    // CLI args override config values
    let bind = cli.bind.unwrap_or_else(|| config.server.bind.clone());
    let port = cli.port.unwrap_or(config.server.port);

    let store = MediaStore::new(
        config.storage.uploads_dir.clone(),
        config.storage.tts_dir.clone(),
    );
    store.init().await?;

    let stt: Arc<dyn SttProvider> = Arc::new(GoogleStt::new(&config.voice.stt));
    let tts: Arc<dyn TtsProvider> = Arc::new(GoogleTts::new(&config.voice.tts));
    let sentiment: Arc<dyn SentimentProvider> = Arc::new(GoogleSentiment::new(&config.sentiment));

    for (provider, configured) in [
        (stt.name(), stt.is_configured()),
        (tts.name(), tts.is_configured()),
        (sentiment.name(), sentiment.is_configured()),
    ] {
        if !configured {
            warn!(provider, "not configured; requests that use it will fail");
        }
    }

    let state = AppState {
        store: Arc::new(store),
        stt,
        tts,
        sentiment,
        script_path: config.storage.script.clone(),
    };

    start_server(&bind, port, state).await
}

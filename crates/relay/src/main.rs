use std::time::Duration;

use penugasan_common::config::AppConfig;
use penugasan_engine::{Relay, SentStore};
use penugasan_notifier::TelegramNotifier;
use penugasan_source::NotionClient;

const DEFAULT_LOG_FILTER: &str =
    "penugasan_relay=info,penugasan_engine=info,penugasan_source=info,penugasan_notifier=info";

/// Whether `LOG_FORMAT` asks for JSON lines output.
fn wants_json_logs(lookup: impl Fn(&str) -> Option<String>) -> bool {
    lookup("LOG_FORMAT").is_some_and(|v| v.trim().eq_ignore_ascii_case("json"))
}

fn init_tracing() {
    let builder = tracing_subscriber::fmt().with_env_filter(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
    );

    if wants_json_logs(|key| std::env::var(key).ok()) {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // `.env` may carry RUST_LOG and LOG_FORMAT, so it is read before tracing starts
    dotenvy::dotenv().ok();
    init_tracing();

    // Load configuration
    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    // A corrupt sent-ID file aborts here, before anything is delivered
    let store = SentStore::load(&config.sent_ids_file)?;
    tracing::info!(
        path = %store.path().display(),
        already_sent = store.len(),
        "Sent-ID store loaded"
    );

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.http_timeout_secs))
        .build()?;

    let source = NotionClient::from_config(client.clone(), &config);
    let notifier = TelegramNotifier::from_config(client, &config);

    let mut relay = Relay::new(source, notifier, store);
    relay.run().await;

    Ok(())
}

//! `movietrack` -- terminal client for the movie tracker backend.
//!
//! Reads one command per line from stdin. Logs go to stderr so the movie
//! list on stdout stays readable.
//!
//! # Environment variables
//!
//! | Variable                          | Default                          |
//! |-----------------------------------|----------------------------------|
//! | `MOVIETRACK_API_URL`              | `http://127.0.0.1:8000`          |
//! | `MOVIETRACK_STORAGE_PATH`         | `.movietrack/local_storage.json` |
//! | `MOVIETRACK_REQUEST_TIMEOUT_SECS` | `30`                             |
//! | `RUST_LOG`                        | `movietrack_app=info,...`        |

use std::sync::Arc;

use anyhow::Context;
use movietrack_app::config::AppConfig;
use movietrack_app::shell::{Shell, HELP};
use movietrack_app::storage::LocalStorage;
use movietrack_app::view::{MovieView, TerminalView};
use movietrack_client::api::MovieApi;
use movietrack_core::route::RouteName;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movietrack_app=info,movietrack_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // --- Configuration ---
    let config = AppConfig::from_env().context("Invalid configuration")?;
    tracing::info!(
        api_url = %config.api_url,
        storage_path = %config.storage_path.display(),
        timeout_secs = config.request_timeout_secs,
        "Loaded client configuration",
    );

    let api = MovieApi::with_timeout(config.api_url.clone(), config.request_timeout())
        .context("Failed to build HTTP client")?;
    let storage = LocalStorage::open(&config.storage_path).context("Failed to open local storage")?;

    let view = Arc::new(TerminalView::stdout());
    view.show_notice(HELP);

    let mut shell = Shell::new(api, storage, view);
    shell.goto(RouteName::Home.path()).await;

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    shell.run(stdin).await.context("Failed to read commands")?;

    tracing::info!("Shutting down");
    Ok(())
}

//! Firstrun command-line entry point
//!
//! Reads the show list from `firstrun.toml` next to the working
//! directory (falling back to the built-in defaults), queries TheTVDB,
//! and prints the schedule as a single JSON array on stdout. Per-show
//! diagnostics and log output go to stderr, so stdout stays a clean
//! data channel.

use std::io;
use std::path::Path;

use anyhow::Context;
use chrono::Local;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use firstrun_core::{Config, Schedule, TvdbClient, TvdbProvider};

const CONFIG_PATH: &str = "firstrun.toml";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::load_or_default(Path::new(CONFIG_PATH))
        .context("loading configuration")?;
    debug!(
        shows = config.shows.len(),
        window_days = config.window_days,
        "loaded configuration"
    );

    let cutoff = config.cutoff(Local::now().date_naive());

    let client = TvdbClient::connect_with_config(config.client_config())
        .await
        .context("connecting to TheTVDB")?;
    let provider = TvdbProvider::new(client);

    let schedule = Schedule::build(&provider, &config.shows, cutoff)
        .await
        .context("building schedule")?;

    schedule
        .report_missing(io::stderr().lock())
        .context("writing diagnostics")?;
    schedule
        .write_json(io::stdout().lock())
        .context("writing schedule")?;

    Ok(())
}

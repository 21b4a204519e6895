//! Fetch command implementation.
//!
//! This module runs one loader cycle against the event service and renders
//! the delivered records.

use crate::display::{Format, write_records};
use crate::settings::Settings;
use anyhow::{Context, Result, anyhow, bail};
use indicatif::{ProgressBar, ProgressStyle};
use quakewatch_lib::prelude::*;
use std::io::{self, BufWriter};
use std::time::Duration;
use tracing::info;

/// Fetch recent earthquakes and print them in the requested format.
pub(crate) async fn fetch(settings: &Settings, format: Format, quiet: bool) -> Result<()> {
    settings.validate()?;
    let base = settings.endpoint_url()?;

    let client = FetchClient::new(ClientConfig {
        timeout: settings.timeout(),
        ..Default::default()
    })
    .context("Failed to create HTTP client")?;
    let loader = Loader::with_config(
        client,
        LoaderConfig {
            timeout: settings.timeout(),
        },
    );
    let mut deliveries = loader.attach();

    let spinner = if quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}")?);
        pb.set_message(format!(
            "Loading earthquakes (M{}+, by {}, limit {})",
            settings.filter.min_magnitude, settings.filter.order_by, settings.filter.limit
        ));
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    };

    let request = loader.start(&base, &settings.filter);

    let delivery = tokio::select! {
        delivery = deliveries.recv() => {
            delivery.context("Loader stopped without delivering a result")?
        }
        _ = tokio::signal::ctrl_c() => {
            loader.cancel();
            spinner.finish_and_clear();
            bail!("Interrupted");
        }
    };
    spinner.finish_and_clear();

    info!(request = %delivery.request, expected = %request, url = %delivery.url, %format, "result delivered");

    match delivery.result {
        FetchResult::Success(records) => {
            let stdout = io::stdout().lock();
            write_records(&records, BufWriter::new(stdout), format)
        }
        FetchResult::Failure(failure) => {
            Err(anyhow!(failure)).context("Failed to load the earthquake feed")
        }
    }
}

//! Url command implementation.

use crate::settings::Settings;
use anyhow::Result;
use quakewatch_lib::query_url;

/// Print the query URL the fetch command would request.
pub(crate) fn print_url(settings: &Settings) -> Result<()> {
    settings.validate()?;
    let url = query_url(&settings.endpoint_url()?, &settings.filter);
    println!("{url}");
    Ok(())
}

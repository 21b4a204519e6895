//! Display utilities and output formatting for the quakewatch CLI.

use anyhow::Result;
use clap::ValueEnum;
use quakewatch_lib::prelude::*;
use std::io::Write;

/// Output format for delivered records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    Table,
    Json,
    Ndjson,
    Csv,
}

impl Format {
    /// Returns the format identifier.
    pub(crate) const fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
            Self::Csv => "csv",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Prefix shown when the place has no distance/direction part.
const NEAR_THE: &str = "Near the";

/// Splits a place like `"74km NW of Rumoi, Japan"` into its offset
/// (`"74km NW of"`) and primary location (`"Rumoi, Japan"`).
pub(crate) fn split_place(place: &str) -> (&str, &str) {
    const SEPARATOR: &str = " of ";
    match place.find(SEPARATOR) {
        Some(idx) => (&place[..idx + SEPARATOR.len() - 1], &place[idx + SEPARATOR.len()..]),
        None => (NEAR_THE, place),
    }
}

fn date_text(record: &Record) -> String {
    record
        .occurred_at()
        .map_or_else(|| "-".to_string(), |t| t.format("%b %d, %Y").to_string())
}

fn time_text(record: &Record) -> String {
    record
        .occurred_at()
        .map_or_else(|| "-".to_string(), |t| t.format("%-I:%M %p").to_string())
}

/// Quotes a CSV field if it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Write records to `writer` in the specified format.
pub(crate) fn write_records<W: Write>(
    records: &[Record],
    mut writer: W,
    format: Format,
) -> Result<()> {
    match format {
        Format::Table => {
            if records.is_empty() {
                writeln!(writer, "No earthquakes found.")?;
                return Ok(());
            }
            writeln!(
                writer,
                "{:>5}  {:<13} {:>8}  {:<16} {}",
                "MAG", "DATE", "TIME", "OFFSET", "LOCATION"
            )?;
            writeln!(writer, "{}", "-".repeat(72))?;
            for record in records {
                let (offset, primary) = split_place(record.place());
                writeln!(
                    writer,
                    "{:>5.1}  {:<13} {:>8}  {:<16} {}",
                    record.magnitude(),
                    date_text(record),
                    time_text(record),
                    offset,
                    primary
                )?;
            }
            writeln!(writer, "\nTotal: {} earthquakes", records.len())?;
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut writer, records)?;
            writeln!(writer)?;
        }
        Format::Ndjson => {
            for record in records {
                serde_json::to_writer(&mut writer, record)?;
                writeln!(writer)?;
            }
        }
        Format::Csv => {
            writeln!(writer, "magnitude,place,time,url,id")?;
            for record in records {
                let time = record.occurred_at().map_or_else(String::new, |t| {
                    t.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
                });
                writeln!(
                    writer,
                    "{},{},{},{},{}",
                    record.magnitude(),
                    csv_field(record.place()),
                    time,
                    csv_field(record.detail_url()),
                    csv_field(record.raw_id())
                )?;
            }
        }
    }

    writer.flush()?;
    Ok(())
}

//! CSV export of the working copy.
//!
//! Export always writes every loaded row in current display order. Filtering
//! only hides rows, so hidden rows are exported too.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use market_common::defaults::{EXPORT_FILE_NAME, EXPORT_MIME};
use market_common::{Column, MarketRow, Result, TableError};
use strum::IntoEnumIterator;

/// Destination for exported files.
pub trait DownloadSink {
    /// Deliver `bytes` as a file called `file_name` with the given MIME type.
    fn deliver(&mut self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<()>;
}

/// Sink that saves downloads into a directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    last_saved: Option<PathBuf>,
}

impl DirectorySink {
    /// Save downloads into `dir`. The directory is created on first delivery.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirectorySink {
            dir: dir.into(),
            last_saved: None,
        }
    }

    /// Path of the most recently saved file.
    pub fn last_saved(&self) -> Option<&Path> {
        self.last_saved.as_deref()
    }
}

impl DownloadSink for DirectorySink {
    fn deliver(&mut self, file_name: &str, mime: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        fs::write(&path, bytes)?;
        info!("Saved {} ({}, {} bytes)", path.display(), mime, bytes.len());
        self.last_saved = Some(path);
        Ok(())
    }
}

/// Format a number the way the table shows plain values: shortest form, no
/// trailing `.0`, `0` for negative zero, and exponent form outside
/// `[1e-6, 1e21)`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else if value.is_infinite() {
        let name = if value > 0.0 { "Infinity" } else { "-Infinity" };
        name.to_string()
    } else if value.abs() >= 1e21 || value.abs() < 1e-6 {
        // JS switches to exponent form here and always signs the exponent.
        let text = format!("{:e}", value);
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => text,
        }
    } else {
        value.to_string()
    }
}

fn record(row: &MarketRow) -> Vec<String> {
    Column::iter()
        .map(|column| match column {
            Column::Price24hPcnt => format!("{}%", format_number(row.price_24h_pcnt)),
            _ => match row.text(column) {
                Some(text) => text.to_string(),
                None => format_number(row.number(column).unwrap_or_default()),
            },
        })
        .collect()
}

/// Serialize `rows` as CSV: a fixed header line, then one record per row in
/// display-column order.
pub fn to_csv(rows: &[MarketRow]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(Column::iter().map(Column::header_label))?;
    for row in rows {
        writer.write_record(record(row))?;
    }

    writer
        .into_inner()
        .map_err(|e| TableError::Format(format!("Failed to finish CSV export: {}", e)))
}

/// Serialize `rows` and hand them to `sink` as `market_data_filtered.csv`.
pub fn export_to_csv(rows: &[MarketRow], sink: &mut dyn DownloadSink) -> Result<()> {
    let bytes = to_csv(rows)?;
    info!("Exporting {} rows", rows.len());
    sink.deliver(EXPORT_FILE_NAME, EXPORT_MIME, &bytes)
}

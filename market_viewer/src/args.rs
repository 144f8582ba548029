//! Command-line arguments for the market viewer.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;

use clap::Parser;
use market_common::Column;
use market_table::Event;

use crate::source::SourceFormat;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to the table file to mirror. Re-read on every refresh.
    #[clap(long)]
    pub path: String,

    /// How the file at `--path` is laid out.
    #[clap(long, value_enum, default_value_t = SourceFormat::Rendered)]
    pub format: SourceFormat,

    /// Directory that receives `market_data_filtered.csv` on export.
    #[clap(long, default_value = ".")]
    pub export_dir: String,

    /// Initial search text.
    #[clap(long)]
    pub search: Option<String>,

    /// Initial category filter.
    #[clap(long)]
    pub category: Option<String>,

    /// Column header to click once at startup.
    #[clap(long, value_enum)]
    pub sort: Option<Column>,
}

impl Args {
    /// Table path with surrounding whitespace and matching quotes removed.
    pub fn table_path(&self) -> PathBuf {
        normalize_path(&self.path)
    }

    /// Export directory with surrounding whitespace and matching quotes removed.
    pub fn export_dir(&self) -> PathBuf {
        normalize_path(&self.export_dir)
    }

    /// Events that replay the startup options, in the order a user would
    /// apply them.
    pub fn initial_events(&self) -> Vec<Event> {
        let mut events = Vec::new();
        if let Some(search) = &self.search {
            events.push(Event::SearchInput(search.clone()));
        }
        if let Some(category) = &self.category {
            events.push(Event::CategoryChanged(category.clone()));
        }
        if let Some(column) = self.sort {
            events.push(Event::HeaderClick(column.to_string()));
        }
        events
    }
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

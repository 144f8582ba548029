//! Error types shared by the table engine and the viewer.
//!
//! Data problems inside table cells are never errors: they are defaulted and
//! logged during extraction. `TableError` covers the infrastructure around the
//! table instead: reading sources, writing exports and handing input lines to
//! the event loop.
use std::io;

use crossbeam_channel::SendError;
use thiserror::Error;

/// Unified error type shared by every crate of the workspace.
#[derive(Error, Debug)]
pub enum TableError {
    /// I/O error originating from the standard library or files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// Failure while reading or writing CSV content.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A header tag or CLI value that does not name a known column.
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),
}

impl<T> From<SendError<T>> for TableError {
    fn from(err: SendError<T>) -> Self {
        TableError::ChannelSend(err.to_string())
    }
}

//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `TableError`, so functions can simply return `Result<T>`.
use crate::error::TableError;

/// Workspace-wide `Result` alias with `TableError` as the default error.
pub type Result<T, E = TableError> = std::result::Result<T, E>;

//!
//! Common types and utilities shared by the market table engine and its front ends.
//!
//! This crate aggregates:
//! - `error` — unified error type `TableError` used across the workspace.
//! - `result` — handy `Result<T, TableError>` alias.
//! - `column` — column identifiers and sort direction shared by every layer.
//! - `row` — the `MarketRow` record and lenient extraction from rendered cells.
//! - `snapshot` — rendering of raw market snapshots into table cells.
//! - `source` — the boundary trait that supplies rendered rows.
//! - `defaults` — delays, labels and file names used by the interaction layer.
#![warn(missing_docs)]
pub mod column;
pub mod defaults;
pub mod error;
pub mod result;
pub mod row;
pub mod snapshot;
pub mod source;

pub use column::{Column, SortDirection};
pub use error::TableError;
pub use result::Result;
pub use row::{MarketRow, RenderedRow, RowId, RowParser};
pub use source::RowSource;

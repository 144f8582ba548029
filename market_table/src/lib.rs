//! In-memory table state for the market table.
//!
//! The engine mirrors the rendered rows once and then drives the presentation
//! layer through the `TableView` trait:
//! - `filter` — search/category predicates and the resulting visible set.
//! - `sort` — sort state, comparator and order computation.
//! - `state` — `TableState`, which applies filter and sort results to a view.
//! - `export` — CSV serialization and the download sink.
//! - `timers` — cancelable delayed visual effects.
//! - `controller` — maps user events onto the operations above.
#![warn(missing_docs)]
pub mod controller;
pub mod export;
pub mod filter;
pub mod sort;
pub mod state;
pub mod timers;
pub mod view;

#[cfg(test)]
mod testing;

pub use controller::{Controller, Event, Key};
pub use filter::{FilterQuery, VisibleSet};
pub use sort::SortState;
pub use state::TableState;
pub use view::{Animation, TableView};

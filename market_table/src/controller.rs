//! Interaction glue: maps user events onto table operations.
//!
//! The controller owns everything one loaded table needs: the row source (for
//! reloads), the presentation layer, the download sink, the table state, the
//! input values and the pending visual effects. It is driven by a single
//! event loop: `handle` for user events and `tick` for expired timers.

use std::collections::HashMap;
use std::time::Instant;

use log::{debug, error, info};
use market_common::defaults::{HIGHLIGHT_DURATION, REFRESH_DELAY, SORT_LABEL_INITIAL};
use market_common::{Column, Result, RowId, RowSource};

use crate::export::{self, DownloadSink};
use crate::filter::FilterQuery;
use crate::state::TableState;
use crate::timers::{Effect, TimerId, Timers};
use crate::view::TableView;

/// Keyboard keys the table reacts to.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Key {
    /// A printable key.
    Char(char),
    /// The Escape key.
    Escape,
}

/// User events delivered by the front end.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Event {
    /// The search field now contains this text.
    SearchInput(String),
    /// The category selector now has this value (empty for all categories).
    CategoryChanged(String),
    /// The sort button was clicked.
    SortButton,
    /// A column header tagged with this column identifier was clicked.
    HeaderClick(String),
    /// A key was pressed.
    KeyDown {
        /// Pressed key.
        key: Key,
        /// Whether Ctrl was held.
        ctrl: bool,
    },
    /// A row was clicked.
    RowClick {
        /// Clicked row.
        row: RowId,
        /// Whether the click landed on the symbol cell.
        in_symbol_zone: bool,
    },
    /// The refresh action was triggered.
    Refresh,
    /// The export action was triggered.
    Export,
}

/// Event-driven owner of one loaded market table.
pub struct Controller<S, V, D> {
    source: S,
    view: V,
    sink: D,
    state: TableState,
    search: String,
    category: String,
    timers: Timers,
    highlights: HashMap<RowId, TimerId>,
}

impl<S, V, D> Controller<S, V, D>
where
    S: RowSource,
    V: TableView,
    D: DownloadSink,
{
    /// Read the source once, build the state and mount it on `view`.
    pub fn load(source: S, mut view: V, sink: D) -> Result<Self> {
        let rendered = source.load()?;
        let state = TableState::from_rendered(&rendered);
        reset_view(&state, &mut view);

        Ok(Controller {
            source,
            view,
            sink,
            state,
            search: String::new(),
            category: String::new(),
            timers: Timers::new(),
            highlights: HashMap::new(),
        })
    }

    /// Current table state.
    pub fn state(&self) -> &TableState {
        &self.state
    }

    /// Presentation layer.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Presentation layer, mutably (for redraw bookkeeping).
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Download sink.
    pub fn sink(&self) -> &D {
        &self.sink
    }

    /// Current search text.
    pub fn search(&self) -> &str {
        &self.search
    }

    /// When the next pending effect is due.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Number of pending effects.
    pub fn pending_effects(&self) -> usize {
        self.timers.len()
    }

    /// Apply one user event.
    pub fn handle(&mut self, event: Event, now: Instant) -> Result<()> {
        debug!("Event: {:?}", event);
        match event {
            Event::SearchInput(text) => {
                self.view.set_search_text(&text);
                self.search = text;
                self.filter();
            }
            Event::CategoryChanged(value) => {
                self.category = value;
                self.filter();
            }
            Event::SortButton => {
                self.state.toggle_sort(&mut self.view);
            }
            Event::HeaderClick(tag) => match Column::from_tag(&tag) {
                Ok(column) => self.state.sort_by_column(column, &mut self.view),
                Err(e) => debug!("Ignoring header click: {}", e),
            },
            Event::KeyDown {
                key: Key::Char('f'),
                ctrl: true,
            } => {
                // Replaces the default find action.
                self.view.set_search_focus(true);
            }
            Event::KeyDown {
                key: Key::Escape, ..
            } => {
                self.search.clear();
                self.view.set_search_text("");
                self.filter();
                self.view.set_search_focus(false);
            }
            Event::KeyDown { .. } => {}
            Event::RowClick {
                row,
                in_symbol_zone,
            } => {
                if in_symbol_zone {
                    self.highlight(row, now);
                }
            }
            Event::Refresh => self.refresh(now),
            Event::Export => export::export_to_csv(self.state.rows(), &mut self.sink)?,
        }
        Ok(())
    }

    /// Run every effect that is due at `now`.
    pub fn tick(&mut self, now: Instant) -> Result<()> {
        for effect in self.timers.take_due(now) {
            match effect {
                Effect::RevertHighlight(row) => {
                    self.highlights.remove(&row);
                    self.view.set_row_highlight(row, false);
                }
                Effect::Reload => self.reload()?,
            }
        }
        Ok(())
    }

    /// Cancel every pending effect and drop highlights. Call before discarding
    /// the controller.
    pub fn shutdown(&mut self) {
        self.clear_effects();
        info!("Controller shut down");
    }

    fn filter(&mut self) {
        let query = FilterQuery::new(&self.search, &self.category);
        self.state.apply_filter(&query, &mut self.view);
    }

    fn highlight(&mut self, row: RowId, now: Instant) {
        let Some(symbol) = self.state.row(row).map(|r| r.symbol.clone()) else {
            debug!("Ignoring click on unknown row {}", row);
            return;
        };
        info!("Clicked trading pair: {}", symbol);

        if let Some(previous) = self.highlights.remove(&row) {
            self.timers.cancel(previous);
        }
        self.view.set_row_highlight(row, true);
        let timer = self
            .timers
            .schedule(now, HIGHLIGHT_DURATION, Effect::RevertHighlight(row));
        self.highlights.insert(row, timer);
    }

    fn refresh(&mut self, now: Instant) {
        if self.timers.is_pending(Effect::Reload) {
            debug!("Refresh already pending");
            return;
        }
        self.view.set_loading(true);
        self.timers.schedule(now, REFRESH_DELAY, Effect::Reload);
    }

    fn clear_effects(&mut self) {
        for row in self.highlights.keys() {
            self.view.set_row_highlight(*row, false);
        }
        self.highlights.clear();
        let dropped = self.timers.dispose();
        if dropped > 0 {
            debug!("Cancelled {} pending effects", dropped);
        }
    }

    fn reload(&mut self) -> Result<()> {
        self.view.set_loading(false);
        self.clear_effects();

        let rendered = match self.source.load() {
            Ok(rendered) => rendered,
            Err(e) => {
                error!("Reload failed, keeping the current table: {}", e);
                return Err(e);
            }
        };
        self.state = TableState::from_rendered(&rendered);
        self.search.clear();
        self.category.clear();
        reset_view(&self.state, &mut self.view);
        info!("Reloaded {} rows", self.state.total());
        Ok(())
    }
}

fn reset_view(state: &TableState, view: &mut dyn TableView) {
    state.present(view);
    view.set_sort_button_label(SORT_LABEL_INITIAL);
    view.set_search_text("");
    view.set_search_focus(false);
    view.set_loading(false);
}

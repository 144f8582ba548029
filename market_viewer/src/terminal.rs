//! Terminal presentation of the market table.
//!
//! `TerminalView` keeps its own copy of what a page would show (cell texts,
//! row order, hidden rows, highlights, counters, controls) and prints it as a
//! plain text table. Every update marks the view dirty; the event loop redraws
//! once per processed event.
use std::collections::{HashMap, HashSet};
use std::io::{self, Write};

use chrono::{DateTime, Local};
use log::trace;
use market_common::snapshot::{ChangeClass, format_change};
use market_common::{Column, MarketRow, RowId, SortDirection};
use market_table::export::format_number;
use market_table::{Animation, TableView};
use strum::IntoEnumIterator;

struct DisplayRow {
    cells: Vec<String>,
    change: ChangeClass,
}

impl DisplayRow {
    fn from_row(row: &MarketRow) -> Self {
        let cells = Column::iter()
            .map(|column| match column {
                Column::Price24hPcnt => format_change(row.price_24h_pcnt),
                _ => match row.text(column) {
                    Some(text) => text.to_string(),
                    None => format_number(row.number(column).unwrap_or_default()),
                },
            })
            .collect();
        DisplayRow {
            cells,
            change: ChangeClass::of(row.price_24h_pcnt),
        }
    }
}

/// Plain-text rendition of the table and its controls.
#[derive(Default)]
pub struct TerminalView {
    rows: HashMap<RowId, DisplayRow>,
    order: Vec<RowId>,
    hidden: HashSet<RowId>,
    highlighted: HashSet<RowId>,
    indicator: Option<(Column, SortDirection)>,
    counts: Option<(usize, usize)>,
    sort_label: String,
    loading: bool,
    search_text: String,
    search_focused: bool,
    loaded_at: Option<DateTime<Local>>,
    dirty: bool,
}

impl TerminalView {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return whether anything changed since the last call, and reset the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Number of rows currently shown.
    pub fn shown_rows(&self) -> usize {
        self.order.iter().filter(|id| !self.hidden.contains(id)).count()
    }

    fn header(&self, column: Column) -> String {
        match self.indicator {
            Some((active, SortDirection::Ascending)) if active == column => format!("{} ▲", column),
            Some((active, SortDirection::Descending)) if active == column => format!("{} ▼", column),
            _ => column.to_string(),
        }
    }

    /// Print the controls, counters and visible rows.
    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        let cursor = if self.search_focused { "_" } else { "" };
        write!(out, "search: \"{}{}\"  [{}]", self.search_text, cursor, self.sort_label)?;
        if let Some((visible, total)) = self.counts {
            write!(out, "  showing {} of {}", visible, total)?;
        }
        if let Some(loaded_at) = self.loaded_at {
            write!(out, "  loaded {}", loaded_at.format("%H:%M:%S"))?;
        }
        writeln!(out)?;
        if self.loading {
            writeln!(out, "Loading data...")?;
        }

        let headers: Vec<String> = Column::iter().map(|c| self.header(c)).collect();
        let shown: Vec<(RowId, &DisplayRow)> = self
            .order
            .iter()
            .filter(|id| !self.hidden.contains(id))
            .filter_map(|id| self.rows.get(id).map(|row| (*id, row)))
            .collect();

        let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
        for (_, row) in &shown {
            for (width, cell) in widths.iter_mut().zip(&row.cells) {
                *width = (*width).max(cell.chars().count());
            }
        }
        let id_width = self.order.len().to_string().len();

        write!(out, "  {:>id_width$} ", "#")?;
        for (header, width) in headers.iter().zip(&widths) {
            write!(out, " {:<width$}", header, width = *width)?;
        }
        writeln!(out)?;

        for (id, row) in shown {
            let marker = if self.highlighted.contains(&id) { '*' } else { ' ' };
            write!(out, "{} {:>id_width$} ", marker, id)?;
            for (index, (cell, width)) in row.cells.iter().zip(&widths).enumerate() {
                if index == Column::Price24hPcnt.position() {
                    write!(out, " {:>width$}", cell, width = *width)?;
                } else {
                    write!(out, " {:<width$}", cell, width = *width)?;
                }
            }
            match row.change {
                ChangeClass::Positive => writeln!(out, "  ↑")?,
                ChangeClass::Negative => writeln!(out, "  ↓")?,
                ChangeClass::Neutral => writeln!(out)?,
            }
        }
        Ok(())
    }
}

impl TableView for TerminalView {
    fn show_rows(&mut self, rows: &[MarketRow]) {
        self.rows = rows.iter().map(|r| (r.id, DisplayRow::from_row(r))).collect();
        self.order = rows.iter().map(|r| r.id).collect();
        self.hidden.clear();
        self.highlighted.clear();
        self.indicator = None;
        self.loaded_at = Some(Local::now());
        self.dirty = true;
    }

    fn set_row_visible(&mut self, id: RowId, visible: bool) {
        let changed = if visible {
            self.hidden.remove(&id)
        } else {
            self.hidden.insert(id)
        };
        self.dirty |= changed;
    }

    fn animate_rows(&mut self, ids: &[RowId], animation: Animation) {
        trace!("{:?} on {} rows ({} ms)", animation, ids.len(), animation.duration_ms());
    }

    fn reorder(&mut self, ids: &[RowId]) {
        self.order = ids.to_vec();
        self.dirty = true;
    }

    fn clear_sort_indicators(&mut self) {
        self.indicator = None;
        self.dirty = true;
    }

    fn set_sort_indicator(&mut self, column: Column, direction: SortDirection) {
        self.indicator = Some((column, direction));
        self.dirty = true;
    }

    fn set_counts(&mut self, visible: usize, total: usize) {
        self.counts = Some((visible, total));
        self.dirty = true;
    }

    fn set_sort_button_label(&mut self, label: &str) {
        self.sort_label = label.to_string();
        self.dirty = true;
    }

    fn set_row_highlight(&mut self, id: RowId, on: bool) {
        let changed = if on {
            self.highlighted.insert(id)
        } else {
            self.highlighted.remove(&id)
        };
        self.dirty |= changed;
    }

    fn set_loading(&mut self, on: bool) {
        self.dirty |= self.loading != on;
        self.loading = on;
    }

    fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_string();
        self.dirty = true;
    }

    fn set_search_focus(&mut self, focused: bool) {
        self.dirty |= self.search_focused != focused;
        self.search_focused = focused;
    }
}

//! Table state: the in-memory mirror of the rendered rows.
//!
//! `TableState` holds the load-order snapshot, the working copy reordered by
//! sorting, the visible set and the sort state. Every mutating operation works
//! on plain records first and then reconciles the `TableView` it is given.

use log::{debug, info};
use market_common::defaults::{SORT_LABEL_ASC, SORT_LABEL_DESC};
use market_common::{Column, MarketRow, RenderedRow, RowId, RowParser, SortDirection};

use crate::filter::{self, FilterQuery, VisibleSet};
use crate::sort::{self, SortState};
use crate::view::{Animation, TableView};

/// Search/filter/sort state of one loaded table.
#[derive(Debug, Clone)]
pub struct TableState {
    /// Load-order snapshot. Never reordered; `original[id.0]` is row `id`.
    original: Vec<MarketRow>,
    /// Working copy in display order.
    current: Vec<MarketRow>,
    visible: VisibleSet,
    sort: SortState,
}

impl TableState {
    /// Build the state from records in load order.
    ///
    /// Row ids are reassigned to load positions so they always index the
    /// original snapshot.
    pub fn new(mut rows: Vec<MarketRow>) -> Self {
        for (index, row) in rows.iter_mut().enumerate() {
            row.id = RowId(index);
        }
        info!("Table state loaded with {} rows", rows.len());
        TableState {
            visible: VisibleSet::all(&rows),
            current: rows.clone(),
            original: rows,
            sort: SortState::default(),
        }
    }

    /// Extract records from rendered rows and build the state.
    pub fn from_rendered(rows: &[RenderedRow]) -> Self {
        Self::new(MarketRow::parse_rendered(rows))
    }

    /// Rows in current display order, including hidden ones.
    pub fn rows(&self) -> &[MarketRow] {
        &self.current
    }

    /// Rows in load order.
    pub fn original(&self) -> &[MarketRow] {
        &self.original
    }

    /// Look up a row by id.
    pub fn row(&self, id: RowId) -> Option<&MarketRow> {
        self.original.get(id.0)
    }

    /// Number of loaded rows.
    pub fn total(&self) -> usize {
        self.original.len()
    }

    /// Rows that passed the last filter.
    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    /// Number of rows that passed the last filter.
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Active sort column and direction.
    pub fn sort_state(&self) -> SortState {
        self.sort
    }

    /// Mount the rows on `view` and publish the counters.
    pub fn present(&self, view: &mut dyn TableView) {
        view.show_rows(&self.current);
        view.set_counts(self.visible_count(), self.total());
    }

    /// Apply `query`: hide non-matching rows, replay the entrance animation on
    /// the matching ones and update the counters. Returns the visible count.
    pub fn apply_filter(&mut self, query: &FilterQuery, view: &mut dyn TableView) -> usize {
        self.visible = filter::filter(&self.current, query);

        let mut shown = Vec::with_capacity(self.visible.len());
        for row in &self.current {
            let is_visible = self.visible.contains(row.id);
            view.set_row_visible(row.id, is_visible);
            if is_visible {
                shown.push(row.id);
            }
        }
        view.animate_rows(&shown, Animation::FilterEntrance);
        view.set_counts(shown.len(), self.total());

        debug!("Filter {:?} leaves {} of {} rows", query, shown.len(), self.total());
        shown.len()
    }

    /// Header click: toggle the sort state for `column` and re-sort.
    pub fn sort_by_column(&mut self, column: Column, view: &mut dyn TableView) {
        self.sort.request(column);
        self.apply_sort(view);
    }

    /// Sort button: toggle the change-column sort, re-sort and return the new
    /// button label.
    pub fn toggle_sort(&mut self, view: &mut dyn TableView) -> &'static str {
        self.sort.toggle_change();
        self.apply_sort(view);

        let label = match self.sort.direction {
            SortDirection::Descending => SORT_LABEL_DESC,
            SortDirection::Ascending => SORT_LABEL_ASC,
        };
        view.set_sort_button_label(label);
        label
    }

    fn apply_sort(&mut self, view: &mut dyn TableView) {
        let SortState { column, direction } = self.sort;
        view.clear_sort_indicators();
        view.set_sort_indicator(column, direction);

        let order = sort::order_rows(&self.current, column, direction);
        self.current = order
            .iter()
            .filter_map(|id| self.original.get(id.0).cloned())
            .collect();

        view.reorder(&order);
        view.animate_rows(&order, Animation::SortReentry);
        debug!("Sorted {} rows by {} {}", order.len(), column, direction);
    }
}

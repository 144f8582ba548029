//! Presentation layer seam.
//!
//! The table state never owns display nodes. It computes visibility and order on
//! plain records and then reconciles a `TableView` with explicit calls.

use market_common::{Column, MarketRow, RowId, SortDirection};

/// Entrance animation replayed on rows.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Animation {
    /// Played on rows that are visible after filtering.
    FilterEntrance,
    /// Played on every row after a sort.
    SortReentry,
}

impl Animation {
    /// Duration of the animation in milliseconds.
    pub fn duration_ms(self) -> u64 {
        match self {
            Animation::FilterEntrance => 300,
            Animation::SortReentry => 400,
        }
    }
}

/// Operations the table state needs from the presentation layer.
pub trait TableView {
    /// Mount freshly loaded rows in load order. Replaces anything shown before.
    fn show_rows(&mut self, rows: &[MarketRow]);
    /// Show or hide one row.
    fn set_row_visible(&mut self, id: RowId, visible: bool);
    /// Replay an entrance animation on the given rows.
    fn animate_rows(&mut self, ids: &[RowId], animation: Animation);
    /// Move rows so they appear in exactly the order of `ids`.
    fn reorder(&mut self, ids: &[RowId]);
    /// Remove the sort indicator from every header.
    fn clear_sort_indicators(&mut self);
    /// Mark `column` as the active sort header.
    fn set_sort_indicator(&mut self, column: Column, direction: SortDirection);
    /// Update the visible/total readouts. Views without counters ignore it.
    fn set_counts(&mut self, visible: usize, total: usize);
    /// Replace the sort button label.
    fn set_sort_button_label(&mut self, label: &str);
    /// Turn the transient highlight of a row on or off.
    fn set_row_highlight(&mut self, id: RowId, on: bool);
    /// Show or hide the loading indicator.
    fn set_loading(&mut self, on: bool);
    /// Replace the text shown in the search field.
    fn set_search_text(&mut self, text: &str);
    /// Focus or blur the search field.
    fn set_search_focus(&mut self, focused: bool);
}

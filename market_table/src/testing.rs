//! Test helpers: row builders and a view that records what it was told.

use std::collections::HashSet;

use market_common::{Column, MarketRow, RowId, SortDirection};

use crate::view::{Animation, TableView};

pub fn row(id: usize, symbol: &str, pcnt: f64, category: &str) -> MarketRow {
    let base = (id + 1) as f64;
    MarketRow {
        id: RowId(id),
        symbol: symbol.to_string(),
        bid1_price: base,
        ask1_price: base + 0.5,
        prev_price_24h: base * 10.0,
        price_24h_pcnt: pcnt,
        high_price_24h: base * 11.0,
        low_price_24h: base * 9.0,
        turnover_24h: base * 1000.0,
        volume_24h: base * 100.0,
        usd_index_price: base * 2.0,
        category: category.to_string(),
    }
}

pub fn symbols_in(rows: &[MarketRow], order: &[RowId]) -> Vec<String> {
    order
        .iter()
        .filter_map(|id| rows.iter().find(|r| r.id == *id))
        .map(|r| r.symbol.clone())
        .collect()
}

#[derive(Debug, Default)]
pub struct RecordingView {
    pub symbols: Vec<(RowId, String)>,
    pub order: Vec<RowId>,
    pub hidden: HashSet<RowId>,
    pub highlighted: HashSet<RowId>,
    pub animations: Vec<(Vec<RowId>, Animation)>,
    pub indicator: Option<(Column, SortDirection)>,
    pub indicator_clears: usize,
    pub counts: Option<(usize, usize)>,
    pub label: String,
    pub loading: bool,
    pub search_text: String,
    pub search_focused: bool,
    pub mounts: usize,
}

impl RecordingView {
    pub fn visible_symbols(&self) -> Vec<String> {
        self.order
            .iter()
            .filter(|id| !self.hidden.contains(id))
            .filter_map(|id| self.symbol(*id))
            .collect()
    }

    pub fn ordered_symbols(&self) -> Vec<String> {
        self.order.iter().filter_map(|id| self.symbol(*id)).collect()
    }

    fn symbol(&self, id: RowId) -> Option<String> {
        self.symbols
            .iter()
            .find(|(row_id, _)| *row_id == id)
            .map(|(_, symbol)| symbol.clone())
    }
}

impl TableView for RecordingView {
    fn show_rows(&mut self, rows: &[MarketRow]) {
        self.mounts += 1;
        self.symbols = rows.iter().map(|r| (r.id, r.symbol.clone())).collect();
        self.order = rows.iter().map(|r| r.id).collect();
        self.hidden.clear();
        self.highlighted.clear();
        self.indicator = None;
    }

    fn set_row_visible(&mut self, id: RowId, visible: bool) {
        if visible {
            self.hidden.remove(&id);
        } else {
            self.hidden.insert(id);
        }
    }

    fn animate_rows(&mut self, ids: &[RowId], animation: Animation) {
        self.animations.push((ids.to_vec(), animation));
    }

    fn reorder(&mut self, ids: &[RowId]) {
        self.order = ids.to_vec();
    }

    fn clear_sort_indicators(&mut self) {
        self.indicator_clears += 1;
        self.indicator = None;
    }

    fn set_sort_indicator(&mut self, column: Column, direction: SortDirection) {
        self.indicator = Some((column, direction));
    }

    fn set_counts(&mut self, visible: usize, total: usize) {
        self.counts = Some((visible, total));
    }

    fn set_sort_button_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    fn set_row_highlight(&mut self, id: RowId, on: bool) {
        if on {
            self.highlighted.insert(id);
        } else {
            self.highlighted.remove(&id);
        }
    }

    fn set_loading(&mut self, on: bool) {
        self.loading = on;
    }

    fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_string();
    }

    fn set_search_focus(&mut self, focused: bool) {
        self.search_focused = focused;
    }
}

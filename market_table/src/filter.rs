//! Search and category filtering.

use std::collections::HashSet;

use market_common::{MarketRow, RowId};

/// Active filter inputs.
///
/// The search term is case-folded on construction. An empty category matches
/// every row.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct FilterQuery {
    search: String,
    category: String,
}

impl FilterQuery {
    /// Build a query from the raw search text and selected category.
    pub fn new(search: &str, category: &str) -> Self {
        FilterQuery {
            search: search.to_lowercase(),
            category: category.to_string(),
        }
    }

    /// Whether the symbol contains the search term, ignoring case.
    pub fn matches_search(&self, row: &MarketRow) -> bool {
        row.symbol.to_lowercase().contains(&self.search)
    }

    /// Whether the row belongs to the selected category.
    pub fn matches_category(&self, row: &MarketRow) -> bool {
        self.category.is_empty() || row.category == self.category
    }

    /// Both predicates.
    pub fn matches(&self, row: &MarketRow) -> bool {
        self.matches_search(row) && self.matches_category(row)
    }
}

/// Rows that pass the active filter.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct VisibleSet(HashSet<RowId>);

impl VisibleSet {
    /// Every row visible.
    pub fn all(rows: &[MarketRow]) -> Self {
        VisibleSet(rows.iter().map(|row| row.id).collect())
    }

    /// Whether `id` is visible.
    pub fn contains(&self, id: RowId) -> bool {
        self.0.contains(&id)
    }

    /// Number of visible rows.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing is visible.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Compute the visible set for `query`. Membership of `rows` is never changed.
pub fn filter(rows: &[MarketRow], query: &FilterQuery) -> VisibleSet {
    VisibleSet(
        rows.iter()
            .filter(|row| query.matches(row))
            .map(|row| row.id)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::row;

    fn rows() -> Vec<MarketRow> {
        vec![
            row(0, "BTC", 5.0, "spot"),
            row(1, "ETH", -2.0, "linear"),
            row(2, "BTCUSD", 1.0, "linear"),
        ]
    }

    fn ids(set: &VisibleSet, rows: &[MarketRow]) -> Vec<String> {
        rows.iter()
            .filter(|r| set.contains(r.id))
            .map(|r| r.symbol.clone())
            .collect()
    }

    #[test]
    fn search_is_a_case_insensitive_substring_match() {
        let rows = rows();
        let visible = filter(&rows, &FilterQuery::new("bt", ""));
        assert_eq!(ids(&visible, &rows), vec!["BTC", "BTCUSD"]);

        let visible = filter(&rows, &FilterQuery::new("UsD", ""));
        assert_eq!(ids(&visible, &rows), vec!["BTCUSD"]);
    }

    #[test]
    fn empty_inputs_show_everything() {
        let rows = rows();
        let visible = filter(&rows, &FilterQuery::new("", ""));
        assert_eq!(visible, VisibleSet::all(&rows));
        assert_eq!(visible.len(), 3);
    }

    #[test]
    fn category_is_an_exact_match() {
        let rows = rows();
        let visible = filter(&rows, &FilterQuery::new("", "linear"));
        assert_eq!(ids(&visible, &rows), vec!["ETH", "BTCUSD"]);

        let visible = filter(&rows, &FilterQuery::new("", "Linear"));
        assert!(visible.is_empty());
    }

    #[test]
    fn filtering_is_idempotent() {
        let rows = rows();
        let query = FilterQuery::new("bt", "linear");
        assert_eq!(filter(&rows, &query), filter(&rows, &query));
    }

    #[test]
    fn predicates_commute() {
        let rows = rows();
        let query = FilterQuery::new("bt", "linear");
        for r in &rows {
            let search_first = query.matches_search(r) && query.matches_category(r);
            let category_first = query.matches_category(r) && query.matches_search(r);
            assert_eq!(query.matches(r), search_first);
            assert_eq!(search_first, category_first);
        }
        assert_eq!(ids(&filter(&rows, &query), &rows), vec!["BTCUSD"]);
    }
}

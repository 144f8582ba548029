//! Sort state, comparator and order computation.
//!
//! Ordering is computed on plain records and returned as a sequence of row
//! ids; applying it to the working copy and to the view is the caller's job.

use std::cmp::Ordering;

use market_common::{Column, MarketRow, RowId, SortDirection};

/// Active sort column and direction.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SortState {
    /// Column the rows were last sorted by.
    pub column: Column,
    /// Direction of that sort.
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        SortState {
            column: Column::Price24hPcnt,
            direction: SortDirection::Descending,
        }
    }
}

impl SortState {
    /// Header click rule: the same column flips direction, a new column starts
    /// descending.
    pub fn request(&mut self, column: Column) {
        if self.column == column {
            self.direction = self.direction.flip();
        } else {
            self.column = column;
            self.direction = SortDirection::Descending;
        }
    }

    /// Sort button rule: flip while the change column is active, otherwise
    /// switch to the change column descending.
    pub fn toggle_change(&mut self) {
        if self.column == Column::Price24hPcnt {
            self.direction = self.direction.flip();
        } else {
            self.column = Column::Price24hPcnt;
            self.direction = SortDirection::Descending;
        }
    }
}

/// Compare two rows on `column` in `direction`.
///
/// Text columns compare case-folded; numeric columns compare by value with
/// `-0.0` and `0.0` treated as equal.
pub fn compare(a: &MarketRow, b: &MarketRow, column: Column, direction: SortDirection) -> Ordering {
    let ordering = if column.is_text() {
        let a = a.text(column).unwrap_or_default().to_lowercase();
        let b = b.text(column).unwrap_or_default().to_lowercase();
        a.cmp(&b)
    } else {
        let a = a.number(column).unwrap_or_default() + 0.0;
        let b = b.number(column).unwrap_or_default() + 0.0;
        a.total_cmp(&b)
    };

    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// New logical order of `rows`. The sort is stable: rows with equal keys keep
/// their relative order.
pub fn order_rows(rows: &[MarketRow], column: Column, direction: SortDirection) -> Vec<RowId> {
    let mut sorted: Vec<&MarketRow> = rows.iter().collect();
    sorted.sort_by(|a, b| compare(a, b, column, direction));
    sorted.into_iter().map(|row| row.id).collect()
}

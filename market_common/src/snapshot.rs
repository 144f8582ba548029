//! Rendering of raw market snapshots into table cells.
//!
//! A snapshot file (`market_data.csv`) holds exchange ticker fields as plain
//! strings. The page generator turns each record into the eleven cells of a
//! rendered row: numbers are copied verbatim and the 24h change is formatted
//! with two decimals, a leading `+` for gains and a trailing `%`.

use serde::Deserialize;
use strum_macros::Display;

use crate::row::RenderedRow;

/// One record of a raw market snapshot.
///
/// Every field is optional text; missing columns deserialize to empty strings.
#[allow(missing_docs)]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SnapshotRecord {
    pub symbol: String,
    pub bid1_price: String,
    pub bid1_size: String,
    pub ask1_price: String,
    pub ask1_size: String,
    pub last_price: String,
    pub prev_price24h: String,
    pub price24h_pcnt: String,
    pub high_price24h: String,
    pub low_price24h: String,
    pub turnover24h: String,
    pub volume24h: String,
    pub usd_index_price: String,
    pub category: String,
}

/// Styling class of the change cell.
#[derive(Debug, Clone, Copy, Display, Eq, PartialEq)]
#[strum(serialize_all = "lowercase")]
pub enum ChangeClass {
    /// Price went up.
    Positive,
    /// Price went down.
    Negative,
    /// No change.
    Neutral,
}

impl ChangeClass {
    /// Classify a percent change.
    pub fn of(change: f64) -> Self {
        if change > 0.0 {
            ChangeClass::Positive
        } else if change < 0.0 {
            ChangeClass::Negative
        } else {
            ChangeClass::Neutral
        }
    }
}

/// Format a percent change the way the change cell shows it.
pub fn format_change(change: f64) -> String {
    if change > 0.0 {
        format!("+{:.2}%", change)
    } else {
        format!("{:.2}%", change)
    }
}

impl SnapshotRecord {
    /// Percent change of the record; unparseable values count as no change.
    pub fn change(&self) -> f64 {
        self.price24h_pcnt
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }

    /// Render the record into the eleven cells of a table row.
    pub fn render(&self) -> RenderedRow {
        RenderedRow::new([
            self.symbol.clone(),
            self.bid1_price.clone(),
            self.ask1_price.clone(),
            self.prev_price24h.clone(),
            format_change(self.change()),
            self.high_price24h.clone(),
            self.low_price24h.clone(),
            self.turnover24h.clone(),
            self.volume24h.clone(),
            self.usd_index_price.clone(),
            self.category.clone(),
        ])
    }
}

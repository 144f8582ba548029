//! Market row model and lenient extraction from rendered cells.
//!
//! A rendered row is the ordered list of cell texts a renderer produced for one
//! instrument. Extraction never fails: numeric cells that do not parse default
//! to `0` and are reported through `log` so bad data is visible in the logs
//! instead of silently masked.

use std::fmt;

use log::{debug, warn};

use crate::column::Column;
use crate::defaults::COLUMN_COUNT;

/// Handle to a rendered row. It is the load-order position of the row, so it
/// also indexes the original snapshot.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct RowId(pub usize);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Cell texts of one rendered table row, in display-column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedRow {
    /// Raw cell texts.
    pub cells: Vec<String>,
}

impl RenderedRow {
    /// Build a rendered row from anything that yields cell texts.
    pub fn new<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RenderedRow {
            cells: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Text of the cell for `column`, or an empty string if the row is short.
    pub fn cell(&self, column: Column) -> &str {
        self.cells
            .get(column.position())
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// One market instrument snapshot mirrored from a rendered row.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketRow {
    /// Handle of the rendered row this record mirrors.
    pub id: RowId,
    /// Trading pair symbol.
    pub symbol: String,
    /// Best bid price.
    pub bid1_price: f64,
    /// Best ask price.
    pub ask1_price: f64,
    /// Price 24 hours ago.
    pub prev_price_24h: f64,
    /// 24h change in percent, sign-bearing.
    pub price_24h_pcnt: f64,
    /// 24h high.
    pub high_price_24h: f64,
    /// 24h low.
    pub low_price_24h: f64,
    /// 24h turnover.
    pub turnover_24h: f64,
    /// 24h volume.
    pub volume_24h: f64,
    /// USD index price.
    pub usd_index_price: f64,
    /// Category label.
    pub category: String,
}

impl MarketRow {
    /// Text value of a text column, `None` for numeric columns.
    pub fn text(&self, column: Column) -> Option<&str> {
        match column {
            Column::Symbol => Some(&self.symbol),
            Column::Category => Some(&self.category),
            _ => None,
        }
    }

    /// Numeric value of a numeric column, `None` for text columns.
    pub fn number(&self, column: Column) -> Option<f64> {
        match column {
            Column::Bid1Price => Some(self.bid1_price),
            Column::Ask1Price => Some(self.ask1_price),
            Column::PrevPrice24h => Some(self.prev_price_24h),
            Column::Price24hPcnt => Some(self.price_24h_pcnt),
            Column::HighPrice24h => Some(self.high_price_24h),
            Column::LowPrice24h => Some(self.low_price_24h),
            Column::Turnover24h => Some(self.turnover_24h),
            Column::Volume24h => Some(self.volume_24h),
            Column::UsdIndexPrice => Some(self.usd_index_price),
            Column::Symbol | Column::Category => None,
        }
    }
}

/// Trait providing extraction of typed rows from rendered cells.
pub trait RowParser {
    /// Parses every rendered row, keeping input order.
    ///
    /// Row `i` of the output gets `RowId(i)`. Malformed cells never abort the
    /// extraction.
    fn parse_rendered(rows: &[RenderedRow]) -> Vec<Self>
    where
        Self: Sized;
}

impl RowParser for MarketRow {
    fn parse_rendered(rows: &[RenderedRow]) -> Vec<Self> {
        rows.iter()
            .enumerate()
            .map(|(index, rendered)| {
                if rendered.cells.len() < COLUMN_COUNT {
                    warn!(
                        "Row {} has {} cells, expected {}; missing cells are treated as empty",
                        index,
                        rendered.cells.len(),
                        COLUMN_COUNT
                    );
                }
                let number = |column: Column| numeric_cell(index, column, rendered.cell(column));

                MarketRow {
                    id: RowId(index),
                    symbol: rendered.cell(Column::Symbol).trim().to_string(),
                    bid1_price: number(Column::Bid1Price),
                    ask1_price: number(Column::Ask1Price),
                    prev_price_24h: number(Column::PrevPrice24h),
                    price_24h_pcnt: number(Column::Price24hPcnt),
                    high_price_24h: number(Column::HighPrice24h),
                    low_price_24h: number(Column::LowPrice24h),
                    turnover_24h: number(Column::Turnover24h),
                    volume_24h: number(Column::Volume24h),
                    usd_index_price: number(Column::UsdIndexPrice),
                    category: rendered.cell(Column::Category).trim().to_string(),
                }
            })
            .collect()
    }
}

/// Parse a numeric cell, defaulting to `0` and logging when it does not parse.
fn numeric_cell(index: usize, column: Column, raw: &str) -> f64 {
    let text = if column == Column::Price24hPcnt {
        raw.replacen('%', "", 1)
    } else {
        raw.to_string()
    };

    match parse_float_prefix(&text) {
        Some(value) => value,
        None if text.trim().is_empty() => {
            debug!("Row {}: column {} is empty, defaulting to 0", index, column);
            0.0
        }
        None => {
            warn!(
                "Row {}: column {} has unparseable value {:?}, defaulting to 0",
                index, column, raw
            );
            0.0
        }
    }
}

/// Locale-naive float parse of the longest numeric prefix.
///
/// Leading whitespace is skipped and trailing garbage ignored, so `" 12.5 USDT"`
/// gives `12.5` and `"1,234"` gives `1`. Returns `None` when no digits lead the
/// text or when the result is NaN.
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let digits_from = |mut at: usize| {
        while at < len && bytes[at].is_ascii_digit() {
            at += 1;
        }
        at
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        let negative = bytes.first() == Some(&b'-');
        return Some(if negative { f64::NEG_INFINITY } else { f64::INFINITY });
    }

    let int_end = digits_from(end);
    let mut digits = int_end - end;
    end = int_end;
    if end < len && bytes[end] == b'.' {
        let frac_end = digits_from(end + 1);
        digits += frac_end - (end + 1);
        if digits > 0 {
            end = frac_end;
        }
    }
    if digits == 0 {
        return None;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_start = end + 1;
        if exp_start < len && matches!(bytes[exp_start], b'+' | b'-') {
            exp_start += 1;
        }
        let exp_end = digits_from(exp_start);
        if exp_end > exp_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| !v.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::sync::{Mutex, Once};

    /// Keeps every log record so tests can check what extraction reported.
    struct CaptureLogger {
        records: Mutex<Vec<(Level, String)>>,
    }

    impl Log for CaptureLogger {
        fn enabled(&self, _: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            if let Ok(mut records) = self.records.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger {
        records: Mutex::new(Vec::new()),
    };
    static INIT: Once = Once::new();

    fn captured_logs() -> Vec<(Level, String)> {
        INIT.call_once(|| {
            log::set_logger(&LOGGER).unwrap();
            log::set_max_level(LevelFilter::Trace);
        });
        LOGGER.records.lock().unwrap().clone()
    }

    fn rendered(cells: &[&str]) -> RenderedRow {
        RenderedRow::new(cells.iter().copied())
    }

    #[test]
    fn extracts_trimmed_text_and_parsed_numbers() {
        let rows = vec![rendered(&[
            "  BTCUSDT \n",
            "64000.5",
            "64001",
            "62000",
            "+3.23%",
            "65000",
            "61000",
            "1200000.75",
            "18.5",
            "",
            " spot ",
        ])];

        let parsed = MarketRow::parse_rendered(&rows);

        assert_eq!(parsed.len(), 1);
        let row = &parsed[0];
        assert_eq!(row.id, RowId(0));
        assert_eq!(row.symbol, "BTCUSDT");
        assert_eq!(row.category, "spot");
        assert_eq!(row.bid1_price, 64000.5);
        assert_eq!(row.ask1_price, 64001.0);
        assert_eq!(row.price_24h_pcnt, 3.23);
        assert_eq!(row.turnover_24h, 1200000.75);
        assert_eq!(row.usd_index_price, 0.0);
    }

    #[test]
    fn malformed_cells_default_to_zero() {
        let rows = vec![rendered(&[
            "ETH", "n/a", "-", "abc", "%", "", "1e3", ".5", "12px", "Infinity", "spot",
        ])];

        let row = &MarketRow::parse_rendered(&rows)[0];

        assert_eq!(row.bid1_price, 0.0);
        assert_eq!(row.ask1_price, 0.0);
        assert_eq!(row.prev_price_24h, 0.0);
        assert_eq!(row.price_24h_pcnt, 0.0);
        assert_eq!(row.high_price_24h, 0.0);
        assert_eq!(row.low_price_24h, 1000.0);
        assert_eq!(row.turnover_24h, 0.5);
        assert_eq!(row.volume_24h, 12.0);
        assert_eq!(row.usd_index_price, f64::INFINITY);
    }

    #[test]
    fn short_rows_are_padded_with_empty_cells() {
        let rows = vec![rendered(&["SOL", "150"]), rendered(&["XRP"])];

        let parsed = MarketRow::parse_rendered(&rows);

        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].bid1_price, 150.0);
        assert_eq!(parsed[0].category, "");
        assert_eq!(parsed[1].id, RowId(1));
        assert_eq!(parsed[1].symbol, "XRP");
    }

    #[test]
    fn prefix_parse_matches_browser_semantics() {
        assert_eq!(parse_float_prefix("  42"), Some(42.0));
        assert_eq!(parse_float_prefix("-2.50%"), Some(-2.5));
        assert_eq!(parse_float_prefix("+5"), Some(5.0));
        assert_eq!(parse_float_prefix("5."), Some(5.0));
        assert_eq!(parse_float_prefix("1,234.5"), Some(1.0));
        assert_eq!(parse_float_prefix("2e"), Some(2.0));
        assert_eq!(parse_float_prefix("2e-3x"), Some(0.002));
        assert_eq!(parse_float_prefix("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("NaN"), None);
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("-"), None);
    }

    #[test]
    fn column_accessors_split_text_and_numbers() {
        let row = &MarketRow::parse_rendered(&[rendered(&[
            "BTC", "1", "2", "3", "5%", "6", "7", "8", "9", "10", "spot",
        ])])[0];

        assert_eq!(row.text(Column::Symbol), Some("BTC"));
        assert_eq!(row.text(Column::Volume24h), None);
        assert_eq!(row.number(Column::Price24hPcnt), Some(5.0));
        assert_eq!(row.number(Column::UsdIndexPrice), Some(10.0));
        assert_eq!(row.number(Column::Category), None);
    }

    #[test]
    fn defaulted_cells_are_reported_by_level() {
        captured_logs();
        let good = ["OK", "1", "2", "3", "4%", "5", "6", "7", "8", "9", "spot"];
        let mut rows: Vec<RenderedRow> = (0..5).map(|_| rendered(&good)).collect();
        rows.push(rendered(&[
            "BAD", "n/a", "2", "3", "4%", "5", "6", "7", "8", "", "spot",
        ]));

        let parsed = MarketRow::parse_rendered(&rows);
        let logs = captured_logs();

        assert_eq!(parsed[5].bid1_price, 0.0);
        assert!(logs.contains(&(
            Level::Warn,
            "Row 5: column bid1Price has unparseable value \"n/a\", defaulting to 0".to_string()
        )));
        assert!(logs.contains(&(
            Level::Debug,
            "Row 5: column usdIndexPrice is empty, defaulting to 0".to_string()
        )));
        assert!(
            !logs
                .iter()
                .any(|(level, msg)| *level == Level::Warn
                    && msg.starts_with("Row 5: column usdIndexPrice"))
        );
    }

    #[test]
    fn row_id_honours_width() {
        assert_eq!(format!("{:>3}", RowId(7)), "  7");
        assert_eq!(format!("{:<3}|", RowId(12)), "12 |");
    }
}

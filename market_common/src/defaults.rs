//! Shared constants for the interaction layer and the export.
use std::time::Duration;

/// Number of fixed-position cells in every rendered row.
pub const COLUMN_COUNT: usize = 11;

/// How long a clicked row stays highlighted.
pub const HIGHLIGHT_DURATION: Duration = Duration::from_millis(2000);
/// Delay between showing the loading indicator and the full reload.
pub const REFRESH_DELAY: Duration = Duration::from_millis(1500);

/// File name handed to the download sink on export.
pub const EXPORT_FILE_NAME: &str = "market_data_filtered.csv";
/// MIME type handed to the download sink on export.
pub const EXPORT_MIME: &str = "text/csv;charset=utf-8;";

/// Sort button label before the first toggle.
pub const SORT_LABEL_INITIAL: &str = "🔄 Sort by change";
/// Sort button label while the change column is sorted descending.
pub const SORT_LABEL_DESC: &str = "📈 Sorted descending";
/// Sort button label while the change column is sorted ascending.
pub const SORT_LABEL_ASC: &str = "📉 Sorted ascending";

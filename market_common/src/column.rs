//! Column identifiers and sort direction.
//!
//! Every column carries the machine-readable tag used on clickable headers
//! (`price24hPcnt`, `bid1Price`, ...), its position in a rendered row, and the
//! label written into the CSV export header.

use clap::ValueEnum;
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::TableError;

/// Table columns in display order.
#[derive(
    Debug,
    Clone,
    Copy,
    ValueEnum,
    Display,
    EnumString,
    EnumIter,
    Hash,
    Eq,
    PartialEq,
)]
pub enum Column {
    /// Trading pair symbol.
    #[strum(serialize = "symbol")]
    #[value(name = "symbol")]
    Symbol,
    /// Best bid price.
    #[strum(serialize = "bid1Price")]
    #[value(name = "bid1Price")]
    Bid1Price,
    /// Best ask price.
    #[strum(serialize = "ask1Price")]
    #[value(name = "ask1Price")]
    Ask1Price,
    /// Price 24 hours ago.
    #[strum(serialize = "prevPrice24h")]
    #[value(name = "prevPrice24h")]
    PrevPrice24h,
    /// 24h change in percent.
    #[strum(serialize = "price24hPcnt")]
    #[value(name = "price24hPcnt")]
    Price24hPcnt,
    /// 24h high.
    #[strum(serialize = "highPrice24h")]
    #[value(name = "highPrice24h")]
    HighPrice24h,
    /// 24h low.
    #[strum(serialize = "lowPrice24h")]
    #[value(name = "lowPrice24h")]
    LowPrice24h,
    /// 24h turnover.
    #[strum(serialize = "turnover24h")]
    #[value(name = "turnover24h")]
    Turnover24h,
    /// 24h volume.
    #[strum(serialize = "volume24h")]
    #[value(name = "volume24h")]
    Volume24h,
    /// USD index price.
    #[strum(serialize = "usdIndexPrice")]
    #[value(name = "usdIndexPrice")]
    UsdIndexPrice,
    /// Category label (e.g. `spot`).
    #[strum(serialize = "category")]
    #[value(name = "category")]
    Category,
}

impl Column {
    /// Resolve a header tag such as `price24hPcnt`. Matching is exact.
    pub fn from_tag(tag: &str) -> Result<Self, TableError> {
        tag.trim()
            .parse()
            .map_err(|_| TableError::UnknownColumn(tag.to_string()))
    }

    /// Cell position of this column inside a rendered row.
    pub fn position(self) -> usize {
        self as usize
    }

    /// Text columns compare as case-folded strings; everything else is numeric.
    pub fn is_text(self) -> bool {
        matches!(self, Column::Symbol | Column::Category)
    }

    /// Header label used in the CSV export.
    pub fn header_label(self) -> &'static str {
        match self {
            Column::Symbol => "Trading pair",
            Column::Bid1Price => "Bid price",
            Column::Ask1Price => "Ask price",
            Column::PrevPrice24h => "Price 24h ago",
            Column::Price24hPcnt => "Change 24h (%)",
            Column::HighPrice24h => "High 24h",
            Column::LowPrice24h => "Low 24h",
            Column::Turnover24h => "Turnover 24h",
            Column::Volume24h => "Volume 24h",
            Column::UsdIndexPrice => "USD index",
            Column::Category => "Category",
        }
    }
}

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, Display, Hash, Eq, PartialEq)]
pub enum SortDirection {
    /// Smallest first.
    #[strum(serialize = "asc")]
    Ascending,
    /// Largest first.
    #[strum(serialize = "desc")]
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flip(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Class name put on the header that currently drives the sort.
    pub fn indicator_class(self) -> &'static str {
        match self {
            SortDirection::Ascending => "sort-asc",
            SortDirection::Descending => "sort-desc",
        }
    }
}

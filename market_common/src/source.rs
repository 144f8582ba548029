//! Boundary trait for whatever produces the rendered table.

use crate::result::Result;
use crate::row::RenderedRow;

/// Supplies the rendered rows the table mirrors.
///
/// `load` is called once at startup and again on every full reload, so an
/// implementation should read fresh data each time rather than cache it.
pub trait RowSource {
    /// Read every rendered row, in display order.
    fn load(&self) -> Result<Vec<RenderedRow>>;
}

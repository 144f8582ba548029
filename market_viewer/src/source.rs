//! Row sources backed by CSV files.
//!
//! Two layouts are supported:
//! - `rendered` — each record is the eleven cell texts of a rendered table row,
//!   exactly as a page shows them (`+5.00%` in the change column). A leading
//!   header record is skipped.
//! - `snapshot` — the raw `market_data.csv` ticker snapshot with named columns,
//!   rendered into cells the way the page generator does it.
//!
//! Files are read on every `load`, so a refresh picks up a rewritten file.
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use log::{debug, info};
use market_common::snapshot::SnapshotRecord;
use market_common::{Column, RenderedRow, Result, RowSource};

/// File layout accepted by `--format`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum SourceFormat {
    /// Rendered cell texts, one table row per record.
    Rendered,
    /// Raw market snapshot with named columns.
    Snapshot,
}

/// A CSV-backed row source.
#[derive(Debug, Clone)]
pub enum TableSource {
    /// Rendered cell texts.
    Rendered(PathBuf),
    /// Raw market snapshot.
    Snapshot(PathBuf),
}

impl TableSource {
    /// Build the source for `path` in the given layout.
    pub fn open(format: SourceFormat, path: PathBuf) -> Self {
        match format {
            SourceFormat::Rendered => TableSource::Rendered(path),
            SourceFormat::Snapshot => TableSource::Snapshot(path),
        }
    }
}

impl RowSource for TableSource {
    fn load(&self) -> Result<Vec<RenderedRow>> {
        let rows = match self {
            TableSource::Rendered(path) => load_rendered(path)?,
            TableSource::Snapshot(path) => load_snapshot(path)?,
        };
        info!("Loaded {} rendered rows", rows.len());
        Ok(rows)
    }
}

fn is_header_record(cells: &[String]) -> bool {
    cells.first().is_some_and(|first| {
        let first = first.trim();
        first.eq_ignore_ascii_case(&Column::Symbol.to_string())
            || first == Column::Symbol.header_label()
    })
}

fn load_rendered(path: &Path) -> Result<Vec<RenderedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let cells: Vec<String> = record?.iter().map(str::to_string).collect();
        if cells.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        if index == 0 && is_header_record(&cells) {
            debug!("Skipping header record in {}", path.display());
            continue;
        }
        rows.push(RenderedRow { cells });
    }
    Ok(rows)
}

fn load_snapshot(path: &Path) -> Result<Vec<RenderedRow>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.deserialize::<SnapshotRecord>() {
        rows.push(record?.render());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn rendered_source_skips_header_and_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "table.csv",
            "symbol,bid1Price,ask1Price,prevPrice24h,price24hPcnt,highPrice24h,lowPrice24h,turnover24h,volume24h,usdIndexPrice,category\n\
             BTCUSDT,64000,64001,62000,+3.23%,65000,61000,1200,18,,spot\n\
             \n\
             ETHUSDT,3000,3001,3100,-3.23%,3200,2900,900,300,,spot\n",
        );

        let rows = TableSource::open(SourceFormat::Rendered, path).load().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cell(Column::Symbol), "BTCUSDT");
        assert_eq!(rows[1].cell(Column::Price24hPcnt), "-3.23%");
    }

    #[test]
    fn rendered_source_keeps_a_headerless_first_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "table.csv", "SOLUSDT,150,151\n");

        let rows = TableSource::open(SourceFormat::Rendered, path).load().unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].cells.len(), 3);
    }

    #[test]
    fn snapshot_source_renders_change_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "market_data.csv",
            "symbol,bid1Price,bid1Size,ask1Price,ask1Size,lastPrice,prevPrice24h,price24hPcnt,highPrice24h,lowPrice24h,turnover24h,volume24h,usdIndexPrice,category\n\
             BTCUSDT,64000,1,64001,2,64000,62000,3.2258,65000,61000,1200,18,,spot\n\
             DOGEUSDT,0.1,5,0.11,5,0.1,0.1,0.0000,0.12,0.09,10,100,,spot\n",
        );

        let rows = TableSource::open(SourceFormat::Snapshot, path).load().unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cell(Column::Price24hPcnt), "+3.23%");
        assert_eq!(rows[0].cell(Column::Ask1Price), "64001");
        assert_eq!(rows[1].cell(Column::Price24hPcnt), "0.00%");
        assert_eq!(rows[1].cell(Column::Category), "spot");
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = TableSource::open(SourceFormat::Rendered, dir.path().join("absent.csv"));
        assert!(source.load().is_err());
    }
}

// src/store.rs
//
// Persistent history for periodic runs, all under one data directory:
//
//   {year}-all.csv.bz2        per-run rows for the year      (read, concat, rewrite)
//   {year}-skus.csv           legend for the year            (merge, rewrite)
//   {year}-{month}-all.csv    per-run rows for the month     (append; header once)
//   {year}-{month}-skus.csv   legend for the month           (merge, rewrite)
//
// Nothing here deduplicates the time series: two runs in the same minute
// produce two blocks. Files are never deleted or trimmed.

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDateTime};
use serde_json::Value;

use crate::config::consts::{HISTORY_COLUMNS, LEGEND_COLUMNS, LEGEND_NUMERIC};
use crate::error::Result;
use crate::file::{append_csv, ensure_directory, read_csv, read_csv_bz2, write_csv, write_csv_bz2};
use crate::table::{float, Table};
use crate::transform::coerce;

/// Year/month partition of one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn of(now: NaiveDateTime) -> Self {
        Self { year: now.year(), month: now.month() }
    }

    pub fn yearly_archive(&self) -> String { format!("{}-all.csv.bz2", self.year) }
    pub fn yearly_legend(&self) -> String { format!("{}-skus.csv", self.year) }
    // Month is not zero-padded: 2024-3-all.csv
    pub fn monthly_archive(&self) -> String { format!("{}-{}-all.csv", self.year, self.month) }
    pub fn monthly_legend(&self) -> String { format!("{}-{}-skus.csv", self.year, self.month) }
}

/* ---------------- Projections ---------------- */

/// Per-run time series rows. The table must already carry `time`.
pub fn history_rows(table: &Table) -> Result<Table> {
    table.select(HISTORY_COLUMNS)
}

/// Static attributes for the legend. Attributes no product carried this run
/// come out as empty columns.
pub fn legend_rows(table: &Table) -> Table {
    table.select_or_missing(LEGEND_COLUMNS)
}

/* ---------------- Archives ---------------- */

/// Read the yearly archive if present, stack this run under it, rewrite.
/// Returns the total row count now in the archive.
pub fn update_yearly_archive(path: &Path, rows: &Table) -> Result<usize> {
    let merged = if path.is_file() {
        let existing = read_csv_bz2(path)?;
        logd!("{}: {} existing rows", path.display(), existing.len());
        existing.concat(rows.clone())
    } else {
        rows.clone()
    };
    write_csv_bz2(path, &merged)?;
    Ok(merged.len())
}

/// Append to the monthly archive, writing the header only when creating it.
pub fn update_monthly_archive(path: &Path, rows: &Table) -> Result<()> {
    if path.is_file() {
        append_csv(path, rows)
    } else {
        write_csv(path, rows)
    }
}

/* ---------------- Legends ---------------- */

/// Stored legend + this run's legend rows.
///
/// The stored numeric attributes are parsed back to floats, then every
/// current sku overwrites its stored row (or is appended when unseen).
/// Skus missing from this run keep their last known attributes.
pub fn merge_legend(mut existing: Table, current: &Table) -> Result<Table> {
    for column in LEGEND_NUMERIC {
        if existing.has_column(column) {
            existing.map_column(column, |v| Ok(coerce(v).map(float).unwrap_or(Value::Null)))?;
        }
    }
    existing.upsert_by("sku", current)
}

/// Merge into the legend at `path` if it exists, else create it from
/// `current`. Returns the legend's row count.
pub fn update_legend(path: &Path, current: &Table) -> Result<usize> {
    let legend = if path.is_file() {
        merge_legend(read_csv(path)?, current)?
    } else {
        current.clone()
    };
    write_csv(path, &legend)?;
    Ok(legend.len())
}

/* ---------------- Whole periodic write ---------------- */

/// Run all four persistence operations for one stamped table.
/// Returns the files touched, in write order.
pub fn write_history(dir: &Path, table: &Table, now: NaiveDateTime) -> Result<Vec<PathBuf>> {
    ensure_directory(dir)?;
    let period = Period::of(now);

    let rows = history_rows(table)?;
    let legend = legend_rows(table);

    let yearly = dir.join(period.yearly_archive());
    let total = update_yearly_archive(&yearly, &rows)?;
    logf!("{}: +{} rows ({} total)", yearly.display(), rows.len(), total);

    let yearly_legend = dir.join(period.yearly_legend());
    let n = update_legend(&yearly_legend, &legend)?;
    logf!("{}: {} skus", yearly_legend.display(), n);

    let monthly = dir.join(period.monthly_archive());
    update_monthly_archive(&monthly, &rows)?;
    logf!("{}: +{} rows", monthly.display(), rows.len());

    let monthly_legend = dir.join(period.monthly_legend());
    let n = update_legend(&monthly_legend, &legend)?;
    logf!("{}: {} skus", monthly_legend.display(), n);

    Ok(vec![yearly, yearly_legend, monthly, monthly_legend])
}

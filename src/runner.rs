// src/runner.rs
use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::{
    config::Options,
    core::Fetch,
    error::Result,
    file, flatten,
    progress::Progress,
    specs::browse,
    store,
    table::Table,
    transform::{self, Variant},
};

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub rows: usize,
    pub files_written: Vec<PathBuf>,
}

/// Fetch every category and flatten the hits into one table.
pub fn collect(
    fetcher: &dyn Fetch,
    options: &Options,
    progress: Option<&mut dyn Progress>,
) -> Result<Table> {
    let hits = browse::fetch_all(fetcher, options, progress)?;
    logf!("fetched {} hits across {} categories", hits.len(), options.categories.len());
    flatten::flatten(&hits)
}

/// Full-export run: snapshot CSV + NDJSON, overwritten.
pub fn run_export(
    fetcher: &dyn Fetch,
    options: &Options,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let table = collect(fetcher, options, progress)?;
    let table = transform::transform(table, Variant::Export)?;
    let files_written = file::write_snapshot(options, &table)?;
    Ok(RunSummary { rows: table.len(), files_written })
}

/// Periodic run: append this run to the yearly/monthly archives and refresh
/// both legends. `now` is the run timestamp.
pub fn run_periodic(
    fetcher: &dyn Fetch,
    options: &Options,
    now: NaiveDateTime,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let table = collect(fetcher, options, progress)?;
    let table = transform::transform(table, Variant::Periodic)?;
    let table = transform::stamp(table, now);
    let files_written = store::write_history(&options.data_dir, &table, now)?;
    Ok(RunSummary { rows: table.len(), files_written })
}

// src/file.rs

use std::{
    fs::{self, File, OpenOptions},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use bzip2::{read::BzDecoder, write::BzEncoder, Compression};

use crate::config::Options;
use crate::csv::{read_table, write_table};
use crate::error::Result;
use crate::table::Table;

pub fn ensure_directory(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("Path exists but is not a directory: {}", dir.display()),
        )
        .into());
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

/* ---------------- Plain CSV ---------------- */

/// Create/truncate `path` and write the table with its header.
pub fn write_csv(path: &Path, table: &Table) -> Result<()> {
    ensure_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    write_table(&mut out, table, true)?;
    out.flush()?;
    Ok(())
}

/// Append the table's rows to an existing CSV, no header.
pub fn append_csv(path: &Path, table: &Table) -> Result<()> {
    let file = OpenOptions::new().append(true).open(path)?;
    let mut out = BufWriter::new(file);
    write_table(&mut out, table, false)?;
    out.flush()?;
    Ok(())
}

pub fn read_csv(path: &Path) -> Result<Table> {
    read_table(BufReader::new(File::open(path)?))
}

/* ---------------- bzip2 CSV ---------------- */

pub fn write_csv_bz2(path: &Path, table: &Table) -> Result<()> {
    ensure_parent(path)?;
    let mut enc = BzEncoder::new(BufWriter::new(File::create(path)?), Compression::best());
    write_table(&mut enc, table, true)?;
    let mut inner = enc.finish()?;
    inner.flush()?;
    Ok(())
}

pub fn read_csv_bz2(path: &Path) -> Result<Table> {
    read_table(BzDecoder::new(BufReader::new(File::open(path)?)))
}

/* ---------------- NDJSON ---------------- */

/// One JSON object per line, keys in column order, missing as `null`.
pub fn write_ndjson(path: &Path, table: &Table) -> Result<()> {
    ensure_parent(path)?;
    let mut out = BufWriter::new(File::create(path)?);
    for rec in table.records() {
        serde_json::to_writer(&mut out, &rec)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/* ---------------- Snapshot ---------------- */

/// Full-export output: the whole table as CSV and NDJSON, both overwritten.
/// Returns the paths written.
pub fn write_snapshot(options: &Options, table: &Table) -> Result<Vec<PathBuf>> {
    let csv_path = options.snapshot_csv();
    let json_path = options.snapshot_json();

    write_csv(&csv_path, table)?;
    write_ndjson(&json_path, table)?;

    logf!("snapshot: {} rows -> {}, {}", table.len(), csv_path.display(), json_path.display());
    Ok(vec![csv_path, json_path])
}

// src/csv.rs
//
// Table <-> CSV in the layout the archives have always used:
// a leading unnamed row-index column, then every table column.
//
//     ,time,sku,currentPrice
//     0,2024-05-01 10:00,12345,19.99
//     1,2024-05-01 10:00,67890,
//
// Missing cells are empty, booleans are `True`/`False`, integral floats keep
// their `.0`, nested arrays/objects are written as compact JSON.

use std::io::{Read, Write};

use ::csv::{ReaderBuilder, WriterBuilder};
use serde_json::Value;

use crate::error::Result;
use crate::table::{float, Table};

/* ---------------- Cells ---------------- */

pub fn format_float(f: f64) -> String {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e16 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

pub fn format_cell(v: &Value) -> String {
    match v {
        Value::Null => s!(),
        Value::Bool(true) => s!("True"),
        Value::Bool(false) => s!("False"),
        Value::Number(n) if n.is_i64() || n.is_u64() => n.to_string(),
        Value::Number(n) => n.as_f64().map(format_float).unwrap_or_default(),
        Value::String(s) => s.clone(),
        // JSON, not Python repr: older archives hold ['VQA'], new rows hold ["VQA"]
        nested => nested.to_string(),
    }
}

/// Best-effort typing of a cell read back from disk.
/// Integers only when the text is their canonical form, so codes with
/// leading zeros stay text.
pub fn infer_cell(text: &str) -> Value {
    if text.is_empty() {
        return Value::Null;
    }
    match text {
        "True" => return Value::Bool(true),
        "False" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(i) = text.parse::<i64>() {
        if i.to_string() == text {
            return Value::from(i);
        }
        return Value::String(s!(text));
    }
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => float(f),
        _ => Value::String(s!(text)),
    }
}

/* ---------------- Writing ---------------- */

/// Write `table` as one CSV block. The index restarts at 0 for every block,
/// so appending a second block without header continues the file as-is.
pub fn write_table<W: Write>(w: W, table: &Table, header: bool) -> Result<()> {
    let mut out = WriterBuilder::new().has_headers(false).from_writer(w);

    if header {
        let mut h = Vec::with_capacity(table.width() + 1);
        h.push("");
        h.extend(table.columns().iter().map(String::as_str));
        out.write_record(&h)?;
    }

    for (i, row) in table.rows().iter().enumerate() {
        let mut rec = Vec::with_capacity(row.len() + 1);
        rec.push(i.to_string());
        rec.extend(row.iter().map(format_cell));
        out.write_record(&rec)?;
    }

    out.flush()?;
    Ok(())
}

/* ---------------- Reading ---------------- */

fn is_index_header(h: &str) -> bool {
    h.is_empty() || h.starts_with("Unnamed: ")
}

/// Read a CSV written by `write_table` (header present). A leading unnamed
/// column is the row index and is discarded.
pub fn read_table<R: Read>(r: R) -> Result<Table> {
    let mut rdr = ReaderBuilder::new().has_headers(true).flexible(true).from_reader(r);

    let headers = rdr.headers()?.clone();
    let skip = match headers.get(0) {
        Some(h) if is_index_header(h) => 1,
        _ => 0,
    };
    let columns: Vec<String> = headers.iter().skip(skip).map(|h| s!(h)).collect();

    let mut table = Table::new(columns);
    for rec in rdr.records() {
        let rec = rec?;
        table.push_row(rec.iter().skip(skip).map(infer_cell).collect());
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn cells_format_like_the_archives() {
        assert_eq!(format_cell(&Value::Null), "");
        assert_eq!(format_cell(&json!(true)), "True");
        assert_eq!(format_cell(&json!(750.0)), "750.0");
        assert_eq!(format_cell(&json!(19.99)), "19.99");
        assert_eq!(format_cell(&json!(10)), "10");
        assert_eq!(format_cell(&json!(["Organic", "Kosher"])), r#"["Organic","Kosher"]"#);
    }

    #[test]
    fn inference_keeps_codes_as_text() {
        assert_eq!(infer_cell(""), Value::Null);
        assert_eq!(infer_cell("12345"), json!(12345));
        assert_eq!(infer_cell("012345"), json!("012345"));
        assert_eq!(infer_cell("0.135"), json!(0.135));
        assert_eq!(infer_cell("False"), json!(false));
        assert_eq!(infer_cell("Red Wine"), json!("Red Wine"));
    }

    #[test]
    fn written_block_reads_back() {
        let t = Table::from_parts(
            cols!["sku", "name", "price"],
            vec![
                vec![json!("12345"), json!("Cab, Sauv"), json!(19.99)],
                vec![json!("67890"), json!("Lager \"X\""), Value::Null],
            ],
        );
        let mut buf = Vec::new();
        write_table(&mut buf, &t, true).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with(",sku,name,price\n0,12345,\"Cab, Sauv\",19.99\n"));

        let back = read_table(buf.as_slice()).unwrap();
        assert_eq!(back.columns(), t.columns());
        assert_eq!(back.cell(0, "sku"), Some(&json!(12345)));
        assert_eq!(back.cell(1, "name"), Some(&json!("Lager \"X\"")));
        assert_eq!(back.cell(1, "price"), Some(&Value::Null));
    }

    #[test]
    fn pandas_unnamed_index_is_dropped() {
        let text = "Unnamed: 0,time,sku\n0,2024-05-01 10:00,12345\n1,2024-05-01 10:00,67890\n";
        let t = read_table(text.as_bytes()).unwrap();
        assert_eq!(t.columns(), &["time", "sku"]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.cell(1, "sku"), Some(&json!(67890)));
    }
}

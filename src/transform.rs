// src/transform.rs
//
// Flat table → typed, denormalized product table.
//
// Steps run in a fixed order; the derived columns read the numbers the
// earlier steps produced:
//   1. category/subCategory/class {id, description} → `<f>_id` + `<f>`
//   2. sort → its first element
//   3. alcoholPercentage / 100
//   4. numeric strings → floats (strict for Export, lenient for Periodic)
//   5. derived metrics
//   6. drop internal columns
// `stamp` (periodic runs) adds the run time afterwards.

use chrono::NaiveDateTime;
use serde_json::Value;

use crate::config::consts::TIME_FORMAT;
use crate::error::{Error, Result};
use crate::table::{float, key_text, Table};

pub const COMPOSITE_FIELDS: &[&str] = &["category", "subCategory", "class"];
pub const DROPPED_COLUMNS: &[&str] = &["_currentPrice", "_regularPrice", "_source"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    /// Full snapshot: unparseable numbers abort the run.
    Export,
    /// Scheduled history run: falsy/unparseable numbers become missing,
    /// and costPerRating is derived.
    Periodic,
}

impl Variant {
    pub fn float_columns(self) -> &'static [&'static str] {
        match self {
            Variant::Export => &["volume", "regularPrice", "_currentPrice", "_regularPrice", "_score", "currentPrice"],
            Variant::Periodic => &["volume", "regularPrice", "_score", "currentPrice"],
        }
    }
}

/* ---------------- Cell coercion ---------------- */

/// Arithmetic operand: numbers as-is, numeric strings parsed, else missing.
pub fn coerce(v: &Value) -> Option<f64> {
    let f = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    f.filter(|f| f.is_finite())
}

fn is_falsy(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Strict float parse: missing stays missing, anything else must be a number.
pub fn parse_float_strict(column: &str, v: &Value) -> Result<Value> {
    let bad = || Error::NotNumeric { column: s!(column), value: v.to_string() };
    match v {
        Value::Null => Ok(Value::Null),
        Value::Number(n) => n.as_f64().map(float).ok_or_else(bad),
        Value::Bool(b) => Ok(float(if *b { 1.0 } else { 0.0 })),
        Value::String(s) => s.trim().parse::<f64>().map(float).map_err(|_| bad()),
        _ => Err(bad()),
    }
}

/// Lenient float parse: falsy or unparseable → missing.
pub fn parse_float_lenient(v: &Value) -> Value {
    if is_falsy(v) {
        return Value::Null;
    }
    coerce(v).map(float).unwrap_or(Value::Null)
}

/* ---------------- Steps ---------------- */

fn sku_of(table: &Table, row: usize) -> String {
    table.cell(row, "sku").and_then(key_text).unwrap_or_else(|| s!("?"))
}

fn decompose(table: &mut Table, field: &str) -> Result<()> {
    let cells = table.column(field)?;
    let mut ids = Vec::with_capacity(cells.len());
    let mut descs = Vec::with_capacity(cells.len());

    for (row, cell) in cells.into_iter().enumerate() {
        let pair = cell
            .as_object()
            .and_then(|o| Some((o.get("id")?.clone(), o.get("description")?.clone())));
        match pair {
            Some((id, desc)) => {
                ids.push(id);
                descs.push(desc);
            }
            None => {
                return Err(Error::Field {
                    sku: sku_of(table, row),
                    field: s!(field),
                    problem: format!("expected an {{id, description}} object, got {cell}"),
                });
            }
        }
    }

    table.set_column(&format!("{field}_id"), ids);
    table.set_column(field, descs);
    Ok(())
}

fn first_sort_key(table: &mut Table) -> Result<()> {
    let cells = table.column("sort")?;
    let mut firsts = Vec::with_capacity(cells.len());
    for (row, cell) in cells.into_iter().enumerate() {
        match cell.as_array().and_then(|a| a.first()) {
            Some(v) => firsts.push(v.clone()),
            None => {
                return Err(Error::Field {
                    sku: sku_of(table, row),
                    field: s!("sort"),
                    problem: format!("expected a non-empty list, got {cell}"),
                });
            }
        }
    }
    table.set_column("sort", firsts);
    Ok(())
}

fn numbers(table: &Table, column: &str) -> Result<Vec<Option<f64>>> {
    Ok(table.column(column)?.into_iter().map(coerce).collect())
}

fn mul(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? * b?)
}

fn div(a: Option<f64>, b: Option<f64>) -> Option<f64> {
    Some(a? / b?)
}

fn to_column(values: &[Option<f64>]) -> Vec<Value> {
    values.iter().map(|v| v.map(float).unwrap_or(Value::Null)).collect()
}

fn derive(table: &mut Table, variant: Variant) -> Result<()> {
    let unit = numbers(table, "unitSize")?;
    let volume = numbers(table, "volume")?;
    let units = numbers(table, "availableUnits")?;
    let price = numbers(table, "regularPrice")?;
    let abv = numbers(table, "alcoholPercentage")?;
    let stores = numbers(table, "storeCount")?;

    let n = table.len();
    let mut total_volume = Vec::with_capacity(n);
    let mut total_price = Vec::with_capacity(n);
    let mut total_alcohol = Vec::with_capacity(n);
    let mut alcohol_cost = Vec::with_capacity(n);
    for i in 0..n {
        let bottle = mul(unit[i], volume[i]);
        let alcohol = mul(bottle, abv[i]);
        total_volume.push(mul(bottle, units[i]));
        total_price.push(mul(units[i], price[i]));
        total_alcohol.push(alcohol);
        alcohol_cost.push(div(price[i], alcohol));
    }

    table.set_column("totalVolume", to_column(&total_volume));
    table.set_column("totalPrice", to_column(&total_price));
    table.set_column("totalAlcoholContent", to_column(&total_alcohol));
    table.set_column("alcoholCost", to_column(&alcohol_cost));

    if variant == Variant::Periodic {
        let rating = numbers(table, "consumerRating")?;
        let cost_per_rating: Vec<Option<f64>> = (0..n)
            .map(|i| div(div(price[i], mul(unit[i], volume[i])), rating[i]))
            .collect();
        table.set_column("costPerRating", to_column(&cost_per_rating));
    }

    // max() skips missing counts
    let max_stores = stores.iter().flatten().copied().fold(None, |m: Option<f64>, s| {
        Some(m.map_or(s, |m| m.max(s)))
    });
    let store_percent: Vec<Option<f64>> = stores.iter().map(|s| div(*s, max_stores)).collect();
    table.set_column("storePercent", to_column(&store_percent));

    Ok(())
}

/// Steps 1–6.
pub fn transform(mut table: Table, variant: Variant) -> Result<Table> {
    for field in COMPOSITE_FIELDS {
        decompose(&mut table, field)?;
    }
    first_sort_key(&mut table)?;

    table.map_column("alcoholPercentage", |v| {
        Ok(coerce(v).map(|f| float(f / 100.0)).unwrap_or(Value::Null))
    })?;

    for column in variant.float_columns() {
        match variant {
            Variant::Export => table.map_column(column, |v| parse_float_strict(column, v))?,
            Variant::Periodic => table.map_column(column, |v| Ok(parse_float_lenient(v)))?,
        }
    }

    derive(&mut table, variant)?;
    table.drop_columns(DROPPED_COLUMNS);

    logd!("transform({variant:?}): {} rows x {} columns", table.len(), table.width());
    Ok(table)
}

/// Add the run's `time` column (minute resolution) to every row.
pub fn stamp(mut table: Table, now: NaiveDateTime) -> Table {
    let time = Value::String(now.format(TIME_FORMAT).to_string());
    let n = table.len();
    table.set_column("time", vec![time; n]);
    table
}

// src/table.rs
//
// Column-ordered table of dynamically typed cells.
//
// Cells are `serde_json::Value`s so rows coming off the endpoint keep their
// shape until the transformer normalizes them. `Value::Null` is "missing":
// absent keys, unparseable numbers and non-finite arithmetic all land there.
//
// Column order is significant (it is the CSV/NDJSON field order):
// - set_column replaces in place, or appends a new column at the end
// - concat/upsert take the union, left columns first

use std::collections::HashMap;

use serde_json::{Map, Number, Value};

use crate::error::{Error, Result};

pub type Row = Vec<Value>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

/// Finite float → Number, anything else → Null.
pub fn float(f: f64) -> Value {
    Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

/// Text form used when comparing join keys. `"123"` and `123` compare equal,
/// which matters once a CSV round trip has turned a sku into a number.
pub fn key_text(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns, rows: Vec::new() }
    }

    /// Rows shorter than the header are padded with Null, longer ones cut.
    pub fn from_parts(columns: Vec<String>, rows: Vec<Row>) -> Self {
        let mut t = Self::new(columns);
        for r in rows { t.push_row(r); }
        t
    }

    /// One row per JSON object; columns are the union of keys in order of
    /// first appearance.
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Map<String, Value>>,
    {
        let records: Vec<&Map<String, Value>> = records.into_iter().collect();

        let mut columns: Vec<String> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for rec in &records {
            for key in rec.keys() {
                if !index.contains_key(key) {
                    index.insert(key.clone(), columns.len());
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|rec| {
                let mut row = vec![Value::Null; columns.len()];
                for (k, v) in rec.iter() {
                    row[index[k]] = v.clone();
                }
                row
            })
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] { &self.columns }
    pub fn rows(&self) -> &[Row] { &self.rows }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
    pub fn width(&self) -> usize { self.columns.len() }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.column_index(name).ok_or_else(|| Error::MissingColumn(s!(name)))
    }

    pub fn push_row(&mut self, mut row: Row) {
        row.resize(self.columns.len(), Value::Null);
        self.rows.push(row);
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let ix = self.column_index(column)?;
        self.rows.get(row).map(|r| &r[ix])
    }

    /// Borrow every cell of one column, top to bottom.
    pub fn column(&self, name: &str) -> Result<Vec<&Value>> {
        let ix = self.require(name)?;
        Ok(self.rows.iter().map(|r| &r[ix]).collect())
    }

    /// Replace a column's values, or append it as a new last column.
    pub fn set_column(&mut self, name: &str, values: Vec<Value>) {
        debug_assert_eq!(values.len(), self.rows.len());
        match self.column_index(name) {
            Some(ix) => {
                for (row, v) in self.rows.iter_mut().zip(values) { row[ix] = v; }
            }
            None => {
                self.columns.push(s!(name));
                let mut values = values.into_iter();
                for row in self.rows.iter_mut() {
                    row.push(values.next().unwrap_or(Value::Null));
                }
            }
        }
    }

    /// Rewrite a column cell by cell. The column must exist.
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> Result<()>
    where
        F: FnMut(&Value) -> Result<Value>,
    {
        let ix = self.require(name)?;
        for row in self.rows.iter_mut() {
            row[ix] = f(&row[ix])?;
        }
        Ok(())
    }

    /// Absent names are ignored.
    pub fn drop_columns(&mut self, names: &[&str]) {
        let keep: Vec<bool> = self.columns.iter().map(|c| !names.contains(&c.as_str())).collect();
        if keep.iter().all(|k| *k) { return; }

        let mut flags = keep.iter();
        self.columns.retain(|_| *flags.next().unwrap_or(&true));
        for row in self.rows.iter_mut() {
            let mut flags = keep.iter();
            row.retain(|_| *flags.next().unwrap_or(&true));
        }
    }

    /// Projection; every name must exist.
    pub fn select(&self, names: &[&str]) -> Result<Table> {
        let ixs = names.iter().map(|n| self.require(n)).collect::<Result<Vec<_>>>()?;
        Ok(self.project(names, &ixs.into_iter().map(Some).collect::<Vec<_>>()))
    }

    /// Projection; names this table lacks come back as all-Null columns.
    pub fn select_or_missing(&self, names: &[&str]) -> Table {
        let ixs: Vec<Option<usize>> = names.iter().map(|n| self.column_index(n)).collect();
        self.project(names, &ixs)
    }

    fn project(&self, names: &[&str], ixs: &[Option<usize>]) -> Table {
        let rows = self
            .rows
            .iter()
            .map(|r| ixs.iter().map(|ix| ix.map(|i| r[i].clone()).unwrap_or(Value::Null)).collect())
            .collect();
        Table { columns: names.iter().map(|n| s!(*n)).collect(), rows }
    }

    /// Stack `other` under `self`. Columns are the union (ours first);
    /// cells a side doesn't have are Null.
    pub fn concat(mut self, other: Table) -> Table {
        for c in &other.columns {
            if !self.has_column(c) {
                self.columns.push(c.clone());
            }
        }
        let width = self.columns.len();
        for row in self.rows.iter_mut() {
            row.resize(width, Value::Null);
        }

        let map: Vec<usize> = other
            .columns
            .iter()
            .map(|c| self.column_index(c).unwrap_or_default())
            .collect();
        for row in other.rows {
            let mut out = vec![Value::Null; width];
            for (v, &ix) in row.into_iter().zip(&map) {
                out[ix] = v;
            }
            self.rows.push(out);
        }
        self
    }

    /// Inner join on `self[left_on] == right[right_on]` (text form).
    ///
    /// - left row order is kept; each left row repeats once per right match
    /// - rows without a match on either side are dropped
    /// - joining on the same name keeps a single key column
    /// - other names present on both sides get `_x` (left) / `_y` (right)
    pub fn inner_join(&self, left_on: &str, right: &Table, right_on: &str) -> Result<Table> {
        let lk = self.require(left_on)?;
        let rk = right.require(right_on)?;
        let shared_key = left_on == right_on;

        let collides = |name: &str| {
            !(shared_key && name == left_on) && self.has_column(name) && right.has_column(name)
        };

        let mut columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| if collides(c) { format!("{c}_x") } else { c.clone() })
            .collect();
        let right_keep: Vec<usize> = (0..right.columns.len())
            .filter(|&i| !(shared_key && i == rk))
            .collect();
        for &i in &right_keep {
            let c = &right.columns[i];
            columns.push(if collides(c) { format!("{c}_y") } else { c.clone() });
        }

        let mut by_key: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, row) in right.rows.iter().enumerate() {
            if let Some(k) = key_text(&row[rk]) {
                by_key.entry(k).or_default().push(i);
            }
        }

        let mut rows = Vec::new();
        for lrow in &self.rows {
            let Some(k) = key_text(&lrow[lk]) else { continue };
            let Some(matches) = by_key.get(&k) else { continue };
            for &ri in matches {
                let rrow = &right.rows[ri];
                let mut out = lrow.clone();
                out.extend(right_keep.iter().map(|&i| rrow[i].clone()));
                rows.push(out);
            }
        }

        Ok(Table { columns, rows })
    }

    /// Keyed merge: for every row of `updates`, overwrite the first row of
    /// `self` with the same key (only the columns `updates` carries), or
    /// append it when the key is new. Existing duplicates are left alone.
    pub fn upsert_by(mut self, key: &str, updates: &Table) -> Result<Table> {
        let uk = updates.require(key)?;
        if !self.has_column(key) {
            self.set_column(key, vec![Value::Null; self.rows.len()]);
        }
        for c in &updates.columns {
            if !self.has_column(c) {
                self.set_column(c, vec![Value::Null; self.rows.len()]);
            }
        }
        let sk = self.require(key)?;

        let mut index: HashMap<String, usize> = HashMap::new();
        for (i, row) in self.rows.iter().enumerate() {
            if let Some(k) = key_text(&row[sk]) {
                index.entry(k).or_insert(i);
            }
        }

        let map: Vec<usize> = updates
            .columns
            .iter()
            .map(|c| self.column_index(c).unwrap_or_default())
            .collect();

        for urow in &updates.rows {
            let target = match key_text(&urow[uk]).and_then(|k| index.get(&k).copied()) {
                Some(i) => i,
                None => {
                    let i = self.rows.len();
                    self.rows.push(vec![Value::Null; self.columns.len()]);
                    if let Some(k) = key_text(&urow[uk]) { index.insert(k, i); }
                    i
                }
            };
            for (v, &ix) in urow.iter().zip(&map) {
                self.rows[target][ix] = v.clone();
            }
        }
        Ok(self)
    }

    /// Rows as JSON objects, keys in column order.
    pub fn records(&self) -> impl Iterator<Item = Map<String, Value>> + '_ {
        self.rows.iter().map(|row| {
            self.columns
                .iter()
                .cloned()
                .zip(row.iter().cloned())
                .collect::<Map<String, Value>>()
        })
    }
}

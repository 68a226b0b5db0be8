// src/flatten.rs
//
// Hit list → one flat table.
//
// Every hit has an `_id` and a nested `_source` product. The hits become one
// table, the `_source` objects another, and the two are inner-joined on
// `_id == sku`. A hit whose `_source.sku` doesn't equal its `_id` falls out
// of the join without a word; `_source` itself stays as a column until the
// transformer drops it.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::specs::browse::Hit;
use crate::table::{key_text, Table};

pub const HIT_KEY: &str = "_id";
pub const SOURCE_KEY: &str = "sku";
pub const SOURCE_COLUMN: &str = "_source";

pub fn flatten(hits: &[Hit]) -> Result<Table> {
    let hit_table = Table::from_records(hits);

    let sources: Vec<&Map<String, Value>> = hits
        .iter()
        .map(|h| match h.get(SOURCE_COLUMN) {
            Some(Value::Object(m)) => Ok(m),
            _ => Err(Error::Field {
                sku: h.get(HIT_KEY).and_then(key_text).unwrap_or_else(|| s!("?")),
                field: s!(SOURCE_COLUMN),
                problem: s!("is missing or not an object"),
            }),
        })
        .collect::<Result<_>>()?;
    let source_table = Table::from_records(sources);

    let joined = hit_table.inner_join(HIT_KEY, &source_table, SOURCE_KEY)?;
    if joined.len() < hits.len() {
        logd!("flatten: {} of {} hits had no matching sku", hits.len() - joined.len(), hits.len());
    }
    Ok(joined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn hit(v: Value) -> Hit {
        v.as_object().cloned().unwrap()
    }

    #[test]
    fn source_fields_become_columns() {
        let hits = vec![
            hit(json!({"_id": "1", "_score": null, "_source": {"sku": "1", "name": "A"}, "sort": ["a"]})),
            hit(json!({"_id": "2", "_score": null, "_source": {"sku": "2", "name": "B", "upc": "9"}, "sort": ["b"]})),
        ];
        let t = flatten(&hits).unwrap();
        assert_eq!(t.columns(), &["_id", "_score", "_source", "sort", "sku", "name", "upc"]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.cell(1, "upc"), Some(&json!("9")));
        assert_eq!(t.cell(0, "upc"), Some(&Value::Null));
    }

    #[test]
    fn mismatched_sku_is_dropped() {
        let hits = vec![
            hit(json!({"_id": "1", "_source": {"sku": "1"}})),
            hit(json!({"_id": "2", "_source": {"sku": "999"}})),
        ];
        let t = flatten(&hits).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.cell(0, "sku"), Some(&json!("1")));
    }

    #[test]
    fn missing_source_aborts() {
        let hits = vec![hit(json!({"_id": "7"}))];
        let err = flatten(&hits).unwrap_err();
        assert!(err.to_string().contains("sku 7"));
    }
}

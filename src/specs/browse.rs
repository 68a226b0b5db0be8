// src/specs/browse.rs
//! Spec for `/ajax/browse`: the per-category product search.
//!
//! The endpoint answers an Elasticsearch-style document; products live under
//! `hits.hits`, each hit carrying `_id` plus the product under `_source`:
//!
//! ```text
//! { "hits": { "hits": [ { "_id": "12345", "_score": null,
//!                         "_source": { "sku": "12345", ... },
//!                         "sort": ["..."] }, ... ] } }
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::Options;
use crate::core::Fetch;
use crate::error::{Error, Result};
use crate::progress::Progress;

/// One raw search hit, untouched.
pub type Hit = Map<String, Value>;

#[derive(Deserialize)]
struct SearchResponse {
    hits: HitList,
}

#[derive(Deserialize)]
struct HitList {
    hits: Vec<Value>,
}

/// Pull the hit list out of one response body.
pub fn extract_hits(url: &str, body: Value) -> Result<Vec<Hit>> {
    let resp: SearchResponse = serde_json::from_value(body).map_err(|e| Error::Response {
        url: s!(url),
        msg: format!("no hits.hits list ({e})"),
    })?;

    resp.hits
        .hits
        .into_iter()
        .enumerate()
        .map(|(i, h)| match h {
            Value::Object(m) => Ok(m),
            other => Err(Error::Response {
                url: s!(url),
                msg: format!("hit #{i} is not an object: {other}"),
            }),
        })
        .collect()
}

/// Fetch one category.
pub fn fetch_category(fetcher: &dyn Fetch, options: &Options, category: &str) -> Result<Vec<Hit>> {
    let url = options.category_url(category);
    let body = fetcher.get_json(&url)?;
    let hits = extract_hits(&url, body)?;
    logd!("{category}: {} hits from {url}", hits.len());
    Ok(hits)
}

/// Fetch every configured category, in order, and concatenate the hits.
/// The first failure aborts the whole fetch.
pub fn fetch_all(
    fetcher: &dyn Fetch,
    options: &Options,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<Hit>> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(options.categories.len());
    }

    let mut all = Vec::new();
    for category in &options.categories {
        let hits = fetch_category(fetcher, options, category)?;
        if let Some(p) = progress.as_deref_mut() {
            p.item_done(category, hits.len());
        }
        all.extend(hits);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(all)
}

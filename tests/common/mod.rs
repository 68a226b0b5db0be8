// tests/common/mod.rs
//
// Canned endpoint + temp dirs shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use bc_liquor::config::Options;
use bc_liquor::core::Fetch;
use bc_liquor::error::{Error, Result};
use serde_json::{json, Value};

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("bc_it_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

/// Serves one response body per URL; unknown URLs fail like a 404 would.
pub struct FixtureFetch {
    pub bodies: HashMap<String, Value>,
}

impl Fetch for FixtureFetch {
    fn get_json(&self, url: &str) -> Result<Value> {
        self.bodies.get(url).cloned().ok_or_else(|| Error::Response {
            url: url.to_string(),
            msg: "no fixture".to_string(),
        })
    }
}

pub fn product(sku: &str, category: &str, price: &str, stores: u32) -> Value {
    json!({
        "_index": "products",
        "_id": sku,
        "_score": null,
        "sort": [format!("name-{sku}")],
        "_source": {
            "sku": sku,
            "name": format!("Product {sku}"),
            "category": {"id": 1, "description": category},
            "subCategory": {"id": 10, "description": format!("{category} sub")},
            "class": {"id": 100, "description": "Class"},
            "volume": "0.75",
            "unitSize": 1,
            "availableUnits": 10,
            "regularPrice": price,
            "currentPrice": price,
            "_regularPrice": price,
            "_currentPrice": price,
            "alcoholPercentage": 12.5,
            "storeCount": stores,
            "consumerRating": 4.5,
            "votes": 3,
            "isOrganic": false,
            "certificates": ["VQA"],
        }
    })
}

/// Two products per category: skus `{n}01` and `{n}02`, the first priced higher.
pub fn catalogue(options: &Options) -> FixtureFetch {
    let mut bodies = HashMap::new();
    for (i, category) in options.categories.iter().enumerate() {
        let a = format!("{}01", i + 1);
        let b = format!("{}02", i + 1);
        let hits = vec![
            product(&a, category, "19.99", 10 * (i as u32 + 1)),
            product(&b, category, "5.49", 200),
        ];
        bodies.insert(options.category_url(category), json!({"hits": {"hits": hits}}));
    }
    FixtureFetch { bodies }
}

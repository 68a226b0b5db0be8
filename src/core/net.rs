// src/core/net.rs
// Blocking HTTPS GET returning a JSON document. One request at a time.

use reqwest::blocking::Client;
use serde_json::Value;

use crate::error::Result;

/// Anything that can turn a URL into a JSON document.
/// The pipeline only talks to this; tests plug in canned responses.
pub trait Fetch {
    fn get_json(&self, url: &str) -> Result<Value>;
}

pub struct HttpClient {
    inner: Client,
}

impl HttpClient {
    pub fn new(user_agent: &str) -> Result<Self> {
        let inner = Client::builder().user_agent(user_agent).build()?;
        Ok(Self { inner })
    }
}

impl Fetch for HttpClient {
    /// Non-2xx and undecodable bodies are errors; nothing is retried.
    fn get_json(&self, url: &str) -> Result<Value> {
        logd!("GET {url}");
        let resp = self.inner.get(url).send()?.error_for_status()?;
        Ok(resp.json::<Value>()?)
    }
}

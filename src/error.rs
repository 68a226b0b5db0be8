// src/error.rs
use thiserror::Error;

/// Everything the pipeline can fail on. Every variant aborts the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// The endpoint answered, but not with the `hits.hits` document we expect.
    #[error("unexpected response from {url}: {msg}")]
    Response { url: String, msg: String },

    /// A nested field could not be decomposed (category/class/sort/_source).
    #[error("sku {sku}: field `{field}` {problem}")]
    Field { sku: String, field: String, problem: String },

    #[error("column `{column}`: cannot parse {value} as a number")]
    NotNumeric { column: String, value: String },

    #[error("missing column `{0}`")]
    MissingColumn(String),

    #[error("config: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

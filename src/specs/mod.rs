// src/specs/mod.rs
//! # Endpoint "specs"
//!
//! One module per remote endpoint. A spec knows the request shape (URL,
//! query) and where the payload lives in the response; it returns raw
//! records and nothing more.
//!
//! ## What does **not** live here
//! - Flattening/typing of the records (`flatten`, `transform`).
//! - Persistence of any kind (`file`, `store`).
//!
//! ## Typical call chain
//! ```text
//! runner → specs::browse::fetch_all(fetcher, options)
//!        ↘ Vec<Hit>  → flatten → transform → file | store
//! ```
pub mod browse;

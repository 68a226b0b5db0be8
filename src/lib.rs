// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod specs;

pub mod csv;
pub mod file;
pub mod flatten;
pub mod progress;
pub mod runner;
pub mod store;
pub mod table;
pub mod transform;

pub use error::{Error, Result};
pub use table::Table;

// src/log.rs
use std::str::FromStr;

use ::log::LevelFilter;
use simple_logger::SimpleLogger;

use crate::error::{Error, Result};

// Re-exported so the macros below resolve through `$crate`.
pub use ::log::{debug, error, info, warn};

/// Install the process-wide logger. Call once, from the binary.
pub fn init(level: &str) -> Result<()> {
    let level = LevelFilter::from_str(level)
        .map_err(|_| Error::Config(format!("unknown log level: {level}")))?;

    SimpleLogger::new()
        .with_level(level)
        .init()
        .map_err(|e| Error::Config(e.to_string()))
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::log::info!($($arg)*)
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::log::debug!($($arg)*)
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::log::error!($($arg)*)
    };
}

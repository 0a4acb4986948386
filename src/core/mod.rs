//! Core business logic: rate table, conversion and request validation

pub mod config;
pub mod converter;
pub mod log;
pub mod rate_table;
pub mod request;

// Re-export main types for cleaner imports
pub use converter::{ConversionResult, ConvertError, convert};
pub use rate_table::{RateRecord, RateTable, build_rate_table};
pub use request::{ConversionRequest, RequestError};

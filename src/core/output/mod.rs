//! Output format writers.
//!
//! This module provides writers for the filtered view:
//! - [`write_csv`] / [`to_csv`] - comma-separated, `Date,Time,Author,Message,Category` - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array of rows - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines, one row per line - requires `json-output` feature
//!
//! All writers take `&[Message]`, so a
//! [`RecordCollection`](crate::core::builder::RecordCollection) can be passed
//! directly.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chataudit::Result<()> {
//! use chataudit::core::output::{to_csv, write_csv, write_jsonl};
//! use chataudit::Message;
//!
//! let messages = vec![
//!     Message::new("01/02/2024", "09:15", "Ana", "hola", "Otros"),
//! ];
//!
//! write_csv(&messages, "audit.csv")?;
//! write_jsonl(&messages, "audit.jsonl")?;
//!
//! let csv_string = to_csv(&messages)?;
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{CSV_HEADER, to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};

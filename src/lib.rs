//! # Chataudit
//!
//! A Rust library for auditing WhatsApp group chat exports: it rebuilds the
//! messages of a `.txt` export, classifies each one with ordered keyword
//! rules, and lets you filter, count and export the result.
//!
//! ## Overview
//!
//! Two export header layouts are recognized:
//! - **Dashed** (Android) — `01/02/2024, 09:15 - Ana: hola`
//! - **Bracketed** (iOS) — `[01/02/2024 09:15] Ana: hola`
//!
//! Messages that span several lines are merged back together, bodies are
//! classified by the first rule whose keyword they contain, and dates that
//! cannot be parsed leave the message undated instead of dropping it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chataudit::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let rules = RuleSet::parse("Anular Factura: anular factura\nMontos: monto\nOtros:");
//!     let export = ExportParser::new(rules).parse("chat.txt")?;
//!
//!     // Narrow down to one author's invoice messages
//!     let spec = FilterSpec::new().with_author("Ana").with_category("Anular Factura");
//!     let view = apply_filters(&export.records, &spec);
//!
//!     for row in category_counts(&export.records) {
//!         println!("{}: {}", row.name, row.count);
//!     }
//!
//!     write_csv(&view, "audit.csv")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] — [`ExportParser`](parser::ExportParser), the full pipeline
//! - [`decode`] — UTF-8 / UTF-16 input decoding
//! - [`parsing`] — header formats, field extraction, line reconstruction
//! - [`core`] — rules, record building, filtering, summaries, output
//!   - [`core::rules`] — [`RuleSet`](core::rules::RuleSet), [`MatchMode`](core::rules::MatchMode)
//!   - [`core::builder`] — [`RecordCollection`](core::builder::RecordCollection)
//!   - [`core::filter`] — [`FilterSpec`](core::filter::FilterSpec), [`apply_filters`](core::filter::apply_filters)
//!   - [`core::summary`] — [`category_counts`](core::summary::category_counts), [`Summary`](core::summary::Summary)
//!   - [`core::output`] — CSV, JSON and JSONL writers
//! - [`config`] — [`ParserConfig`](config::ParserConfig) and the TOML settings file
//! - [`format`] — [`OutputFormat`](format::OutputFormat)
//! - [`error`] — [`AuditError`], [`Result`]
//! - [`prelude`] — Convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod decode;
pub mod error;
pub mod format;
pub mod message;
pub mod parser;
pub mod parsing;

// Re-export the main types at the crate root for convenience
pub use error::{AuditError, Result};
pub use message::Message;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use chataudit::prelude::*;
/// ```
pub mod prelude {
    // Core message type
    pub use crate::Message;

    // Error types
    pub use crate::error::{AuditError, Result};

    // Parsing pipeline
    pub use crate::config::ParserConfig;
    pub use crate::parser::{ExportParser, ParseStats, ParsedExport};
    pub use crate::parsing::HeaderFormat;

    // Classification
    pub use crate::core::builder::RecordCollection;
    pub use crate::core::rules::{MatchMode, RuleSet};

    // Queries
    pub use crate::core::filter::{FilterSpec, apply_filters, category_options};
    pub use crate::core::summary::{CountRow, Summary, author_counts, category_counts};

    // Output
    #[cfg(feature = "csv-output")]
    pub use crate::core::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::core::output::{to_json, to_jsonl, write_json, write_jsonl};
    pub use crate::format::{OutputFormat, write_to_format};

    #[cfg(feature = "toml-config")]
    pub use crate::config::Settings;
}

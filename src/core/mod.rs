//! Core auditing logic for chataudit.
//!
//! This module contains:
//! - [`rules`] - Keyword rules and message classification
//! - [`builder`] - Classified record collection construction
//! - [`filter`] - Filtering by author, category, date and keyword
//! - [`summary`] - Category and author count tables
//! - [`output`] - Format writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use chataudit::core::{
//!     RuleSet, RecordCollection, FilterSpec,
//!     build_records, apply_filters, category_counts,
//!     write_csv, write_json, write_jsonl,
//! };
//! # }
//! ```

pub mod builder;
pub mod filter;
pub mod output;
pub mod rules;
pub mod summary;

// Re-export main types for convenience
pub use builder::{BuildStats, RecordCollection, build_records};
pub use filter::{
    FilterSpec, apply_filters, author_options, category_options, month_options, year_options,
};
pub use rules::{MatchMode, Rule, RuleMatch, RuleSet};
pub use summary::{CountRow, Summary, author_counts, category_counts};

// Re-export Message from the crate root
pub use crate::Message;

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};

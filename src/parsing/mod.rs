//! Shared parsing utilities for WhatsApp TXT exports.
//!
//! - [`lines`] rebuilds message boundaries from raw lines
//! - [`formats`] recognizes header formats and extracts header parts

pub mod formats;
pub mod lines;

// Re-export commonly used items
pub use formats::{
    HeaderFormat, HeaderMatcher, RawMessage, detect_format, extract, is_header_line,
};
pub use lines::{LogicalLine, Reconstruction, reconstruct_lines};

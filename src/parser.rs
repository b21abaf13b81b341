//! Export parsing pipeline.
//!
//! [`ExportParser`] turns the bytes of a WhatsApp TXT export into a
//! classified [`RecordCollection`]:
//!
//! 1. decode the bytes (UTF-8, falling back to UTF-16)
//! 2. merge continuation lines into logical lines
//! 3. extract date, time, author and body from each logical line
//! 4. classify every body with the [`RuleSet`] and parse its date
//!
//! Problems in individual lines never abort the batch. They are counted in
//! [`ParseStats`] so callers can tell a clean export from a mostly broken
//! one.
//!
//! # Example
//!
//! ```rust
//! use chataudit::core::rules::RuleSet;
//! use chataudit::parser::ExportParser;
//!
//! let rules = RuleSet::parse("Anular Factura: anular factura\nAnulación: anular\nOtros:");
//! let parser = ExportParser::new(rules);
//!
//! let export = parser.parse_str("01/02/2024, 09:15 - Ana: anular factura 123");
//! assert_eq!(export.records[0].category(), "Anular Factura");
//! assert_eq!(export.stats.messages, 1);
//! ```

use std::path::Path;

use serde::Serialize;

use crate::config::ParserConfig;
use crate::core::builder::{RecordCollection, build_records};
use crate::core::rules::RuleSet;
use crate::decode::{TextEncoding, decode_bytes};
use crate::error::Result;
use crate::parsing::{HeaderFormat, detect_format, extract, reconstruct_lines};

/// Number of logical lines sampled for format detection.
const DETECTION_SAMPLE: usize = 20;

/// Counters describing one parsed export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Encoding the input was decoded with.
    #[serde(serialize_with = "serialize_encoding")]
    pub encoding: TextEncoding,
    /// Dominant header format, if any header was found.
    pub format: Option<HeaderFormat>,
    /// Logical lines after merging continuations.
    pub logical_lines: usize,
    /// Lines before the first header.
    pub orphan_lines: usize,
    /// Logical lines that started with a header but had no author.
    pub unmatched_lines: usize,
    /// Messages extracted.
    pub messages: usize,
    /// Messages whose date could not be parsed.
    pub undated_messages: usize,
    /// Messages classified into the fallback category.
    pub fallback: usize,
}

fn serialize_encoding<S: serde::Serializer>(
    encoding: &TextEncoding,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(encoding.name())
}

/// Result of parsing one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedExport {
    /// Classified messages in source order.
    pub records: RecordCollection,
    /// What happened along the way.
    pub stats: ParseStats,
}

/// Parser for WhatsApp TXT exports.
///
/// Holds an immutable rule set and configuration; one parser can process
/// any number of exports and be shared across threads.
#[derive(Debug, Clone)]
pub struct ExportParser {
    rules: RuleSet,
    config: ParserConfig,
}

impl Default for ExportParser {
    fn default() -> Self {
        Self::new(RuleSet::default())
    }
}

impl ExportParser {
    /// Creates a parser with the default configuration.
    pub fn new(rules: RuleSet) -> Self {
        Self::with_config(rules, ParserConfig::default())
    }

    /// Creates a parser with custom configuration.
    ///
    /// The configuration's fallback category and match mode, when set,
    /// override the ones on `rules`.
    pub fn with_config(rules: RuleSet, config: ParserConfig) -> Self {
        let rules = config.apply_to(rules);
        Self { rules, config }
    }

    /// Returns the rule set used for classification.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Returns the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses an export file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded.
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<ParsedExport> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read export");
        let (text, encoding) = decode_bytes(&bytes, &path.display().to_string())?;
        Ok(self.parse_text(&text, encoding))
    }

    /// Parses raw export bytes.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Decode`](crate::AuditError::Decode) if the bytes
    /// are neither UTF-8 nor UTF-16.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParsedExport> {
        let (text, encoding) = decode_bytes(bytes, "input")?;
        Ok(self.parse_text(&text, encoding))
    }

    /// Parses already decoded export text.
    pub fn parse_str(&self, text: &str) -> ParsedExport {
        self.parse_text(text, TextEncoding::Utf8)
    }

    fn parse_text(&self, text: &str, encoding: TextEncoding) -> ParsedExport {
        let formats = self.config.formats.as_slice();
        let reconstruction = reconstruct_lines(text, formats);

        let sample: Vec<&str> = reconstruction
            .lines
            .iter()
            .take(DETECTION_SAMPLE)
            .map(|l| l.text.as_str())
            .collect();
        let format = detect_format(&sample, formats);
        if let Some(format) = format {
            tracing::debug!(%format, "detected header format");
        }

        let mut unmatched_lines = 0;
        let raws: Vec<_> = reconstruction
            .lines
            .iter()
            .filter_map(|line| {
                let raw = extract(&line.text, formats);
                if raw.is_none() {
                    unmatched_lines += 1;
                    tracing::debug!(line = line.line_number, "dropping line without author");
                }
                raw
            })
            .collect();

        let (records, build) = build_records(raws, &self.rules);

        let stats = ParseStats {
            encoding,
            format,
            logical_lines: reconstruction.lines.len(),
            orphan_lines: reconstruction.orphan_lines,
            unmatched_lines,
            messages: build.built,
            undated_messages: build.undated,
            fallback: build.fallback,
        };

        tracing::info!(
            messages = stats.messages,
            unmatched = stats.unmatched_lines,
            undated = stats.undated_messages,
            %encoding,
            "parsed export"
        );
        if stats.messages == 0 && !text.trim().is_empty() {
            tracing::warn!(
                orphan_lines = stats.orphan_lines,
                unmatched = stats.unmatched_lines,
                "no messages found in non-empty export"
            );
        }

        ParsedExport { records, stats }
    }
}

//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Export format options
//!
//! # Example
//!
//! ```rust
//! use chataudit::cli::OutputFormat;
//!
//! let format = OutputFormat::Jsonl;
//! assert_eq!(format.to_string(), "JSONL");
//! ```

use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::core::filter::FilterSpec;
use crate::error::Result;

/// Output path used when `-o` is not given.
pub const DEFAULT_OUTPUT: &str = "audit.csv";

/// Audit a WhatsApp chat export: rebuild messages, classify them with
/// keyword rules, filter the result and export it.
#[derive(Parser, Debug, Clone)]
#[command(name = "chataudit")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chataudit chat.txt
    chataudit chat.txt --rules rules.txt --category Montos -o montos.csv
    chataudit chat.txt --author Ana --month febrero --year 2024
    chataudit chat.txt --keyword factura --format jsonl
    chataudit chat.txt --category Errores -o errores.json
    chataudit chat.txt --summary-only
    chataudit chat.txt --explain")]
pub struct Args {
    /// Path to the exported chat (.txt)
    pub input: PathBuf,

    /// Rules file, one `Category: kw1, kw2` per line
    #[arg(short, long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Settings file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only messages from this author
    #[arg(long, value_name = "NAME")]
    pub author: Option<String>,

    /// Only messages in this category
    #[arg(long, value_name = "NAME")]
    pub category: Option<String>,

    /// Only messages from this year
    #[arg(long, value_name = "YEAR")]
    pub year: Option<String>,

    /// Only messages from this month (1-12 or name)
    #[arg(long, value_name = "MONTH")]
    pub month: Option<String>,

    /// Only messages from this day (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Only messages containing this text (case-insensitive)
    #[arg(short, long, value_name = "TEXT")]
    pub keyword: Option<String>,

    /// Path to output file
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output format [default: the output file's extension, else csv]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Print the summary tables without writing an export
    #[arg(long)]
    pub summary_only: bool,

    /// Print which rule and keyword classified each filtered message
    #[arg(long)]
    pub explain: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Builds the filter described by the filter flags.
    ///
    /// # Errors
    ///
    /// Returns an error if `--year`, `--month` or `--date` is not valid.
    pub fn filter_spec(&self) -> Result<FilterSpec> {
        let mut spec = FilterSpec::new();

        if let Some(ref author) = self.author {
            spec = spec.with_author(author);
        }
        if let Some(ref category) = self.category {
            spec = spec.with_category(category);
        }
        if let Some(ref year) = self.year {
            spec = spec.with_year_selection(year)?;
        }
        if let Some(ref month) = self.month {
            spec = spec.with_month(month)?;
        }
        if let Some(ref date) = self.date {
            spec = spec.with_date(date)?;
        }
        if let Some(ref keyword) = self.keyword {
            spec = spec.with_keyword(keyword);
        }

        Ok(spec)
    }

    /// Resolves the export format: `-f` wins, then the extension of an
    /// explicit `-o`, then CSV.
    ///
    /// # Errors
    ///
    /// Returns an error if `-o` names a file with an unknown extension and no
    /// `-f` is given.
    pub fn output_format(&self) -> Result<crate::format::OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format.into());
        }
        if self.output == Path::new(DEFAULT_OUTPUT) {
            return Ok(crate::format::OutputFormat::default());
        }
        crate::format::OutputFormat::from_path(&self.output)
    }

    /// Log level selected by `-v` flags, if any.
    pub fn verbosity_level(&self) -> Option<&'static str> {
        match self.verbose {
            0 => None,
            1 => Some("info"),
            2 => Some("debug"),
            _ => Some("trace"),
        }
    }
}

/// Output format options.
///
/// - [`Csv`](OutputFormat::Csv) - `Date,Time,Author,Message,Category` (default)
/// - [`Json`](OutputFormat::Json) - JSON array
/// - [`Jsonl`](OutputFormat::Jsonl) - One JSON object per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Comma-separated values (default)
    #[default]
    Csv,

    /// JSON array of rows
    Json,

    /// JSON Lines - one JSON object per line
    #[value(alias = "ndjson")]
    Jsonl,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", crate::format::OutputFormat::from(*self))
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Csv => crate::format::OutputFormat::Csv,
            OutputFormat::Json => crate::format::OutputFormat::Json,
            OutputFormat::Jsonl => crate::format::OutputFormat::Jsonl,
        }
    }
}

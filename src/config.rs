//! Configuration types for the export parser.
//!
//! This module provides configuration structs for library usage, without
//! any CLI framework dependencies:
//!
//! - [`ParserConfig`] - header formats, fallback category and keyword matching
//! - [`Settings`] - the same options plus rule text, loaded from a TOML file
//!   (requires the `toml-config` feature)
//!
//! # Example
//!
//! ```rust
//! use chataudit::config::ParserConfig;
//! use chataudit::core::rules::{MatchMode, RuleSet};
//! use chataudit::parser::ExportParser;
//! use chataudit::parsing::HeaderFormat;
//!
//! let config = ParserConfig::new()
//!     .with_formats(vec![HeaderFormat::Bracketed])
//!     .with_match_mode(MatchMode::WholeWord);
//!
//! let parser = ExportParser::with_config(RuleSet::default(), config);
//! ```

#[cfg(feature = "toml-config")]
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::rules::{MatchMode, RuleSet};
#[cfg(feature = "toml-config")]
use crate::error::{AuditError, Result};
use crate::parsing::HeaderFormat;

/// Configuration for export parsing.
///
/// # Example
///
/// ```rust
/// use chataudit::config::ParserConfig;
///
/// let config = ParserConfig::new().with_fallback_category("Sin categoría");
/// assert_eq!(config.fallback_category.as_deref(), Some("Sin categoría"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Header formats to recognize, in priority order (default: all)
    pub formats: Vec<HeaderFormat>,

    /// Overrides the rule set's default fallback category when set
    pub fallback_category: Option<String>,

    /// Overrides the rule set's keyword matching mode when set
    pub match_mode: Option<MatchMode>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            formats: HeaderFormat::all().to_vec(),
            fallback_category: None,
            match_mode: None,
        }
    }
}

impl ParserConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the header formats to recognize. An empty list restores all
    /// formats.
    #[must_use]
    pub fn with_formats(mut self, formats: Vec<HeaderFormat>) -> Self {
        self.formats = if formats.is_empty() {
            HeaderFormat::all().to_vec()
        } else {
            formats
        };
        self
    }

    /// Sets the fallback category name.
    #[must_use]
    pub fn with_fallback_category(mut self, name: impl Into<String>) -> Self {
        self.fallback_category = Some(name.into());
        self
    }

    /// Applies the fallback and match mode overrides to `rules`. Options
    /// left unset keep the rule set's own values.
    #[must_use]
    pub fn apply_to(&self, rules: RuleSet) -> RuleSet {
        let rules = match self.fallback_category {
            Some(ref name) => rules.with_default_fallback(name.clone()),
            None => rules,
        };
        match self.match_mode {
            Some(mode) => rules.with_match_mode(mode),
            None => rules,
        }
    }

    /// Sets the keyword matching mode.
    #[must_use]
    pub fn with_match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = Some(mode);
        self
    }
}

/// Settings file contents.
///
/// Every field is optional; missing fields keep their defaults.
///
/// ```toml
/// log_level = "info"
/// fallback_category = "Otros"
/// match_mode = "whole_word"
/// formats = ["bracketed", "dashed"]
/// rules = """
/// Anular Factura: anular factura
/// Montos: monto, importe
/// Otros:
/// """
/// ```
#[cfg(feature = "toml-config")]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Rule text in `Category: kw1, kw2` form. Uses the built-in rules when
    /// absent.
    pub rules: Option<String>,
    /// Fallback category override.
    pub fallback_category: Option<String>,
    /// Keyword matching mode.
    pub match_mode: Option<MatchMode>,
    /// Header formats to recognize. Empty means all.
    pub formats: Vec<HeaderFormat>,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: Option<String>,
}

#[cfg(feature = "toml-config")]
impl Settings {
    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Io`] if the file cannot be read and
    /// [`AuditError::Config`] if it is not valid settings TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&content)
            .map_err(|e| AuditError::config(e, Some(path.to_path_buf())))?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Parses settings from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Config`] if the text is not valid settings TOML.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| AuditError::config(e, None))
    }

    /// Builds the parser configuration described by these settings.
    pub fn to_parser_config(&self) -> ParserConfig {
        let mut config = ParserConfig::new().with_formats(self.formats.clone());
        config.fallback_category = self.fallback_category.clone();
        config.match_mode = self.match_mode;
        config
    }

    /// Builds the rule set described by these settings.
    pub fn rule_set(&self) -> RuleSet {
        let rules = match self.rules {
            Some(ref text) => RuleSet::parse(text),
            None => RuleSet::default(),
        };
        self.to_parser_config().apply_to(rules)
    }
}

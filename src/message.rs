//! Classified chat message record.
//!
//! This module provides [`Message`], one reconstructed and classified line of
//! a chat export. Messages are produced by the
//! [`record builder`](crate::core::builder) and are read-only afterwards:
//! fields are private and exposed through accessors.
//!
//! # Overview
//!
//! A message consists of:
//! - **Header**: `date` (parsed, optional), `date_text` (as exported), `time`
//! - **Content**: `author` and `body`
//! - **Classification**: `category`, always set (falls back to the rule set's
//!   fallback category)
//!
//! # Examples
//!
//! ```
//! use chataudit::Message;
//!
//! let msg = Message::new("01/02/2024", "09:15", "Ana", "anular factura 123", "Anular Factura");
//! assert_eq!(msg.author(), "Ana");
//! assert_eq!(msg.category(), "Anular Factura");
//! assert_eq!(msg.date().map(|d| d.to_string()), Some("2024-02-01".to_string()));
//! ```
//!
//! ## Serialization
//!
//! ```
//! use chataudit::Message;
//!
//! let msg = Message::new("32/13/2024", "10:00", "Ana", "hola", "Otros");
//! let json = serde_json::to_string(&msg)?;
//!
//! // an unparseable date is omitted, the exported text is kept
//! assert!(!json.contains("\"date\""));
//! assert!(json.contains("32/13/2024"));
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Date layout used by the supported exports (`D/M/YYYY`, day and month with
/// one or two digits).
pub const EXPORT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Parses the day/month/year text of a message header.
///
/// Returns `None` for impossible dates such as `32/13/2024`; callers keep the
/// message and treat the date as unknown.
///
/// ```
/// use chataudit::message::parse_export_date;
///
/// assert!(parse_export_date("1/2/2024").is_some());
/// assert!(parse_export_date("32/13/2024").is_none());
/// ```
pub fn parse_export_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), EXPORT_DATE_FORMAT).ok()
}

/// One classified message of a chat export.
///
/// # Fields
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | `date` | `Option<NaiveDate>` | Calendar date, `None` if unparseable |
/// | `date_text` | `String` | Date exactly as it appeared in the export |
/// | `time` | `String` | `HH:MM` text |
/// | `author` | `String` | Everything between the header and the first colon |
/// | `body` | `String` | Message text, continuation lines space-joined |
/// | `category` | `String` | Category assigned by the rule set |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    date: Option<NaiveDate>,

    date_text: String,

    time: String,

    author: String,

    body: String,

    category: String,
}

impl Message {
    /// Creates a message from the extracted header parts and its category.
    ///
    /// The date text is parsed with [`EXPORT_DATE_FORMAT`]; a failure leaves
    /// [`date`](Self::date) empty.
    pub fn new(
        date_text: impl Into<String>,
        time: impl Into<String>,
        author: impl Into<String>,
        body: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        let date_text = date_text.into();
        Self {
            date: parse_export_date(&date_text),
            date_text,
            time: time.into(),
            author: author.into(),
            body: body.into(),
            category: category.into(),
        }
    }

    // =========================================================================
    // Accessor methods
    // =========================================================================

    /// Returns the parsed calendar date, if the header date was valid.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Returns the date text as it appeared in the export.
    pub fn date_text(&self) -> &str {
        &self.date_text
    }

    /// Returns the `HH:MM` time text.
    pub fn time(&self) -> &str {
        &self.time
    }

    /// Returns the author name.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the message body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the assigned category.
    pub fn category(&self) -> &str {
        &self.category
    }

    // =========================================================================
    // Utility methods
    // =========================================================================

    /// Returns the year of the message, if its date is known.
    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    /// Returns the month (1-12) of the message, if its date is known.
    pub fn month(&self) -> Option<u32> {
        self.date.map(|d| d.month())
    }

    /// Returns the date for display: `DD/MM/YYYY` when parsed, otherwise the
    /// original text.
    pub fn display_date(&self) -> String {
        self.date
            .map(|d| d.format(EXPORT_DATE_FORMAT).to_string())
            .unwrap_or_else(|| self.date_text.clone())
    }

    /// Returns `true` if the body contains `needle`, ignoring case.
    ///
    /// `needle` must already be lower-cased.
    pub(crate) fn body_contains_lowercase(&self, needle: &str) -> bool {
        self.body.to_lowercase().contains(needle)
    }
}

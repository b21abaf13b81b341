//! Filter classified messages by author, category, date and keyword.
//!
//! This module provides [`FilterSpec`] for defining filter criteria,
//! [`apply_filters`] for narrowing a [`RecordCollection`], and helpers that
//! list the values a caller can offer as choices.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Author | [`with_author`](FilterSpec::with_author) | Exact author name |
//! | Category | [`with_category`](FilterSpec::with_category) | Exact category name |
//! | Year | [`with_year`](FilterSpec::with_year) | Calendar year |
//! | Month | [`with_month`](FilterSpec::with_month) | Month number or name |
//! | Date | [`with_date`](FilterSpec::with_date) | One specific day |
//! | Keyword | [`with_keyword`](FilterSpec::with_keyword) | Case-insensitive substring of the body |
//!
//! # Examples
//!
//! ```
//! use chataudit::core::builder::RecordCollection;
//! use chataudit::core::filter::{FilterSpec, apply_filters};
//! use chataudit::Message;
//!
//! # fn main() -> chataudit::Result<()> {
//! let records = RecordCollection::from(vec![
//!     Message::new("01/02/2024", "09:15", "Ana", "hola", "Otros"),
//!     Message::new("02/02/2024", "10:00", "Luis", "el monto", "Montos"),
//!     Message::new("03/03/2024", "11:00", "Ana", "chau", "Otros"),
//! ]);
//!
//! let spec = FilterSpec::new().with_author("Ana").with_month("febrero")?;
//! let filtered = apply_filters(&records, &spec);
//!
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].body(), "hola");
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Messages without a parsed date are **excluded** when year, month or
//!   date filters are active, and kept otherwise
//! - The selections "all", "todos" and the empty string leave a filter unset
//! - Multiple filters are combined with AND logic

use chrono::{Month, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use super::builder::RecordCollection;
use crate::Message;
use crate::error::AuditError;

/// Selections that mean "no filter" in caller dropdowns.
const ALL_SELECTIONS: &[&str] = &["all", "todos", "todas", "*"];

/// Returns `None` for empty or "all"-style selections.
fn selection(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || ALL_SELECTIONS.iter().any(|a| value.eq_ignore_ascii_case(a)) {
        None
    } else {
        Some(value.to_string())
    }
}

/// Returns `None` for an all-blank search text; otherwise the text
/// lower-cased with its spaces kept.
fn keyword_value(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_lowercase())
}

fn deserialize_selection<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(selection))
}

fn deserialize_keyword<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.as_deref().and_then(keyword_value))
}

/// Spanish month names, January first.
const SPANISH_MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Parses a month as a number (`3`, `03`), an English name or abbreviation
/// (`March`, `mar`) or a Spanish name (`marzo`, `setiembre`).
///
/// ```
/// use chataudit::core::filter::parse_month;
///
/// assert_eq!(parse_month("3"), Some(3));
/// assert_eq!(parse_month("March"), Some(3));
/// assert_eq!(parse_month("marzo"), Some(3));
/// assert_eq!(parse_month("13"), None);
/// ```
pub fn parse_month(value: &str) -> Option<u32> {
    let value = value.trim();
    if let Ok(n) = value.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }

    let lower = value.to_lowercase();
    if lower == "setiembre" {
        return Some(9);
    }
    if let Some(idx) = SPANISH_MONTHS.iter().position(|m| *m == lower) {
        return u32::try_from(idx + 1).ok();
    }

    lower.parse::<Month>().ok().map(|m| m.number_from_month())
}

/// Parses a specific-day filter value: `YYYY-MM-DD` or `DD/MM/YYYY`.
fn parse_filter_date(value: &str) -> Result<NaiveDate, AuditError> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%d/%m/%Y"))
        .map_err(|_| AuditError::invalid_date(value))
}

/// Conjunctive set of message filters.
///
/// Unset filters pass everything; a message must match every set filter.
///
/// # Examples
///
/// ```
/// use chataudit::core::filter::FilterSpec;
///
/// # fn main() -> chataudit::Result<()> {
/// // Filter by author only
/// let by_author = FilterSpec::new().with_author("Ana");
///
/// // "all" leaves a filter unset, the way a dropdown default would
/// let everything = FilterSpec::new().with_author("all").with_category("Todos");
/// assert!(!everything.is_active());
///
/// // Combined filters
/// let combined = FilterSpec::new()
///     .with_category("Montos")
///     .with_year(2024)
///     .with_date("2024-02-01")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Include only messages from this author (exact match).
    #[serde(deserialize_with = "deserialize_selection")]
    pub author: Option<String>,

    /// Include only messages in this category (exact match).
    #[serde(deserialize_with = "deserialize_selection")]
    pub category: Option<String>,

    /// Include only messages dated in this year.
    pub year: Option<i32>,

    /// Include only messages dated in this month (1-12), any year.
    pub month: Option<u32>,

    /// Include only messages dated on this day.
    pub date: Option<NaiveDate>,

    /// Include only messages whose body contains this text, ignoring case.
    #[serde(deserialize_with = "deserialize_keyword")]
    pub keyword: Option<String>,
}

impl FilterSpec {
    /// Creates a new empty filter specification.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the author filter. "all" or an empty value clears it.
    #[must_use]
    pub fn with_author(mut self, author: impl AsRef<str>) -> Self {
        self.author = selection(author.as_ref());
        self
    }

    /// Sets the category filter. "all" or an empty value clears it.
    #[must_use]
    pub fn with_category(mut self, category: impl AsRef<str>) -> Self {
        self.category = selection(category.as_ref());
        self
    }

    /// Sets the year filter.
    #[must_use]
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the year filter from a selection such as `"2024"` or `"all"`.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::InvalidYear`] if the value is not a year.
    pub fn with_year_selection(mut self, year: &str) -> Result<Self, AuditError> {
        self.year = match selection(year) {
            None => None,
            Some(y) => Some(y.parse().map_err(|_| AuditError::invalid_year(y))?),
        };
        Ok(self)
    }

    /// Sets the month filter from a number or month name. "all" clears it.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::InvalidMonth`] if the value is not a month.
    pub fn with_month(mut self, month: &str) -> Result<Self, AuditError> {
        self.month = match selection(month) {
            None => None,
            Some(m) => Some(parse_month(&m).ok_or_else(|| AuditError::invalid_month(m))?),
        };
        Ok(self)
    }

    /// Sets the specific-day filter. Accepts `YYYY-MM-DD` or `DD/MM/YYYY`;
    /// an empty value clears it.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::InvalidDate`] if the value is not a date.
    pub fn with_date(mut self, date: &str) -> Result<Self, AuditError> {
        self.date = if date.trim().is_empty() {
            None
        } else {
            Some(parse_filter_date(date)?)
        };
        Ok(self)
    }

    /// Sets the specific-day filter directly.
    #[must_use]
    pub fn with_naive_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the keyword filter. A blank value clears it; otherwise the text
    /// is matched as given, spaces included.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl AsRef<str>) -> Self {
        self.keyword = keyword_value(keyword.as_ref());
        self
    }

    /// Returns a copy without the category filter.
    ///
    /// Used to compute which categories remain selectable.
    #[must_use]
    pub fn without_category(&self) -> Self {
        Self {
            category: None,
            ..self.clone()
        }
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.author.is_some()
            || self.category.is_some()
            || self.has_date_filter()
            || self.keyword.is_some()
    }

    /// Returns `true` if a year, month or day filter is active.
    pub fn has_date_filter(&self) -> bool {
        self.year.is_some() || self.month.is_some() || self.date.is_some()
    }

    /// Returns `true` if `msg` passes every active filter.
    pub fn matches(&self, msg: &Message) -> bool {
        if let Some(ref author) = self.author {
            if msg.author() != author {
                return false;
            }
        }

        if let Some(ref category) = self.category {
            if msg.category() != category {
                return false;
            }
        }

        if self.has_date_filter() {
            let Some(date) = msg.date() else {
                // Undated messages never satisfy a date filter
                return false;
            };
            if self.year.is_some_and(|y| msg.year() != Some(y)) {
                return false;
            }
            if self.month.is_some_and(|m| msg.month() != Some(m)) {
                return false;
            }
            if self.date.is_some_and(|d| d != date) {
                return false;
            }
        }

        if let Some(ref keyword) = self.keyword {
            if !msg.body_contains_lowercase(&keyword.to_lowercase()) {
                return false;
            }
        }

        true
    }
}

/// Filters a record collection.
///
/// Returns a new collection with the messages that match every active
/// filter, in their original relative order. The input is not modified.
///
/// # Examples
///
/// ```
/// use chataudit::core::builder::RecordCollection;
/// use chataudit::core::filter::{FilterSpec, apply_filters};
/// use chataudit::Message;
///
/// let records = RecordCollection::from(vec![
///     Message::new("01/02/2024", "09:15", "Ana", "Anular factura", "Anular Factura"),
///     Message::new("01/02/2024", "09:16", "Luis", "hola", "Otros"),
/// ]);
///
/// let spec = FilterSpec::new().with_keyword("FACTURA");
/// let filtered = apply_filters(&records, &spec);
///
/// assert_eq!(filtered.len(), 1);
/// assert_eq!(filtered[0].author(), "Ana");
/// ```
pub fn apply_filters(records: &RecordCollection, spec: &FilterSpec) -> RecordCollection {
    if !spec.is_active() {
        return records.clone();
    }

    records.iter().filter(|m| spec.matches(m)).cloned().collect()
}

/// Pushes `value` if it is not already present, keeping first-seen order.
fn push_unique<T: PartialEq>(values: &mut Vec<T>, value: T) {
    if !values.contains(&value) {
        values.push(value);
    }
}

/// Lists the categories a caller may offer for `spec`.
///
/// Categories come from the messages that pass every filter except the
/// category filter, in order of first appearance. A category with no
/// matching message is never listed, so an empty view offers no choices.
pub fn category_options<'a>(records: &'a RecordCollection, spec: &FilterSpec) -> Vec<&'a str> {
    let base = spec.without_category();
    let mut options = Vec::new();
    for msg in records.iter().filter(|m| base.matches(m)) {
        push_unique(&mut options, msg.category());
    }
    options
}

/// Lists distinct authors in order of first appearance.
pub fn author_options(records: &RecordCollection) -> Vec<&str> {
    let mut options = Vec::new();
    for msg in records {
        push_unique(&mut options, msg.author());
    }
    options
}

/// Lists the distinct years of dated messages, ascending.
pub fn year_options(records: &RecordCollection) -> Vec<i32> {
    let mut years: Vec<i32> = records.iter().filter_map(Message::year).collect();
    years.sort_unstable();
    years.dedup();
    years
}

/// Lists the distinct months (1-12) of dated messages, ascending.
pub fn month_options(records: &RecordCollection) -> Vec<u32> {
    let mut months: Vec<u32> = records.iter().filter_map(Message::month).collect();
    months.sort_unstable();
    months.dedup();
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_msg(date: &str, author: &str, body: &str, category: &str) -> Message {
        Message::new(date, "12:00", author, body, category)
    }

    fn sample() -> RecordCollection {
        RecordCollection::from(vec![
            make_msg("01/02/2024", "Ana", "hola", "Otros"),
            make_msg("02/02/2024", "Luis", "el monto", "Montos"),
            make_msg("03/02/2024", "Ana", "ok", "Otros"),
            make_msg("15/03/2023", "Ana", "un monto", "Montos"),
            make_msg("32/13/2024", "Luis", "sin fecha", "Otros"),
        ])
    }

    fn bodies(records: &RecordCollection) -> Vec<&str> {
        records.iter().map(Message::body).collect()
    }

    #[test]
    fn test_filter_by_author_and_category() {
        let spec = FilterSpec::new().with_author("Ana").with_category("Otros");
        let filtered = apply_filters(&sample(), &spec);
        assert_eq!(bodies(&filtered), vec!["hola", "ok"]);
    }

    #[test]
    fn test_author_match_is_exact() {
        let spec = FilterSpec::new().with_author("ana");
        assert!(apply_filters(&sample(), &spec).is_empty());
    }

    #[test]
    fn test_filter_by_year_excludes_undated() {
        let spec = FilterSpec::new().with_year(2024);
        let filtered = apply_filters(&sample(), &spec);
        assert_eq!(bodies(&filtered), vec!["hola", "el monto", "ok"]);
    }

    #[test]
    fn test_undated_kept_without_date_filter() {
        let spec = FilterSpec::new().with_author("Luis");
        let filtered = apply_filters(&sample(), &spec);
        assert_eq!(bodies(&filtered), vec!["el monto", "sin fecha"]);
    }

    #[test]
    fn test_filter_by_month_name() {
        let spec = FilterSpec::new().with_month("March").unwrap();
        assert_eq!(bodies(&apply_filters(&sample(), &spec)), vec!["un monto"]);

        let spec = FilterSpec::new().with_month("febrero").unwrap();
        assert_eq!(apply_filters(&sample(), &spec).len(), 3);
    }

    #[test]
    fn test_filter_by_specific_date() {
        let spec = FilterSpec::new().with_date("2024-02-02").unwrap();
        assert_eq!(bodies(&apply_filters(&sample(), &spec)), vec!["el monto"]);

        let spec = FilterSpec::new().with_date("2/2/2024").unwrap();
        assert_eq!(bodies(&apply_filters(&sample(), &spec)), vec!["el monto"]);
    }

    #[test]
    fn test_filter_by_keyword_case_insensitive() {
        let spec = FilterSpec::new().with_keyword("MONTO");
        assert_eq!(
            bodies(&apply_filters(&sample(), &spec)),
            vec!["el monto", "un monto"]
        );
    }

    #[test]
    fn test_keyword_keeps_inner_spaces() {
        let records = RecordCollection::from(vec![
            make_msg("01/02/2024", "Ana", "llegó desde Lima", "Otros"),
            make_msg("01/02/2024", "Ana", "la hora de salida", "Otros"),
        ]);
        let spec = FilterSpec::new().with_keyword(" de ");
        assert_eq!(spec.keyword.as_deref(), Some(" de "));
        assert_eq!(bodies(&apply_filters(&records, &spec)), vec!["la hora de salida"]);
    }

    #[test]
    fn test_struct_literal_keyword_ignores_case() {
        let spec = FilterSpec {
            keyword: Some("MONTO".to_string()),
            ..FilterSpec::default()
        };
        assert_eq!(
            bodies(&apply_filters(&sample(), &spec)),
            vec!["el monto", "un monto"]
        );
    }

    #[test]
    fn test_deserialized_spec_is_normalized() {
        let spec: FilterSpec =
            serde_json::from_str(r#"{"keyword":"MONTO","author":"all","category":" "}"#).unwrap();
        assert_eq!(spec.author, None);
        assert_eq!(spec.category, None);
        assert_eq!(spec.keyword.as_deref(), Some("monto"));

        let records =
            RecordCollection::from(vec![make_msg("01/02/2024", "Ana", "el monto", "Montos")]);
        assert_eq!(apply_filters(&records, &spec).len(), 1);
    }

    #[test]
    fn test_all_selection_is_unset() {
        let spec = FilterSpec::new()
            .with_author("all")
            .with_category("Todos")
            .with_keyword("   ")
            .with_month("ALL")
            .unwrap()
            .with_year_selection("all")
            .unwrap();
        assert!(!spec.is_active());
        assert_eq!(apply_filters(&sample(), &spec), sample());
    }

    #[test]
    fn test_invalid_values() {
        assert!(FilterSpec::new().with_month("13").is_err());
        assert!(FilterSpec::new().with_date("2024/02/30").is_err());
        let err = FilterSpec::new().with_year_selection("dos mil").unwrap_err();
        assert!(matches!(err, AuditError::InvalidYear { .. }));
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let spec = FilterSpec::new().with_author("Nadie");
        let filtered = apply_filters(&sample(), &spec);
        assert!(filtered.is_empty());
        assert!(category_options(&sample(), &spec).is_empty());
    }

    #[test]
    fn test_category_options_ignore_category_filter() {
        let records = sample();
        let spec = FilterSpec::new().with_author("Ana").with_category("Montos");
        assert_eq!(category_options(&records, &spec), vec!["Otros", "Montos"]);
    }

    #[test]
    fn test_category_options_follow_other_filters() {
        let records = sample();
        let spec = FilterSpec::new().with_year(2024).with_author("Ana");
        assert_eq!(category_options(&records, &spec), vec!["Otros"]);
    }

    #[test]
    fn test_value_options() {
        let records = sample();
        assert_eq!(author_options(&records), vec!["Ana", "Luis"]);
        assert_eq!(year_options(&records), vec![2023, 2024]);
        assert_eq!(month_options(&records), vec![2, 3]);
    }

    #[test]
    fn test_parse_month_variants() {
        assert_eq!(parse_month("01"), Some(1));
        assert_eq!(parse_month("Dec"), Some(12));
        assert_eq!(parse_month("Setiembre"), Some(9));
        assert_eq!(parse_month("0"), None);
        assert_eq!(parse_month("brumaire"), None);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let spec = FilterSpec::new().with_category("Otros").with_keyword("o");
        let once = apply_filters(&sample(), &spec);
        let twice = apply_filters(&once, &spec);
        assert_eq!(once, twice);
    }
}

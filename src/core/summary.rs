//! Count tables and overview figures for a record collection.
//!
//! The tables are what an auditor reads first: how many messages fell into
//! each category and who wrote them.
//!
//! # Example
//!
//! ```
//! use chataudit::core::builder::RecordCollection;
//! use chataudit::core::summary::{Summary, category_counts};
//! use chataudit::Message;
//!
//! let records = RecordCollection::from(vec![
//!     Message::new("01/02/2024", "09:15", "Ana", "hola", "Otros"),
//!     Message::new("02/02/2024", "10:00", "Luis", "el monto", "Montos"),
//!     Message::new("03/02/2024", "11:00", "Ana", "otro monto", "Montos"),
//! ]);
//!
//! let counts = category_counts(&records);
//! assert_eq!(counts[0].name, "Montos");
//! assert_eq!(counts[0].count, 2);
//!
//! let summary = Summary::from_records(&records);
//! assert_eq!(summary.total, 3);
//! ```

use chrono::NaiveDate;
use serde::Serialize;

use super::builder::RecordCollection;
use crate::Message;

/// One row of a count table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountRow {
    pub name: String,
    pub count: usize,
}

/// Counts messages per key, sorted by count descending.
///
/// Ties keep first-appearance order (the sort is stable).
fn count_by<'a>(
    records: &'a RecordCollection,
    key: impl Fn(&'a Message) -> &'a str,
) -> Vec<CountRow> {
    let mut rows: Vec<CountRow> = Vec::new();
    for msg in records {
        let name = key(msg);
        match rows.iter_mut().find(|r| r.name == name) {
            Some(row) => row.count += 1,
            None => rows.push(CountRow {
                name: name.to_string(),
                count: 1,
            }),
        }
    }
    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}

/// Category → message count.
pub fn category_counts(records: &RecordCollection) -> Vec<CountRow> {
    count_by(records, Message::category)
}

/// Author → message count.
pub fn author_counts(records: &RecordCollection) -> Vec<CountRow> {
    count_by(records, Message::author)
}

/// Overview of a record collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of messages.
    pub total: usize,
    /// Messages without a parsed date.
    pub undated: usize,
    /// Earliest parsed date.
    pub first_date: Option<NaiveDate>,
    /// Latest parsed date.
    pub last_date: Option<NaiveDate>,
    /// Messages per category.
    pub categories: Vec<CountRow>,
    /// Messages per author.
    pub authors: Vec<CountRow>,
}

impl Summary {
    /// Computes the summary of `records`.
    pub fn from_records(records: &RecordCollection) -> Self {
        let dates = || records.iter().filter_map(Message::date);

        Self {
            total: records.len(),
            undated: records.iter().filter(|m| m.date().is_none()).count(),
            first_date: dates().min(),
            last_date: dates().max(),
            categories: category_counts(records),
            authors: author_counts(records),
        }
    }

    /// Returns `true` if the collection had no messages.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

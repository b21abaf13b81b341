//! Turning extracted messages into classified records.
//!
//! [`build_records`] classifies every extracted message with a
//! [`RuleSet`], parses its date and collects the results into a
//! [`RecordCollection`] in source order.

use std::ops::Deref;

use serde::Serialize;

use super::rules::RuleSet;
use crate::Message;
use crate::parsing::RawMessage;

/// An ordered, read-only collection of classified messages.
///
/// Order is the order of the messages in the export. The collection can be
/// read like a slice but not modified; filters return new collections.
///
/// # Example
///
/// ```rust
/// use chataudit::core::builder::RecordCollection;
/// use chataudit::Message;
///
/// let records = RecordCollection::from(vec![
///     Message::new("01/02/2024", "09:15", "Ana", "hola", "Otros"),
/// ]);
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].author(), "Ana");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RecordCollection {
    messages: Vec<Message>,
}

impl RecordCollection {
    /// Returns the messages as a slice.
    pub fn as_slice(&self) -> &[Message] {
        &self.messages
    }

    /// Consumes the collection and returns the messages.
    pub fn into_vec(self) -> Vec<Message> {
        self.messages
    }
}

impl Deref for RecordCollection {
    type Target = [Message];

    fn deref(&self) -> &Self::Target {
        &self.messages
    }
}

impl From<Vec<Message>> for RecordCollection {
    fn from(messages: Vec<Message>) -> Self {
        Self { messages }
    }
}

impl FromIterator<Message> for RecordCollection {
    fn from_iter<I: IntoIterator<Item = Message>>(iter: I) -> Self {
        Self {
            messages: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a RecordCollection {
    type Item = &'a Message;
    type IntoIter = std::slice::Iter<'a, Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

impl IntoIterator for RecordCollection {
    type Item = Message;
    type IntoIter = std::vec::IntoIter<Message>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.into_iter()
    }
}

/// Counters collected while building records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    /// Records produced.
    pub built: usize,
    /// Records whose date text could not be parsed.
    pub undated: usize,
    /// Records that fell back to the fallback category.
    pub fallback: usize,
}

/// Builds the record collection for one export.
///
/// Each raw message is classified with `rules` and its date parsed; an
/// unparseable date leaves the record undated instead of dropping it.
///
/// # Example
///
/// ```rust
/// use chataudit::core::builder::build_records;
/// use chataudit::core::rules::RuleSet;
/// use chataudit::parsing::{HeaderFormat, extract};
///
/// let rules = RuleSet::parse("Montos: monto\nOtros:");
/// let raw = extract("01/02/2024, 09:15 - Ana: el monto", HeaderFormat::all()).unwrap();
///
/// let (records, stats) = build_records([raw], &rules);
/// assert_eq!(records[0].category(), "Montos");
/// assert_eq!(stats.built, 1);
/// ```
pub fn build_records<'a, I>(raws: I, rules: &RuleSet) -> (RecordCollection, BuildStats)
where
    I: IntoIterator<Item = RawMessage<'a>>,
{
    let mut stats = BuildStats::default();

    let messages: Vec<Message> = raws
        .into_iter()
        .map(|raw| {
            let matched = rules.explain(raw.body);
            let category = matched.as_ref().map_or_else(|| rules.fallback(), |m| m.category);
            let msg = Message::new(raw.date, raw.time, raw.author, raw.body, category);

            if msg.date().is_none() {
                stats.undated += 1;
                tracing::debug!(date = raw.date, author = raw.author, "unparseable message date");
            }
            if matched.is_none() {
                stats.fallback += 1;
            }
            msg
        })
        .collect();

    stats.built = messages.len();
    (RecordCollection::from(messages), stats)
}

//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::Message;
use crate::error::Result;

/// Message layout shared by the JSON and JSONL writers.
///
/// Mirrors the CSV columns so the three exports carry the same data.
#[derive(Serialize)]
pub(super) struct ExportRow<'a> {
    date: String,
    time: &'a str,
    author: &'a str,
    message: &'a str,
    category: &'a str,
}

impl<'a> ExportRow<'a> {
    pub(super) fn from_message(msg: &'a Message) -> Self {
        Self {
            date: msg.display_date(),
            time: msg.time(),
            author: msg.author(),
            message: msg.body(),
            category: msg.category(),
        }
    }
}

/// Writes messages to a JSON file as an array.
///
/// # Format
/// ```json
/// [
///   {"date": "01/02/2024", "time": "09:15", "author": "Ana", "message": "hola", "category": "Otros"}
/// ]
/// ```
pub fn write_json(messages: &[Message], output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(messages)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts messages to a pretty-printed JSON array.
pub fn to_json(messages: &[Message]) -> Result<String> {
    let rows: Vec<ExportRow<'_>> = messages.iter().map(ExportRow::from_message).collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_to_json_basic() {
        let messages = vec![
            Message::new("01/02/2024", "09:15", "Ana", "hola", "Otros"),
            Message::new("32/13/2024", "10:00", "Luis", "el monto", "Montos"),
        ];

        let json = to_json(&messages).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[0]["author"], "Ana");
        assert_eq!(parsed[0]["message"], "hola");
        assert_eq!(parsed[1]["date"], "32/13/2024");
        assert_eq!(parsed[1]["category"], "Montos");
    }

    #[test]
    fn test_write_json_empty() {
        let temp_file = NamedTempFile::new().unwrap();
        write_json(&[], temp_file.path()).unwrap();

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(content, "[]");
    }
}

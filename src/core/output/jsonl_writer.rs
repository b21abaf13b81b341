//! JSON Lines (JSONL) output writer.
//!
//! One JSON object per line, convenient for `jq` and line-oriented tooling.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::json_writer::ExportRow;
use crate::Message;
use crate::error::Result;

/// Writes messages to a JSONL file.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"date":"01/02/2024","time":"09:15","author":"Ana","message":"hola","category":"Otros"}
/// ```
pub fn write_jsonl(messages: &[Message], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(&mut writer, messages)?;
    writer.flush()?;
    Ok(())
}

/// Converts messages to a JSONL string.
pub fn to_jsonl(messages: &[Message]) -> Result<String> {
    let mut buf = Vec::new();
    write_lines(&mut buf, messages)?;
    Ok(String::from_utf8(buf)?)
}

fn write_lines<W: Write>(writer: &mut W, messages: &[Message]) -> Result<()> {
    for msg in messages {
        let line = serde_json::to_string(&ExportRow::from_message(msg))?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}

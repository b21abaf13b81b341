//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::Message;
use crate::error::Result;

/// Column header of every CSV export.
pub const CSV_HEADER: [&str; 5] = ["Date", "Time", "Author", "Message", "Category"];

/// Writes messages to a CSV file.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: `Date`, `Time`, `Author`, `Message`, `Category`
/// - Date: `DD/MM/YYYY` when parsed, otherwise the text from the export
/// - Encoding: UTF-8
pub fn write_csv(messages: &[Message], output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(csv::Writer::from_writer(file), messages)
}

/// Converts messages to a CSV string.
///
/// Same format as [`write_csv`].
pub fn to_csv(messages: &[Message]) -> Result<String> {
    let mut buf = Vec::new();
    write_records(csv::Writer::from_writer(&mut buf), messages)?;
    Ok(String::from_utf8(buf)?)
}

fn write_records<W: Write>(mut writer: csv::Writer<W>, messages: &[Message]) -> Result<()> {
    writer.write_record(CSV_HEADER)?;

    for msg in messages {
        writer.write_record([
            msg.display_date().as_str(),
            msg.time(),
            msg.author(),
            msg.body(),
            msg.category(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}

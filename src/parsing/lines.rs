//! Merging raw export lines into logical message lines.
//!
//! Chat bodies can contain line breaks. In the export such a message spans
//! several lines, but only the first one carries the date-time header. This
//! module glues every continuation line onto the header line before it, so
//! each [`LogicalLine`] holds exactly one message.

use super::formats::{HeaderFormat, is_header_line};

/// A header line merged with its continuation lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// Header text followed by the trimmed continuation lines, space-joined.
    pub text: String,
    /// 1-based line number of the header in the source text.
    pub line_number: usize,
}

/// Result of [`reconstruct_lines`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconstruction {
    /// Logical lines in source order.
    pub lines: Vec<LogicalLine>,
    /// Lines before the first header, which belong to no message.
    pub orphan_lines: usize,
}

/// Splits `text` into logical lines.
///
/// A line starting with a date-time header of one of `formats` opens a new
/// logical line; any other line is trimmed and appended to the current one
/// with a single space. Blank continuation lines add nothing. Lines before
/// the first header are dropped and counted.
///
/// # Example
///
/// ```rust
/// use chataudit::parsing::{HeaderFormat, reconstruct_lines};
///
/// let text = "[01/02/2024 09:15] Ana: hola\ncomo estas";
/// let result = reconstruct_lines(text, HeaderFormat::all());
///
/// assert_eq!(result.lines.len(), 1);
/// assert_eq!(result.lines[0].text, "[01/02/2024 09:15] Ana: hola como estas");
/// ```
pub fn reconstruct_lines(text: &str, formats: &[HeaderFormat]) -> Reconstruction {
    let mut result = Reconstruction::default();
    let mut current: Option<LogicalLine> = None;

    for (idx, line) in text.lines().enumerate() {
        if is_header_line(line, formats) {
            if let Some(done) = current.take() {
                result.lines.push(done);
            }
            current = Some(LogicalLine {
                text: line.to_string(),
                line_number: idx + 1,
            });
            continue;
        }

        match current.as_mut() {
            Some(acc) => {
                let piece = line.trim();
                if !piece.is_empty() {
                    acc.text.push(' ');
                    acc.text.push_str(piece);
                }
            }
            None => result.orphan_lines += 1,
        }
    }

    if let Some(done) = current {
        result.lines.push(done);
    }

    result
}

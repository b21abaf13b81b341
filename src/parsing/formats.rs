//! Header formats of WhatsApp TXT exports and message extraction.
//!
//! Exports vary by platform. Each supported variant is a [`HeaderFormat`]
//! with a compiled [`HeaderMatcher`]; extraction tries them in
//! [`HeaderFormat::all`] order and the first structural match wins.
//!
//! Supported formats:
//! - Dashed (Android): `15/01/2024, 10:30 - Sender: Message`
//! - Bracketed (iOS): `[15/01/2024 10:30] Sender: Message` (comma optional)

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Header format variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderFormat {
    /// Date and time followed by a dash.
    /// Example: `01/02/2024, 09:15 - Ana: Hola`
    Dashed,
    /// Date and time inside square brackets.
    /// Example: `[01/02/2024 09:15] Ana: Hola`
    Bracketed,
}

impl HeaderFormat {
    /// Returns the full-line regex pattern for this format.
    ///
    /// Captures: 1 = date, 2 = time, 3 = author, 4 = body.
    pub fn pattern(self) -> &'static str {
        match self {
            // 01/02/2024, 09:15 - Ana: Hola
            HeaderFormat::Dashed => {
                r"(?s)^(\d{1,2}/\d{1,2}/\d{4}), (\d{2}:\d{2}) - ([^:]+): ?(.*)$"
            }
            // [01/02/2024 09:15] Ana: Hola
            HeaderFormat::Bracketed => {
                r"(?s)^\[(\d{1,2}/\d{1,2}/\d{4}),? (\d{2}:\d{2})\] ([^:]+): ?(.*)$"
            }
        }
    }

    /// Returns the pattern that marks the start of a new message.
    ///
    /// Only the date-time prefix is required, so system lines without an
    /// author still close the previous message.
    pub fn start_pattern(self) -> &'static str {
        match self {
            HeaderFormat::Dashed => r"^\d{1,2}/\d{1,2}/\d{4}, \d{2}:\d{2} - ",
            HeaderFormat::Bracketed => r"^\[\d{1,2}/\d{1,2}/\d{4},? \d{2}:\d{2}\] ",
        }
    }

    /// Returns all format variants in extraction priority order.
    pub fn all() -> &'static [HeaderFormat] {
        &[HeaderFormat::Dashed, HeaderFormat::Bracketed]
    }

    /// Returns the compiled matcher for this format.
    pub fn matcher(self) -> &'static HeaderMatcher {
        static DASHED: LazyLock<HeaderMatcher> =
            LazyLock::new(|| HeaderMatcher::new(HeaderFormat::Dashed));
        static BRACKETED: LazyLock<HeaderMatcher> =
            LazyLock::new(|| HeaderMatcher::new(HeaderFormat::Bracketed));

        match self {
            HeaderFormat::Dashed => &DASHED,
            HeaderFormat::Bracketed => &BRACKETED,
        }
    }

    /// Returns the lowercase name used in settings files.
    pub fn name(self) -> &'static str {
        match self {
            HeaderFormat::Dashed => "dashed",
            HeaderFormat::Bracketed => "bracketed",
        }
    }
}

impl std::fmt::Display for HeaderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for HeaderFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dashed" | "android" => Ok(HeaderFormat::Dashed),
            "bracketed" | "ios" => Ok(HeaderFormat::Bracketed),
            _ => Err(format!(
                "Unknown header format: '{}'. Expected one of: dashed, bracketed",
                s
            )),
        }
    }
}

/// Header parts of one message, borrowed from its logical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawMessage<'a> {
    pub date: &'a str,
    pub time: &'a str,
    pub author: &'a str,
    pub body: &'a str,
    /// Format that matched.
    pub format: HeaderFormat,
}

/// Compiled regexes for one [`HeaderFormat`].
#[derive(Debug)]
pub struct HeaderMatcher {
    format: HeaderFormat,
    start: Regex,
    full: Regex,
}

impl HeaderMatcher {
    fn new(format: HeaderFormat) -> Self {
        Self {
            format,
            start: Regex::new(format.start_pattern()).expect("header start pattern compiles"),
            full: Regex::new(format.pattern()).expect("header pattern compiles"),
        }
    }

    /// Returns the format this matcher recognizes.
    pub fn format(&self) -> HeaderFormat {
        self.format
    }

    /// Returns `true` if the line begins with this format's date-time prefix.
    pub fn is_header_start(&self, line: &str) -> bool {
        self.start.is_match(line)
    }

    /// Decomposes a logical line into its header parts.
    pub fn try_match<'a>(&self, line: &'a str) -> Option<RawMessage<'a>> {
        let caps = self.full.captures(line)?;
        Some(RawMessage {
            date: caps.get(1)?.as_str(),
            time: caps.get(2)?.as_str(),
            author: caps.get(3)?.as_str(),
            body: caps.get(4).map_or("", |m| m.as_str()),
            format: self.format,
        })
    }
}

/// Extracts header parts from a logical line.
///
/// Formats are tried in the given order; the first match wins. Returns `None`
/// for lines that match no format (system notices, meta lines).
///
/// # Example
///
/// ```rust
/// use chataudit::parsing::{HeaderFormat, extract};
///
/// let raw = extract("01/02/2024, 09:15 - Ana: total: 100", HeaderFormat::all()).unwrap();
/// assert_eq!(raw.author, "Ana");
/// assert_eq!(raw.body, "total: 100");
/// ```
pub fn extract<'a>(line: &'a str, formats: &[HeaderFormat]) -> Option<RawMessage<'a>> {
    formats.iter().find_map(|f| f.matcher().try_match(line))
}

/// Returns `true` if `line` starts a new message in any of `formats`.
pub fn is_header_line(line: &str, formats: &[HeaderFormat]) -> bool {
    formats.iter().any(|f| f.matcher().is_header_start(line))
}

/// Reports the dominant header format of a sample of lines.
///
/// Returns `None` if no line starts with a known header.
pub fn detect_format(lines: &[&str], formats: &[HeaderFormat]) -> Option<HeaderFormat> {
    let mut scores = vec![0usize; formats.len()];

    for line in lines {
        for (i, format) in formats.iter().enumerate() {
            if format.matcher().is_header_start(line) {
                scores[i] += 1;
            }
        }
    }

    let max_score = *scores.iter().max()?;
    if max_score == 0 {
        return None;
    }

    let winner_idx = scores.iter().position(|&s| s == max_score)?;
    Some(formats[winner_idx])
}

//! Field extraction for each output dialect.
//!
//! Extraction never fails. A line that was classified but does not fit its
//! dialect's pattern degrades to the trimmed line at position `{0,0}`.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::classify::LineKind;
use crate::diagnostic::Severity;

static SYNTAX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"syntax error, (.*) \[(.*) Line (\d+) Column (\d+).*\]")
        .expect("Invalid syntax error pattern")
});

static STRUCTURED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.*)Line (\d+).*Columns (\d+)-(\d+) - (.*)")
        .expect("Invalid structured diagnostic pattern")
});

static LEGACY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(.*) \[(.*) Line (\d+) Column (\d+)").expect("Invalid legacy diagnostic pattern")
});

const SYNTAX_MARKER: &str = "syntax error, ";

/// Where a diagnostic came from, as reported by the compiler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// The file token captured from the line (possibly empty).
    File(String),
    /// The line did not match its pattern, so no location was recovered.
    Unknown,
}

/// Fields pulled out of one classified line, still in compiler terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub kind: LineKind,
    pub severity: Severity,
    pub message: String,
    /// 0-based line.
    pub line: u32,
    pub start_character: u32,
    pub end_character: u32,
    pub origin: Origin,
}

impl Extracted {
    /// A record that carries no location.
    fn degraded(kind: LineKind, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            line: 0,
            start_character: 0,
            end_character: 0,
            origin: Origin::Unknown,
        }
    }
}

/// Extracts the fields of `line` using the pattern for `kind`.
pub fn extract(kind: LineKind, line: &str) -> Extracted {
    match kind {
        LineKind::Syntax => extract_syntax(line),
        LineKind::Structured => extract_structured(line),
        LineKind::Legacy => extract_legacy(line),
    }
}

fn extract_syntax(line: &str) -> Extracted {
    if let Some(caps) = SYNTAX_PATTERN.captures(line)
        && let (Some(line_no), Some(column)) = (number(&caps, 3), number(&caps, 4))
    {
        return Extracted {
            kind: LineKind::Syntax,
            severity: Severity::Error,
            message: text(&caps, 1).to_string(),
            line: line_no.saturating_sub(1),
            start_character: 0,
            end_character: column,
            origin: Origin::File(text(&caps, 2).to_string()),
        };
    }

    let message = match line.split_once(SYNTAX_MARKER) {
        Some((_, rest)) => rest.trim(),
        None => line.trim(),
    };
    Extracted::degraded(LineKind::Syntax, Severity::Error, message)
}

fn extract_structured(line: &str) -> Extracted {
    if let Some(caps) = STRUCTURED_PATTERN.captures(line)
        && let (Some(line_no), Some(start), Some(end)) =
            (number(&caps, 2), number(&caps, 3), number(&caps, 4))
    {
        let message = text(&caps, 5);
        let severity = if message.starts_with("Error") {
            Severity::Error
        } else {
            Severity::Warning
        };
        return Extracted {
            kind: LineKind::Structured,
            severity,
            message: message.to_string(),
            line: line_no.saturating_sub(1),
            start_character: start.saturating_sub(1),
            end_character: end.saturating_sub(1),
            origin: Origin::File(text(&caps, 1).to_string()),
        };
    }

    Extracted::degraded(LineKind::Structured, Severity::Warning, line.trim())
}

fn extract_legacy(line: &str) -> Extracted {
    if let Some(caps) = LEGACY_PATTERN.captures(line)
        && let (Some(line_no), Some(column)) = (number(&caps, 3), number(&caps, 4))
    {
        let message = text(&caps, 1);
        let severity = if message.starts_with("ERROR:") {
            Severity::Error
        } else {
            Severity::Warning
        };
        return Extracted {
            kind: LineKind::Legacy,
            severity,
            message: message.to_string(),
            line: line_no.saturating_sub(1),
            start_character: 0,
            end_character: column,
            origin: Origin::File(text(&caps, 2).to_string()),
        };
    }

    Extracted::degraded(LineKind::Legacy, Severity::Warning, line.trim())
}

/// A trimmed capture group, empty when the group did not participate.
fn text<'h>(caps: &Captures<'h>, index: usize) -> &'h str {
    caps.get(index).map_or("", |m| m.as_str().trim())
}

/// A numeric capture group; `None` if it does not fit in a `u32`.
fn number(caps: &Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index)?.as_str().parse().ok()
}

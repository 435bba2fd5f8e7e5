//! Diagnostic types produced from compiler output.

use serde::{Deserialize, Serialize};

/// Severity level for diagnostics.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - the script does not compile.
    #[default]
    Error,
    /// Warning - the script compiles but something looks wrong.
    Warning,
}

impl Severity {
    /// The word used in banners and text output.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Error => "Error",
            Severity::Warning => "Warning",
        }
    }
}

/// A 0-based line/character position.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// Line (0-indexed).
    pub line: u32,
    /// Character offset within the line (0-indexed).
    pub character: u32,
}

impl Position {
    /// Creates a new position.
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A range between two positions. `start == end` is a point diagnostic.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Range {
    /// Start position.
    pub start: Position,
    /// End position.
    pub end: Position,
}

impl Range {
    /// Creates a range, collapsing it onto `start` if `end` would precede it.
    pub fn new(start: Position, end: Position) -> Self {
        let end = if end < start { start } else { end };
        Self { start, end }
    }

    /// A range covering `start..end` on a single line.
    pub fn on_line(line: u32, start: u32, end: u32) -> Self {
        Self::new(Position::new(line, start), Position::new(line, end))
    }

    /// The `{0,0}-{0,0}` range.
    pub const fn zero() -> Self {
        Self {
            start: Position::new(0, 0),
            end: Position::new(0, 0),
        }
    }

    /// Returns true if the range is `{0,0}-{0,0}`.
    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

/// A diagnostic extracted from compiler output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,

    /// The message, cleaned of location markers. May span several lines.
    pub message: String,

    /// Location in the current document.
    pub range: Range,

    /// Identifies what produced the diagnostic (executable name, `zscript`, ...).
    pub source: String,
}

impl Diagnostic {
    /// Creates a new error diagnostic at the zero range.
    pub fn new(message: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
            range: Range::zero(),
            source: source.into(),
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the range.
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    /// Returns true for error diagnostics.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// The result of parsing one compiler run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOutput {
    /// Diagnostics in the order their lines appeared in the output.
    pub diagnostics: Vec<Diagnostic>,

    /// Reserved. Always `None` for now, serialized as `null`.
    pub metadata: Option<serde_json::Value>,
}

impl ParseOutput {
    /// Creates an output holding the given diagnostics.
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            diagnostics,
            metadata: None,
        }
    }

    /// Returns true if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

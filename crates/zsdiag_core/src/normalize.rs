//! Range and origin normalization.

use crate::classify::LineKind;
use crate::diagnostic::{Diagnostic, Range, Severity};
use crate::extract::{Extracted, Origin};

/// Placeholder file name the compiler reports for its throwaway buffer.
pub const DEFAULT_TEMP_BUFFER: &str = "ZQ_BUFFER";

/// Where users are told to look when a diagnostic points into the temp buffer.
pub const DEFAULT_SETTINGS_HINT: &str = "ZScript Extension settings";

/// Decides whether an origin-file token refers to the temp buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginMatcher {
    sentinel: String,
}

impl OriginMatcher {
    /// Creates a matcher for the given sentinel file name.
    pub fn new(sentinel: impl Into<String>) -> Self {
        Self {
            sentinel: sentinel.into(),
        }
    }

    /// The sentinel this matcher compares against.
    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Canonical form of an origin token before comparison.
    ///
    /// Currently the identity; tokens arrive already trimmed.
    pub fn normalize_origin(token: &str) -> &str {
        token
    }

    /// Returns true if `token` is empty or names the temp buffer.
    pub fn is_temp_buffer(&self, token: &str) -> bool {
        let token = Self::normalize_origin(token);
        token.is_empty() || token == Self::normalize_origin(&self.sentinel)
    }
}

impl Default for OriginMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_TEMP_BUFFER)
    }
}

/// Turns extracted records into editor diagnostics.
#[derive(Debug, Clone)]
pub struct Normalizer {
    origin: OriginMatcher,
    settings_hint: String,
    source: String,
}

impl Normalizer {
    /// Creates a normalizer.
    pub fn new(
        origin: OriginMatcher,
        settings_hint: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            origin,
            settings_hint: settings_hint.into(),
            source: source.into(),
        }
    }

    /// The source tag stamped on every diagnostic.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Produces the final diagnostic for one extracted record.
    pub fn normalize(&self, extracted: Extracted) -> Diagnostic {
        let severity = extracted.severity;

        let (range, message) = match &extracted.origin {
            Origin::File(token) if self.origin.is_temp_buffer(token) => (
                Range::zero(),
                self.temp_buffer_message(extracted.kind, severity, &extracted.message),
            ),
            Origin::File(_) => (
                Range::on_line(
                    extracted.line,
                    extracted.start_character,
                    extracted.end_character,
                ),
                extracted.message,
            ),
            Origin::Unknown => (Range::zero(), extracted.message),
        };

        Diagnostic {
            severity,
            message,
            range,
            source: self.source.clone(),
        }
    }

    fn temp_buffer_message(&self, kind: LineKind, severity: Severity, message: &str) -> String {
        let label = match kind {
            LineKind::Syntax => "Syntax error",
            LineKind::Structured | LineKind::Legacy => severity.label(),
        };
        format!(
            "{} in temp file (check your {}):\n{}",
            label, self.settings_hint, message
        )
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(OriginMatcher::default(), DEFAULT_SETTINGS_HINT, "zscript")
    }
}

//! Line classification.
//!
//! Each line of compiler output is tagged with the output dialect it was
//! written in. The checks run in a fixed order and the first hit wins, since a
//! legacy line can also satisfy a later substring test.

use serde::{Deserialize, Serialize};

/// The dialect a diagnostic-bearing line was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineKind {
    /// `syntax error, <message> [<file> Line <N> Column <C>...]`
    Syntax,
    /// `<file> Line <N> ... Columns <A>-<B> - <message>`
    Structured,
    /// `ERROR: <message> [<file> Line <N> Column <C>...]`
    Legacy,
}

impl LineKind {
    /// Every dialect, in classification priority order.
    pub const ALL: [LineKind; 3] = [LineKind::Syntax, LineKind::Structured, LineKind::Legacy];

    /// Returns true if `line` carries this dialect's marker.
    fn marks(self, line: &str) -> bool {
        match self {
            LineKind::Syntax => line.contains("syntax error"),
            LineKind::Structured => line.contains("Error") || line.contains("Warning"),
            LineKind::Legacy => line.contains("ERROR:") || line.contains("WARNING:"),
        }
    }
}

/// Classifies one line of compiler output.
///
/// Returns `None` for lines that carry no diagnostic.
pub fn classify(line: &str) -> Option<LineKind> {
    LineKind::ALL.into_iter().find(|kind| kind.marks(line))
}

//! # zsdiag_core
//!
//! Turns the free-form text output of the ZScript compiler into structured,
//! position-accurate editor diagnostics.
//!
//! Output goes through three stages per line:
//! - classification into one of the known output dialects
//! - field extraction with the dialect's pattern
//! - range and origin normalization (temp-buffer detection)
//!
//! ## Example
//!
//! ```rust
//! use zsdiag_core::{CompileOutcome, DiagnosticParser};
//!
//! let parser = DiagnosticParser::default();
//! let output = parser.parse_run(&CompileOutcome::failed(
//!     "somefile.zh Line 5 Columns 1-16 - Warning S094: Variable 'X' is deprecated.",
//! ));
//!
//! assert_eq!(output.diagnostics.len(), 1);
//! assert_eq!(output.diagnostics[0].range.start.line, 4);
//! ```

mod classify;
mod config;
pub mod constants;
mod diagnostic;
mod error;
mod extract;
mod normalize;
mod parser;

pub use classify::{LineKind, classify};
pub use config::{DiagConfig, ParserConfig};
pub use constants::{ConstantCache, ConstantInfo, scan_constants};
pub use diagnostic::{Diagnostic, ParseOutput, Position, Range, Severity};
pub use error::DiagError;
pub use extract::{Extracted, Origin, extract};
pub use normalize::{DEFAULT_SETTINGS_HINT, DEFAULT_TEMP_BUFFER, Normalizer, OriginMatcher};
pub use parser::{CompileOutcome, DiagnosticParser, parse_compiler_output};

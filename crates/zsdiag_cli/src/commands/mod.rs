//! Subcommand implementations

mod check;
mod init;
mod lsp;
mod parse;

pub use check::run_check;
pub use init::run_init;
pub use lsp::run_lsp;
pub use parse::run_parse;

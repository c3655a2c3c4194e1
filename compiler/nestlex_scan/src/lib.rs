//! Nestlex scanning engine.
//!
//! Turns source text into a tree of classified tokens whose nesting follows
//! the language's blocks, braces or indentation. Everything specific to a
//! language sits behind the [`Language`] trait; the engine itself only
//! knows about characters, lines and indent levels.
//!
//! ```text
//! let output = nestlex_scan::scan(source, &language, &ScanOptions::default())?;
//! for diagnostic in &output.diagnostics {
//!     eprintln!("warning: {diagnostic}");
//! }
//! ```
//!
//! # Errors vs diagnostics
//!
//! [`ScanError`] aborts a scan: an incomplete language, bad options, or a
//! predicate that found its own scratch state malformed. Problems in the
//! input (a stray closing brace, an unterminated string) are
//! [`Diagnostic`]s returned next to a complete tree.

mod config;
mod diagnostic;
mod engine;
mod error;
mod language;
mod options;
mod scratch;
mod state;
mod tables;

pub use config::{BoundaryPredicate, CharPredicate, LanguageConfig};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use engine::{scan, ScanOutput, Scanner};
pub use error::{ConfigField, ScanError};
pub use language::{dispatch, Boundary, Language, PredicateResult, DISPATCH_ORDER};
pub use options::ScanOptions;
pub use scratch::{Frame, Scratch, ScratchError, ScratchFamily, ScratchSlot};
pub use state::ScanState;
pub use tables::{KeywordTable, SymbolTable};

//! The per-language capability interface.

use std::fmt;

use crate::error::{ConfigField, ScanError};
use crate::scratch::ScratchError;
use crate::state::ScanState;
use crate::tables::{KeywordTable, SymbolTable};

/// Result of a boundary predicate.
pub type PredicateResult = Result<bool, ScratchError>;

/// Everything the engine needs to know about one language.
///
/// Start predicates report a boundary at the current position and record
/// its delimiters with [`ScanState::set_start_marker`] and
/// [`ScanState::set_end_marker`]. End predicates are asked at every
/// position inside a string or comment until they return `true`; the end
/// marker written by the start predicate is still set while they run.
///
/// A scope end predicate that leaves the end marker empty produces no
/// closing token, which is what indentation languages want.
pub trait Language: Send + Sync {
    fn name(&self) -> &str;

    fn symbols(&self) -> &SymbolTable;

    fn keywords(&self) -> &KeywordTable;

    /// Whether `c` can be part of an identifier or keyword.
    fn is_keyword_char(&self, c: char) -> bool;

    fn string_start(&self, state: &mut ScanState<'_>) -> PredicateResult;

    fn string_end(&self, state: &mut ScanState<'_>) -> PredicateResult;

    fn comment_start(&self, state: &mut ScanState<'_>) -> PredicateResult;

    fn comment_end(&self, state: &mut ScanState<'_>) -> PredicateResult;

    fn scope_start(&self, state: &mut ScanState<'_>) -> PredicateResult;

    fn scope_end(&self, state: &mut ScanState<'_>) -> PredicateResult;

    /// Checked once before every scan.
    fn validate(&self) -> Result<(), ScanError> {
        if self.name().is_empty() {
            return Err(ScanError::ConfigurationIncomplete {
                language: String::new(),
                missing: vec![ConfigField::Name],
            });
        }
        Ok(())
    }
}

/// A boundary the engine looks for at each position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Boundary {
    StringStart,
    CommentStart,
    ScopeStart,
    ScopeEnd,
}

/// Order in which boundaries are tested. The first match wins.
///
/// A character that could open both a string and a scope opens a string.
pub const DISPATCH_ORDER: [Boundary; 4] = [
    Boundary::StringStart,
    Boundary::CommentStart,
    Boundary::ScopeStart,
    Boundary::ScopeEnd,
];

impl Boundary {
    /// Ask `language` whether this boundary is at the current position.
    pub fn test<L: Language + ?Sized>(
        self,
        language: &L,
        state: &mut ScanState<'_>,
    ) -> PredicateResult {
        match self {
            Boundary::StringStart => language.string_start(state),
            Boundary::CommentStart => language.comment_start(state),
            Boundary::ScopeStart => language.scope_start(state),
            Boundary::ScopeEnd => language.scope_end(state),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Boundary::StringStart => "string start",
            Boundary::CommentStart => "comment start",
            Boundary::ScopeStart => "scope start",
            Boundary::ScopeEnd => "scope end",
        }
    }
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Find the first boundary in [`DISPATCH_ORDER`] at the current position.
///
/// Markers are cleared before each predicate so a predicate that declined
/// cannot leak delimiters into the one that matches.
pub fn dispatch<L: Language + ?Sized>(
    language: &L,
    state: &mut ScanState<'_>,
) -> Result<Option<Boundary>, ScratchError> {
    for boundary in DISPATCH_ORDER {
        state.clear_markers();
        if boundary.test(language, state)? {
            return Ok(Some(boundary));
        }
    }
    state.clear_markers();
    Ok(None)
}

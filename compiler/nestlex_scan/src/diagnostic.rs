//! Recoverable problems found while scanning.

use std::fmt;

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A scope end matched while no scope was open. The closing token, if
    /// any, stays in the root scope.
    UnbalancedScope,
    /// Input ended inside a string or comment. The partial token is kept.
    UnterminatedConstruct { symbolic_name: String },
}

/// A problem and where it was found.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// 1-based line.
    pub line: u32,
    /// Character index into the scanned text.
    pub index: usize,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, line: u32, index: usize) -> Self {
        Diagnostic { kind, line, index }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::UnbalancedScope => "scope end with no open scope".to_owned(),
            DiagnosticKind::UnterminatedConstruct { symbolic_name } => {
                format!("unterminated {} at end of input", symbolic_name.to_lowercase())
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message())
    }
}

//! Rule kinds and well-known classification names.

use std::fmt;

/// Label given to a scope nobody has named yet.
pub const UNKNOWN_SCOPE_LABEL: &str = "__UNKNOWN__";

/// Label of the root scope returned by a scan.
pub const FILE_SCOPE_LABEL: &str = "File";

/// Well-known symbolic names.
///
/// Keyword and symbol tokens use the upper-cased keyword or table label
/// instead; these cover everything else.
pub mod names {
    /// Accumulated identifier that is not a listed keyword.
    pub const IDENTIFIER: &str = "IDENTIFIER";
    /// Single character with no symbol table entry.
    pub const UNKNOWN: &str = "UNKNOWN";
    pub const COMMENT: &str = "COMMENT";
    pub const STRING: &str = "STRING";
    pub const WHITESPACE: &str = "WHITESPACE";
    pub const NEWLINE: &str = "NEWLINE";
    /// Placeholder carried by a leaf before classification.
    pub const UNIDENTIFIED: &str = "Unidentified";
    /// Rule name reported for scope markers.
    pub const SCOPE_TOKEN: &str = "SCOPE_TOKEN";
}

/// Broad category of a leaf token.
///
/// Scope markers are a separate [`Token`](crate::Token) variant, so they
/// have no rule kind of their own.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RuleKind {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "unidentified"))]
    Unidentified,
    #[cfg_attr(feature = "serde", serde(rename = "KEYWORD"))]
    Keyword,
    #[cfg_attr(feature = "serde", serde(rename = "SYMBOL"))]
    Symbol,
    /// Strings, comments, whitespace and newlines.
    #[cfg_attr(feature = "serde", serde(rename = "OTHER"))]
    Other,
}

impl RuleKind {
    /// Textual rule name, as shown in dumps.
    pub const fn as_str(self) -> &'static str {
        match self {
            RuleKind::Unidentified => "unidentified",
            RuleKind::Keyword => "KEYWORD",
            RuleKind::Symbol => "SYMBOL",
            RuleKind::Other => "OTHER",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

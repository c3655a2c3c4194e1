//! Scan errors.
//!
//! Only conditions that make a scan meaningless are errors. Recoverable
//! problems in the input are reported as [`Diagnostic`](crate::Diagnostic)s
//! next to the tree.

use std::fmt;

use crate::scratch::ScratchError;

/// A language capability that has not been supplied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConfigField {
    Name,
    KeywordChar,
    StringStart,
    StringEnd,
    CommentStart,
    CommentEnd,
    ScopeStart,
    ScopeEnd,
}

impl ConfigField {
    pub const fn as_str(self) -> &'static str {
        match self {
            ConfigField::Name => "name",
            ConfigField::KeywordChar => "keyword character predicate",
            ConfigField::StringStart => "string start predicate",
            ConfigField::StringEnd => "string end predicate",
            ConfigField::CommentStart => "comment start predicate",
            ConfigField::CommentEnd => "comment end predicate",
            ConfigField::ScopeStart => "scope start predicate",
            ConfigField::ScopeEnd => "scope end predicate",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error that aborts a scan.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("language `{language}` is not fully configured (missing {})", field_list(.missing))]
    ConfigurationIncomplete {
        language: String,
        missing: Vec<ConfigField>,
    },

    #[error("indent width must be at least 1")]
    InvalidIndentWidth,

    #[error("language scratch state is malformed: {0}")]
    ScratchMalformed(#[from] ScratchError),
}

fn field_list(fields: &[ConfigField]) -> String {
    fields
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

//! Tokens: classified leaves and scope markers.

use crate::rule::names;
use crate::{RuleKind, Scope};

/// A classified lexical unit.
///
/// `text` is the exact source text the leaf covers. Strings and comments
/// keep their delimiters.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Leaf {
    /// 1-based source line the leaf starts on.
    pub line: u32,
    /// Indent level of that line when the leaf was created.
    pub indent: u32,
    pub rule: RuleKind,
    pub symbolic_name: String,
    pub text: String,
}

impl Leaf {
    /// Create a leaf that has not been classified yet.
    pub fn unidentified(text: impl Into<String>, line: u32, indent: u32) -> Self {
        Leaf {
            line,
            indent,
            rule: RuleKind::Unidentified,
            symbolic_name: names::UNIDENTIFIED.to_owned(),
            text: text.into(),
        }
    }

    /// Create an already classified leaf.
    pub fn new(
        rule: RuleKind,
        symbolic_name: impl Into<String>,
        text: impl Into<String>,
        line: u32,
        indent: u32,
    ) -> Self {
        Leaf {
            line,
            indent,
            rule,
            symbolic_name: symbolic_name.into(),
            text: text.into(),
        }
    }

    /// Assign the final classification.
    pub fn classify(&mut self, rule: RuleKind, symbolic_name: impl Into<String>) {
        self.rule = rule;
        self.symbolic_name = symbolic_name.into();
    }

    #[inline]
    pub fn is_classified(&self) -> bool {
        self.rule != RuleKind::Unidentified
    }
}

/// A token that owns the scope opened at its position.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScopeMarker {
    /// Line on which the scope was opened.
    pub line: u32,
    /// Indent level when the scope was opened.
    pub indent: u32,
    pub scope: Scope,
}

impl ScopeMarker {
    pub fn new(scope: Scope, line: u32, indent: u32) -> Self {
        ScopeMarker {
            line,
            indent,
            scope,
        }
    }
}

/// One entry of a [`Scope`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Token {
    Leaf(Leaf),
    Marker(ScopeMarker),
}

impl Token {
    #[inline]
    pub fn is_marker(&self) -> bool {
        matches!(self, Token::Marker(_))
    }

    pub fn line(&self) -> u32 {
        match self {
            Token::Leaf(leaf) => leaf.line,
            Token::Marker(marker) => marker.line,
        }
    }

    pub fn indent(&self) -> u32 {
        match self {
            Token::Leaf(leaf) => leaf.indent,
            Token::Marker(marker) => marker.indent,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Token::Leaf(leaf) => Some(leaf),
            Token::Marker(_) => None,
        }
    }

    pub fn as_scope(&self) -> Option<&Scope> {
        match self {
            Token::Marker(marker) => Some(&marker.scope),
            Token::Leaf(_) => None,
        }
    }

    pub fn as_scope_mut(&mut self) -> Option<&mut Scope> {
        match self {
            Token::Marker(marker) => Some(&mut marker.scope),
            Token::Leaf(_) => None,
        }
    }

    /// Rule name for display: the leaf's rule, or `SCOPE_TOKEN` for markers.
    pub fn rule_name(&self) -> &'static str {
        match self {
            Token::Leaf(leaf) => leaf.rule.as_str(),
            Token::Marker(_) => names::SCOPE_TOKEN,
        }
    }
}

impl From<Leaf> for Token {
    fn from(leaf: Leaf) -> Self {
        Token::Leaf(leaf)
    }
}

impl From<ScopeMarker> for Token {
    fn from(marker: ScopeMarker) -> Self {
        Token::Marker(marker)
    }
}

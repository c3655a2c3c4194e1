//! Nested scope container.
//!
//! A [`Scope`] is the token sequence of one nesting level. Tokens that open
//! a nested level are [`Token::Marker`]s which own their child scope, so a
//! scan result is a plain owned tree.
//!
//! # Child index cache
//!
//! Alongside the tokens the scope keeps `child_indices`, the ascending
//! positions of every marker. It makes "n-th child scope" O(1) and
//! [`Scope::total_size`] independent of the number of leaves. After every
//! public mutating method returns:
//!
//! `child_indices == { i : tokens[i].is_marker() }`
//!
//! Appends update the cache incrementally. Interior inserts and deletes
//! shift positions, so they rebuild it.

use std::fmt;

use smallvec::SmallVec;

use crate::rule::UNKNOWN_SCOPE_LABEL;
use crate::stack::ensure_sufficient_stack;
use crate::{Leaf, ScopeMarker, Token};

/// Error from a positional [`Scope`] operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScopeError {
    #[error("index {index} out of range for scope of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("invalid range {start}..={end} for scope of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("token {index} opens a scope, not a leaf")]
    NotALeaf { index: usize },
}

/// Ordered tokens of one nesting level.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Scope {
    label: String,
    tokens: Vec<Token>,
    /// Positions of marker tokens, ascending.
    #[cfg_attr(feature = "serde", serde(skip))]
    child_indices: SmallVec<[usize; 4]>,
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Scope {
    /// Create an empty scope labelled `__UNKNOWN__`.
    pub fn new() -> Self {
        Scope {
            label: UNKNOWN_SCOPE_LABEL.to_owned(),
            tokens: Vec::new(),
            child_indices: SmallVec::new(),
        }
    }

    /// Create an empty scope with the given label.
    pub fn with_label(label: impl Into<String>) -> Self {
        Scope {
            label: label.into(),
            ..Self::new()
        }
    }

    /// Create a scope from one token sequence.
    pub fn from_tokens(tokens: Vec<Token>) -> Self {
        let mut scope = Scope {
            tokens,
            ..Self::new()
        };
        scope.rebuild_child_indices();
        scope
    }

    /// Create a scope holding several token sequences back to back.
    pub fn from_sequences<I>(sequences: I) -> Self
    where
        I: IntoIterator<Item = Vec<Token>>,
    {
        let mut scope = Self::new();
        for sequence in sequences {
            for token in sequence {
                scope.push(token);
            }
        }
        scope
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Number of direct tokens, markers included.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Number of leaves in this scope and every descendant scope.
    pub fn total_size(&self) -> usize {
        ensure_sufficient_stack(|| {
            let nested: usize = self
                .child_indices
                .iter()
                .filter_map(|&i| self.tokens[i].as_scope())
                .map(Scope::total_size)
                .sum();
            self.tokens.len() - self.child_indices.len() + nested
        })
    }

    /// Append a token.
    pub fn push(&mut self, token: impl Into<Token>) {
        let token = token.into();
        if token.is_marker() {
            self.child_indices.push(self.tokens.len());
        }
        self.tokens.push(token);
    }

    /// Insert a token before position `index`. `index == len()` appends.
    pub fn insert(&mut self, token: impl Into<Token>, index: usize) -> Result<(), ScopeError> {
        let len = self.tokens.len();
        if index > len {
            return Err(ScopeError::IndexOutOfRange { index, len });
        }
        if index == len {
            self.push(token);
            return Ok(());
        }
        self.tokens.insert(index, token.into());
        self.rebuild_child_indices();
        Ok(())
    }

    /// Remove and return the token at `index`.
    pub fn delete(&mut self, index: usize) -> Result<Token, ScopeError> {
        self.check_index(index)?;
        let removed = self.tokens.remove(index);
        self.rebuild_child_indices();
        Ok(removed)
    }

    pub fn at(&self, index: usize) -> Result<&Token, ScopeError> {
        self.check_index(index)?;
        Ok(&self.tokens[index])
    }

    /// Mutable access to the leaf at `index`.
    ///
    /// Markers are reached through [`Scope::child_scope_mut`]; swapping a
    /// leaf for a marker goes through [`Scope::delete`] and [`Scope::insert`].
    pub fn leaf_mut(&mut self, index: usize) -> Result<&mut Leaf, ScopeError> {
        self.check_index(index)?;
        match &mut self.tokens[index] {
            Token::Leaf(leaf) => Ok(leaf),
            Token::Marker(_) => Err(ScopeError::NotALeaf { index }),
        }
    }

    /// The most recently appended token.
    pub fn front(&self) -> Option<&Token> {
        self.tokens.last()
    }

    /// Remove the most recently appended token.
    pub fn pop(&mut self) -> Option<Token> {
        let token = self.tokens.pop()?;
        if token.is_marker() {
            self.child_indices.pop();
        }
        Some(token)
    }

    /// Number of direct child scopes.
    #[inline]
    pub fn child_scope_count(&self) -> usize {
        self.child_indices.len()
    }

    /// Positions of the direct child scope markers, ascending.
    #[inline]
    pub fn child_scope_indices(&self) -> &[usize] {
        &self.child_indices
    }

    /// The `n`-th direct child scope in source order.
    pub fn child_scope(&self, n: usize) -> Result<&Scope, ScopeError> {
        let index = self.child_position(n)?;
        match &self.tokens[index] {
            Token::Marker(marker) => Ok(&marker.scope),
            Token::Leaf(_) => Err(self.stale_cache(n)),
        }
    }

    pub fn child_scope_mut(&mut self, n: usize) -> Result<&mut Scope, ScopeError> {
        let index = self.child_position(n)?;
        let err = self.stale_cache(n);
        match &mut self.tokens[index] {
            Token::Marker(marker) => Ok(&mut marker.scope),
            Token::Leaf(_) => Err(err),
        }
    }

    /// Move the tokens in `start..=end` into a new child scope.
    ///
    /// The new marker takes position `start` and the line/indent of the first
    /// moved token.
    pub fn scopify_range(&mut self, start: usize, end: usize) -> Result<(), ScopeError> {
        let len = self.tokens.len();
        if start > end || end >= len {
            return Err(ScopeError::InvalidRange { start, end, len });
        }
        let moved: Vec<Token> = self.tokens.drain(start..=end).collect();
        let (line, indent) = (moved[0].line(), moved[0].indent());
        let marker = ScopeMarker::new(Scope::from_tokens(moved), line, indent);
        self.tokens.insert(start, Token::Marker(marker));
        self.rebuild_child_indices();
        Ok(())
    }

    /// Append every token of `other`, in order.
    pub fn concatenate(&mut self, other: Scope) {
        for token in other.tokens {
            self.push(token);
        }
    }

    /// All leaves, depth first, with each marker replaced by its contents.
    pub fn flatten(&self) -> Vec<&Leaf> {
        let mut out = Vec::with_capacity(self.total_size());
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        ensure_sufficient_stack(|| {
            for token in &self.tokens {
                match token {
                    Token::Leaf(leaf) => out.push(leaf),
                    Token::Marker(marker) => marker.scope.flatten_into(out),
                }
            }
        });
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn into_tokens(self) -> Vec<Token> {
        self.tokens
    }

    fn check_index(&self, index: usize) -> Result<(), ScopeError> {
        let len = self.tokens.len();
        if index < len {
            Ok(())
        } else {
            Err(ScopeError::IndexOutOfRange { index, len })
        }
    }

    fn child_position(&self, n: usize) -> Result<usize, ScopeError> {
        self.child_indices
            .get(n)
            .copied()
            .ok_or(ScopeError::IndexOutOfRange {
                index: n,
                len: self.child_indices.len(),
            })
    }

    fn stale_cache(&self, n: usize) -> ScopeError {
        ScopeError::IndexOutOfRange {
            index: n,
            len: self.child_indices.len(),
        }
    }

    fn rebuild_child_indices(&mut self) {
        self.child_indices.clear();
        self.child_indices.extend(
            self.tokens
                .iter()
                .enumerate()
                .filter(|(_, token)| token.is_marker())
                .map(|(i, _)| i),
        );
    }
}

impl fmt::Debug for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("label", &self.label)
            .field("tokens", &self.tokens)
            .finish_non_exhaustive()
    }
}

impl<'a> IntoIterator for &'a Scope {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

//! A [`Language`] assembled from closures at runtime.
//!
//! Useful for one-off languages and tests. Fixed languages are better
//! written as types implementing [`Language`] directly.
//!
//! ```text
//! let lang = LanguageConfig::new()
//!     .configure_general("braces", symbols, keywords, |c| c.is_alphanumeric())
//!     .configure_string(|_| Ok(false), |_| Ok(true))
//!     .configure_comment(|_| Ok(false), |_| Ok(true))
//!     .configure_scope(open_brace, close_brace);
//! ```

use std::fmt;

use crate::error::{ConfigField, ScanError};
use crate::language::{Language, PredicateResult};
use crate::state::ScanState;
use crate::tables::{KeywordTable, SymbolTable};

pub type CharPredicate = Box<dyn Fn(char) -> bool + Send + Sync>;
pub type BoundaryPredicate = Box<dyn Fn(&mut ScanState<'_>) -> PredicateResult + Send + Sync>;

/// Language made of optional parts. Every part must be set before a scan.
#[derive(Default)]
pub struct LanguageConfig {
    name: String,
    symbols: SymbolTable,
    keywords: KeywordTable,
    keyword_char: Option<CharPredicate>,
    string_start: Option<BoundaryPredicate>,
    string_end: Option<BoundaryPredicate>,
    comment_start: Option<BoundaryPredicate>,
    comment_end: Option<BoundaryPredicate>,
    scope_start: Option<BoundaryPredicate>,
    scope_end: Option<BoundaryPredicate>,
}

impl LanguageConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name, tables and identifier characters.
    #[must_use]
    pub fn configure_general<F>(
        mut self,
        name: impl Into<String>,
        symbols: SymbolTable,
        keywords: KeywordTable,
        keyword_char: F,
    ) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        self.name = name.into();
        self.symbols = symbols;
        self.keywords = keywords;
        self.keyword_char = Some(Box::new(keyword_char));
        self
    }

    #[must_use]
    pub fn configure_string<S, E>(mut self, start: S, end: E) -> Self
    where
        S: Fn(&mut ScanState<'_>) -> PredicateResult + Send + Sync + 'static,
        E: Fn(&mut ScanState<'_>) -> PredicateResult + Send + Sync + 'static,
    {
        self.string_start = Some(Box::new(start));
        self.string_end = Some(Box::new(end));
        self
    }

    #[must_use]
    pub fn configure_comment<S, E>(mut self, start: S, end: E) -> Self
    where
        S: Fn(&mut ScanState<'_>) -> PredicateResult + Send + Sync + 'static,
        E: Fn(&mut ScanState<'_>) -> PredicateResult + Send + Sync + 'static,
    {
        self.comment_start = Some(Box::new(start));
        self.comment_end = Some(Box::new(end));
        self
    }

    #[must_use]
    pub fn configure_scope<S, E>(mut self, start: S, end: E) -> Self
    where
        S: Fn(&mut ScanState<'_>) -> PredicateResult + Send + Sync + 'static,
        E: Fn(&mut ScanState<'_>) -> PredicateResult + Send + Sync + 'static,
    {
        self.scope_start = Some(Box::new(start));
        self.scope_end = Some(Box::new(end));
        self
    }

    /// Every part that is still unset, in declaration order.
    pub fn missing_fields(&self) -> Vec<ConfigField> {
        let checks = [
            (self.name.is_empty(), ConfigField::Name),
            (self.keyword_char.is_none(), ConfigField::KeywordChar),
            (self.string_start.is_none(), ConfigField::StringStart),
            (self.string_end.is_none(), ConfigField::StringEnd),
            (self.comment_start.is_none(), ConfigField::CommentStart),
            (self.comment_end.is_none(), ConfigField::CommentEnd),
            (self.scope_start.is_none(), ConfigField::ScopeStart),
            (self.scope_end.is_none(), ConfigField::ScopeEnd),
        ];
        checks
            .into_iter()
            .filter_map(|(missing, field)| missing.then_some(field))
            .collect()
    }
}

fn call(predicate: Option<&BoundaryPredicate>, state: &mut ScanState<'_>) -> PredicateResult {
    match predicate {
        Some(f) => f(state),
        None => Ok(false),
    }
}

impl Language for LanguageConfig {
    fn name(&self) -> &str {
        &self.name
    }

    fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    fn is_keyword_char(&self, c: char) -> bool {
        self.keyword_char.as_ref().is_some_and(|f| f(c))
    }

    fn string_start(&self, state: &mut ScanState<'_>) -> PredicateResult {
        call(self.string_start.as_ref(), state)
    }

    fn string_end(&self, state: &mut ScanState<'_>) -> PredicateResult {
        call(self.string_end.as_ref(), state)
    }

    fn comment_start(&self, state: &mut ScanState<'_>) -> PredicateResult {
        call(self.comment_start.as_ref(), state)
    }

    fn comment_end(&self, state: &mut ScanState<'_>) -> PredicateResult {
        call(self.comment_end.as_ref(), state)
    }

    fn scope_start(&self, state: &mut ScanState<'_>) -> PredicateResult {
        call(self.scope_start.as_ref(), state)
    }

    fn scope_end(&self, state: &mut ScanState<'_>) -> PredicateResult {
        call(self.scope_end.as_ref(), state)
    }

    fn validate(&self) -> Result<(), ScanError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ScanError::ConfigurationIncomplete {
                language: self.name.clone(),
                missing,
            })
        }
    }
}

impl fmt::Debug for LanguageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageConfig")
            .field("name", &self.name)
            .field("symbols", &self.symbols.len())
            .field("keywords", &self.keywords.len())
            .field("missing", &self.missing_fields())
            .finish()
    }
}

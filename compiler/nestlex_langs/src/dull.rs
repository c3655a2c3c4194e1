use nestlex_scan::{KeywordTable, Language, PredicateResult, ScanState, SymbolTable};

use crate::is_word_char;

/// A language with no strings, comments or scopes.
///
/// Every run of word characters becomes an identifier and every other
/// character a symbol. Handy as a baseline and for plain text.
#[derive(Clone, Debug, Default)]
pub struct Dull {
    symbols: SymbolTable,
    keywords: KeywordTable,
}

impl Dull {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Language for Dull {
    fn name(&self) -> &str {
        "dull"
    }

    fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    fn keywords(&self) -> &KeywordTable {
        &self.keywords
    }

    fn is_keyword_char(&self, c: char) -> bool {
        is_word_char(c)
    }

    fn string_start(&self, _: &mut ScanState<'_>) -> PredicateResult {
        Ok(false)
    }

    fn string_end(&self, _: &mut ScanState<'_>) -> PredicateResult {
        Ok(true)
    }

    fn comment_start(&self, _: &mut ScanState<'_>) -> PredicateResult {
        Ok(false)
    }

    fn comment_end(&self, _: &mut ScanState<'_>) -> PredicateResult {
        Ok(true)
    }

    fn scope_start(&self, _: &mut ScanState<'_>) -> PredicateResult {
        Ok(false)
    }

    fn scope_end(&self, _: &mut ScanState<'_>) -> PredicateResult {
        Ok(false)
    }
}

//! Classification of identifiers, symbols and delimiters.

use nestlex_ir::{names, Leaf, RuleKind};

use crate::tables::{KeywordTable, SymbolTable};

#[inline]
pub(crate) fn is_inline_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r')
}

/// Classify an accumulated identifier.
pub(crate) fn keyword(leaf: &mut Leaf, keywords: &KeywordTable) {
    let name = keywords.label(&leaf.text).unwrap_or(names::IDENTIFIER);
    let name = name.to_owned();
    leaf.classify(RuleKind::Keyword, name);
}

/// Classify a symbol: whitespace and newlines first, then the table.
pub(crate) fn symbol(leaf: &mut Leaf, symbols: &SymbolTable) {
    let mut chars = leaf.text.chars();
    let single = match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    };
    match single {
        Some('\n') => leaf.classify(RuleKind::Other, names::NEWLINE),
        Some(c) if is_inline_whitespace(c) => leaf.classify(RuleKind::Other, names::WHITESPACE),
        _ => {
            let name = symbols.label(&leaf.text).unwrap_or(names::UNKNOWN).to_owned();
            leaf.classify(RuleKind::Symbol, name);
        }
    }
}

/// Classify a scope delimiter: a listed keyword, otherwise a symbol.
pub(crate) fn delimiter(leaf: &mut Leaf, keywords: &KeywordTable, symbols: &SymbolTable) {
    if keywords.contains(&leaf.text) {
        keyword(leaf, keywords);
    } else {
        symbol(leaf, symbols);
    }
}

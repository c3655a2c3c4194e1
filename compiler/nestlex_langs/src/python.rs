//! Python: indentation scopes.
//!
//! A `:` that ends its line (ignoring a trailing comment) opens a block and
//! records the opening line and indent in the scope scratch slot. The block
//! closes at the first content on a later line indented no deeper than the
//! opener. Several blocks can close at the same character: the end
//! predicate suppresses the advance so the character is looked at again.

use nestlex_scan::{
    Frame, KeywordTable, Language, PredicateResult, ScanState, ScratchFamily, SymbolTable,
};

use crate::is_word_char;

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

const SYMBOLS: &[(&str, &str)] = &[
    ("(", "LPAREN"),
    (")", "RPAREN"),
    ("[", "LBRACKET"),
    ("]", "RBRACKET"),
    ("{", "LCURLY"),
    ("}", "RCURLY"),
    (":", "COLON"),
    (",", "COMMA"),
    (".", "PERIOD"),
    (";", "SEMICOLON"),
    ("=", "EQUAL"),
    ("+", "PLUS"),
    ("-", "MINUS"),
    ("*", "STAR"),
    ("/", "SLASH"),
    ("%", "PERCENT"),
    ("<", "LESS_THAN"),
    (">", "GREATER_THAN"),
    ("!", "BANG"),
    ("&", "AMPERSAND"),
    ("|", "PIPE"),
    ("^", "CARET"),
    ("~", "TILDE"),
    ("@", "AT"),
    ("\\", "BACKSLASH"),
];

#[derive(Clone, Debug)]
pub struct Python {
    symbols: SymbolTable,
    keywords: KeywordTable,
}

impl Python {
    pub fn new() -> Self {
        Python {
            symbols: SymbolTable::from_pairs(SYMBOLS.iter().copied()),
            keywords: KeywordTable::from_words(KEYWORDS.iter().copied()),
        }
    }
}

impl Default for Python {
    fn default() -> Self {
        Self::new()
    }
}

/// Innermost open block, if the current position is where it ends.
fn closing_block(state: &ScanState<'_>) -> Option<Frame> {
    let frame = state.scratch(ScratchFamily::Scope).top_frame()?;
    let dedented = state.line() != frame.line && state.indent() <= frame.indent;
    dedented.then_some(frame)
}

/// Whether the character after the current one ends the logical line.
fn ends_line(state: &ScanState<'_>) -> bool {
    matches!(
        state.first_non_blank(state.index() + 1),
        None | Some('\n' | '#')
    )
}

/// Quote at the current position: one character or a triple.
fn opening_quote(state: &ScanState<'_>) -> Option<&'static str> {
    let (single, triple) = match state.current()? {
        '"' => ("\"", "\"\"\""),
        '\'' => ("'", "'''"),
        _ => return None,
    };
    if state.starts_with(triple) {
        Some(triple)
    } else {
        Some(single)
    }
}

impl Language for Python {
    fn name(&self) -> &str {
        "python"
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

    fn string_start(&self, state: &mut ScanState<'_>) -> PredicateResult {
        // A string starting a dedented line belongs after the closed block.
        if closing_block(state).is_some() {
            return Ok(false);
        }
        let Some(quote) = opening_quote(state) else {
            return Ok(false);
        };
        state.set_start_marker(quote);
        state.set_end_marker(quote);
        Ok(true)
    }

    fn string_end(&self, state: &mut ScanState<'_>) -> PredicateResult {
        if state.backslashes_before() % 2 != 0 {
            return Ok(false);
        }
        let quote = state.end_marker().to_owned();
        Ok(state.starts_with(&quote))
    }

    fn comment_start(&self, state: &mut ScanState<'_>) -> PredicateResult {
        if state.current() != Some('#') {
            return Ok(false);
        }
        state.set_start_marker("#");
        state.set_end_marker("\n");
        let line = state.line();
        state.scratch_mut(ScratchFamily::Comment).mark_line(line);
        Ok(true)
    }

    fn comment_end(&self, state: &mut ScanState<'_>) -> PredicateResult {
        let opened = state.scratch(ScratchFamily::Comment).marked_line()?;
        Ok(state.line() != opened)
    }

    fn scope_start(&self, state: &mut ScanState<'_>) -> PredicateResult {
        if state.current() != Some(':') || !ends_line(state) {
            return Ok(false);
        }
        state.set_start_marker(":");
        let frame = Frame {
            line: state.line(),
            indent: state.indent(),
        };
        state.scratch_mut(ScratchFamily::Scope).push_frame(frame);
        Ok(true)
    }

    fn scope_end(&self, state: &mut ScanState<'_>) -> PredicateResult {
        if closing_block(state).is_none() {
            return Ok(false);
        }
        state.scratch_mut(ScratchFamily::Scope).pop_frame()?;
        state.suppress_next_advance();
        Ok(true)
    }
}

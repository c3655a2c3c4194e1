//! Java: brace scopes, C-style comments, quoted strings and chars.

use nestlex_scan::{KeywordTable, Language, PredicateResult, ScanState, ScratchFamily, SymbolTable};

use crate::is_word_char;

const KEYWORDS: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "try",
    "void",
    "volatile",
    "while",
    "true",
    "false",
    "null",
];

const SYMBOLS: &[(&str, &str)] = &[
    ("{", "LCURLY"),
    ("}", "RCURLY"),
    ("(", "LPAREN"),
    (")", "RPAREN"),
    ("[", "LBRACKET"),
    ("]", "RBRACKET"),
    (".", "PERIOD"),
    (",", "COMMA"),
    (";", "SEMICOLON"),
    (":", "COLON"),
    ("=", "EQUAL"),
    ("+", "PLUS"),
    ("-", "MINUS"),
    ("*", "STAR"),
    ("/", "SLASH"),
    ("%", "PERCENT"),
    ("<", "LESS_THAN"),
    (">", "GREATER_THAN"),
    ("!", "BANG"),
    ("?", "QUESTION"),
    ("&", "AMPERSAND"),
    ("|", "PIPE"),
    ("^", "CARET"),
    ("~", "TILDE"),
    ("@", "AT"),
    ("\\", "BACKSLASH"),
];

#[derive(Clone, Debug)]
pub struct Java {
    symbols: SymbolTable,
    keywords: KeywordTable,
}

impl Java {
    pub fn new() -> Self {
        Java {
            symbols: SymbolTable::from_pairs(SYMBOLS.iter().copied()),
            keywords: KeywordTable::from_words(KEYWORDS.iter().copied()),
        }
    }
}

impl Default for Java {
    fn default() -> Self {
        Self::new()
    }
}

impl Language for Java {
    fn name(&self) -> &str {
        "java"
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
        match state.current() {
            Some(quote @ ('"' | '\'')) => {
                state.set_start_marker(quote);
                state.set_end_marker(quote);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn string_end(&self, state: &mut ScanState<'_>) -> PredicateResult {
        let quote = state.end_marker().chars().next();
        Ok(state.current() == quote && state.backslashes_before() % 2 == 0)
    }

    fn comment_start(&self, state: &mut ScanState<'_>) -> PredicateResult {
        if state.current() != Some('/') {
            return Ok(false);
        }
        match state.peek(1) {
            Some('/') => {
                state.set_start_marker("//");
                state.set_end_marker("\n");
                let line = state.line();
                state.scratch_mut(ScratchFamily::Comment).mark_line(line);
                Ok(true)
            }
            Some('*') => {
                state.set_start_marker("/*");
                state.set_end_marker("*/");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    fn comment_end(&self, state: &mut ScanState<'_>) -> PredicateResult {
        // Line comments end wherever the line changes, block comments on `*/`.
        if state.end_marker() == "\n" {
            let opened = state.scratch(ScratchFamily::Comment).marked_line()?;
            return Ok(state.line() != opened);
        }
        Ok(state.starts_with("*/"))
    }

    fn scope_start(&self, state: &mut ScanState<'_>) -> PredicateResult {
        if state.current() == Some('{') {
            state.set_start_marker("{");
            return Ok(true);
        }
        Ok(false)
    }

    fn scope_end(&self, state: &mut ScanState<'_>) -> PredicateResult {
        if state.current() == Some('}') {
            state.set_end_marker("}");
            return Ok(true);
        }
        Ok(false)
    }
}

#![allow(clippy::unwrap_used)]

use super::*;
use crate::config::LanguageConfig;
use crate::scratch::{Frame, ScratchFamily};
use crate::tables::{KeywordTable, SymbolTable};
use crate::{PredicateResult, ScratchError};
use nestlex_ir::render_tree;
use pretty_assertions::assert_eq;

fn never(_: &mut ScanState<'_>) -> PredicateResult {
    Ok(false)
}

fn identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn quote_start(state: &mut ScanState<'_>) -> PredicateResult {
    match state.current() {
        Some(q @ ('"' | '\'')) => {
            state.set_start_marker(q);
            state.set_end_marker(q);
            Ok(true)
        }
        _ => Ok(false),
    }
}

fn quote_end(state: &mut ScanState<'_>) -> PredicateResult {
    let close = state.end_marker().chars().next();
    Ok(state.current() == close && state.backslashes_before() % 2 == 0)
}

fn slash_comment_start(state: &mut ScanState<'_>) -> PredicateResult {
    if state.starts_with("//") {
        state.set_start_marker("//");
        state.set_end_marker("\n");
        let line = state.line();
        state.scratch_mut(ScratchFamily::Comment).mark_line(line);
        return Ok(true);
    }
    if state.starts_with("/*") {
        state.set_start_marker("/*");
        state.set_end_marker("*/");
        return Ok(true);
    }
    Ok(false)
}

fn slash_comment_end(state: &mut ScanState<'_>) -> PredicateResult {
    if state.end_marker() == "\n" {
        let opened = state.scratch(ScratchFamily::Comment).marked_line()?;
        return Ok(state.line() != opened);
    }
    let end = state.end_marker().to_owned();
    Ok(state.starts_with(&end))
}

fn brace_language() -> LanguageConfig {
    LanguageConfig::new()
        .configure_general(
            "braces",
            SymbolTable::from_pairs([
                ("{", "LCURLY"),
                ("}", "RCURLY"),
                (";", "SEMICOLON"),
                ("=", "EQUAL"),
                ("(", "LPAREN"),
                (")", "RPAREN"),
            ]),
            KeywordTable::from_words(["class", "int"]),
            identifier_char,
        )
        .configure_string(quote_start, quote_end)
        .configure_comment(slash_comment_start, slash_comment_end)
        .configure_scope(
            |state| {
                let open = state.current() == Some('{');
                if open {
                    state.set_start_marker("{");
                }
                Ok(open)
            },
            |state| {
                let close = state.current() == Some('}');
                if close {
                    state.set_end_marker("}");
                }
                Ok(close)
            },
        )
}

fn colon_scope_start(state: &mut ScanState<'_>) -> PredicateResult {
    if state.current() != Some(':') {
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

fn dedent_scope_end(state: &mut ScanState<'_>) -> PredicateResult {
    let Some(frame) = state.scratch(ScratchFamily::Scope).top_frame() else {
        return Ok(false);
    };
    let on_content = state.current().is_some_and(|c| !c.is_whitespace());
    if on_content && state.line() != frame.line && state.indent() <= frame.indent {
        state.scratch_mut(ScratchFamily::Scope).pop_frame()?;
        state.suppress_next_advance();
        return Ok(true);
    }
    Ok(false)
}

fn indent_language() -> LanguageConfig {
    LanguageConfig::new()
        .configure_general(
            "indented",
            SymbolTable::from_pairs([(":", "COLON"), ("=", "EQUAL")]),
            KeywordTable::from_words(["if", "else"]),
            identifier_char,
        )
        .configure_string(quote_start, quote_end)
        .configure_comment(never, never)
        .configure_scope(colon_scope_start, dedent_scope_end)
}

fn scan_tree(text: &str, language: &LanguageConfig, options: &ScanOptions) -> String {
    let output = scan(text, language, options).unwrap();
    assert!(output.is_clean(), "unexpected diagnostics: {:?}", output.diagnostics);
    render_tree(&output.root)
}

// === Delimited scopes ===

#[test]
fn brace_scope_nests_body() {
    let tree = scan_tree("class C { int x; }", &brace_language(), &ScanOptions::default());
    assert_eq!(
        tree,
        "\
scope File
  1:0 KEYWORD CLASS \"class\"
  1:0 KEYWORD IDENTIFIER \"C\"
  1:0 SYMBOL LCURLY \"{\"
  scope __UNKNOWN__ (1:0)
    1:0 KEYWORD INT \"int\"
    1:0 KEYWORD IDENTIFIER \"x\"
    1:0 SYMBOL SEMICOLON \";\"
  1:0 SYMBOL RCURLY \"}\"
"
    );
}

#[test]
fn scope_tree_sizes() {
    let output = scan("class C { int x; }", &brace_language(), &ScanOptions::default()).unwrap();
    assert_eq!(output.root.label(), "File");
    assert_eq!(output.root.len(), 5);
    assert_eq!(output.root.child_scope_count(), 1);
    assert_eq!(output.root.total_size(), 7);
    assert_eq!(output.root.child_scope(0).unwrap().len(), 3);
}

#[test]
fn open_scopes_are_closed_at_end_of_input() {
    let output = scan("{ { a", &brace_language(), &ScanOptions::default()).unwrap();

    assert!(output.is_clean());
    let outer = output.root.child_scope(0).unwrap();
    let inner = outer.child_scope(0).unwrap();
    assert_eq!(output.root.len(), 2);
    assert_eq!(outer.len(), 2);
    assert_eq!(inner.len(), 1);
    assert_eq!(output.root.total_size(), 3);
}

#[test]
fn unbalanced_close_is_reported_and_scan_continues() {
    let output = scan("a } b { c }", &brace_language(), &ScanOptions::default()).unwrap();

    assert_eq!(
        output.diagnostics,
        vec![Diagnostic::new(DiagnosticKind::UnbalancedScope, 1, 2)]
    );
    let texts: Vec<&str> = output.root.flatten().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "}", "b", "{", "c", "}"]);
    assert_eq!(output.root.child_scope_count(), 1);
}

#[test]
fn keyword_delimiters_skip_their_length() {
    let language = LanguageConfig::new()
        .configure_general(
            "words",
            SymbolTable::new(),
            KeywordTable::from_words(["begin", "end"]),
            identifier_char,
        )
        .configure_string(never, never)
        .configure_comment(never, never)
        .configure_scope(
            |state| {
                let open = state.starts_with("begin");
                if open {
                    state.set_start_marker("begin");
                }
                Ok(open)
            },
            |state| {
                let close = state.starts_with("end");
                if close {
                    state.set_end_marker("end");
                }
                Ok(close)
            },
        );

    let tree = scan_tree("begin x end y", &language, &ScanOptions::default());
    assert_eq!(
        tree,
        "\
scope File
  1:0 KEYWORD BEGIN \"begin\"
  scope __UNKNOWN__ (1:0)
    1:0 KEYWORD IDENTIFIER \"x\"
  1:0 KEYWORD END \"end\"
  1:0 KEYWORD IDENTIFIER \"y\"
"
    );
}

// === Strings and comments ===

#[test]
fn line_comment_keeps_newline() {
    let output = scan("// note\nx", &brace_language(), &ScanOptions::default()).unwrap();
    let leaves = output.root.flatten();

    assert_eq!(leaves.len(), 2);
    assert_eq!(leaves[0].symbolic_name, "COMMENT");
    assert_eq!(leaves[0].rule, RuleKind::Other);
    assert_eq!(leaves[0].text, "// note\n");
    assert_eq!(leaves[1].text, "x");
    assert_eq!(leaves[1].symbolic_name, "IDENTIFIER");
    assert_eq!((leaves[1].line, leaves[1].indent), (2, 0));
}

#[test]
fn escaped_quote_does_not_end_string() {
    let output = scan(r#""a\"b""#, &brace_language(), &ScanOptions::default()).unwrap();
    let leaves = output.root.flatten();

    assert_eq!(leaves.len(), 1);
    assert_eq!(leaves[0].symbolic_name, "STRING");
    assert_eq!(leaves[0].text, r#""a\"b""#);
}

#[test]
fn escaped_backslash_ends_string() {
    let output = scan(r#"'\\' x"#, &brace_language(), &ScanOptions::default()).unwrap();
    let texts: Vec<&str> = output.root.flatten().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec![r"'\\'", "x"]);
}

#[test]
fn block_comment_spans_lines() {
    let output = scan("/* a\n   b */x", &brace_language(), &ScanOptions::default()).unwrap();
    let leaves = output.root.flatten();

    assert_eq!(leaves[0].text, "/* a\n   b */");
    assert_eq!((leaves[0].line, leaves[0].indent), (1, 0));
    assert_eq!(leaves[1].text, "x");
    assert_eq!(leaves[1].line, 2);
}

#[test]
fn boundary_flushes_pending_identifier() {
    let output = scan("ab\"c\"", &brace_language(), &ScanOptions::default()).unwrap();
    let texts: Vec<&str> = output.root.flatten().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["ab", "\"c\""]);
}

#[test]
fn unterminated_string_keeps_partial_token() {
    let output = scan("\"abc", &brace_language(), &ScanOptions::default()).unwrap();

    assert_eq!(output.root.flatten()[0].text, "\"abc");
    assert_eq!(
        output.diagnostics,
        vec![Diagnostic::new(
            DiagnosticKind::UnterminatedConstruct {
                symbolic_name: "STRING".to_owned()
            },
            1,
            4
        )]
    );
    assert_eq!(
        output.diagnostics[0].to_string(),
        "line 1: unterminated string at end of input"
    );
}

#[test]
fn line_comment_may_end_input() {
    let output = scan("x // c", &brace_language(), &ScanOptions::default()).unwrap();
    assert!(output.is_clean());
    assert_eq!(output.root.flatten()[1].text, "// c");
}

#[test]
fn line_comment_on_last_line_keeps_newline() {
    let output = scan("x // c\n", &brace_language(), &ScanOptions::default()).unwrap();
    let leaves = output.root.flatten();

    assert!(output.is_clean());
    assert_eq!(leaves.len(), 2);
    assert_eq!(leaves[1].symbolic_name, "COMMENT");
    assert_eq!(leaves[1].text, "// c\n");
}

#[test]
fn newline_before_end_delimiter_is_kept() {
    let output = scan("\"a\n\" /*\n*/ y", &brace_language(), &ScanOptions::default()).unwrap();
    let leaves = output.root.flatten();

    assert!(output.is_clean());
    assert_eq!(leaves[0].text, "\"a\n\"");
    assert_eq!(leaves[1].text, "/*\n*/");
    assert_eq!((leaves[2].text.as_str(), leaves[2].line), ("y", 3));
}

#[test]
fn excluded_strings_and_comments_are_dropped() {
    let options = ScanOptions::default()
        .with_strings(false)
        .with_comments(false);
    let output = scan("a \"s\" /* c */ b", &brace_language(), &options).unwrap();
    let texts: Vec<&str> = output.root.flatten().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["a", "b"]);
}

#[test]
fn string_wins_over_scope_start() {
    let language = LanguageConfig::new()
        .configure_general("clash", SymbolTable::new(), KeywordTable::new(), identifier_char)
        .configure_string(quote_start, quote_end)
        .configure_comment(never, never)
        .configure_scope(
            |state| {
                let open = state.current() == Some('"');
                if open {
                    state.set_start_marker("\"");
                }
                Ok(open)
            },
            never,
        );

    let output = scan("\"x\"", &language, &ScanOptions::default()).unwrap();
    assert_eq!(output.root.child_scope_count(), 0);
    assert_eq!(output.root.flatten()[0].symbolic_name, "STRING");
}

// === Newlines and indentation ===

#[test]
fn indentation_closes_scope_before_dedent() {
    let tree = scan_tree("if a:\n    x\ny", &indent_language(), &ScanOptions::default());
    assert_eq!(
        tree,
        "\
scope File
  1:0 KEYWORD IF \"if\"
  1:0 KEYWORD IDENTIFIER \"a\"
  1:0 SYMBOL COLON \":\"
  scope __UNKNOWN__ (1:0)
    2:1 KEYWORD IDENTIFIER \"x\"
  3:0 KEYWORD IDENTIFIER \"y\"
"
    );
}

#[test]
fn several_scopes_close_on_one_line() {
    let source = "if a:\n    if b:\n        x\ny";
    let output = scan(source, &indent_language(), &ScanOptions::default()).unwrap();

    let outer = output.root.child_scope(0).unwrap();
    let inner = outer.child_scope(0).unwrap();
    assert_eq!(inner.len(), 1);
    assert_eq!(inner.at(0).unwrap().indent(), 2);
    let last = output.root.front().unwrap().as_leaf().unwrap();
    assert_eq!((last.text.as_str(), last.line, last.indent), ("y", 4, 0));
}

#[test]
fn blank_lines_do_not_close_scopes() {
    let source = "if a:\n    x\n\n    y\nz";
    let output = scan(source, &indent_language(), &ScanOptions::default()).unwrap();

    let body = output.root.child_scope(0).unwrap();
    let texts: Vec<&str> = body.flatten().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(texts, vec!["x", "y"]);
    assert_eq!(output.root.front().unwrap().line(), 5);
}

#[test]
fn newline_and_whitespace_tokens_when_included() {
    let options = ScanOptions::default()
        .with_newlines(true)
        .with_whitespace(true)
        .with_indent_width(2);
    let tree = scan_tree("a\n  b c", &indent_language(), &options);
    assert_eq!(
        tree,
        "\
scope File
  1:0 KEYWORD IDENTIFIER \"a\"
  1:0 OTHER NEWLINE \"\\n\"
  2:1 OTHER WHITESPACE \"  \"
  2:1 KEYWORD IDENTIFIER \"b\"
  2:1 OTHER WHITESPACE \" \"
  2:1 KEYWORD IDENTIFIER \"c\"
"
    );
}

#[test]
fn blank_lines_are_counted() {
    let options = ScanOptions::default().with_newlines(true);
    let output = scan("a\n\n\n    b", &indent_language(), &options).unwrap();
    let lines: Vec<(u32, u32, &str)> = output
        .root
        .flatten()
        .iter()
        .map(|l| (l.line, l.indent, l.symbolic_name.as_str()))
        .collect();
    assert_eq!(
        lines,
        vec![
            (1, 0, "IDENTIFIER"),
            (1, 0, "NEWLINE"),
            (2, 0, "NEWLINE"),
            (3, 0, "NEWLINE"),
            (4, 1, "IDENTIFIER"),
        ]
    );
}

#[test]
fn unknown_symbols_are_classified() {
    let output = scan("a @ b", &indent_language(), &ScanOptions::default()).unwrap();
    let at = output.root.at(1).unwrap().as_leaf().unwrap();
    assert_eq!((at.rule, at.symbolic_name.as_str()), (RuleKind::Symbol, "UNKNOWN"));
}

// === Errors and recovery ===

#[test]
fn incomplete_language_is_rejected() {
    let err = scan("x", &LanguageConfig::new(), &ScanOptions::default()).unwrap_err();
    assert!(matches!(err, ScanError::ConfigurationIncomplete { .. }));
}

#[test]
fn zero_indent_width_is_rejected() {
    let options = ScanOptions::default().with_indent_width(0);
    let err = scan("x", &brace_language(), &options).unwrap_err();
    assert_eq!(err, ScanError::InvalidIndentWidth);
}

#[test]
fn malformed_scratch_aborts_scan() {
    let language = LanguageConfig::new()
        .configure_general("broken", SymbolTable::new(), KeywordTable::new(), identifier_char)
        .configure_string(never, never)
        .configure_comment(
            |state| {
                let open = state.current() == Some('#');
                if open {
                    state.set_start_marker("#");
                    state.set_end_marker("\n");
                }
                Ok(open)
            },
            |state| {
                let opened = state.scratch(ScratchFamily::Comment).marked_line()?;
                Ok(state.line() != opened)
            },
        )
        .configure_scope(never, never);

    let err = scan("x # y", &language, &ScanOptions::default()).unwrap_err();
    assert_eq!(
        err,
        ScanError::ScratchMalformed(ScratchError::MissingLineMark {
            family: ScratchFamily::Comment
        })
    );
}

#[test]
fn suppression_without_progress_still_advances() {
    let language = LanguageConfig::new()
        .configure_general("stuck", SymbolTable::new(), KeywordTable::new(), identifier_char)
        .configure_string(
            |state| {
                state.suppress_next_advance();
                Ok(false)
            },
            never,
        )
        .configure_comment(never, never)
        .configure_scope(never, never);

    let output = scan("abc", &language, &ScanOptions::default()).unwrap();
    assert_eq!(output.root.flatten()[0].text, "abc");
}

#[test]
fn rescanning_is_idempotent() {
    let source = "class C {\n    int x = 1; // one\n    /* two */\n}\n";
    let language = brace_language();
    let scanner_options = ScanOptions::default().with_newlines(true);

    let first = scan(source, &language, &scanner_options).unwrap();
    let second = scan(source, &language, &scanner_options).unwrap();
    assert_eq!(first, second);
}

#[test]
fn scanner_bundles_language_and_options() {
    let scanner =
        Scanner::new(brace_language()).with_options(ScanOptions::default().with_comments(false));
    let output = scanner.scan("x // c").unwrap();

    assert_eq!(scanner.language().name(), "braces");
    assert!(!scanner.options().include_comments);
    assert_eq!(output.root.len(), 1);
}

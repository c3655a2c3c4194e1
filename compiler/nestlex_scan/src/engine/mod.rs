//! The scanning engine.
//!
//! One pass over the text, one character per iteration:
//!
//! 1. Ask the language for a boundary in [`DISPATCH_ORDER`](crate::DISPATCH_ORDER).
//! 2. No boundary: grow the pending identifier, or emit a symbol, or run
//!    the newline routine.
//! 3. Boundary: flush the identifier, then consume a string or comment
//!    verbatim, or open or close a scope, and skip the rest of the
//!    delimiter.
//! 4. Advance one character unless a predicate or handler suppressed it.
//!
//! # Two ways of crossing a newline
//!
//! A newline reached by the main loop runs the full routine: it may emit
//! `NEWLINE` and `WHITESPACE` tokens and skips the indentation run. A
//! newline crossed while a boundary is handled (inside a string, or while
//! skipping a delimiter) only updates the line and indent, so the
//! whitespace stays part of the construct.
//!
//! # Open scopes
//!
//! Open scopes live on a stack owned by the engine. Closing a scope moves
//! it into a marker at the end of its parent. Nothing else is pushed to the
//! parent while the child is open, so the marker lands exactly where the
//! scope was opened.

mod classify;

use nestlex_ir::{names, Leaf, RuleKind, Scope, ScopeMarker, Token, FILE_SCOPE_LABEL};
use tracing::{debug, trace, warn};

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::language::{dispatch, Boundary, Language};
use crate::options::ScanOptions;
use crate::state::ScanState;
use crate::ScanError;

use self::classify::is_inline_whitespace;

/// Result of a successful scan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanOutput {
    /// Root scope, labelled `File`.
    pub root: Scope,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanOutput {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// A language bundled with its options.
#[derive(Clone, Debug, Default)]
pub struct Scanner<L> {
    language: L,
    options: ScanOptions,
}

impl<L: Language> Scanner<L> {
    pub fn new(language: L) -> Self {
        Scanner {
            language,
            options: ScanOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ScanOptions) -> Self {
        self.options = options;
        self
    }

    pub fn language(&self) -> &L {
        &self.language
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    pub fn scan(&self, text: &str) -> Result<ScanOutput, ScanError> {
        scan(text, &self.language, &self.options)
    }
}

/// Scan `text` into a scope tree.
///
/// Fails only if the language or options are unusable, or a predicate
/// reports malformed scratch state. Problems in the text itself come back
/// as diagnostics.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(language = language.name(), chars = tracing::field::Empty)
)]
pub fn scan<L: Language + ?Sized>(
    text: &str,
    language: &L,
    options: &ScanOptions,
) -> Result<ScanOutput, ScanError> {
    language.validate()?;
    options.validate()?;

    let chars: Vec<char> = text.chars().collect();
    tracing::Span::current().record("chars", chars.len());

    let output = Engine::new(&chars, language, options).run()?;
    debug!(
        leaves = output.root.total_size(),
        diagnostics = output.diagnostics.len(),
        "scan complete"
    );
    Ok(output)
}

struct OpenScope {
    scope: Scope,
    line: u32,
    indent: u32,
}

struct Engine<'a, L: ?Sized> {
    language: &'a L,
    options: &'a ScanOptions,
    state: ScanState<'a>,
    root: Scope,
    /// Scopes opened below the root, innermost last.
    open: Vec<OpenScope>,
    pending: String,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, L: Language + ?Sized> Engine<'a, L> {
    fn new(text: &'a [char], language: &'a L, options: &'a ScanOptions) -> Self {
        Engine {
            language,
            options,
            state: ScanState::new(text),
            root: Scope::with_label(FILE_SCOPE_LABEL),
            open: Vec::new(),
            pending: String::new(),
            diagnostics: Vec::new(),
        }
    }

    fn run(mut self) -> Result<ScanOutput, ScanError> {
        while self.state.in_bounds() {
            let index = self.state.index;
            let depth = self.open.len();
            self.state.begin_iteration();

            match dispatch(self.language, &mut self.state)? {
                Some(boundary) => {
                    self.flush_pending();
                    self.handle_boundary(boundary)?;
                }
                None => self.handle_plain(),
            }

            if !self.state.advance_suppressed() {
                self.state.index += 1;
            } else if self.state.index == index && self.open.len() >= depth {
                warn!(
                    index,
                    line = self.state.line,
                    "advance suppressed without progress; moving on"
                );
                self.state.index += 1;
            }
        }

        self.flush_pending();
        Ok(self.finish())
    }

    // === Plain characters ===

    fn handle_plain(&mut self) {
        let Some(c) = self.state.current() else {
            return;
        };
        if self.language.is_keyword_char(c) {
            self.pending.push(c);
            return;
        }

        self.flush_pending();
        if c == '\n' {
            self.newline();
            return;
        }
        if is_inline_whitespace(c) && !self.options.include_whitespace {
            return;
        }
        let mut leaf = self.leaf(c.to_string());
        classify::symbol(&mut leaf, self.language.symbols());
        self.push(leaf);
    }

    fn flush_pending(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.pending);
        let mut leaf = self.leaf(text);
        classify::keyword(&mut leaf, self.language.keywords());
        self.push(leaf);
    }

    /// Newline reached by the main loop. Leaves the index on the last
    /// character of the next line's indentation, after any blank lines.
    fn newline(&mut self) {
        loop {
            if self.options.include_newlines {
                self.push(Leaf::new(
                    RuleKind::Other,
                    names::NEWLINE,
                    "\n",
                    self.state.line,
                    self.state.indent,
                ));
            }
            self.state.line += 1;

            let run_start = self.state.index + 1;
            let run_end = self.state.whitespace_run_end(run_start);
            let run = self.state.slice(run_start, run_end);
            self.state.indent = self.options.measure_indent(run);

            if run_end > run_start {
                if self.options.include_whitespace {
                    let text: String = run.iter().collect();
                    self.push(Leaf::new(
                        RuleKind::Other,
                        names::WHITESPACE,
                        text,
                        self.state.line,
                        self.state.indent,
                    ));
                }
                self.state.index = run_end - 1;
            }

            if self.state.peek(1) == Some('\n') {
                self.state.index += 1;
            } else {
                break;
            }
        }
    }

    // === Boundaries ===

    fn handle_boundary(&mut self, boundary: Boundary) -> Result<(), ScanError> {
        trace!(%boundary, index = self.state.index, line = self.state.line, "boundary");

        let delimiter_len = match boundary {
            Boundary::StringStart => {
                let leaf = self.consume_verbatim(Boundary::StringStart, names::STRING)?;
                if self.options.include_strings {
                    self.push(leaf);
                }
                self.state.end_marker().chars().count()
            }
            Boundary::CommentStart => {
                let leaf = self.consume_verbatim(Boundary::CommentStart, names::COMMENT)?;
                if self.options.include_comments {
                    self.push(leaf);
                }
                self.state.end_marker().chars().count()
            }
            Boundary::ScopeStart => {
                let marker = self.state.start_marker().to_owned();
                let len = marker.chars().count();
                self.push_delimiter(marker);
                self.open_scope();
                len
            }
            Boundary::ScopeEnd => {
                let marker = self.state.end_marker().to_owned();
                let len = marker.chars().count();
                self.close_scope();
                self.push_delimiter(marker);
                len
            }
        };

        if !self.state.advance_suppressed() {
            for _ in 1..delimiter_len {
                self.step_quiet();
            }
        }
        Ok(())
    }

    fn push_delimiter(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        let mut leaf = self.leaf(text);
        classify::delimiter(
            &mut leaf,
            self.language.keywords(),
            self.language.symbols(),
        );
        self.push(leaf);
    }

    /// Consume a string or comment up to and including its end.
    ///
    /// On return the index is on the last character examined: the first
    /// character of the end delimiter, or past the end of the text.
    fn consume_verbatim(&mut self, opened_by: Boundary, name: &str) -> Result<Leaf, ScanError> {
        let (line, indent) = (self.state.line, self.state.indent);
        let start = self.state.start_marker().to_owned();

        for _ in 0..start.chars().count().max(1) {
            self.step_quiet();
        }

        let mut body = String::new();
        let mut body_line = line;
        let mut terminated = false;
        // The end predicate runs before the bounds check: a line comment on
        // the last line ends once its newline has been crossed.
        loop {
            if self.end_matches(opened_by)? {
                terminated = true;
                break;
            }
            let Some(c) = self.state.current() else {
                break;
            };
            if self.state.line != body_line {
                body.push('\n');
                body_line = self.state.line;
            }
            body.push(c);
            self.step_quiet();
        }

        let end = self.state.end_marker().to_owned();
        let mut text = start;
        text.push_str(&body);

        if terminated {
            // A newline end marker stands for the line break it matched.
            if self.state.line != body_line && !end.starts_with('\n') {
                text.push('\n');
            }
            text.push_str(&end);
            if !end.is_empty() && self.state.current() != end.chars().next() {
                self.state.suppress_next_advance();
            }
        } else if end.chars().any(|c| !c.is_whitespace()) {
            warn!(line, kind = name, "unterminated construct at end of input");
            self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnterminatedConstruct {
                    symbolic_name: name.to_owned(),
                },
                line,
                self.state.index,
            ));
        }

        Ok(Leaf::new(RuleKind::Other, name, text, line, indent))
    }

    fn end_matches(&mut self, opened_by: Boundary) -> Result<bool, ScanError> {
        let matched = match opened_by {
            Boundary::StringStart => self.language.string_end(&mut self.state)?,
            Boundary::CommentStart => self.language.comment_end(&mut self.state)?,
            Boundary::ScopeStart | Boundary::ScopeEnd => true,
        };
        Ok(matched)
    }

    /// Advance one character while a boundary is being handled.
    ///
    /// Every newline crossed bumps the line and re-measures the indent. The
    /// index ends on the first character that is not a newline.
    fn step_quiet(&mut self) {
        self.state.index += 1;
        self.quiet_newline();
        while self.state.current() == Some('\n') {
            self.state.index += 1;
            self.quiet_newline();
        }
    }

    fn quiet_newline(&mut self) {
        if self.state.current() != Some('\n') {
            return;
        }
        self.state.line += 1;
        let run_start = self.state.index + 1;
        let run_end = self.state.whitespace_run_end(run_start);
        self.state.indent = self.options.measure_indent(self.state.slice(run_start, run_end));
    }

    // === Scopes ===

    fn open_scope(&mut self) {
        self.open.push(OpenScope {
            scope: Scope::new(),
            line: self.state.line,
            indent: self.state.indent,
        });
        self.state.depth = self.open.len();
        trace!(depth = self.state.depth, line = self.state.line, "scope opened");
    }

    fn close_scope(&mut self) {
        let Some(closed) = self.open.pop() else {
            warn!(
                line = self.state.line,
                index = self.state.index,
                "scope end with no open scope"
            );
            self.diagnostics.push(Diagnostic::new(
                DiagnosticKind::UnbalancedScope,
                self.state.line,
                self.state.index,
            ));
            return;
        };
        self.state.depth = self.open.len();
        trace!(
            depth = self.state.depth,
            line = self.state.line,
            tokens = closed.scope.len(),
            "scope closed"
        );
        self.attach(closed);
    }

    fn attach(&mut self, closed: OpenScope) {
        let marker = ScopeMarker::new(closed.scope, closed.line, closed.indent);
        self.current_scope().push(Token::Marker(marker));
    }

    fn finish(mut self) -> ScanOutput {
        if !self.open.is_empty() {
            debug!(open = self.open.len(), "closing scopes left open at end of input");
        }
        while let Some(closed) = self.open.pop() {
            self.attach(closed);
        }
        ScanOutput {
            root: self.root,
            diagnostics: self.diagnostics,
        }
    }

    // === Helpers ===

    fn current_scope(&mut self) -> &mut Scope {
        match self.open.last_mut() {
            Some(open) => &mut open.scope,
            None => &mut self.root,
        }
    }

    fn push(&mut self, leaf: Leaf) {
        self.current_scope().push(Token::Leaf(leaf));
    }

    fn leaf(&self, text: String) -> Leaf {
        Leaf::unidentified(text, self.state.line, self.state.indent)
    }
}

#[cfg(test)]
mod tests;

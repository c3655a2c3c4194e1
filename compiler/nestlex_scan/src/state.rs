//! Scanner state visible to language predicates.

use crate::scratch::{Scratch, ScratchFamily, ScratchSlot};

/// Position, delimiter markers and scratch of an in-progress scan.
///
/// Predicates get `&mut ScanState` and may read the text around the
/// current position, write the start/end markers, use their scratch slot
/// and ask the engine to skip its next advance. Only the engine moves the
/// index.
///
/// Indices count `char`s, not bytes.
#[derive(Debug)]
pub struct ScanState<'t> {
    text: &'t [char],
    pub(crate) index: usize,
    pub(crate) line: u32,
    pub(crate) indent: u32,
    pub(crate) depth: usize,
    start_marker: String,
    end_marker: String,
    scratch: Scratch,
    suppress_advance: bool,
}

impl<'t> ScanState<'t> {
    /// State positioned at the first character of `text`, line 1, indent 0.
    pub fn new(text: &'t [char]) -> Self {
        ScanState {
            text,
            index: 0,
            line: 1,
            indent: 0,
            depth: 0,
            start_marker: String::new(),
            end_marker: String::new(),
            scratch: Scratch::default(),
            suppress_advance: false,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current 1-based line.
    #[inline]
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Indent level of the current line.
    #[inline]
    pub fn indent(&self) -> u32 {
        self.indent
    }

    /// Number of scopes open below the root.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Length of the text in characters.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    #[inline]
    pub fn in_bounds(&self) -> bool {
        self.index < self.text.len()
    }

    #[inline]
    pub fn current(&self) -> Option<char> {
        self.char_at(self.index)
    }

    #[inline]
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.text.get(index).copied()
    }

    /// Character `offset` positions after the current one.
    #[inline]
    pub fn peek(&self, offset: usize) -> Option<char> {
        self.char_at(self.index + offset)
    }

    /// Character just before the current one.
    pub fn previous(&self) -> Option<char> {
        self.index.checked_sub(1).and_then(|i| self.char_at(i))
    }

    /// Whether the text at the current position starts with `needle`.
    pub fn starts_with(&self, needle: &str) -> bool {
        let rest = self.text.get(self.index..).unwrap_or(&[]);
        let mut rest = rest.iter();
        needle.chars().all(|c| rest.next() == Some(&c))
    }

    /// Text in `begin..end`, or `None` if the range is empty or leaves the text.
    pub fn text_range(&self, begin: usize, end: usize) -> Option<String> {
        if begin >= end {
            return None;
        }
        self.text.get(begin..end).map(|s| s.iter().collect())
    }

    /// Consecutive backslashes immediately before the current position.
    ///
    /// An odd count means the current character is escaped.
    pub fn backslashes_before(&self) -> usize {
        self.text
            .get(..self.index)
            .unwrap_or(&[])
            .iter()
            .rev()
            .take_while(|&&c| c == '\\')
            .count()
    }

    /// First character at or after `from` that is not a space, tab or
    /// carriage return. A newline counts as non-blank.
    pub fn first_non_blank(&self, from: usize) -> Option<char> {
        self.text
            .get(from..)
            .unwrap_or(&[])
            .iter()
            .copied()
            .find(|&c| !matches!(c, ' ' | '\t' | '\r'))
    }

    pub fn start_marker(&self) -> &str {
        &self.start_marker
    }

    pub fn end_marker(&self) -> &str {
        &self.end_marker
    }

    /// Opening delimiter of the boundary the predicate is reporting.
    pub fn set_start_marker(&mut self, marker: impl Into<String>) {
        self.start_marker = marker.into();
    }

    /// Closing delimiter of the boundary the predicate is reporting.
    pub fn set_end_marker(&mut self, marker: impl Into<String>) {
        self.end_marker = marker.into();
    }

    pub fn scratch(&self, family: ScratchFamily) -> &ScratchSlot {
        self.scratch.slot(family)
    }

    pub fn scratch_mut(&mut self, family: ScratchFamily) -> &mut ScratchSlot {
        self.scratch.slot_mut(family)
    }

    /// Keep the index where it is at the end of this iteration.
    ///
    /// The same position is then examined again, which is how several
    /// indentation scopes close on one line.
    pub fn suppress_next_advance(&mut self) {
        self.suppress_advance = true;
    }

    #[inline]
    pub fn advance_suppressed(&self) -> bool {
        self.suppress_advance
    }

    pub(crate) fn begin_iteration(&mut self) {
        self.suppress_advance = false;
        self.clear_markers();
    }

    pub(crate) fn clear_markers(&mut self) {
        self.start_marker.clear();
        self.end_marker.clear();
    }

    /// End of the run of spaces, tabs and carriage returns starting at `from`.
    pub(crate) fn whitespace_run_end(&self, from: usize) -> usize {
        let mut end = from;
        while matches!(self.char_at(end), Some(' ' | '\t' | '\r')) {
            end += 1;
        }
        end
    }

    pub(crate) fn slice(&self, begin: usize, end: usize) -> &'t [char] {
        self.text.get(begin..end).unwrap_or(&[])
    }
}

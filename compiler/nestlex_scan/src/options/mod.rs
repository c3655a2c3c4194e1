//! Scan options: output filters and indentation policy.

use crate::ScanError;

/// Knobs that do not depend on the language.
///
/// Defaults keep strings and comments and drop whitespace and newlines.
/// Indentation counts every four spaces, or every tab, as one level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ScanOptions {
    pub include_strings: bool,
    pub include_comments: bool,
    pub include_whitespace: bool,
    pub include_newlines: bool,
    /// Spaces per indent level.
    pub indent_width: u32,
    /// Whether a tab counts as one indent level.
    pub allow_tabs: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            include_strings: true,
            include_comments: true,
            include_whitespace: false,
            include_newlines: false,
            indent_width: 4,
            allow_tabs: true,
        }
    }
}

impl ScanOptions {
    /// Set all four output filters at once, phrased as what to drop.
    #[must_use]
    pub fn with_ignores(
        mut self,
        strings: bool,
        comments: bool,
        whitespace: bool,
        newlines: bool,
    ) -> Self {
        self.include_strings = !strings;
        self.include_comments = !comments;
        self.include_whitespace = !whitespace;
        self.include_newlines = !newlines;
        self
    }

    #[must_use]
    pub fn with_strings(mut self, include: bool) -> Self {
        self.include_strings = include;
        self
    }

    #[must_use]
    pub fn with_comments(mut self, include: bool) -> Self {
        self.include_comments = include;
        self
    }

    #[must_use]
    pub fn with_whitespace(mut self, include: bool) -> Self {
        self.include_whitespace = include;
        self
    }

    #[must_use]
    pub fn with_newlines(mut self, include: bool) -> Self {
        self.include_newlines = include;
        self
    }

    #[must_use]
    pub fn with_indent_width(mut self, width: u32) -> Self {
        self.indent_width = width;
        self
    }

    #[must_use]
    pub fn with_tabs(mut self, allow: bool) -> Self {
        self.allow_tabs = allow;
        self
    }

    pub fn validate(&self) -> Result<(), ScanError> {
        if self.indent_width == 0 {
            return Err(ScanError::InvalidIndentWidth);
        }
        Ok(())
    }

    /// Indent level of a run of leading whitespace.
    ///
    /// Measured left to right: each full group of `indent_width` spaces is
    /// one level, each tab is one level when tabs are allowed, and a tab
    /// discards any partial group of spaces before it. Other characters
    /// (carriage returns) count for nothing.
    pub fn measure_indent(&self, run: &[char]) -> u32 {
        let width = self.indent_width.max(1);
        let mut levels = 0;
        let mut spaces = 0;
        for &c in run {
            match c {
                ' ' => {
                    spaces += 1;
                    if spaces == width {
                        levels += 1;
                        spaces = 0;
                    }
                }
                '\t' => {
                    spaces = 0;
                    if self.allow_tabs {
                        levels += 1;
                    }
                }
                _ => {}
            }
        }
        levels
    }
}

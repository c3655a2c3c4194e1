//! Typed scratch state shared between a language's predicates.
//!
//! Predicates often need to remember something between calls: the line a
//! line comment started on, or the `(line, indent)` of every open
//! indentation block. Each predicate family gets its own [`ScratchSlot`]
//! holding an optional line mark and a frame stack. The slots live in the
//! scan state, so they are fresh for every scan.

use std::fmt;

/// Which group of predicates a slot belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ScratchFamily {
    String,
    Comment,
    Scope,
}

impl ScratchFamily {
    pub const fn as_str(self) -> &'static str {
        match self {
            ScratchFamily::String => "string",
            ScratchFamily::Comment => "comment",
            ScratchFamily::Scope => "scope",
        }
    }
}

impl fmt::Display for ScratchFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A predicate read scratch state that was never written.
///
/// This is a bug in the language, not in the input.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScratchError {
    #[error("no line was marked in the {family} scratch slot")]
    MissingLineMark { family: ScratchFamily },

    #[error("the {family} scratch frame stack is empty")]
    EmptyFrameStack { family: ScratchFamily },
}

/// Position recorded by a predicate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    pub line: u32,
    pub indent: u32,
}

/// Scratch state for one predicate family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScratchSlot {
    family: ScratchFamily,
    line_mark: Option<u32>,
    frames: Vec<Frame>,
}

impl ScratchSlot {
    pub fn new(family: ScratchFamily) -> Self {
        ScratchSlot {
            family,
            line_mark: None,
            frames: Vec::new(),
        }
    }

    #[inline]
    pub fn family(&self) -> ScratchFamily {
        self.family
    }

    /// Remember `line`, replacing any earlier mark.
    pub fn mark_line(&mut self, line: u32) {
        self.line_mark = Some(line);
    }

    pub fn marked_line(&self) -> Result<u32, ScratchError> {
        self.line_mark.ok_or(ScratchError::MissingLineMark {
            family: self.family,
        })
    }

    pub fn clear_line_mark(&mut self) {
        self.line_mark = None;
    }

    pub fn push_frame(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Most recently pushed frame, if any.
    pub fn top_frame(&self) -> Option<Frame> {
        self.frames.last().copied()
    }

    pub fn pop_frame(&mut self) -> Result<Frame, ScratchError> {
        self.frames.pop().ok_or(ScratchError::EmptyFrameStack {
            family: self.family,
        })
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }
}

/// One slot per family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scratch {
    string: ScratchSlot,
    comment: ScratchSlot,
    scope: ScratchSlot,
}

impl Default for Scratch {
    fn default() -> Self {
        Scratch {
            string: ScratchSlot::new(ScratchFamily::String),
            comment: ScratchSlot::new(ScratchFamily::Comment),
            scope: ScratchSlot::new(ScratchFamily::Scope),
        }
    }
}

impl Scratch {
    pub fn slot(&self, family: ScratchFamily) -> &ScratchSlot {
        match family {
            ScratchFamily::String => &self.string,
            ScratchFamily::Comment => &self.comment,
            ScratchFamily::Scope => &self.scope,
        }
    }

    pub fn slot_mut(&mut self, family: ScratchFamily) -> &mut ScratchSlot {
        match family {
            ScratchFamily::String => &mut self.string,
            ScratchFamily::Comment => &mut self.comment,
            ScratchFamily::Scope => &mut self.scope,
        }
    }
}

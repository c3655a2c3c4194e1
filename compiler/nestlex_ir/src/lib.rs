//! Nestlex IR - token tree types
//!
//! This crate contains the data model produced by the scanner:
//! - [`Token`]: a classified leaf or a marker owning a nested [`Scope`]
//! - [`Scope`]: an ordered token sequence for one nesting level, with a
//!   cache of the positions that hold child scopes
//! - [`RuleKind`] and the well-known symbolic names
//! - [`render_tree`]: an indented text rendering for debugging
//!
//! # Ownership
//!
//! Every scope is owned by exactly one marker token (or by the caller, for
//! the root). There is no parent pointer; code that walks upward keeps its
//! own stack.
//!
//! # Features
//!
//! - `serde`: derives `Serialize` for the tree so it can be dumped as JSON.

mod render;
mod rule;
mod scope;
mod stack;
mod token;

pub use render::render_tree;
pub use rule::{names, RuleKind, FILE_SCOPE_LABEL, UNKNOWN_SCOPE_LABEL};
pub use scope::{Scope, ScopeError};
pub use stack::ensure_sufficient_stack;
pub use token::{Leaf, ScopeMarker, Token};

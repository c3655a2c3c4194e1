//! Indented text dump of a scope tree.
//!
//! One line per token:
//!
//! ```text
//! scope File
//!   1:0 KEYWORD CLASS "class"
//!   1:0 SYMBOL LCURLY "{"
//!   scope __UNKNOWN__ (1:0)
//!     1:0 KEYWORD INT "int"
//!   1:0 SYMBOL RCURLY "}"
//! ```

use std::fmt::Write;

use crate::stack::ensure_sufficient_stack;
use crate::{Scope, Token};

const INDENT: &str = "  ";

/// Render `scope` and everything below it.
pub fn render_tree(scope: &Scope) -> String {
    let mut out = String::new();
    out.push_str("scope ");
    out.push_str(scope.label());
    out.push('\n');
    render_tokens(scope, 1, &mut out);
    out
}

fn render_tokens(scope: &Scope, depth: usize, out: &mut String) {
    ensure_sufficient_stack(|| {
        for token in scope {
            push_indent(depth, out);
            match token {
                Token::Leaf(leaf) => {
                    // Writing to a String cannot fail.
                    let _ = writeln!(
                        out,
                        "{}:{} {} {} {:?}",
                        leaf.line, leaf.indent, leaf.rule, leaf.symbolic_name, leaf.text
                    );
                }
                Token::Marker(marker) => {
                    let _ = writeln!(
                        out,
                        "scope {} ({}:{})",
                        marker.scope.label(),
                        marker.line,
                        marker.indent
                    );
                    render_tokens(&marker.scope, depth + 1, out);
                }
            }
        }
    });
}

fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

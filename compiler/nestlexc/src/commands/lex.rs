//! `nestlex lex`: scan a file and print the result.

use std::fmt::Write;
use std::path::Path;

use clap::ValueEnum;
use nestlex_ir::{render_tree, Scope};
use nestlex_scan::{scan, Diagnostic, ScanOptions};
use tracing::debug;

use super::{read_file, CliError};

/// How the scope tree is printed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Indented tree, one token per line
    Tree,
    /// The tree as pretty-printed JSON
    Json,
    /// Leaves only, in source order, tab separated
    Flat,
}

/// Printed output plus the diagnostics found on the way.
#[derive(Debug)]
pub struct LexReport {
    pub output: String,
    pub diagnostics: Vec<Diagnostic>,
}

pub fn lex_file(
    path: &Path,
    language: &str,
    format: OutputFormat,
    options: &ScanOptions,
) -> Result<LexReport, CliError> {
    let text = read_file(path)?;
    debug!(path = %path.display(), language, bytes = text.len(), "lexing file");
    lex_source(&text, language, format, options)
}

pub fn lex_source(
    text: &str,
    language: &str,
    format: OutputFormat,
    options: &ScanOptions,
) -> Result<LexReport, CliError> {
    let language = nestlex_langs::by_name(language)?;
    let scanned = scan(text, language.as_ref(), options)?;

    let output = match format {
        OutputFormat::Tree => render_tree(&scanned.root),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&scanned.root)?;
            json.push('\n');
            json
        }
        OutputFormat::Flat => render_flat(&scanned.root),
    };

    Ok(LexReport {
        output,
        diagnostics: scanned.diagnostics,
    })
}

fn render_flat(root: &Scope) -> String {
    let mut out = String::new();
    for leaf in root.flatten() {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{}:{}\t{}\t{}\t{:?}",
            leaf.line, leaf.indent, leaf.rule, leaf.symbolic_name, leaf.text
        );
    }
    out
}

//! Nestlex CLI
//!
//! Scans a source file with one of the bundled languages and prints the
//! scope tree.

use std::path::PathBuf;
use std::sync::Once;

use clap::{Args, Parser, Subcommand};
use nestlex_scan::ScanOptions;

mod commands;

use commands::{lex_file, list_languages, OutputFormat};

#[derive(Parser)]
#[command(name = "nestlex")]
#[command(about = "Scan source files into nested scope trees")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a file and print its tokens
    Lex(LexArgs),
    /// List the bundled languages
    Langs,
}

#[derive(Args)]
struct LexArgs {
    /// File to scan
    file: PathBuf,

    /// Language to scan with (see `nestlex langs`)
    #[arg(short, long)]
    lang: String,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tree)]
    format: OutputFormat,

    /// Emit whitespace tokens
    #[arg(long)]
    include_whitespace: bool,

    /// Emit newline tokens
    #[arg(long)]
    include_newlines: bool,

    /// Drop string tokens
    #[arg(long)]
    exclude_strings: bool,

    /// Drop comment tokens
    #[arg(long)]
    exclude_comments: bool,

    /// Spaces per indent level
    #[arg(long, default_value_t = 4)]
    indent_width: u32,

    /// Do not count tabs as indentation
    #[arg(long)]
    no_tabs: bool,
}

impl LexArgs {
    fn scan_options(&self) -> ScanOptions {
        ScanOptions::default()
            .with_ignores(
                self.exclude_strings,
                self.exclude_comments,
                !self.include_whitespace,
                !self.include_newlines,
            )
            .with_indent_width(self.indent_width)
            .with_tabs(!self.no_tabs)
    }
}

static TRACING_INIT: Once = Once::new();

/// Install a stderr subscriber when `RUST_LOG` is set.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Lex(args) => {
            let options = args.scan_options();
            match lex_file(&args.file, &args.lang, args.format, &options) {
                Ok(report) => {
                    for diagnostic in &report.diagnostics {
                        eprintln!("warning: {diagnostic}");
                    }
                    print!("{}", report.output);
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            }
        }
        Command::Langs => print!("{}", list_languages()),
    }
}

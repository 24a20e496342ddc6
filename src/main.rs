//! CLI tool that tokenizes a source file and prints one token per line.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use lexscan::{Lexer, LexerOptions};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Tokenize a source file and print `line:column Token(kind, "text")`
/// for every token.
#[derive(Parser, Debug)]
#[command(name = "lexscan", version, about, long_about = None)]
struct Cli {
    /// Source file to tokenize
    path: PathBuf,

    /// Cap token text at this many bytes
    #[arg(long, value_name = "N")]
    max_token_len: Option<usize>,

    /// Report skipped characters and truncations, failing if any occur
    #[arg(long)]
    strict: bool,
}

/// Log filter comes from `LEXSCAN_LOG`, falling back to `RUST_LOG`.
fn init_tracing() {
    let filter = std::env::var("LEXSCAN_LOG").map_or_else(
        |_| EnvFilter::from_default_env(),
        |val| EnvFilter::builder().parse_lossy(val),
    );
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let mut options = LexerOptions::new().collect_diagnostics(cli.strict);
    if let Some(limit) = cli.max_token_len {
        options = options.max_token_len(limit);
    }

    let mut lexer = match Lexer::open_with(&cli.path, options) {
        Ok(lexer) => lexer,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    for token in lexer.scan_all() {
        println!("{token}");
    }

    let diagnostics = lexer.close();
    for diagnostic in &diagnostics {
        eprintln!("{}: {diagnostic}", cli.path.display());
    }

    if diagnostics.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

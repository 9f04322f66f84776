use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use serde_json::Value;
use tracing::debug;

use jshape::{Lexer, Token, compile};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the tokens of a pattern, one per line
    Tokens {
        /// Pattern file (reads stdin if omitted)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Check a JSON document against a pattern
    Check {
        #[command(flatten)]
        pattern: PatternSource,

        /// JSON document (reads stdin if omitted)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },
}

#[derive(ClapArgs, Debug)]
#[group(required = true, multiple = false)]
struct PatternSource {
    /// Pattern text
    #[arg(short = 'e', long = "pattern", value_name = "PATTERN")]
    text: Option<String>,

    /// Read the pattern from a file
    #[arg(short = 'p', long = "pattern-file", value_name = "FILE")]
    file: Option<PathBuf>,
}

static TRACING_INIT: Once = Once::new();

/// Enable log output on stderr when `RUST_LOG` is set, e.g.
/// `RUST_LOG=jshape=trace`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr).with_target(true))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    match args.command {
        Command::Tokens { file } => {
            let text = read_text(file.as_deref())?;
            for token in Lexer::new(&text) {
                println!("{}", token_line(&token));
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { pattern, input } => {
            let pattern = match (pattern.text, pattern.file) {
                (Some(text), _) => text,
                (None, Some(path)) => fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => anyhow::bail!("No pattern given."),
            };
            let matcher = compile(&pattern)?;

            let text = read_text(input.as_deref())?;
            let value: Value = serde_json::from_str(&text).context("input is not valid JSON")?;

            match matcher.evaluate(&value) {
                Ok(()) => {
                    println!("ok");
                    Ok(ExitCode::SUCCESS)
                }
                Err(mismatch) => {
                    println!("{mismatch}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}

/// One line of `tokens` output: position, kind and literal.
fn token_line(token: &Token) -> String {
    format!(
        "{:02}:{:02}   {:<10} {}",
        token.line, token.column, token.kind, token.literal
    )
}

/// Read a whole file, or stdin when no path is given.
fn read_text(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "reading file");
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        }
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

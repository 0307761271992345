use std::fs::read_to_string;
use std::io::{BufRead, Write};
use std::path::Path;
use std::process::exit;
use std::{env, io};

use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::analysis::analyze;
use crate::repl::MultilineInput;
use crate::table::format_token_table;

mod analysis;
mod checker;
mod repl;
mod scanner;
mod table;
mod token;

#[cfg(test)]
mod test_helpers;

#[derive(Debug, Error)]
enum CLIError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("file does not seem to exist {0}")]
    FileDoesNotExist(String),
}

fn main() -> Result<(), color_eyre::eyre::Error> {
    color_eyre::install()?;
    init_tracing();

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Too many arguments received ({})", args.len() - 1);
        eprintln!("Usage: minicpp [file]");
        exit(64);
    }
    if args.len() == 2 {
        let accepted = run_file(&args[1])?;
        if !accepted {
            exit(65);
        }
    } else {
        run_prompt()?;
    }
    Ok(())
}

/// Logs go to stderr so the token table on stdout stays clean. Filter with RUST_LOG.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn run_file(path_string: &str) -> Result<bool, CLIError> {
    let path = Path::new(path_string);
    if !path.try_exists()? {
        return Err(CLIError::FileDoesNotExist(path_string.to_string()));
    }
    let source = read_to_string(path)?;
    tracing::info!(path = path_string, bytes = source.len(), "analyzing file");
    let accepted = run(&source, &mut io::stdout().lock())?;
    Ok(accepted)
}

fn run_prompt() -> Result<(), CLIError> {
    fn prompt() -> io::Result<()> {
        print!("> ");
        io::stdout().flush()
    }

    prompt()?;
    // every snippet is analyzed on its own, nothing carries over
    for snippet in MultilineInput::new(io::stdin().lock().lines()) {
        let snippet = snippet?;
        if !snippet.trim().is_empty() {
            run(&snippet, &mut io::stdout().lock())?;
        }
        prompt()?;
    }
    Ok(())
}

/// Prints the token table and the verdict. Returns whether the source was accepted.
fn run<W: Write>(source: &str, writer: &mut W) -> io::Result<bool> {
    let analysis = analyze(source);
    write!(writer, "{}", format_token_table(&analysis.tokens))?;

    let unknown = analysis.anomalies().count();
    if unknown > 0 {
        writeln!(writer, "\n{unknown} unrecognized character(s)")?;
    }
    match &analysis.outcome {
        Ok(()) => writeln!(writer, "\nSyntax analysis succeeded.")?,
        Err(error) => writeln!(writer, "\nSyntax analysis failed: {error}")?,
    }
    Ok(analysis.is_accepted())
}

//! CLI for the record pipeline.
//!
//! Usage:
//!   recpipe run <input> <output> [--on-parse-error abort|skip]
//!   recpipe query <dir> <table>
//!
//! Diagnostics go to stderr; set `RUST_LOG` (or pass `-v`) for stage logs.

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use recpipe_rs::{DirectorySource, ParseErrorMode, RunConfig, fetch_all, run};
use tracing_subscriber::EnvFilter;

/// Square even integers and cube odd ones, line by line.
#[derive(Parser)]
#[command(name = "recpipe", version, about)]
struct Cli {
    /// Log stage progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transform an input file of integers into an output file
    Run {
        /// Input file, one integer per line
        input: PathBuf,

        /// Output file (created or truncated)
        output: PathBuf,

        /// What to do with a line that is not an integer
        #[arg(long, value_enum, default_value_t = ParseErrorMode::Abort)]
        on_parse_error: ParseErrorMode,
    },
    /// Print every row of a table from a directory of .tsv files
    Query {
        /// Directory holding <table>.tsv files
        dir: PathBuf,

        /// Table name
        table: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Run {
            input,
            output,
            on_parse_error,
        } => {
            let config = RunConfig::new(input, output).with_on_parse_error(on_parse_error);
            match run(&config) {
                Ok(summary) => println!("{}", summary.confirmation()),
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            }
        }
        Command::Query { dir, table } => {
            match fetch_all(&DirectorySource::new(dir), &table) {
                Ok(rows) => {
                    for row in rows {
                        println!("{}", row.join("\t"));
                    }
                }
                Err(e) => {
                    eprintln!("Error: {e}");
                    process::exit(1);
                }
            }
        }
    }
}

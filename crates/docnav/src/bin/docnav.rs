//! `docnav`: read, write and delete values in a JSON document by path.
//!
//! Usage:
//!   docnav read   <file> [path]
//!   docnav write  <file> <path> <value> [-i]
//!   docnav write  <file> --script <script> [-i]
//!   docnav delete <file> <path> [-i]
//!   docnav new    <path> <value>
//!
//! `-` as the file reads the document from stdin.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use docnav::cli::{self, CliError, STDIN};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "docnav")]
#[command(about = "Read, write and delete values in JSON documents by path")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Print single-line JSON instead of pretty output
    #[arg(long, global = true, env = "DOCNAV_COMPACT")]
    compact: bool,

    /// Log every navigation step to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the value at a path; wildcard matches print as a list
    Read {
        file: String,
        #[arg(default_value = "")]
        path: String,
    },
    /// Set the value at a path, creating missing structure
    Write {
        file: String,
        #[arg(required_unless_present = "script")]
        path: Option<String>,
        #[arg(required_unless_present = "script")]
        value: Option<String>,
        /// JSON mapping of path expressions to values, applied in order
        #[arg(short, long, conflicts_with_all = ["path", "value"])]
        script: Option<String>,
        /// Rewrite the file instead of printing the result
        #[arg(short, long)]
        inplace: bool,
    },
    /// Remove the entry or element at a path
    Delete {
        file: String,
        path: String,
        /// Rewrite the file instead of printing the result
        #[arg(short, long)]
        inplace: bool,
    },
    /// Print a new document holding a single value
    New { path: String, value: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "docnav=debug,docnav_path=debug"
    } else {
        "docnav=warn"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .init();
}

fn run(cli: Cli) -> Result<(), CliError> {
    let pretty = !cli.compact;
    match cli.command {
        Command::Read { file, path } => {
            let doc = cli::read_document(&cli::load(&file)?)?;
            let found = cli::read_path(&doc, &path)?;
            println!("{}", cli::render(&found, pretty)?);
        }
        Command::Write {
            file,
            path,
            value,
            script,
            inplace,
        } => {
            let doc = cli::read_document(&cli::load(&file)?)?;
            let doc = match script {
                Some(script) => {
                    let script = cli::read_document(&cli::load(&script)?)?;
                    cli::apply_script(doc, script)?
                }
                None => {
                    let path = path.ok_or(CliError::MissingArgument("path"))?;
                    let value = value.ok_or(CliError::MissingArgument("value"))?;
                    cli::write_path(doc, &path, cli::parse_value(&value))
                }
            };
            emit(&file, inplace, &cli::render(&doc, pretty)?)?;
        }
        Command::Delete {
            file,
            path,
            inplace,
        } => {
            let doc = cli::read_document(&cli::load(&file)?)?;
            let doc = cli::delete_path(doc, &path);
            emit(&file, inplace, &cli::render(&doc, pretty)?)?;
        }
        Command::New { path, value } => {
            let doc = cli::new_document(&path, cli::parse_value(&value));
            println!("{}", cli::render(&doc, pretty)?);
        }
    }
    Ok(())
}

/// Print the result, or write it back when editing a file in place.
fn emit(file: &str, inplace: bool, text: &str) -> Result<(), CliError> {
    if inplace && file != STDIN {
        tracing::debug!(file, "writing in place");
        return cli::store(file, text);
    }
    println!("{text}");
    Ok(())
}

// eudc: parse an eud source file and dump its AST

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser as ClapParser, ValueEnum};
use thiserror::Error;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use eudc::dump;
use eudc::parser::{ParseError, Parser, Program, SourceLocation};

/// Parse an eud source file and print its syntax tree.
#[derive(ClapParser, Debug)]
#[command(name = "eudc", version, about, long_about = None)]
struct Args {
    /// Path to the input source file
    file: PathBuf,

    /// Write the document to a file instead of standard output
    /// (`--ofile` alone writes `ast.temp.json`; place it after FILE)
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = "ast.temp.json"
    )]
    ofile: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Print the token stream to standard error before parsing
    #[arg(long)]
    tokens: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// JSON array of node objects
    Json,
    /// One compact tree per top-level statement
    Tree,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("could not read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("could not write '{}': {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("could not encode AST: {0}")]
    Encode(#[from] serde_json::Error),
}

impl CliError {
    fn location(&self) -> Option<&SourceLocation> {
        match self {
            CliError::Parse(err) => err.location(),
            _ => None,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            // --help and --version also arrive here, on stdout
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("FAILED: {err}");
            if let Some(location) = err.location() {
                eprintln!("    at {location}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let source = fs::read_to_string(&args.file).map_err(|source| CliError::Read {
        path: args.file.clone(),
        source,
    })?;
    let source_name = args.file.to_string_lossy();

    info!(file = %source_name, bytes = source.len(), "parsing");
    let mut parser = Parser::from_source(&source, &source_name)?;

    if args.tokens {
        for token in parser.tokens() {
            eprintln!("{} {}", token.location, token);
        }
    }

    let program = parser.parse_program()?;
    debug!(statements = program.len(), "parsed");

    match &args.ofile {
        Some(path) => {
            let file = File::create(path).map_err(|source| CliError::Write {
                path: path.clone(),
                source,
            })?;
            emit(BufWriter::new(file), path, args.format, &program)?;
            info!(path = %path.display(), "wrote AST");
        }
        None => emit(io::stdout().lock(), Path::new("<stdout>"), args.format, &program)?,
    }

    Ok(())
}

fn emit<W: Write>(
    mut out: W,
    path: &Path,
    format: Format,
    program: &Program,
) -> Result<(), CliError> {
    let write_error = |source: io::Error| CliError::Write {
        path: path.to_path_buf(),
        source,
    };

    let written = match format {
        Format::Json => {
            dump::write_json(&mut out, program).map_err(|err| {
                if err.is_io() {
                    write_error(io::Error::from(err))
                } else {
                    CliError::Encode(err)
                }
            })?;
            writeln!(out)
        }
        Format::Tree => out.write_all(dump::to_tree(program).as_bytes()),
    };

    written.and_then(|()| out.flush()).map_err(write_error)
}

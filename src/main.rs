//! jsonplus CLI.
//!
//! Reads one document from a file or stdin and dumps, classifies or queries it.
//! Exit codes: 0 on success, 1 when the input does not parse or cannot be
//! read, 2 when a `get` path does not resolve.

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use jsonplus::json::{try_parse_reader, Limits};
use jsonplus::{Error, Value};
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Parser)]
#[command(name = "jsonplus")]
#[command(about = "Parse, canonicalize and query JSON-superset documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Maximum array/object nesting depth
    #[arg(long, global = true, value_name = "N")]
    max_depth: Option<u64>,

    /// Maximum input size in bytes
    #[arg(long, global = true, value_name = "BYTES")]
    max_input: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of a document
    Dump(InputArgs),

    /// Print the type of a document's top-level value
    Type(InputArgs),

    /// Print the value at a dotted path such as `items.0.name`
    Get {
        #[command(flatten)]
        input: InputArgs,

        /// Dot-separated keys and array indices
        #[arg(long)]
        path: String,
    },

    /// Show version information
    Version,
}

#[derive(Args)]
struct InputArgs {
    /// Input file (stdin when omitted or `-`)
    file: Option<PathBuf>,
}

fn init_logging() {
    // RUST_LOG overrides the default of warnings only
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_filter(filter),
        )
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let mut limits = Limits::standard();
    if let Some(depth) = cli.max_depth {
        limits = limits.with_max_nesting_depth(depth);
    }
    if let Some(size) = cli.max_input {
        limits = limits.with_max_input_size(size);
    }

    match cli.command {
        Some(Commands::Dump(input)) => match load(&input, limits) {
            Ok(value) => {
                println!("{}", value.dump());
                ExitCode::SUCCESS
            }
            Err(code) => code,
        },
        Some(Commands::Type(input)) => match load(&input, limits) {
            Ok(value) => {
                println!("{}", value.type_of());
                ExitCode::SUCCESS
            }
            Err(code) => code,
        },
        Some(Commands::Get { input, path }) => {
            let value = match load(&input, limits) {
                Ok(value) => value,
                Err(code) => return code,
            };
            match lookup(&value, &path) {
                Ok(found) => {
                    println!("{}", found.dump());
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("error: {} (code {})", err, err.code());
                    ExitCode::from(2)
                }
            }
        }
        Some(Commands::Version) => {
            println!("jsonplus v{}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        None => {
            println!("jsonplus v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
            ExitCode::SUCCESS
        }
    }
}

/// Parse the selected input, reporting failures on stderr.
fn load(input: &InputArgs, limits: Limits) -> Result<Value, ExitCode> {
    let reader: Box<dyn Read> = match &input.file {
        Some(path) if path.as_os_str() != "-" => match File::open(path) {
            Ok(file) => Box::new(file),
            Err(err) => {
                eprintln!("error: cannot open {}: {}", path.display(), err);
                return Err(ExitCode::FAILURE);
            }
        },
        _ => Box::new(io::stdin().lock()),
    };

    try_parse_reader(reader, limits).map_err(|err| {
        debug!(?err, "input rejected");
        eprintln!("error: {}", err);
        ExitCode::FAILURE
    })
}

/// Follow a dotted path. Numeric segments index arrays; all others are keys.
fn lookup<'a>(value: &'a Value, path: &str) -> Result<&'a Value, Error> {
    if path.is_empty() {
        return Ok(value);
    }
    path.split('.').try_fold(value, |current, segment| {
        match (current, segment.parse::<usize>()) {
            (Value::Array(_), Ok(index)) => current.index(index),
            _ => current.field(segment),
        }
    })
}

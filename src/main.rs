use clap::Parser;
use jjq::{Filter, JjqError, JsonCodec, JsonConfig, OutputStyle, SerdeJsonCodec};
use serde_json::Value;
use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Run a JJQ filter over JSON input.
#[derive(Parser, Debug)]
#[command(name = "jjq", version, about)]
struct Cli {
    /// The filter to apply, e.g. '.a | {"b": .c}'
    filter: String,

    /// JSON input file. Reads standard input when omitted.
    file: Option<PathBuf>,

    /// Print each output on a single line.
    #[arg(short, long)]
    compact: bool,

    /// Print string outputs without JSON quoting.
    #[arg(short, long)]
    raw_output: bool,

    /// Accept single-quoted JSON input, e.g. {'a': 'b'}.
    #[arg(long)]
    single_quotes: bool,

    /// Run the filter once against `null` instead of reading input.
    #[arg(short, long)]
    null_input: bool,

    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn read_input(file: Option<&Path>) -> Result<String, JjqError> {
    match file {
        Some(path) => {
            log::info!("Reading input from {}", path.display());
            Ok(fs::read_to_string(path)?)
        }
        None => {
            log::info!("Reading input from stdin");
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn execute(cli: &Cli) -> Result<(), JjqError> {
    // Compile before touching the input so filter errors surface first.
    let filter = Filter::compile(&cli.filter)?;

    let codec = SerdeJsonCodec::new(JsonConfig {
        single_quotes: cli.single_quotes,
        output: if cli.compact {
            OutputStyle::Compact
        } else {
            OutputStyle::Pretty
        },
    });

    let inputs = if cli.null_input {
        vec![Value::Null]
    } else {
        codec.parse_stream(&read_input(cli.file.as_deref())?)?
    };
    if inputs.is_empty() {
        log::warn!("No JSON documents found in input");
    }
    log::info!("Applying `{}` to {} input document(s)", filter, inputs.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for input in &inputs {
        for output in filter.apply(input) {
            match output.as_ref() {
                Value::String(s) if cli.raw_output => writeln!(out, "{}", s)?,
                value => writeln!(out, "{}", codec.render(value)?)?,
            }
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("jjq: {}", e);
            if e.is_filter_error() {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

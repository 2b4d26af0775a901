use clap::{Parser, ValueEnum};
use std::fs;
use std::io::{self, Write};
use std::time::Instant;
use tenkan::prelude::*;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "TENKAN_LOG";

/// CLI-specific enums for clap to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum DialectCli {
    Drone,
    Gitlab,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatCli {
    Yaml,
    Json,
}

/// Converts legacy CI pipeline definitions into the canonical pipeline format
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the legacy pipeline file, or `-` to read stdin
    input: String,

    /// The legacy dialect of the input
    #[arg(short, long, value_enum, default_value = "drone")]
    dialect: DialectCli,

    /// The notation of the written document
    #[arg(short, long, value_enum, default_value = "yaml")]
    format: FormatCli,

    /// Write the canonical document to this path instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Log conversion decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let dialect = match cli.dialect {
        DialectCli::Drone => Dialect::Drone,
        DialectCli::Gitlab => Dialect::Gitlab,
    };
    let format = match cli.format {
        FormatCli::Yaml => OutputFormat::Yaml,
        FormatCli::Json => OutputFormat::Json,
    };
    let converter = Converter::builder().dialect(dialect).format(format).build();

    let start = Instant::now();
    let input = read_input(&cli.input);
    let conversion = converter
        .convert_document(&input)
        .unwrap_or_else(|e| exit_with_error(&format!("Conversion failed: {}", e)));
    for diagnostic in &conversion.diagnostics {
        eprintln!("warning: {}", diagnostic);
    }

    let output = converter
        .write(&conversion.pipeline)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    debug!(
        stages = conversion.pipeline.stages.len(),
        elapsed = ?start.elapsed(),
        "conversion finished"
    );

    match &cli.output {
        Some(path) => fs::write(path, &output).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to write output file '{}': {}", path, e))
        }),
        None => io::stdout()
            .write_all(&output)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write output: {}", e))),
    }
}

/// Installs a stderr subscriber. `TENKAN_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let fallback = if verbose { "tenkan=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: &str) -> Vec<u8> {
    if path == "-" {
        let mut buffer = Vec::new();
        io::Read::read_to_end(&mut io::stdin(), &mut buffer)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to read stdin: {}", e)));
        return buffer;
    }
    fs::read(path).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read pipeline file '{}': {}", path, e))
    })
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}

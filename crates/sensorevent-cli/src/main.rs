use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use glob::glob;
use sensorevent_core::{DecodeConfig, FieldNaming, RecordLayout, TextLength};
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("SENSOREVENT_BUILD_COMMIT"),
    ", ",
    env!("SENSOREVENT_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  sensorevent decode dump.bin --stdout\n  sensorevent decode event.json -o event.decoded.json --pretty\n  sensorevent decode capture.bin --layout adafruit --naming legacy --stdout";

#[derive(Parser, Debug)]
#[command(name = "sensorevent")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decode unified sensor event records into JSON.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode one or more raw records and write the projected JSON.
    #[command(after_help = EXAMPLES)]
    Decode(DecodeArgs),
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// Path to a binary record dump or a JSON host value
    input: PathBuf,

    /// Input encoding (default: json for .json files, raw otherwise)
    #[arg(long, value_enum)]
    input_format: Option<InputFormat>,

    /// Record byte layout
    #[arg(long, value_enum, default_value_t = LayoutArg::Compact)]
    layout: LayoutArg,

    /// Key naming for nested payloads
    #[arg(long, value_enum, default_value_t = NamingArg::Shape)]
    naming: NamingArg,

    /// Reject JSON strings that are not exactly one record long
    #[arg(long)]
    strict_length: bool,

    /// Output path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    output: Option<PathBuf>,

    /// Write JSON to stdout
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum InputFormat {
    /// Concatenated binary records
    Raw,
    /// A JSON string or byte array, or an array of those
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum LayoutArg {
    /// 32 bytes, timestamp last
    Compact,
    /// 36-byte native sensors_event_t
    Adafruit,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum NamingArg {
    Shape,
    Legacy,
    Semantic,
}

impl DecodeArgs {
    fn config(&self) -> DecodeConfig {
        DecodeConfig {
            layout: match self.layout {
                LayoutArg::Compact => RecordLayout::COMPACT,
                LayoutArg::Adafruit => RecordLayout::ADAFRUIT,
            },
            text_length: if self.strict_length {
                TextLength::Exact
            } else {
                TextLength::Pad
            },
            naming: match self.naming {
                NamingArg::Shape => FieldNaming::Shape,
                NamingArg::Legacy => FieldNaming::Legacy,
                NamingArg::Semantic => FieldNaming::Semantic,
            },
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .try_init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

fn cmd_decode(args: DecodeArgs) -> Result<(), CliError> {
    if args.pretty && args.compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }

    let input = resolve_input_path(&args.input)?;
    validate_input_file(&input)?;
    let output = if args.stdout {
        None
    } else {
        let output = args.output.clone().ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--output or --stdout".to_string()),
            )
        })?;
        ensure_distinct_output(&input, &output)?;
        Some(output)
    };

    let config = args.config();
    let format = args
        .input_format
        .unwrap_or_else(|| format_from_extension(&input));
    debug!(
        input = %input.display(),
        ?format,
        layout = config.layout.name(),
        "decoding input"
    );

    let data = fs::read(&input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))?;
    let events = match format {
        InputFormat::Raw => decode_raw(&data, &config)?,
        InputFormat::Json => decode_json(&data, &config)?,
    };
    info!(records = events.len(), "decoded records");

    let value = match <[Value; 1]>::try_from(events) {
        Ok([single]) => single,
        Err(events) => Value::Array(events),
    };
    let json = serialize_output(&value, args.pretty)?;

    match output {
        None => {
            println!("{}", json);
        }
        Some(output) => {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent).with_context(|| {
                        format!("Failed to create output directory: {}", parent.display())
                    })?;
                }
            }
            fs::write(&output, json)
                .with_context(|| format!("Failed to write output: {}", output.display()))?;
            if !args.quiet {
                eprintln!("OK: decoded output written -> {}", output.display());
            }
        }
    }
    Ok(())
}

fn decode_raw(data: &[u8], config: &DecodeConfig) -> Result<Vec<Value>, CliError> {
    let size = config.layout.size();
    if data.is_empty() || data.len() % size != 0 {
        return Err(CliError::new(
            format!(
                "raw input is {} bytes, not a whole number of {}-byte records",
                data.len(),
                size
            ),
            Some(format!(
                "check --layout ({} selected) or pass --input-format json",
                config.layout.name()
            )),
        ));
    }

    data.chunks_exact(size)
        .enumerate()
        .map(|(index, chunk)| {
            sensorevent_core::get_event_from_bytes(chunk, config)
                .with_context(|| format!("record {} could not be decoded", index))
                .map_err(CliError::from)
        })
        .collect()
}

fn decode_json(data: &[u8], config: &DecodeConfig) -> Result<Vec<Value>, CliError> {
    let value: Value = serde_json::from_slice(data).map_err(|err| {
        CliError::new(
            format!("input is not valid JSON: {}", err),
            Some("pass --input-format raw for binary dumps".to_string()),
        )
    })?;

    let records = match value {
        Value::Array(items) if is_batch(&items) => items,
        single => vec![single],
    };
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            sensorevent_core::get_event_with(record, config).map_err(|err| {
                CliError::new(
                    format!("record {} could not be decoded: {}", index, err),
                    Some(format!(
                        "records are strings or arrays of {} byte values for the {} layout",
                        config.layout.size(),
                        config.layout.name()
                    )),
                )
            })
        })
        .collect()
}

/// An array of non-numbers is a batch; an array of numbers is one record.
fn is_batch(items: &[Value]) -> bool {
    !items.is_empty() && items.iter().all(|item| !item.is_number())
}

fn format_from_extension(input: &Path) -> InputFormat {
    let is_json = input
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        InputFormat::Json
    } else {
        InputFormat::Raw
    }
}

fn serialize_output(value: &Value, pretty: bool) -> Result<String, CliError> {
    if pretty {
        serde_json::to_string_pretty(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(value)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn ensure_distinct_output(input: &Path, output: &Path) -> Result<(), CliError> {
    let input_abs = fs::canonicalize(input)
        .with_context(|| format!("Failed to resolve input path: {}", input.display()))?;
    let output_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    // A missing output directory is created later and cannot hold the input.
    let Ok(output_dir) = fs::canonicalize(&output_dir) else {
        return Ok(());
    };
    let file_name = output
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid output path: {}", output.display()))?;
    if output_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!("output path must differ from input: {}", output.display()),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("pass a binary record dump or a .json file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("pass a binary record dump or a .json file".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            let more = if count > 3 { ", ..." } else { "" };
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}{}",
                    pattern, count, listed, more
                ),
                Some("pass a single input file, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}

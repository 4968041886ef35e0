use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use miette::Report;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use regcheck::error_utils::format_source_name;
use regcheck::validation::{ExtraFields, ValidationFailure, Validator, ValidatorOptions};
use regcheck::{report, schema};

/// Exit status when the record parsed but broke at least one rule
const EXIT_VIOLATIONS: u8 = 1;
/// Exit status when the input was not valid JSON
const EXIT_MALFORMED: u8 = 2;

#[derive(Parser)]
#[command(
    name = "regcheck",
    about = "A CLI tool that validates user registration records and reports every violation",
    version,
    author,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a registration record and print the normalized record or its violations
    Validate {
        /// JSON file to validate (reads stdin when omitted or "-")
        file: Option<PathBuf>,

        /// Accept only exact JSON types, no coercion
        #[arg(long, env = "REGCHECK_STRICT")]
        strict: bool,

        /// How to treat keys the schema does not declare
        #[arg(long, value_enum, env = "REGCHECK_EXTRA", default_value_t = ExtraArg::Forbid)]
        extra: ExtraArg,

        /// Spaces of indentation in the JSON output (0 for a single line)
        #[arg(long, default_value_t = report::DEFAULT_INDENT)]
        indent: usize,
    },

    /// Print the JSON Schema of the normalized record
    Schema,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum ExtraArg {
    Forbid,
    Ignore,
}

impl From<ExtraArg> for ExtraFields {
    fn from(arg: ExtraArg) -> Self {
        match arg {
            ExtraArg::Forbid => ExtraFields::Forbid,
            ExtraArg::Ignore => ExtraFields::Ignore,
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    init_logging(cli.verbose);

    match cli.command {
        Commands::Validate {
            file,
            strict,
            extra,
            indent,
        } => {
            let options = ValidatorOptions {
                strict,
                extra: extra.into(),
            };
            validate_command(file, options, indent)
        }
        Commands::Schema => schema_command(),
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("regcheck=warn"), // Default: warnings and errors only
        1 => EnvFilter::new("regcheck=info"), // -v: info messages
        _ => EnvFilter::new("regcheck=debug"), // -vv or more: full debug
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read registration record: {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read registration record from stdin")?;
            Ok(buf)
        }
    }
}

fn validate_command(
    file: Option<PathBuf>,
    options: ValidatorOptions,
    indent: usize,
) -> Result<ExitCode> {
    let raw = read_input(file.as_ref())?;
    let source_name = format_source_name(file.as_deref());
    debug!(source = %source_name, ?options, "Validating registration record");

    let validator = Validator::new(options);
    let result = validator.validate_named(&source_name, &raw);

    let output = report::render(&result, indent).context("Failed to render validation result")?;
    println!("{output}");

    match result {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(ValidationFailure::Invalid(_)) => Ok(ExitCode::from(EXIT_VIOLATIONS)),
        Err(ValidationFailure::Malformed(error)) => {
            eprintln!("{:?}", Report::new(error));
            Ok(ExitCode::from(EXIT_MALFORMED))
        }
    }
}

fn schema_command() -> Result<ExitCode> {
    let schema = schema::user_schema().context("Failed to parse embedded user schema")?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(ExitCode::SUCCESS)
}

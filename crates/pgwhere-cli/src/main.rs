#![allow(clippy::doc_markdown)]
//! `pgwhere` CLI - compile JSON filters into PostgreSQL predicates
//!
//! Usage:
//!   `pgwhere compile '{"age": {"gte": 18}}'`
//!   `cat filter.json | pgwhere compile - --placeholder numbered`
//!   `pgwhere expression embedding cosine_distance '[0.1, 0.2]'`
//!   `pgwhere detect created_at --value '"2024-01-01T00:00:00Z"'`
//!   `pgwhere operators --family ip_network`

mod output;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use pgwhere_core::{
    detect, CompilerConfig, FieldTypeFamily, LiteralValue, PlaceholderStyle, StrategyRegistry,
    TypeHint, WhereClauseBuilder,
};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "pgwhere")]
#[command(
    author,
    version,
    about = "pgwhere CLI - Typed SQL predicates from JSON filters"
)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file
    #[arg(
        short,
        long,
        global = true,
        default_value = "pgwhere.toml",
        env = "PGWHERE_CONFIG"
    )]
    config: PathBuf,

    /// Log at debug level (overrides the configured level; RUST_LOG wins over both)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output format
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum FormatArg {
    #[default]
    Text,
    Json,
}

/// CLI placeholder option
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlaceholderArg {
    /// `%s`
    Format,
    /// `$1, $2, ...`
    Numbered,
}

impl From<PlaceholderArg> for PlaceholderStyle {
    fn from(p: PlaceholderArg) -> Self {
        match p {
            PlaceholderArg::Format => PlaceholderStyle::Format,
            PlaceholderArg::Numbered => PlaceholderStyle::Numbered,
        }
    }
}

/// Options shared by the commands that compile SQL.
#[derive(clap::Args, Debug)]
struct CompileOptions {
    /// Placeholder style (defaults to the configured one)
    #[arg(short, long, value_enum)]
    placeholder: Option<PlaceholderArg>,

    /// Document column (defaults to the configured one)
    #[arg(long)]
    column: Option<String>,

    /// Treat the first key of each field as a real column instead of a JSONB key
    #[arg(long)]
    columns: bool,

    /// Static type hint, repeatable: `--hint server.ip=inet`
    #[arg(long = "hint", value_name = "FIELD=TYPE", value_parser = parse_hint)]
    hints: Vec<(String, TypeHint)>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: FormatArg,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a JSON filter into a WHERE fragment
    Compile {
        /// Filter JSON text, or `-` to read stdin
        #[arg(default_value = "-", conflicts_with = "file")]
        filter: String,

        /// Read the filter from a file
        #[arg(long)]
        file: Option<PathBuf>,

        #[command(flatten)]
        options: CompileOptions,
    },

    /// Compile a single field/operator/value expression (e.g. a vector distance)
    Expression {
        /// Dotted field path
        field: String,

        /// Operator name
        operator: String,

        /// Value as JSON; bare words are taken as strings
        value: String,

        #[command(flatten)]
        options: CompileOptions,
    },

    /// Show the type family detected for a field
    Detect {
        /// Dotted field path
        field: String,

        /// Sample value as JSON; bare words are taken as strings
        #[arg(long)]
        value: Option<String>,

        /// Static type hint
        #[arg(long, value_parser = parse_hint_value)]
        hint: Option<TypeHint>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: FormatArg,
    },

    /// List operator strategies in precedence order
    Operators {
        /// Only strategies claiming this family
        #[arg(long)]
        family: Option<FieldTypeFamily>,
    },

    /// Print the effective configuration as TOML
    Config,
}

fn parse_hint(s: &str) -> Result<(String, TypeHint), String> {
    let (field, hint) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid hint '{s}', expected FIELD=TYPE"))?;
    if field.is_empty() {
        return Err(format!("invalid hint '{s}', field is empty"));
    }
    Ok((field.to_string(), parse_hint_value(hint)?))
}

fn parse_hint_value(s: &str) -> Result<TypeHint, String> {
    s.parse()
}

/// JSON when it parses, otherwise the raw text as a string.
fn parse_value(raw: &str) -> LiteralValue {
    serde_json::from_str::<serde_json::Value>(raw)
        .map_or_else(|_| LiteralValue::Text(raw.to_string()), LiteralValue::from)
}

fn read_filter(filter: &str, file: Option<&PathBuf>) -> anyhow::Result<String> {
    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read filter file {}", path.display()));
    }
    if filter == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read filter from stdin")?;
        return Ok(text);
    }
    Ok(filter.to_string())
}

fn init_logging(config: &CompilerConfig, verbose: bool) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    // stdout carries SQL; logs go to stderr
    let result = if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    if let Err(e) = result {
        eprintln!("warning: logging disabled: {e}");
    }
}

fn builder_for(config: &CompilerConfig, options: &CompileOptions) -> WhereClauseBuilder {
    let mut builder = WhereClauseBuilder::from_config(config);
    if let Some(placeholder) = options.placeholder {
        builder = builder.with_placeholder(placeholder.into());
    }
    if let Some(column) = &options.column {
        builder = builder.with_column(column.as_str());
    }
    if options.columns {
        builder = builder.with_jsonb(false);
    }
    for (field, hint) in &options.hints {
        builder = builder.with_hint(field.as_str(), *hint);
    }
    builder
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CompilerConfig::load_from_path(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    config.validate()?;
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Compile {
            filter,
            file,
            options,
        } => {
            let text = read_filter(&filter, file.as_ref())?;
            if text.trim().is_empty() {
                bail!("filter is empty; pass JSON text, --file or pipe to stdin");
            }
            let builder = builder_for(&config, &options);
            tracing::debug!(bytes = text.len(), "compiling filter");
            let compiled = builder.build_str(&text)?;
            output::print_compiled(
                compiled.as_ref(),
                builder_style(&config, &options),
                options.format,
            );
        }
        Commands::Expression {
            field,
            operator,
            value,
            options,
        } => {
            let builder = builder_for(&config, &options);
            let compiled = builder.build_expression(&field, &operator, parse_value(&value))?;
            output::print_compiled(
                Some(&compiled),
                builder_style(&config, &options),
                options.format,
            );
        }
        Commands::Detect {
            field,
            value,
            hint,
            format,
        } => {
            let sample = value.as_deref().map(parse_value);
            let hint = hint.or_else(|| config.hint_for(&field));
            let family = detect(&field, sample.as_ref(), hint);
            output::print_detection(&field, family, hint, format);
        }
        Commands::Operators { family } => {
            output::print_operators(StrategyRegistry::standard(), family);
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
        }
    }

    Ok(())
}

fn builder_style(config: &CompilerConfig, options: &CompileOptions) -> PlaceholderStyle {
    options
        .placeholder
        .map_or(config.sql.placeholder, PlaceholderStyle::from)
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&err);
            ExitCode::FAILURE
        }
    }
}

//! Clipboard Inspector
//!
//! Entry point for the inspector binary.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clipboard_inspector::clipboard::{
    classify, Inspection, Inspector, RawRepresentation, RepresentationSource, SnapshotSource,
};
use clipboard_inspector::codec::hex_dump_with_limit;
use clipboard_inspector::config::{Config, LoggingConfig};
use clipboard_inspector::utils::format_user_error;

/// Command-line arguments for clipboard-inspector
#[derive(Parser, Debug)]
#[command(name = "clipboard-inspector")]
#[command(version, about = "Classify and decode clipboard representations", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file path
    #[arg(short, long, global = true, env = "CLIPBOARD_INSPECTOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: String,

    /// Write logs to file (in addition to stderr)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Output format (text|json), overrides the config file
    #[arg(long, global = true)]
    pub output: Option<String>,

    /// Append a hex dump of the raw bytes to text output
    #[arg(long, global = true)]
    pub show_hex: bool,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a single representation stored in a file
    Inspect {
        /// File holding the raw bytes
        file: PathBuf,

        /// Clipboard format ID (decimal or 0x-prefixed hex)
        #[arg(long, value_parser = parse_format_id)]
        format_id: u32,

        /// Registered format name
        #[arg(long)]
        format_name: Option<String>,
    },

    /// List and decode the representations of a snapshot manifest
    Snapshot {
        /// Path to snapshot.toml
        manifest: PathBuf,

        /// Decode only the representation at this index
        #[arg(long)]
        select: Option<usize>,
    },

    /// Print the kind a representation would be classified as
    Classify {
        /// Clipboard format ID (decimal or 0x-prefixed hex)
        #[arg(long, value_parser = parse_format_id)]
        format_id: u32,

        /// Format name
        #[arg(long, default_value = "")]
        format_name: String,

        /// Optional file with the raw bytes (used for content sniffing)
        file: Option<PathBuf>,
    },
}

fn parse_format_id(value: &str) -> Result<u32, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|e| format!("invalid format ID '{}': {}", value, e))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let loaded = load_config(&args);

    // A config that failed to load still gets a logger for the report
    let logging = match &loaded {
        Ok(config) => config.logging.clone(),
        Err(_) => LoggingConfig::default(),
    }
    .with_cli_overrides(args.verbose, args.log_file.clone());

    // Guard must outlive every log call
    let _guard = init_logging(&logging, &args.log_format)?;

    info!("════════════════════════════════════════════════════════");
    info!("  clipboard-inspector v{}", env!("CARGO_PKG_VERSION"));
    info!("  Built: {}", env!("BUILD_DATE"));
    info!("  Commit: {}", env!("GIT_HASH"));
    info!("════════════════════════════════════════════════════════");

    if let Err(e) = loaded.and_then(|config| run(&args, &config)) {
        eprintln!("{}", format_user_error(&e));
        return Err(e);
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default_config(),
    };
    let config = config.with_overrides(args.output.clone(), args.show_hex.then_some(true));
    config.validate()?;
    Ok(config)
}

fn run(args: &Args, config: &Config) -> Result<()> {
    info!("Configuration loaded successfully");
    debug!("Config: {:?}", config);

    let inspector = Inspector::from_config(config);

    match &args.command {
        Command::Inspect {
            file,
            format_id,
            format_name,
        } => {
            let rep = RawRepresentation::from_file(*format_id, format_name.as_deref(), file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let inspection = inspector.inspect(&rep);
            print_inspections(config, &[(rep, inspection)])
        }
        Command::Snapshot { manifest, select } => {
            let source = SnapshotSource::load(manifest)?;
            let reps = source.representations()?;

            if !config.json_output() {
                print_listing(&inspector, &reps);
            }

            let selected: Vec<RawRepresentation> = match select {
                Some(index) => {
                    let rep = reps.get(*index).cloned().with_context(|| {
                        format!(
                            "Representation index {} out of range (snapshot has {})",
                            index,
                            reps.len()
                        )
                    })?;
                    vec![rep]
                }
                None => reps,
            };

            let decoded: Vec<(RawRepresentation, Inspection)> = selected
                .into_iter()
                .map(|rep| {
                    let inspection = inspector.inspect(&rep);
                    (rep, inspection)
                })
                .collect();
            print_inspections(config, &decoded)
        }
        Command::Classify {
            format_id,
            format_name,
            file,
        } => {
            let bytes = file
                .as_deref()
                .map(read_bytes)
                .transpose()?;
            let kind = classify(inspector.registry(), *format_id, format_name, bytes.as_deref());

            if config.json_output() {
                println!(
                    "{}",
                    serde_json::json!({ "format_id": format_id, "format_name": format_name, "kind": kind })
                );
            } else {
                println!("{}", kind);
            }
            Ok(())
        }
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_listing(inspector: &Inspector, reps: &[RawRepresentation]) {
    println!("{} representation(s):", reps.len());
    for (index, rep) in reps.iter().enumerate() {
        println!(
            "  [{:>2}] {:>5}  {:<36} {:>9} bytes  {}",
            index,
            rep.format_id,
            rep.format_name,
            rep.size_bytes,
            inspector.classify(rep)
        );
    }
    println!();
}

fn print_inspections(config: &Config, decoded: &[(RawRepresentation, Inspection)]) -> Result<()> {
    if config.json_output() {
        let inspections: Vec<&Inspection> = decoded.iter().map(|(_, inspection)| inspection).collect();
        let json = if inspections.len() == 1 {
            serde_json::to_string_pretty(&inspections[0])
        } else {
            serde_json::to_string_pretty(&inspections)
        }
        .context("Failed to serialize inspection")?;
        println!("{}", json);
        return Ok(());
    }

    for (rep, inspection) in decoded {
        println!("{}", inspection.render());
        if config.output.show_hex {
            if let Some(bytes) = rep.payload() {
                println!();
                println!("Hex dump:");
                println!(
                    "{}",
                    hex_dump_with_limit(bytes, config.inspection.hex_dump_limit)
                );
            }
        }
        println!();
    }

    Ok(())
}

fn init_logging(logging: &LoggingConfig, log_format: &str) -> Result<Option<WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("clipboard_inspector={},warn", logging.level))
    });

    // If log file is specified, write to both stderr and file
    if let Some(log_file_path) = &logging.log_file {
        let directory = log_file_path
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let file_name = log_file_path
            .file_name()
            .context("Log file path has no file name")?;
        let file_appender = tracing_appender::rolling::never(directory, file_name);
        let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

        match log_format {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(file_writer)
                            .with_ansi(false),
                    )
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(file_writer)
                            .with_ansi(false),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(file_writer)
                            .with_ansi(false),
                    )
                    .init();
            }
        }
        info!("Logging to file: {}", log_file_path.display());
        return Ok(Some(guard));
    }

    // Stderr only, stdout carries the inspection output
    match log_format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(None)
}

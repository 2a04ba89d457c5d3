use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use leadsync_core::{BatchNormalizer, ClassSource, NormalizerConfig, PropertyKind, RecordKind, Rules};

#[derive(Parser)]
#[command(name = "leadsync", about = "Normalize page-store exports into leads and history")]
struct Cli {
    /// Log at debug level (stderr). `RUST_LOG` still takes precedence.
    #[arg(long, global = true)]
    debug: bool,

    /// Config file to layer over the defaults instead of ~/.config/leadsync/config.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize a JSON list of pages (or a `{"results": [...]}` response).
    Normalize {
        /// Record shape to produce: `lead` or `history`.
        #[arg(long)]
        kind: RecordKind,
        /// Pretty-print the output.
        #[arg(long)]
        pretty: bool,
        /// Input file. Reads stdin when omitted or `-`.
        input: Option<PathBuf>,
    },
    /// Print the property patch that writes a class tier back to its column.
    ClassPatch {
        #[arg(long)]
        column: String,
        /// Kind of the column: `select` or `rich_text`.
        #[arg(long, default_value = "select")]
        column_kind: String,
        #[arg(long)]
        tier: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Command::Normalize {
            kind,
            pretty,
            input,
        } => {
            let config = match &cli.config {
                Some(path) => NormalizerConfig::load_from(path)
                    .with_context(|| format!("loading config from {}", path.display()))?,
                None => NormalizerConfig::load().context("loading user config")?,
            };
            let normalizer = BatchNormalizer::new(Rules::from_config(&config)?);

            let document = read_input(input.as_deref())?;
            let batch = normalizer.normalize_json_str(&document, kind)?;
            if !batch.skipped.is_empty() {
                tracing::warn!(
                    skipped = batch.skipped.len(),
                    records = batch.records.len(),
                    "some pages were dropped"
                );
            }

            let out = if pretty {
                serde_json::to_string_pretty(&batch.records)?
            } else {
                serde_json::to_string(&batch.records)?
            };
            println!("{out}");
        }
        Command::ClassPatch {
            column,
            column_kind,
            tier,
        } => {
            let kind = match column_kind.as_str() {
                "select" => PropertyKind::Select,
                "rich_text" => PropertyKind::RichText,
                other => anyhow::bail!("unsupported column kind '{other}' (expected select or rich_text)"),
            };
            let source = ClassSource {
                column,
                kind: kind.as_str().to_string(),
            };
            println!("{}", source.update_payload(&tier));
        }
    }

    Ok(())
}

fn read_input(path: Option<&std::path::Path>) -> anyhow::Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            Ok(buf)
        }
    }
}

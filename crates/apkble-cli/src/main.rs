//! apkble - Extract BLE UUIDs from Android APKs
//!
//! This tool decompiles an APK with jadx and lists the UUID literals found
//! in the decompiled Java sources, together with the variable each one was
//! assigned to.

use anyhow::{Context, Result};
use apkble_core::{Analyzer, ReadErrorPolicy, UuidRecord, WalkerConfig};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// Extract BLE service and characteristic UUIDs from Android APKs
#[derive(Parser, Debug)]
#[command(name = "apkble")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to the APK to analyze
    #[arg(short, long)]
    apk: PathBuf,

    /// Path to the jadx executable
    #[arg(short, long, env = "APKBLE_JADX", default_value = "/usr/bin/jadx")]
    jadx: PathBuf,

    /// Directory of an already decompiled APK; skips running jadx
    #[arg(short, long)]
    base_path: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Extension of the source files to scan
    #[arg(long, default_value = apkble_core::walker::DEFAULT_EXTENSION)]
    extension: String,

    /// Skip unreadable source files instead of aborting
    #[arg(long)]
    skip_unreadable: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Output format for found UUIDs
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Aligned columns
    Table,
    /// A single JSON array
    Json,
    /// One JSON object per line (for scripting)
    Jsonl,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let records = run(&cli)?;
    info!("Found {} UUID(s)", records.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_records(&mut out, &records, cli.format).context("Failed to write results")?;
    out.flush().context("Failed to write results")?;

    Ok(())
}

/// Validate inputs and run the analysis
fn run(cli: &Cli) -> Result<Vec<UuidRecord>> {
    let policy = if cli.skip_unreadable {
        ReadErrorPolicy::Skip
    } else {
        ReadErrorPolicy::Abort
    };
    let config = WalkerConfig::new()
        .extension(cli.extension.as_str())
        .on_read_error(policy);

    let analyzer = Analyzer::new(&cli.jadx, &cli.apk)
        .context("Invalid input")?
        .with_walker_config(config);

    analyzer
        .analyze(cli.base_path.as_deref())
        .with_context(|| format!("Failed to analyze {}", cli.apk.display()))
}

fn write_records(out: &mut impl Write, records: &[UuidRecord], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => write_table(out, records)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
        }
        OutputFormat::Jsonl => {
            for record in records {
                serde_json::to_writer(&mut *out, record)?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

fn write_table(out: &mut impl Write, records: &[UuidRecord]) -> io::Result<()> {
    const HEADERS: [&str; 3] = ["UUID", "VARIABLE", "PATH"];

    let uuid_width = column_width(HEADERS[0], records.iter().map(UuidRecord::uuid));
    let variable_width = column_width(HEADERS[1], records.iter().map(UuidRecord::variable));

    writeln!(
        out,
        "{:<uuid_width$}  {:<variable_width$}  {}",
        HEADERS[0], HEADERS[1], HEADERS[2]
    )?;
    for record in records {
        writeln!(
            out,
            "{:<uuid_width$}  {:<variable_width$}  {}",
            record.uuid(),
            record.variable(),
            record.path()
        )?;
    }
    Ok(())
}

fn column_width<'a>(header: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}

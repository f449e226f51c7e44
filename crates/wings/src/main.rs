use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wings_core::config::WingsConfig;
use wings_core::pipeline::{self, RunReport};
use wings_core::sources::{self, DirectorySource, HttpSheetSource, SheetSource};

#[derive(Parser, Debug)]
#[command(author, version, about = "Builds the wings gallery JSON data from the specimen spreadsheet", long_about = None)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, clean and join all sheets, then write the JSON documents
    Build(BuildArgs),
    /// Run the pipeline without writing anything and report photo match counts
    Stats(SourceArgs),
    /// Save the four raw CSV exports so a later run can replay them with --from-dir
    Snapshot(SnapshotArgs),
}

#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// Path to a TOML configuration file (defaults to ./wings.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Read <dir>/{photo_links,collection,crispr,insectary}.csv instead of downloading
    #[arg(long)]
    from_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
struct BuildArgs {
    #[command(flatten)]
    source: SourceArgs,
    /// Directory the JSON documents are written to
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Also write photo_lookup.json
    #[arg(long)]
    photo_lookup: bool,
}

#[derive(Args, Debug)]
struct SnapshotArgs {
    /// Directory the raw CSV files are written to
    #[arg(long)]
    dest: PathBuf,
    /// Path to a TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    match cli.command {
        Command::Build(args) => handle_build(args),
        Command::Stats(args) => handle_stats(args),
        Command::Snapshot(args) => handle_snapshot(args),
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(path: Option<&Path>) -> Result<WingsConfig> {
    WingsConfig::load(path).context("failed to load configuration")
}

fn open_source(config: &WingsConfig, from_dir: Option<&Path>) -> Result<Box<dyn SheetSource>> {
    match from_dir {
        Some(dir) => Ok(Box::new(DirectorySource::new(dir))),
        None => Ok(Box::new(
            HttpSheetSource::new(config).context("failed to build HTTP client")?,
        )),
    }
}

fn handle_build(args: BuildArgs) -> Result<()> {
    let mut config = load_config(args.source.config.as_deref())?;
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if args.photo_lookup {
        config.write_photo_lookup = true;
    }

    let source = open_source(&config, args.source.from_dir.as_deref())?;
    let report = pipeline::run(source.as_ref(), &config.output_dir, config.write_photo_lookup)
        .context("pipeline failed")?;

    print_report(&report);
    info!(output_dir = %config.output_dir.display(), "Success");
    Ok(())
}

fn handle_stats(args: SourceArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let source = open_source(&config, args.from_dir.as_deref())?;
    let report = pipeline::dry_run(source.as_ref()).context("pipeline failed")?;
    print_report(&report);
    Ok(())
}

fn handle_snapshot(args: SnapshotArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let source = HttpSheetSource::new(&config).context("failed to build HTTP client")?;
    let written = sources::snapshot(&source, &args.dest)
        .with_context(|| format!("failed to snapshot sheets into {}", args.dest.display()))?;

    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn print_report(report: &RunReport) {
    let photos = &report.photos;
    println!(
        "Photos: {} rows, {} raw excluded, {} unnamed, {} without CAM_ID, {} identifiers",
        photos.rows_read,
        photos.raw_excluded,
        photos.unnamed,
        photos.without_identifier,
        photos.identifiers
    );

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Sheet",
        "Rows read",
        "Rows written",
        "With photos",
        "Dorsal",
        "Ventral",
    ]);
    for summary in &report.sheets {
        table.add_row(vec![
            summary.sheet.label().to_string(),
            summary.rows_read.to_string(),
            summary.rows_written.to_string(),
            summary.with_photos.to_string(),
            summary.with_dorsal.to_string(),
            summary.with_ventral.to_string(),
        ]);
    }
    println!("{table}");

    for artifact in &report.artifacts {
        println!(
            "{} ({} rows, blake3 {})",
            artifact.path.display(),
            artifact.rows,
            artifact.hash
        );
    }
}

//! snapdiff CLI
//!
//! Capture dated dataset snapshots and report what changed between them

use clap::{Parser, Subcommand};
use snapdiff_core::logging_facility;
use snapdiff_engine::{DirectoryFetcher, SnapDiffConfig};
use snapdiff_store::SnapshotStore;
use std::path::PathBuf;

mod commands;

#[derive(Debug, Parser)]
#[command(name = "snapdiff")]
#[command(about = "snapdiff - dated dataset snapshots and keyed changelogs", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./snapdiff.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Snapshot store root, overriding configuration
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch a dataset and save today's snapshot
    Capture(commands::capture::CaptureArgs),
    /// Changelog between two snapshots
    Diff(commands::diff::DiffArgs),
    /// Dates with a snapshot
    List(commands::list::ListArgs),
    /// Print one snapshot
    Show(commands::show::ShowArgs),
}

/// Everything a command needs, built once from configuration
pub struct Context {
    pub config: SnapDiffConfig,
    pub store: SnapshotStore,
    pub fetcher: DirectoryFetcher,
}

fn build_context(cli: &Cli) -> Result<Context, Box<dyn std::error::Error>> {
    let mut config = SnapDiffConfig::load(cli.config.as_deref())?;
    if let Some(root) = &cli.root {
        config.store.root = root.clone();
    }
    logging_facility::init(config.logging_profile()?);

    let store = SnapshotStore::new(&config.store.root);
    let fetcher = DirectoryFetcher::new(config.source_config());
    Ok(Context {
        config,
        store,
        fetcher,
    })
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = build_context(&cli)?;

    match cli.command {
        Commands::Capture(args) => commands::capture::execute(args, &ctx),
        Commands::Diff(args) => commands::diff::execute(args, &ctx),
        Commands::List(args) => commands::list::execute(args, &ctx),
        Commands::Show(args) => commands::show::execute(args, &ctx),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

//! Diff command

use crate::Context;
use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use snapdiff_core::diff::render_summary;
use snapdiff_engine::{apply_engine_command, EngineCommand, EngineCommandResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Changelog as a JSON array of records tagged with `action`
    Json,
    /// Markdown summary with counts and field changes
    Summary,
}

#[derive(Debug, Args)]
pub struct DiffArgs {
    #[arg(long)]
    pub dataset: String,

    /// Older snapshot date (YYYY-MM-DD)
    #[arg(long)]
    pub from: NaiveDate,

    /// Newer snapshot date (YYYY-MM-DD)
    #[arg(long)]
    pub to: NaiveDate,

    /// Key field, overriding the dataset's configured one
    #[arg(long)]
    pub key: Option<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,
}

pub fn execute(args: DiffArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let key_field = args
        .key
        .clone()
        .unwrap_or_else(|| ctx.config.dataset(&args.dataset).key_field);

    let cmd = EngineCommand::Compare {
        dataset: args.dataset,
        from: args.from,
        to: args.to,
        key_field: Some(key_field.clone()),
    };

    let changelog = match apply_engine_command(cmd, &ctx.config, &ctx.store, &ctx.fetcher)? {
        EngineCommandResult::Compared(changelog) => changelog,
        other => return Err(format!("unexpected engine result: {:?}", other).into()),
    };

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&changelog)?),
        OutputFormat::Summary => print!("{}", render_summary(&changelog, &key_field)),
    }
    Ok(())
}

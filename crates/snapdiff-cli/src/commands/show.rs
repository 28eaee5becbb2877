//! Show command

use crate::Context;
use chrono::NaiveDate;
use clap::Args;
use snapdiff_core::table::collection_to_table;
use snapdiff_engine::{apply_engine_command, EngineCommand, EngineCommandResult};

#[derive(Debug, Args)]
pub struct ShowArgs {
    #[arg(long)]
    pub dataset: String,

    /// Snapshot date (YYYY-MM-DD)
    #[arg(long)]
    pub date: NaiveDate,

    /// Print a `;`-separated table instead of JSON
    #[arg(long)]
    pub table: bool,
}

pub fn execute(args: ShowArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let cmd = EngineCommand::Show {
        dataset: args.dataset.clone(),
        date: args.date,
    };

    let collection = match apply_engine_command(cmd, &ctx.config, &ctx.store, &ctx.fetcher)? {
        EngineCommandResult::Shown(collection) => collection,
        other => return Err(format!("unexpected engine result: {:?}", other).into()),
    };

    if args.table {
        if collection.is_empty() {
            println!("No records for '{}' on {}", args.dataset, args.date);
        } else {
            print!("{}", collection_to_table(&collection)?.render(b';')?);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(&collection)?);
    }
    Ok(())
}

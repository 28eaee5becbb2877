//! List command

use crate::Context;
use clap::Args;
use snapdiff_engine::{apply_engine_command, EngineCommand, EngineCommandResult};

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub dataset: String,
}

pub fn execute(args: ListArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let cmd = EngineCommand::ListSnapshots {
        dataset: args.dataset,
    };

    match apply_engine_command(cmd, &ctx.config, &ctx.store, &ctx.fetcher)? {
        EngineCommandResult::Listed(dates) => {
            for date in dates {
                println!("{}", date);
            }
            Ok(())
        }
        other => Err(format!("unexpected engine result: {:?}", other).into()),
    }
}

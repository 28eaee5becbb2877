//! Capture command

use crate::Context;
use clap::Args;
use snapdiff_engine::{apply_engine_command, EngineCommand, EngineCommandResult};

#[derive(Debug, Args)]
pub struct CaptureArgs {
    /// Dataset (source endpoint) to capture
    #[arg(long)]
    pub dataset: String,
}

pub fn execute(args: CaptureArgs, ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let cmd = EngineCommand::Capture {
        dataset: args.dataset,
    };

    match apply_engine_command(cmd, &ctx.config, &ctx.store, &ctx.fetcher)? {
        EngineCommandResult::Captured(stored) => {
            println!(
                "Captured {} records of '{}' for {}",
                stored.collection.len(),
                stored.dataset,
                stored.date
            );
            println!("  path: {}", stored.path.display());
            Ok(())
        }
        other => Err(format!("unexpected engine result: {:?}", other).into()),
    }
}

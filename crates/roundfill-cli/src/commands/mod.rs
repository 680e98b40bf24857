mod backfill;
mod history;

use roundfill_core::{BuiltinHistory, HistorySource, JsonFileHistory};

use crate::cli::{Cli, Command, HistorySourceArgs};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        Command::Backfill(args) => backfill::run(cli, args).await,
        Command::History(args) => history::run(args),
    }
}

fn history_source(args: &HistorySourceArgs) -> Box<dyn HistorySource> {
    match &args.history {
        Some(path) => Box::new(JsonFileHistory::new(path.clone())),
        None => Box::new(BuiltinHistory),
    }
}

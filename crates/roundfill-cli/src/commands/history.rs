use std::io;

use crate::cli::HistoryArgs;
use crate::error::CliError;
use crate::output;

use super::history_source;

pub fn run(args: &HistoryArgs) -> Result<(), CliError> {
    let days = history_source(&args.source).load()?;
    let stdout = io::stdout();
    output::render_history(&mut stdout.lock(), &days, args.format, args.pretty)
}

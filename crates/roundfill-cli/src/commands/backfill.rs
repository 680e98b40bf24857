use std::io;
use std::sync::Arc;

use roundfill_core::{
    AdminApi, AdminKey, BackfillConfig, BackfillRunner, ReqwestHttpClient, RetryConfig,
};
use tracing::info;

use crate::cli::{BackfillArgs, Cli};
use crate::error::CliError;

use super::history_source;

pub async fn run(cli: &Cli, args: &BackfillArgs) -> Result<(), CliError> {
    let config = build_config(cli, args)?;
    info!(
        base_url = %config.base_url,
        leaderboard_limit = config.leaderboard_limit,
        max_attempts = config.retry.max_attempts(),
        timeout_ms = ?config.timeout_ms,
        submit_history = config.submit_history,
        "starting backfill"
    );

    let api = AdminApi::new(Arc::new(ReqwestHttpClient::new()), config);
    let source = history_source(&args.source);
    let runner = BackfillRunner::from_source(api, source.as_ref())?;

    let mut stdout = io::stdout();
    runner.run(&mut stdout).await?;
    Ok(())
}

fn build_config(cli: &Cli, args: &BackfillArgs) -> Result<BackfillConfig, CliError> {
    let admin_key = cli
        .admin_key
        .as_deref()
        .ok_or(CliError::MissingAdminKey)
        .and_then(|raw| AdminKey::new(raw).map_err(CliError::from))?;

    let config = BackfillConfig::new(&cli.base_url, admin_key)?
        .with_leaderboard_limit(args.leaderboard_limit)?
        .with_timeout_ms(args.timeout_ms)
        .with_retry(RetryConfig::exponential(args.max_retries))
        .with_submit_history(args.submit_history);

    Ok(config)
}

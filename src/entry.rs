use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::{info, warn};

use crate::args::{Command, StresserArgs, TestArgs};
use crate::config::{RunConfig, apply_config, load_config};
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::Dispatcher;
use crate::report::{ReportOptions, print_summary, write_reports};
use crate::shutdown::{setup_signal_shutdown_handler, shutdown_channel};

pub(crate) fn run() -> AppResult<()> {
    let matches = StresserArgs::command().get_matches();
    let args = StresserArgs::from_arg_matches(&matches)?;
    let Command::Test(mut test_args) = args.command;
    let test_matches = test_matches(&matches)?;

    crate::logger::init_logging(test_args.verbose);

    if let Some(config) = load_config(test_args.config.as_deref())? {
        apply_config(&mut test_args, test_matches, &config)?;
    }
    let run_config = RunConfig::from_args(&test_args)?;
    let report_options = ReportOptions::from_args(&test_args);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_test(run_config, &report_options))
}

fn test_matches(matches: &ArgMatches) -> AppResult<&ArgMatches> {
    matches
        .subcommand_matches("test")
        .ok_or_else(|| AppError::validation(ValidationError::MissingCommand))
}

/// Runs one stress test and reports it; an interrupted run still reports
/// what it issued before returning an error.
async fn run_test(config: RunConfig, report_options: &ReportOptions) -> AppResult<()> {
    println!("Starting stress test...");
    println!(
        "URL: {}, Requests: {}, Concurrency: {}",
        config.url(),
        config.total_requests(),
        config.concurrency()
    );

    let (shutdown_tx, _shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let dispatch_result = match Dispatcher::new(config) {
        Ok(dispatcher) => dispatcher.with_shutdown(&shutdown_tx).run().await,
        Err(err) => Err(err),
    };

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        warn!("Signal handler task failed: {}", err);
    }
    let report = dispatch_result?;
    let outcome = report.outcome;
    let summary = report.into_summary();

    print_summary(&summary)?;
    for path in write_reports(&summary, report_options).await? {
        println!("Report written to {}", path.display());
    }

    if outcome.interrupted() {
        return Err(AppError::validation(ValidationError::RunInterrupted {
            issued: outcome.issued,
            requested: outcome.requested,
        }));
    }
    info!("Stress test finished in {:?}", outcome.elapsed);
    Ok(())
}

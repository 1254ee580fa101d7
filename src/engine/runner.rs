//! CLI command handler: scan the directory and run the import pass.

use anyhow::{Context, Result};
use log::info;

use crate::ImportSummary;
use crate::engine::arg_parser::Cli;
use crate::engine::progress::spawn_event_consumer;
use crate::import::{EventSink, ImportCoordinator};
use crate::store::SqliteIndex;
use crate::utils::setup_logging;

/// Run the import described by `cli`. A cancelled run (Ctrl+C) keeps the
/// partial index and returns an error so the exit code reflects it.
pub fn handle_run(cli: &Cli) -> Result<()> {
    setup_logging(cli.verbose);

    let mut index = SqliteIndex::open(&cli.db_path())?;

    let (events, event_rx) = EventSink::channel();
    let coordinator = ImportCoordinator::new(events);

    let cancel = coordinator.cancel_handle();
    ctrlc::set_handler(move || cancel.request()).context("set Ctrl+C handler")?;

    let consumer = spawn_event_consumer(event_rx, !cli.json && !cli.verbose);

    let result = coordinator.import_directory(&mut index, &cli.dir, cli.copy_to.as_deref());
    // Dropping the coordinator drops the event sink, so the consumer thread
    // also exits when the import errored before its completion event.
    drop(coordinator);
    let _ = consumer.join();

    let summary = result?;
    report_summary(cli, &summary)?;

    if summary.canceled {
        anyhow::bail!("import cancelled by user; partial import was kept");
    }
    Ok(())
}

fn report_summary(cli: &Cli, summary: &ImportSummary) -> Result<()> {
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(summary).context("serialize summary")?
        );
        return Ok(());
    }
    info!(
        "indexed {} of {} files: {} new patients, {} new studies, {} new series, {} new instances",
        summary.processed,
        summary.total,
        summary.new_patients,
        summary.new_studies,
        summary.new_series,
        summary.new_instances,
    );
    Ok(())
}

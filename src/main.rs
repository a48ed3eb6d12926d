use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::watch;
use tracing::{error, info, warn};

use presplit::command::cli::{Cli, CliCommand};
use presplit::command::{SplitRequest, dispatch_split};
use presplit::engine::coordinator::TableOutcome;
use presplit::engine::sql::{MySqlClient, SqlTableReader, TableReader};
use presplit::engine::status::{HttpStatusClient, RegionSource};
use presplit::engine::writer::FileSink;
use presplit::logging;
use presplit::shared::config::load_settings;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let mut settings = load_settings()?;
    cli.apply_overrides(&mut settings);
    logging::init(&settings.logging)?;

    let invocation = cli.invocation(&settings)?;
    info!(
        target: "presplit::main",
        db = %invocation.db,
        command = invocation.command.name(),
        "Starting presplit"
    );

    let (cancel_tx, cancel_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!(target: "presplit::main", "Interrupted, finishing in-flight tables");
            let _ = cancel_tx.send(true);
        }
    });

    let client = Arc::new(MySqlClient::new(&settings.mysql, &invocation.db));
    let reader: Arc<dyn TableReader> = Arc::new(SqlTableReader::new(client.clone()));
    let regions: Option<Arc<dyn RegionSource>> = if matches!(cli.command, CliCommand::Key { .. }) {
        let addr = format!("{}:{}", settings.mysql.host, settings.status.port);
        Some(Arc::new(HttpStatusClient::new(&addr)))
    } else {
        None
    };
    let sink = Arc::new(FileSink::new(&settings.split.output_dir)?);

    let request = SplitRequest::new(
        invocation.db,
        invocation.selection,
        invocation.command,
        settings.split.concurrency,
        sink,
    );
    let result = dispatch_split(&request, reader, regions, &settings.split, cancel_rx).await;
    drop(request);

    if let Ok(client) = Arc::try_unwrap(client) {
        if let Err(e) = client.disconnect().await {
            warn!(target: "presplit::main", "Failed to close connection pool: {e}");
        }
    }

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            error!(target: "presplit::main", kind = e.kind(), "{e}");
            if e.is_run_fatal() {
                eprintln!("presplit: {e}; no tables were planned");
            } else {
                eprintln!("presplit: run aborted: {e}");
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    for (table, outcome) in report.outcomes() {
        match outcome {
            TableOutcome::Written { .. } => println!("{table}: {outcome}"),
            _ => eprintln!("{table}: {outcome}"),
        }
    }
    println!("{}", report.summary());
    println!("statements in {}", settings.split.output_dir);

    Ok(if report.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

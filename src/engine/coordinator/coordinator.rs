use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc, watch};
use tracing::{debug, info, warn};

use crate::engine::errors::SplitError;
use crate::engine::planner::SplitPlanner;
use crate::engine::types::TableRef;
use crate::engine::writer::StatementWriter;

use super::report::{RunReport, TableOutcome};

/// Runs the plan-then-write pipeline for every table with at most
/// `concurrency` pipelines in flight.
///
/// A failing table never stops its siblings. Once the cancel flag turns
/// true, tables that have not started are reported as cancelled and
/// in-flight pipelines run to completion.
pub struct ConcurrencyCoordinator {
    planner: Arc<dyn SplitPlanner>,
    writer: Arc<StatementWriter>,
    concurrency: usize,
    cancel: watch::Receiver<bool>,
}

impl ConcurrencyCoordinator {
    pub fn new(
        planner: Arc<dyn SplitPlanner>,
        writer: Arc<StatementWriter>,
        concurrency: usize,
        cancel: watch::Receiver<bool>,
    ) -> Self {
        Self {
            planner,
            writer,
            concurrency: concurrency.max(1),
            cancel,
        }
    }

    pub async fn run(&self, tables: Vec<TableRef>) -> RunReport {
        let strategy = self.planner.strategy();
        info!(
            target: "presplit::coordinator",
            strategy = %strategy,
            tables = tables.len(),
            concurrency = self.concurrency,
            "Starting run"
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let (tx, mut rx) = mpsc::channel::<(TableRef, TableOutcome)>(tables.len().max(1));
        let mut report = RunReport::new();
        let mut started: Vec<TableRef> = Vec::with_capacity(tables.len());
        let mut cancel = self.cancel.clone();

        let mut pending = tables.into_iter();
        while let Some(table) = pending.next() {
            let permit = tokio::select! {
                biased;
                _ = wait_cancelled(&mut cancel) => None,
                permit = Arc::clone(&semaphore).acquire_owned() => permit.ok(),
            };
            let Some(permit) = permit else {
                warn!(
                    target: "presplit::coordinator",
                    remaining = pending.len() + 1,
                    "Run cancelled, not scheduling remaining tables"
                );
                report.record(table, TableOutcome::Cancelled);
                for rest in pending.by_ref() {
                    report.record(rest, TableOutcome::Cancelled);
                }
                break;
            };

            started.push(table.clone());
            let planner = Arc::clone(&self.planner);
            let writer = Arc::clone(&self.writer);
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = run_pipeline(planner.as_ref(), writer, &table).await;
                drop(permit);
                if tx.send((table, outcome)).await.is_err() {
                    debug!(target: "presplit::coordinator", "Outcome receiver dropped");
                }
            });
        }
        drop(tx);

        let mut reported: HashSet<TableRef> = HashSet::with_capacity(started.len());
        while let Some((table, outcome)) = rx.recv().await {
            reported.insert(table.clone());
            report.record(table, outcome);
        }
        for table in started {
            if !reported.contains(&table) {
                report.record(
                    table,
                    TableOutcome::Failed {
                        kind: "TaskError".to_string(),
                        message: "pipeline task ended without reporting".to_string(),
                    },
                );
            }
        }

        info!(
            target: "presplit::coordinator",
            strategy = %strategy,
            succeeded = report.succeeded(),
            declined = report.declined(),
            failed = report.failed(),
            cancelled = report.cancelled(),
            "Run finished"
        );
        report
    }
}

async fn wait_cancelled(cancel: &mut watch::Receiver<bool>) {
    if cancel.wait_for(|flag| *flag).await.is_err() {
        // Sender gone without cancelling: never resolve.
        std::future::pending::<()>().await;
    }
}

async fn run_pipeline(
    planner: &dyn SplitPlanner,
    writer: Arc<StatementWriter>,
    table: &TableRef,
) -> TableOutcome {
    let plan = match planner.plan(table).await {
        Ok(plan) => plan,
        Err(err @ SplitError::UnorderableDomain { .. }) => {
            err.log_error(&table.to_string());
            return TableOutcome::Declined {
                reason: err.to_string(),
            };
        }
        Err(err) => {
            err.log_error(&table.to_string());
            return TableOutcome::failed(&err);
        }
    };

    let points = plan.len();
    let written = tokio::task::spawn_blocking(move || writer.write(&plan)).await;
    match written {
        Ok(Ok(())) => TableOutcome::Written { points },
        Ok(Err(err)) => {
            err.log_error(&table.to_string());
            TableOutcome::failed(&err)
        }
        Err(join) => TableOutcome::Failed {
            kind: "TaskError".to_string(),
            message: format!("writer task failed: {join}"),
        },
    }
}

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info};

use crate::command::types::{SplitCommand, SplitRequest};
use crate::engine::catalog::TableResolver;
use crate::engine::coordinator::{ConcurrencyCoordinator, RunReport};
use crate::engine::errors::SplitError;
use crate::engine::planner::{
    EstimatePlanner, KeyPlanner, RangePlanner, ReckonPlanner, SamplingPlanner, SplitPlanner,
};
use crate::engine::sql::TableReader;
use crate::engine::status::RegionSource;
use crate::engine::types::TableRef;
use crate::engine::writer::StatementWriter;
use crate::shared::config::SplitConfig;

/// Resolves the request's tables, builds the planner for its strategy and
/// runs every table pipeline.
///
/// Run-level errors (unknown database, selection, parameters) are returned
/// before any pipeline starts. Per-table failures land in the report.
pub async fn dispatch_split(
    request: &SplitRequest,
    reader: Arc<dyn TableReader>,
    regions: Option<Arc<dyn RegionSource>>,
    settings: &SplitConfig,
    cancel: watch::Receiver<bool>,
) -> Result<RunReport, SplitError> {
    debug!(
        target: "presplit::dispatch",
        db = %request.db,
        command = request.command.name(),
        "Dispatching split"
    );

    if !reader.database_exists(&request.db).await? {
        return Err(SplitError::UnknownDatabase(request.db.clone()));
    }
    let catalog = reader.list_tables(&request.db).await?;
    let tables = TableResolver::new(&request.db, &catalog).resolve(&request.selection)?;
    validate(&request.command, &tables)?;

    let planner = build_planner(&request.command, reader, regions, settings)?;
    let writer = Arc::new(StatementWriter::new(
        Arc::clone(&request.sink),
        settings.statement_batch_size,
    ));

    info!(
        target: "presplit::dispatch",
        strategy = %planner.strategy(),
        tables = tables.len(),
        "Tables resolved"
    );
    let coordinator = ConcurrencyCoordinator::new(planner, writer, request.concurrency, cancel);
    Ok(coordinator.run(tables).await)
}

fn validate(command: &SplitCommand, tables: &[TableRef]) -> Result<(), SplitError> {
    match command {
        SplitCommand::Estimate { .. } if tables.len() != 1 => Err(SplitError::Selection(format!(
            "estimate plans exactly one table, selection resolved {}",
            tables.len()
        ))),
        SplitCommand::Estimate { target, .. } if target.index.is_none() => {
            Err(SplitError::InvalidParams(
                "estimate needs the name of the target index its column belongs to".to_string(),
            ))
        }
        SplitCommand::Sampling(_) | SplitCommand::Reckon { .. } if tables.len() != 1 => {
            Err(SplitError::Selection(format!(
                "{} reads exactly one base table, selection resolved {}",
                command.name(),
                tables.len()
            )))
        }
        _ => Ok(()),
    }
}

fn build_planner(
    command: &SplitCommand,
    reader: Arc<dyn TableReader>,
    regions: Option<Arc<dyn RegionSource>>,
    settings: &SplitConfig,
) -> Result<Arc<dyn SplitPlanner>, SplitError> {
    use SplitCommand::*;

    Ok(match command {
        Range => Arc::new(RangePlanner::new(reader, settings.region_size_mb)),
        Key => {
            let regions = regions.ok_or_else(|| {
                SplitError::InvalidParams("key strategy needs a status endpoint".to_string())
            })?;
            Arc::new(KeyPlanner::new(regions))
        }
        Estimate {
            column,
            params,
            target,
        } => Arc::new(EstimatePlanner::new(
            reader,
            column.clone(),
            *params,
            target.clone(),
        )),
        Sampling(spec) => Arc::new(SamplingPlanner::new(
            reader,
            spec.clone(),
            settings.rows_per_region,
        )),
        Reckon { spec, page_size } => Arc::new(ReckonPlanner::new(
            reader,
            spec.clone(),
            settings.rows_per_region,
            *page_size,
        )),
    })
}

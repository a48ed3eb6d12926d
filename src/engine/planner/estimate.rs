use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::command::types::{EstimateParams, EstimateTarget, TargetNaming};
use crate::engine::errors::SplitError;
use crate::engine::sql::{TableReader, TableStats};
use crate::engine::types::{SplitPlan, SplitPoint, Strategy, TableRef};

use super::interpolate::interpolate;
use super::stride::{self, mib_to_bytes, regions_for_bytes};
use super::traits::SplitPlanner;

/// Sizes the target from row/size hints and places boundaries on a column's
/// observed distinct values, falling back to min/max interpolation when the
/// column has too few distinct values.
///
/// Distinct values are strided by `distinct / needed`, which yields the same
/// `needed - 1` points as a `distinct / (needed - 1)` stride.
pub struct EstimatePlanner {
    reader: Arc<dyn TableReader>,
    column: String,
    params: EstimateParams,
    target: TargetNaming,
}

impl EstimatePlanner {
    pub fn new(
        reader: Arc<dyn TableReader>,
        column: impl Into<String>,
        params: EstimateParams,
        target: TargetNaming,
    ) -> Self {
        Self {
            reader,
            column: column.into(),
            params,
            target,
        }
    }
}

/// Bytes the target table is expected to occupy.
///
/// A row hint is converted with the source table's average row size,
/// `(DATA_LENGTH + INDEX_LENGTH) / TABLE_ROWS`.
pub fn target_bytes(target: EstimateTarget, stats: &TableStats, table: &TableRef) -> Result<u128, SplitError> {
    match target {
        EstimateTarget::SizeMb(mb) => Ok(mib_to_bytes(mb)),
        EstimateTarget::Rows(rows) => {
            if stats.rows == 0 {
                return Err(SplitError::EmptyDomain(format!(
                    "{table} has no rows to derive an average row size from"
                )));
            }
            Ok(rows as u128 * stats.bytes as u128 / stats.rows as u128)
        }
    }
}

/// Number of regions the target should start with.
pub fn needed_regions(params: &EstimateParams, stats: &TableStats, table: &TableRef) -> Result<u64, SplitError> {
    let bytes = target_bytes(params.target, stats, table)?;
    Ok(regions_for_bytes(bytes, params.region_size_mb))
}

#[async_trait]
impl SplitPlanner for EstimatePlanner {
    fn strategy(&self) -> Strategy {
        Strategy::Estimate
    }

    async fn plan(&self, table: &TableRef) -> Result<SplitPlan, SplitError> {
        let stats = self.reader.table_stats(table).await?;
        let needed = needed_regions(&self.params, &stats, table)?;
        let (target, index) = self.target.resolve(table);
        let columns = vec![self.column.clone()];

        let distinct = self.reader.distinct_count(table, &columns).await?;
        info!(
            target: "presplit::estimate",
            table = %table,
            column = %self.column,
            needed,
            distinct,
            "Estimated region count"
        );

        match check_cardinality(distinct, needed) {
            Ok(()) => {
                let values = self.reader.distinct_values(table, &columns).await?;
                let points = stride::pick(&values, needed)
                    .into_iter()
                    .map(SplitPoint::Values)
                    .collect();
                SplitPlan::new(target, index, Strategy::Estimate, points)
            }
            Err(e) => {
                e.log_error(&table.to_string());
                warn!(
                    target: "presplit::estimate",
                    table = %table,
                    column = %self.column,
                    "Falling back to min/max interpolation"
                );
                let domain = self.reader.column_domain(table, &self.column).await?;
                let points = interpolate(&domain, needed)?
                    .into_iter()
                    .map(SplitPoint::value)
                    .collect();
                Ok(SplitPlan::new(target, index, Strategy::Estimate, points)?.approximate())
            }
        }
    }
}

/// `InsufficientCardinality` when fewer than `needed - 1` distinct values exist.
pub fn check_cardinality(distinct: u64, needed: u64) -> Result<(), SplitError> {
    if distinct >= needed.saturating_sub(1) && distinct > 0 {
        Ok(())
    } else {
        Err(SplitError::InsufficientCardinality { distinct, needed })
    }
}

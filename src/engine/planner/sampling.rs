use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::command::types::SamplingSpec;
use crate::engine::errors::SplitError;
use crate::engine::sql::TableReader;
use crate::engine::types::{SplitPlan, SplitPoint, Strategy, TableRef};

use super::stride::{self, regions_for_rows};
use super::traits::SplitPlanner;

/// Copies a base index's split shape onto a new index, reading the base
/// index's whole distinct-value set in one query.
pub struct SamplingPlanner {
    reader: Arc<dyn TableReader>,
    spec: SamplingSpec,
    rows_per_region: u64,
}

impl SamplingPlanner {
    pub fn new(reader: Arc<dyn TableReader>, spec: SamplingSpec, rows_per_region: u64) -> Self {
        Self {
            reader,
            spec,
            rows_per_region,
        }
    }
}

/// Columns of the base index, or `EmptyDomain` if the index does not exist.
pub(super) async fn base_index_columns(
    reader: &dyn TableReader,
    base: &TableRef,
    index: &str,
) -> Result<Vec<String>, SplitError> {
    let columns = reader.index_columns(base, index).await?;
    if columns.is_empty() {
        return Err(SplitError::EmptyDomain(format!(
            "index {index} not found on {base}"
        )));
    }
    Ok(columns)
}

#[async_trait]
impl SplitPlanner for SamplingPlanner {
    fn strategy(&self) -> Strategy {
        Strategy::Sampling
    }

    async fn plan(&self, base: &TableRef) -> Result<SplitPlan, SplitError> {
        let columns = base_index_columns(self.reader.as_ref(), base, &self.spec.base_index).await?;
        let regions = regions_for_rows(self.spec.desired_rows, self.rows_per_region);

        let values = self.reader.distinct_values(base, &columns).await?;
        if values.is_empty() {
            return Err(SplitError::EmptyDomain(format!(
                "index {} on {base} has no values",
                self.spec.base_index
            )));
        }

        let distinct = values.len() as u64;
        let short = stride::is_short(distinct, regions);
        if short {
            warn!(
                target: "presplit::sampling",
                base = %base,
                distinct,
                regions,
                "Base index has fewer distinct values than requested regions"
            );
        }

        let points: Vec<SplitPoint> = stride::pick(&values, regions)
            .into_iter()
            .map(SplitPoint::Values)
            .collect();
        info!(
            target: "presplit::sampling",
            base = %base,
            target = %self.spec.target,
            distinct,
            regions,
            points = points.len(),
            "Sampling plan ready"
        );

        Ok(SplitPlan::new(
            self.spec.target.clone(),
            Some(self.spec.target_index.clone()),
            Strategy::Sampling,
            points,
        )?
        .short(short))
    }
}

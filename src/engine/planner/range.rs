use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::engine::errors::SplitError;
use crate::engine::sql::{HIDDEN_ROWID, TableReader};
use crate::engine::types::{SplitPlan, SplitPoint, Strategy, TableRef};

use super::interpolate::interpolate;
use super::stride::regions_for_bytes;
use super::traits::SplitPlanner;

/// Interpolates boundaries across the row handle's `[min, max]`.
///
/// The handle is the first column of a clustered primary key, or the hidden
/// row id otherwise. Non-arithmetic handles are declined with
/// `UnorderableDomain`; the caller picks a value-sampling strategy instead.
pub struct RangePlanner {
    reader: Arc<dyn TableReader>,
    region_size_mb: u64,
}

impl RangePlanner {
    pub fn new(reader: Arc<dyn TableReader>, region_size_mb: u64) -> Self {
        Self {
            reader,
            region_size_mb,
        }
    }
}

#[async_trait]
impl SplitPlanner for RangePlanner {
    fn strategy(&self) -> Strategy {
        Strategy::Range
    }

    async fn plan(&self, table: &TableRef) -> Result<SplitPlan, SplitError> {
        let stats = self.reader.table_stats(table).await?;
        let regions = regions_for_bytes(stats.bytes as u128, self.region_size_mb);

        let pk = self.reader.primary_key(table).await?;
        let column = pk.first().map(String::as_str).unwrap_or(HIDDEN_ROWID);
        debug!(
            target: "presplit::range",
            table = %table,
            column,
            regions,
            size_mb = stats.size_mb(),
            "Planning range split"
        );

        let domain = self.reader.column_domain(table, column).await?;
        let values = interpolate(&domain, regions)?;
        let plan = SplitPlan::new(
            table.clone(),
            None,
            Strategy::Range,
            values.into_iter().map(SplitPoint::value).collect(),
        )?;

        info!(
            target: "presplit::range",
            table = %table,
            column,
            points = plan.len(),
            "Range plan ready"
        );
        Ok(plan)
    }
}

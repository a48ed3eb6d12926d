use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::engine::errors::{SplitError, StatusError};
use crate::engine::status::RegionSource;
use crate::engine::types::region::{check_coverage, order_contiguous};
use crate::engine::types::{SplitPlan, SplitPoint, Strategy, TableRef};

use super::traits::SplitPlanner;

/// Re-emits the start keys of the table's live regions, unmodified.
///
/// The first region's start key is the table's own start and is dropped.
pub struct KeyPlanner {
    regions: Arc<dyn RegionSource>,
}

impl KeyPlanner {
    pub fn new(regions: Arc<dyn RegionSource>) -> Self {
        Self { regions }
    }
}

#[async_trait]
impl SplitPlanner for KeyPlanner {
    fn strategy(&self) -> Strategy {
        Strategy::Key
    }

    async fn plan(&self, table: &TableRef) -> Result<SplitPlan, SplitError> {
        let reported = self.regions.table_regions(table).await?;
        let count = reported.regions.len();
        let malformed = |detail: String| StatusError::Malformed(format!("{table}: {detail}"));
        let ordered = order_contiguous(reported.regions).map_err(malformed)?;
        if let Some(table_id) = reported.table_id {
            check_coverage(&ordered, table_id).map_err(malformed)?;
        }

        let points: Vec<SplitPoint> = ordered
            .into_iter()
            .skip(1)
            .map(|r| SplitPoint::Key(r.start_key))
            .collect();

        info!(
            target: "presplit::key",
            table = %table,
            regions = count,
            points = points.len(),
            "Key plan ready"
        );
        SplitPlan::new(table.clone(), None, Strategy::Key, points)
    }
}

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::command::types::SamplingSpec;
use crate::engine::errors::SplitError;
use crate::engine::sql::TableReader;
use crate::engine::types::{SplitPlan, SplitPoint, SqlValue, Strategy, TableRef};

use super::sampling::base_index_columns;
use super::stride::{self, regions_for_rows};
use super::traits::SplitPlanner;

/// Same output as [`super::SamplingPlanner`], but walks the base index in
/// keyset pages of `page_size` distinct tuples so memory stays bounded by
/// one page regardless of the index size.
pub struct ReckonPlanner {
    reader: Arc<dyn TableReader>,
    spec: SamplingSpec,
    rows_per_region: u64,
    page_size: usize,
}

impl ReckonPlanner {
    pub fn new(
        reader: Arc<dyn TableReader>,
        spec: SamplingSpec,
        rows_per_region: u64,
        page_size: usize,
    ) -> Self {
        Self {
            reader,
            spec,
            rows_per_region,
            page_size: page_size.max(1),
        }
    }
}

#[async_trait]
impl SplitPlanner for ReckonPlanner {
    fn strategy(&self) -> Strategy {
        Strategy::Reckon
    }

    async fn plan(&self, base: &TableRef) -> Result<SplitPlan, SplitError> {
        let columns = base_index_columns(self.reader.as_ref(), base, &self.spec.base_index).await?;
        let regions = regions_for_rows(self.spec.desired_rows, self.rows_per_region);

        let distinct = self.reader.distinct_count(base, &columns).await?;
        if distinct == 0 {
            return Err(SplitError::EmptyDomain(format!(
                "index {} on {base} has no values",
                self.spec.base_index
            )));
        }
        let short = stride::is_short(distinct, regions);
        let targets = stride::positions(distinct, regions);

        let mut points: Vec<SplitPoint> = Vec::with_capacity(targets.len());
        let mut next_target = targets.iter().copied().peekable();
        let mut cursor: Option<Vec<SqlValue>> = None;
        let mut seen: u64 = 0;
        let mut pages: usize = 0;

        while next_target.peek().is_some() {
            let page = self
                .reader
                .distinct_page(base, &columns, cursor.as_deref(), self.page_size)
                .await?;
            pages += 1;
            debug!(
                target: "presplit::reckon",
                base = %base,
                page = pages,
                rows = page.len(),
                seen,
                "Fetched page"
            );

            let (Some(first), Some(last)) = (page.first(), page.last()) else {
                break;
            };
            if let Some(prev) = &cursor {
                if first == prev || last == prev {
                    return Err(SplitError::PaginationStall {
                        table: base.to_string(),
                        pages,
                        detail: "page did not advance past the previous boundary".to_string(),
                    });
                }
            }

            let full_page = page.len() >= self.page_size;
            for tuple in &page {
                seen += 1;
                if next_target.peek() == Some(&seen) {
                    points.push(SplitPoint::Values(tuple.clone()));
                    next_target.next();
                }
            }
            cursor = page.into_iter().last();

            if !full_page {
                break;
            }
        }

        if next_target.peek().is_some() {
            warn!(
                target: "presplit::reckon",
                base = %base,
                expected = distinct,
                seen,
                "Index shrank while paging; emitting the boundaries found"
            );
        }

        info!(
            target: "presplit::reckon",
            base = %base,
            target = %self.spec.target,
            distinct,
            regions,
            pages,
            points = points.len(),
            "Reckon plan ready"
        );

        Ok(SplitPlan::new(
            self.spec.target.clone(),
            Some(self.spec.target_index.clone()),
            Strategy::Reckon,
            points,
        )?
        .short(short))
    }
}

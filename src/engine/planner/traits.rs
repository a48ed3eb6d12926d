use async_trait::async_trait;

use crate::engine::errors::SplitError;
use crate::engine::types::{SplitPlan, Strategy, TableRef};

/// Computes the split plan for one table.
///
/// Implementations hold only immutable configuration, so a single planner
/// is shared by every table pipeline of a run.
#[async_trait]
pub trait SplitPlanner: Send + Sync {
    fn strategy(&self) -> Strategy;

    async fn plan(&self, table: &TableRef) -> Result<SplitPlan, SplitError>;
}

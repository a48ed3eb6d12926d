use std::collections::BTreeMap;
use std::fmt;

use crate::engine::errors::SplitError;
use crate::engine::types::TableRef;

/// How one table's pipeline ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOutcome {
    Written { points: usize },
    /// The planner declined the table; nothing was written.
    Declined { reason: String },
    Failed { kind: String, message: String },
    /// The run was cancelled before this table started.
    Cancelled,
}

impl TableOutcome {
    pub fn failed(err: &SplitError) -> Self {
        TableOutcome::Failed {
            kind: err.kind().to_string(),
            message: err.to_string(),
        }
    }
}

impl fmt::Display for TableOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableOutcome::Written { points } => write!(f, "written ({points} points)"),
            TableOutcome::Declined { reason } => write!(f, "declined: {reason}"),
            TableOutcome::Failed { kind, message } => write!(f, "failed [{kind}]: {message}"),
            TableOutcome::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Aggregate outcome of a run, keyed by table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    outcomes: BTreeMap<TableRef, TableOutcome>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, table: TableRef, outcome: TableOutcome) {
        self.outcomes.insert(table, outcome);
    }

    pub fn outcome(&self, table: &TableRef) -> Option<&TableOutcome> {
        self.outcomes.get(table)
    }

    pub fn outcomes(&self) -> impl Iterator<Item = (&TableRef, &TableOutcome)> {
        self.outcomes.iter()
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    fn count(&self, pred: impl Fn(&TableOutcome) -> bool) -> usize {
        self.outcomes.values().filter(|o| pred(o)).count()
    }

    pub fn succeeded(&self) -> usize {
        self.count(|o| matches!(o, TableOutcome::Written { .. }))
    }

    pub fn declined(&self) -> usize {
        self.count(|o| matches!(o, TableOutcome::Declined { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, TableOutcome::Failed { .. }))
    }

    pub fn cancelled(&self) -> usize {
        self.count(|o| matches!(o, TableOutcome::Cancelled))
    }

    pub fn failures(&self) -> impl Iterator<Item = (&TableRef, &TableOutcome)> {
        self.outcomes
            .iter()
            .filter(|(_, o)| matches!(o, TableOutcome::Failed { .. }))
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// True when every table was planned and none failed; drives the exit status.
    pub fn is_clean(&self) -> bool {
        !self.has_failures() && self.cancelled() == 0
    }

    /// One-line totals.
    pub fn summary(&self) -> String {
        format!(
            "{} table(s): {} succeeded, {} declined, {} failed, {} cancelled",
            self.len(),
            self.succeeded(),
            self.declined(),
            self.failed(),
            self.cancelled()
        )
    }
}

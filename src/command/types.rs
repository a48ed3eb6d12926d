use std::sync::Arc;

use regex::Regex;

use crate::engine::errors::SplitError;
use crate::engine::types::TableRef;
use crate::engine::writer::OutputSink;

/// Which tables of the database a run targets.
#[derive(Debug, Clone)]
pub enum TableSelection {
    All,
    Include(Vec<String>),
    Exclude(Vec<String>),
    Regex(Regex),
}

impl TableSelection {
    /// Builds a selection from the four mutually exclusive CLI flags.
    /// Exactly one must be set.
    pub fn from_flags(
        all: bool,
        include: Option<Vec<String>>,
        exclude: Option<Vec<String>>,
        regex: Option<String>,
    ) -> Result<Self, SplitError> {
        let set = [all, include.is_some(), exclude.is_some(), regex.is_some()]
            .iter()
            .filter(|f| **f)
            .count();
        if set != 1 {
            return Err(SplitError::Selection(format!(
                "exactly one of --all, --include, --exclude, --regex is required, got {set}"
            )));
        }

        if all {
            return Ok(TableSelection::All);
        }
        if let Some(list) = include {
            return Ok(TableSelection::Include(list));
        }
        if let Some(list) = exclude {
            return Ok(TableSelection::Exclude(list));
        }
        let pattern = regex.unwrap_or_default();
        Regex::new(&pattern)
            .map(TableSelection::Regex)
            .map_err(|e| SplitError::Selection(format!("invalid --regex {pattern:?}: {e}")))
    }
}

/// Drives the size estimate of the table that will receive the splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateTarget {
    Rows(u64),
    SizeMb(u64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstimateParams {
    pub target: EstimateTarget,
    pub region_size_mb: u64,
}

impl EstimateParams {
    /// A row hint wins over a size hint when both are given.
    pub fn from_hints(
        rows: Option<u64>,
        size_mb: Option<u64>,
        region_size_mb: u64,
    ) -> Result<Self, SplitError> {
        let target = match (rows.filter(|r| *r > 0), size_mb.filter(|s| *s > 0)) {
            (Some(r), _) => EstimateTarget::Rows(r),
            (None, Some(s)) => EstimateTarget::SizeMb(s),
            (None, None) => {
                return Err(SplitError::InvalidParams(
                    "one of --new-table-row or --new-table-size is required".to_string(),
                ));
            }
        };
        if region_size_mb == 0 {
            return Err(SplitError::InvalidParams(
                "--region-size must be positive".to_string(),
            ));
        }
        Ok(Self {
            target,
            region_size_mb,
        })
    }
}

/// Where planned boundaries are applied. Unset parts default to the source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetNaming {
    pub db: Option<String>,
    pub table: Option<String>,
    pub index: Option<String>,
}

impl TargetNaming {
    pub fn resolve(&self, source: &TableRef) -> (TableRef, Option<String>) {
        let table = TableRef::new(
            self.db.clone().unwrap_or_else(|| source.schema.clone()),
            self.table.clone().unwrap_or_else(|| source.name.clone()),
        );
        (table, self.index.clone())
    }
}

/// Copy a base index's split shape onto a new table's index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplingSpec {
    pub base_index: String,
    pub target: TableRef,
    pub target_index: String,
    pub desired_rows: u64,
}

/// The strategy a run uses, with its strategy-specific inputs.
#[derive(Debug, Clone)]
pub enum SplitCommand {
    Range,
    Key,
    Estimate {
        column: String,
        params: EstimateParams,
        target: TargetNaming,
    },
    Sampling(SamplingSpec),
    Reckon {
        spec: SamplingSpec,
        page_size: usize,
    },
}

impl SplitCommand {
    pub fn name(&self) -> &'static str {
        match self {
            SplitCommand::Range => "range",
            SplitCommand::Key => "key",
            SplitCommand::Estimate { .. } => "estimate",
            SplitCommand::Sampling(_) => "sampling",
            SplitCommand::Reckon { .. } => "reckon",
        }
    }
}

/// The validated input of one run, threaded through every planner.
pub struct SplitRequest {
    pub db: String,
    pub selection: TableSelection,
    pub command: SplitCommand,
    pub concurrency: usize,
    pub sink: Arc<dyn OutputSink>,
}

impl SplitRequest {
    pub fn new(
        db: impl Into<String>,
        selection: TableSelection,
        command: SplitCommand,
        concurrency: usize,
        sink: Arc<dyn OutputSink>,
    ) -> Self {
        Self {
            db: db.into(),
            selection,
            command,
            concurrency: concurrency.max(1),
            sink,
        }
    }
}

use std::cmp::Ordering;
use std::fmt;

use crate::engine::errors::SplitError;

use super::table_ref::TableRef;
use super::value::{SqlValue, compare_tuples};

/// Which boundary-computation strategy produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Range,
    Key,
    Estimate,
    Sampling,
    Reckon,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Range => "range",
            Strategy::Key => "key",
            Strategy::Estimate => "estimate",
            Strategy::Sampling => "sampling",
            Strategy::Reckon => "reckon",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A boundary at which the engine is told to start a new region.
#[derive(Debug, Clone, PartialEq)]
pub enum SplitPoint {
    /// Column value tuple, one entry per index column.
    Values(Vec<SqlValue>),
    /// Raw key in the engine's native encoding.
    Key(Vec<u8>),
}

impl SplitPoint {
    pub fn value(v: SqlValue) -> Self {
        SplitPoint::Values(vec![v])
    }

    /// Ordering between two points, or `None` when it is defined by the
    /// server's collation rather than something we can compare here.
    fn ordering(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (SplitPoint::Key(a), SplitPoint::Key(b)) => Some(a.cmp(b)),
            (SplitPoint::Values(a), SplitPoint::Values(b)) => {
                let collated = a
                    .iter()
                    .chain(b.iter())
                    .any(|v| matches!(v, SqlValue::Text(_)));
                if collated {
                    None
                } else {
                    compare_tuples(a, b)
                }
            }
            _ => None,
        }
    }
}

/// The immutable output of one planner invocation for one table.
#[derive(Debug, Clone, PartialEq)]
pub struct SplitPlan {
    pub table: TableRef,
    pub index: Option<String>,
    pub strategy: Strategy,
    pub points: Vec<SplitPoint>,
    /// Points came from min/max interpolation instead of observed values.
    pub approximate: bool,
    /// Fewer distinct values existed than regions were requested.
    pub short: bool,
}

impl SplitPlan {
    /// Builds a plan, rejecting point sequences that are not strictly increasing.
    pub fn new(
        table: TableRef,
        index: Option<String>,
        strategy: Strategy,
        points: Vec<SplitPoint>,
    ) -> Result<Self, SplitError> {
        for (pos, pair) in points.windows(2).enumerate() {
            let in_order = match pair[0].ordering(&pair[1]) {
                Some(ord) => ord == Ordering::Less,
                None => pair[0] != pair[1],
            };
            if !in_order {
                return Err(SplitError::UnorderedPlan {
                    table: table.to_string(),
                    position: pos + 1,
                });
            }
        }
        Ok(Self {
            table,
            index,
            strategy,
            points,
            approximate: false,
            short: false,
        })
    }

    pub fn approximate(mut self) -> Self {
        self.approximate = true;
        self
    }

    pub fn short(mut self, short: bool) -> Self {
        self.short = short;
        self
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

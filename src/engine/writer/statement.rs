use std::sync::Arc;

use tracing::info;

use crate::engine::errors::SplitError;
use crate::engine::sql::format_tuple;
use crate::engine::types::{SplitPlan, SplitPoint, quote_ident};

use super::sink::OutputSink;

/// Renders a plan into `SPLIT TABLE` statements and hands them to a sink.
pub struct StatementWriter {
    sink: Arc<dyn OutputSink>,
    batch_size: usize,
}

impl StatementWriter {
    pub fn new(sink: Arc<dyn OutputSink>, batch_size: usize) -> Self {
        Self {
            sink,
            batch_size: batch_size.max(1),
        }
    }

    /// The full entry text for one plan: a header comment followed by one
    /// statement per batch of at most `batch_size` points.
    pub fn render(&self, plan: &SplitPlan) -> String {
        let mut out = header(plan);
        if plan.is_empty() {
            out.push_str("-- no split points\n");
            return out;
        }

        let mut target = format!("SPLIT TABLE {}", plan.table.quoted());
        if let Some(index) = &plan.index {
            target.push_str(" INDEX ");
            target.push_str(&quote_ident(index));
        }

        for batch in plan.points.chunks(self.batch_size) {
            let tuples: Vec<String> = batch.iter().map(render_point).collect();
            out.push_str(&target);
            out.push_str(" BY ");
            out.push_str(&tuples.join(","));
            out.push_str(";\n");
        }
        out
    }

    pub fn write(&self, plan: &SplitPlan) -> Result<(), SplitError> {
        let contents = self.render(plan);
        self.sink.write_entry(&plan.table, &contents)?;
        info!(
            target: "presplit::writer",
            table = %plan.table,
            strategy = %plan.strategy,
            points = plan.len(),
            "Statements written"
        );
        Ok(())
    }
}

fn header(plan: &SplitPlan) -> String {
    let mut line = format!(
        "-- presplit: strategy={} table={} points={}",
        plan.strategy,
        plan.table,
        plan.len()
    );
    if let Some(index) = &plan.index {
        line.push_str(&format!(" index={index}"));
    }
    if plan.approximate {
        line.push_str(" approximate");
    }
    if plan.short {
        line.push_str(" short");
    }
    line.push('\n');
    line
}

fn render_point(point: &SplitPoint) -> String {
    match point {
        SplitPoint::Values(values) => format_tuple(values),
        SplitPoint::Key(key) => format!("(x'{}')", hex::encode(key)),
    }
}

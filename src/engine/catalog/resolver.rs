use std::collections::BTreeSet;

use tracing::{debug, info};

use crate::command::types::TableSelection;
use crate::engine::errors::SplitError;
use crate::engine::types::TableRef;

/// Turns a table selection into the concrete target tables of one database.
pub struct TableResolver<'a> {
    db: &'a str,
    catalog: &'a [String],
}

impl<'a> TableResolver<'a> {
    pub fn new(db: &'a str, catalog: &'a [String]) -> Self {
        Self { db, catalog }
    }

    /// Resolves `selection` against the catalog. The result has no
    /// duplicates and is sorted by table name.
    pub fn resolve(&self, selection: &TableSelection) -> Result<Vec<TableRef>, SplitError> {
        let known: BTreeSet<&str> = self.catalog.iter().map(String::as_str).collect();

        let picked: BTreeSet<&str> = match selection {
            TableSelection::All => known.clone(),
            TableSelection::Include(names) => {
                let missing: Vec<&str> = names
                    .iter()
                    .map(String::as_str)
                    .filter(|n| !known.contains(n))
                    .collect();
                if !missing.is_empty() {
                    return Err(SplitError::UnknownTable(format!(
                        "{} (database {})",
                        missing.join(", "),
                        self.db
                    )));
                }
                names.iter().map(String::as_str).collect()
            }
            TableSelection::Exclude(names) => {
                let excluded: BTreeSet<&str> = names.iter().map(String::as_str).collect();
                known.difference(&excluded).copied().collect()
            }
            TableSelection::Regex(re) => known.iter().copied().filter(|n| re.is_match(n)).collect(),
        };

        debug!(
            target: "presplit::resolver",
            db = self.db,
            catalog = known.len(),
            selected = picked.len(),
            "Resolved table selection"
        );
        if picked.is_empty() {
            info!(target: "presplit::resolver", db = self.db, "Selection matched no tables");
        }

        Ok(picked
            .into_iter()
            .map(|name| TableRef::new(self.db, name))
            .collect())
    }
}

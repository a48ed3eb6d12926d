use std::collections::{BTreeMap, HashSet};
use std::io;

use parking_lot::Mutex;

use crate::engine::types::TableRef;
use crate::engine::writer::OutputSink;

/// `OutputSink` keeping entries in memory, keyed by `{db}.{table}`.
#[derive(Default)]
pub struct MemorySink {
    entries: Mutex<BTreeMap<String, String>>,
    failing: HashSet<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes for `table` fail with a permission error.
    pub fn failing_for(mut self, table: &TableRef) -> Self {
        self.failing.insert(table.file_stem());
        self
    }

    pub fn entry(&self, table: &TableRef) -> Option<String> {
        self.entries.lock().get(&table.file_stem()).cloned()
    }

    /// Every entry, keyed by file stem.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries.lock().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.lock().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl OutputSink for MemorySink {
    fn write_entry(&self, table: &TableRef, contents: &str) -> io::Result<()> {
        let name = table.file_stem();
        if self.failing.contains(&name) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("cannot write {name}"),
            ));
        }
        self.entries.lock().insert(name, contents.to_string());
        Ok(())
    }
}

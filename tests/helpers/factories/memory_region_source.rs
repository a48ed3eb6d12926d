use std::collections::HashMap;

use async_trait::async_trait;

use crate::engine::errors::StatusError;
use crate::engine::status::RegionSource;
use crate::engine::types::{RegionDescriptor, TableRef, TableRegions};

/// `RegionSource` serving fixed layouts per table.
#[derive(Default)]
pub struct MemoryRegionSource {
    layouts: HashMap<TableRef, Vec<RegionDescriptor>>,
    table_ids: HashMap<TableRef, i64>,
    unreachable: HashMap<TableRef, String>,
}

impl MemoryRegionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layout(mut self, table: TableRef, regions: Vec<RegionDescriptor>) -> Self {
        self.layouts.insert(table, regions);
        self
    }

    /// Reports `id` as the table's catalog id alongside its layout.
    pub fn table_id(mut self, table: TableRef, id: i64) -> Self {
        self.table_ids.insert(table, id);
        self
    }

    pub fn unreachable(mut self, table: TableRef, message: &str) -> Self {
        self.unreachable.insert(table, message.to_string());
        self
    }
}

#[async_trait]
impl RegionSource for MemoryRegionSource {
    async fn table_regions(&self, table: &TableRef) -> Result<TableRegions, StatusError> {
        if let Some(message) = self.unreachable.get(table) {
            return Err(StatusError::Unreachable(message.clone()));
        }
        let regions = self
            .layouts
            .get(table)
            .cloned()
            .ok_or_else(|| StatusError::Http {
                status: 404,
                uri: format!("/tables/{}/{}/regions", table.schema, table.name),
            })?;
        Ok(TableRegions::new(self.table_ids.get(table).copied(), regions))
    }
}

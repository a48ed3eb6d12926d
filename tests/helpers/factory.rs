pub use super::factories::{
    MemoryRegionSource, MemorySink, MemoryTable, MemoryTableReader, RegionFactory,
    ScriptedSqlClient, TableRefFactory,
};

pub struct Factory;

impl Factory {
    pub fn table_ref() -> TableRefFactory {
        TableRefFactory::new()
    }

    pub fn regions() -> RegionFactory {
        RegionFactory::new()
    }

    pub fn memory_table() -> MemoryTable {
        MemoryTable::new()
    }

    pub fn table_reader() -> MemoryTableReader {
        MemoryTableReader::new()
    }

    pub fn region_source() -> MemoryRegionSource {
        MemoryRegionSource::new()
    }

    pub fn sink() -> MemorySink {
        MemorySink::new()
    }

    pub fn sql_client() -> ScriptedSqlClient {
        ScriptedSqlClient::new()
    }
}

pub mod memory_region_source;
pub mod memory_sink;
pub mod memory_table_reader;
pub mod region_factory;
pub mod scripted_sql_client;
pub mod table_ref_factory;

pub use memory_region_source::MemoryRegionSource;
pub use memory_sink::MemorySink;
pub use memory_table_reader::{MemoryTable, MemoryTableReader};
pub use region_factory::RegionFactory;
pub use scripted_sql_client::ScriptedSqlClient;
pub use table_ref_factory::TableRefFactory;

#[cfg(test)]
mod memory_sink_test;
#[cfg(test)]
mod memory_table_reader_test;
#[cfg(test)]
mod region_factory_test;
#[cfg(test)]
mod table_ref_factory_test;

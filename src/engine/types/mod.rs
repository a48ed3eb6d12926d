pub mod column;
pub mod plan;
pub mod region;
pub mod table_ref;
pub mod value;

pub use column::{ColumnDomain, ColumnType};
pub use plan::{SplitPlan, SplitPoint, Strategy};
pub use region::{RegionDescriptor, TableRegions};
pub use table_ref::{TableRef, quote_ident};
pub use value::SqlValue;

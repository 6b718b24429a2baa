mod filter;
mod record;

pub use filter::{FilterState, SortKey, TypeFilter};
pub use record::{ResourceRecord, ResourceType};

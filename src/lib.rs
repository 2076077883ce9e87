// ToDone - personal task list kept in a plain TSV file

pub mod clock;
pub mod config;
pub mod error;
pub mod launch;
pub mod record;
pub mod report;
pub mod sort;
pub mod store;
pub mod tsv;

// Re-export main types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::Config;
pub use error::StoreError;
pub use record::TaskRecord;
pub use sort::SortKey;
pub use store::{Listing, Removal, TaskStore};

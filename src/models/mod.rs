pub mod entry;
pub mod summary;

pub use entry::LogEntry;
pub use summary::{FileWarnings, Summary};

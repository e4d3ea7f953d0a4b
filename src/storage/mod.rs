//! Storage layer: content store, version chains, persistence and the
//! repository manager that ties them together

pub mod content_store;
pub mod persistence;
pub mod repository;
pub mod version_chain;

// Re-export commonly used items
pub use content_store::ContentStore;
pub use persistence::{LoadOutcome, Persistence, Snapshot};
pub use repository::{InitSummary, RecordOutcome, Repository, StatusReport};
pub use version_chain::{ChangeOutcome, FileHistoryIndex, VersionChain};

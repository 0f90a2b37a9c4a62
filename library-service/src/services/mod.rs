pub mod library;
pub mod metrics;
pub mod query;
pub mod storage;

pub use library::LibraryIndex;
pub use self::metrics::{get_metrics, init_metrics};
pub use query::{filter_and_sort, DocumentQuery, SortKey, SortOrder};
pub use storage::{MemoryStorage, Storage};

// Recommendation pipeline: criteria → filter → purpose scoring → top-N.
// Everything below `handlers` is synchronous and free of I/O; handlers run it
// inside tokio::task::spawn_blocking together with the dataset load.

pub mod criteria;
pub mod filter;
pub mod handlers;
pub mod scoring;
pub mod selector;

pub use criteria::{CriteriaError, FilterCriteria, Purpose, Range};
pub use selector::{recommend, Recommendation, ScoredResult};

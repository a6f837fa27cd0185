//! Workflow-run history: remote fetch with cache, and the seeded simulator
//! used when the remote side is skipped or returns nothing.

mod cache;
mod fetch;
mod model;
mod simulate;
mod table;

pub use cache::TtlCache;
pub use fetch::{FetchSettings, HttpTransport, RunFetcher, Transport};
pub use model::{RunId, WorkflowRun};
pub use simulate::{CONCLUSION_WEIGHTS, Conclusion, RunSimulator, RunStatus, STATUS_WEIGHTS, SimulatedRun};
pub use table::RunRow;

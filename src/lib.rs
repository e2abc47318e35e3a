//! Randomized private-key search over partitioned keyspace ranges.
//!
//! Ranges come from a JSON file; a fixed pool of workers samples keys
//! uniformly within each range and derives legacy mainnet addresses until
//! one matches the target, the per-range cap runs out, or the process is
//! told to stop. A found key is appended to a log file before anything
//! else is told about it.

pub mod address;
pub mod error;
pub mod keylog;
pub mod pool;
pub mod ranges;
pub mod sampler;
pub mod signal;
pub mod worker;

pub use error::{Result, SweepError};
pub use pool::{SearchConfig, default_worker_count, run_search};
pub use ranges::{KeyRange, RangeSpec, load_ranges, write_ranges};
pub use sampler::sample_key;
pub use signal::StopSignal;
pub use worker::{FoundKey, SearchContext, search_range};

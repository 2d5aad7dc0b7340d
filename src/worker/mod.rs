//! Compute workers: the polling loop, its task sources and the cost model.

pub mod client;
pub mod cost;
pub mod pool;
pub mod source;

pub use client::HttpTaskSource;
pub use cost::{CostModel, SimulatedCost, ZeroCost};
pub use pool::{Completed, DEFAULT_POLL_INTERVAL, WorkerPool};
pub use source::TaskSource;

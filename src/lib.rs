//! Arithmetic expression orchestrator.
//!
//! Clients submit single-operation expressions such as `"3 add 4"`. Each one
//! is registered as pending, decomposed into a [`dispatch::Task`] and queued;
//! independent workers poll the queue, simulate the operation's cost, compute
//! and report the result back by id.
//!
//! - **`expression`**: the expression model, its registry and the text parser.
//! - **`dispatch`**: the bounded task queue and the expression processor.
//! - **`orchestrator`**: the facade tying registry, queue and processor together.
//! - **`worker`**: the worker pool, its task sources and the cost model.
//! - **`server`**: the axum HTTP surface.

pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod expression;
pub mod orchestrator;
pub mod server;
pub mod wire;
pub mod worker;

pub use error::CalcError;
pub use orchestrator::Orchestrator;

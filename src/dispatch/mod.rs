mod processor;
mod queue;
mod task;

pub use processor::{DEFAULT_BACKLOG, ExpressionProcessor, ProcessOutcome, process};
pub use queue::{DEFAULT_CAPACITY, TaskQueue};
pub use task::{Operation, Task};

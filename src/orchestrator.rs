use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::dispatch::{DEFAULT_BACKLOG, DEFAULT_CAPACITY, ExpressionProcessor, Task, TaskQueue};
use crate::error::CalcError;
use crate::expression::{Expression, ExpressionRegistry};

/// Drives expressions from submission to completion.
///
/// Bundles the registry, the task queue and the processor behind the
/// operations the HTTP layer and in-process workers need. Cloning is cheap:
/// every clone shares the same state.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    registry: Arc<ExpressionRegistry>,
    queue: Arc<TaskQueue>,
    processor: ExpressionProcessor,
}

impl Orchestrator {
    /// Create an orchestrator and start its processing loop.
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(queue_capacity: usize, processor_backlog: usize) -> (Self, JoinHandle<()>) {
        let registry = Arc::new(ExpressionRegistry::new());
        let queue = Arc::new(TaskQueue::new(queue_capacity));
        let (processor, handle) =
            ExpressionProcessor::spawn(registry.clone(), queue.clone(), processor_backlog);

        (
            Self {
                registry,
                queue,
                processor,
            },
            handle,
        )
    }

    /// Create an orchestrator with the default queue capacity and backlog.
    pub fn with_defaults() -> (Self, JoinHandle<()>) {
        Self::new(DEFAULT_CAPACITY, DEFAULT_BACKLOG)
    }

    /// Register an expression as pending and schedule it for processing.
    ///
    /// Rejects empty ids and empty expression text without touching the registry.
    pub async fn submit(&self, id: &str, expression: &str) -> Result<Expression, CalcError> {
        if id.is_empty() || expression.is_empty() {
            return Err(CalcError::InvalidData);
        }

        let entry = self.registry.put(id, expression);
        self.processor.schedule(entry.clone()).await?;
        tracing::info!("Accepted expression {}: {:?}", id, expression);
        Ok(entry)
    }

    pub fn expression(&self, id: &str) -> Result<Expression, CalcError> {
        self.registry
            .get(id)
            .ok_or_else(|| CalcError::NotFound(id.to_string()))
    }

    pub fn expressions(&self) -> Vec<Expression> {
        self.registry.list()
    }

    /// Hand the oldest queued task to the caller, or `None` right away.
    pub fn poll_task(&self) -> Option<Task> {
        let task = self.queue.try_pop();
        if let Some(task) = &task {
            tracing::debug!("Dispatched task {} ({})", task.id, task.operation);
        }
        task
    }

    /// Apply a worker's result. Unknown ids are ignored.
    pub fn report_result(&self, id: &str, value: f64) {
        if self.registry.set_result(id, value) {
            tracing::info!("Expression {} completed with result {}", id, value);
        } else {
            tracing::debug!("Ignoring result for unknown expression {}", id);
        }
    }

    pub fn registry(&self) -> &ExpressionRegistry {
        &self.registry
    }

    pub fn queue(&self) -> &TaskQueue {
        &self.queue
    }
}

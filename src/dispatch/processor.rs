//! Expression Processor
//!
//! Turns a freshly registered expression into a task. Submissions are pushed
//! onto a bounded backlog and drained by a single processing loop, so a burst
//! of submissions costs queue slots rather than one background unit each.
//!
//! Processing never blocks: the expression is moved to `InProgress` first and
//! the task is then offered to the [`TaskQueue`]. If the text does not parse,
//! or the queue is full, the expression stays `InProgress` with no task.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::queue::TaskQueue;
use super::task::Task;
use crate::error::CalcError;
use crate::expression::{Expression, ExpressionRegistry, ExpressionStatus, ParseError, parser};

pub const DEFAULT_BACKLOG: usize = 1024;

/// What happened to a single expression during processing.
#[derive(Debug, PartialEq)]
pub enum ProcessOutcome {
    /// A task was placed on the queue.
    Queued,
    /// The queue was full and the task was discarded.
    Dropped,
    /// The text did not match `<number> <operation> <number>`.
    Unparseable(ParseError),
    /// The id was resubmitted before this submission got processed.
    Superseded,
}

/// Handle used by the submission path to schedule processing.
#[derive(Debug, Clone)]
pub struct ExpressionProcessor {
    tx: mpsc::Sender<Expression>,
}

impl ExpressionProcessor {
    /// Starts the processing loop on the current tokio runtime.
    pub fn spawn(
        registry: Arc<ExpressionRegistry>,
        queue: Arc<TaskQueue>,
        backlog: usize,
    ) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<Expression>(backlog.max(1));

        let handle = tokio::spawn(async move {
            while let Some(expression) = rx.recv().await {
                process(&registry, &queue, &expression);
            }
            tracing::debug!("Expression processor stopped");
        });

        (Self { tx }, handle)
    }

    /// Hands a registered expression to the processing loop.
    pub async fn schedule(&self, expression: Expression) -> Result<(), CalcError> {
        self.tx
            .send(expression)
            .await
            .map_err(|_| CalcError::ProcessorClosed)
    }
}

/// Processes one expression snapshot against the registry and queue.
///
/// Runs while the registry entry is held, so a concurrent resubmission of the
/// same id either supersedes this snapshot or waits until it is queued.
pub fn process(
    registry: &ExpressionRegistry,
    queue: &TaskQueue,
    expression: &Expression,
) -> ProcessOutcome {
    // In progress before the task is visible, so a fast worker's result
    // can never be followed by this transition.
    let outcome = registry.advance_current(
        &expression.id,
        expression.submitted_at,
        ExpressionStatus::InProgress,
        || enqueue(queue, expression),
    );

    outcome.unwrap_or_else(|| {
        tracing::debug!("Skipping superseded submission of {}", expression.id);
        ProcessOutcome::Superseded
    })
}

fn enqueue(queue: &TaskQueue, expression: &Expression) -> ProcessOutcome {
    let op = match parser::parse(&expression.expression) {
        Ok(op) => op,
        Err(e) => {
            tracing::warn!(
                "Expression {} ({:?}) cannot be parsed and will not complete: {}",
                expression.id,
                expression.expression,
                e
            );
            return ProcessOutcome::Unparseable(e);
        }
    };

    let task = Task {
        id: expression.id.clone(),
        arg1: op.arg1,
        arg2: op.arg2,
        operation: op.operation,
    };

    match queue.try_push(task) {
        Ok(()) => {
            tracing::debug!("Queued task for expression {}", expression.id);
            ProcessOutcome::Queued
        }
        Err(task) => {
            tracing::warn!(
                "Task queue full (capacity {}), dropped task {}",
                queue.capacity(),
                task.id
            );
            ProcessOutcome::Dropped
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::Operation;
    use std::time::Duration;

    fn setup(capacity: usize) -> (ExpressionRegistry, TaskQueue) {
        (ExpressionRegistry::new(), TaskQueue::new(capacity))
    }

    #[test]
    fn valid_expression_is_queued_and_in_progress() {
        let (registry, queue) = setup(10);
        let expr = registry.put("t1", "3 add 4");

        assert_eq!(process(&registry, &queue, &expr), ProcessOutcome::Queued);
        assert_eq!(
            registry.get("t1").unwrap().status,
            ExpressionStatus::InProgress
        );
        assert_eq!(
            queue.try_pop().unwrap(),
            Task {
                id: "t1".into(),
                arg1: 3.0,
                arg2: 4.0,
                operation: Operation::Add,
            }
        );
    }

    #[test]
    fn unparseable_expression_is_stuck_in_progress() {
        let (registry, queue) = setup(10);
        let expr = registry.put("bad", "2+2");

        assert!(matches!(
            process(&registry, &queue, &expr),
            ProcessOutcome::Unparseable(_)
        ));
        assert_eq!(
            registry.get("bad").unwrap().status,
            ExpressionStatus::InProgress
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn zero_capacity_drops_and_leaves_in_progress() {
        let (registry, queue) = setup(0);
        let expr = registry.put("t1", "3 add 4");

        assert_eq!(process(&registry, &queue, &expr), ProcessOutcome::Dropped);
        assert_eq!(
            registry.get("t1").unwrap().status,
            ExpressionStatus::InProgress
        );
        assert!(queue.try_pop().is_none());
        assert_eq!(queue.dropped(), 1);
    }

    #[test]
    fn resubmitted_id_skips_stale_snapshot() {
        let (registry, queue) = setup(10);
        let mut stale = registry.put("t1", "3 add 4");
        stale.submitted_at = stale.submitted_at - chrono::Duration::seconds(1);
        registry.put("t1", "5 multiply 5");

        assert_eq!(process(&registry, &queue, &stale), ProcessOutcome::Superseded);
        assert_eq!(registry.get("t1").unwrap().status, ExpressionStatus::Pending);
        assert!(queue.is_empty());
    }

    #[test]
    fn resubmission_while_queued_keeps_one_task_per_submission() {
        let registry = Arc::new(ExpressionRegistry::new());
        let queue = Arc::new(TaskQueue::new(100));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                let queue = queue.clone();
                std::thread::spawn(move || {
                    let expr = registry.put("t1", &format!("{i} add 1"));
                    process(&registry, &queue, &expr)
                })
            })
            .collect();
        let queued = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|outcome| *outcome == ProcessOutcome::Queued)
            .count();

        assert_eq!(queue.len(), queued);
        let current = registry.get("t1").unwrap();
        if current.status == ExpressionStatus::InProgress {
            let last = std::iter::from_fn(|| queue.try_pop()).last().unwrap();
            assert_eq!(format!("{} add 1", last.arg1), current.expression);
        }
    }

    #[tokio::test]
    async fn spawned_loop_processes_scheduled_expressions() {
        let registry = Arc::new(ExpressionRegistry::new());
        let queue = Arc::new(TaskQueue::new(10));
        let (processor, _handle) = ExpressionProcessor::spawn(registry.clone(), queue.clone(), 4);

        let expr = registry.put("t1", "8 divide 2");
        processor.schedule(expr).await.unwrap();

        for _ in 0..100 {
            if !queue.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        let task = queue.try_pop().unwrap();
        assert_eq!(task.operation, Operation::Divide);
        assert_eq!(
            registry.get("t1").unwrap().status,
            ExpressionStatus::InProgress
        );
    }
}

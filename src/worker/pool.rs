//! Worker Pool
//!
//! A fixed number of independent compute units. Each unit loops forever:
//! poll its [`TaskSource`] for one task, sleep for the simulated cost, compute,
//! report, then idle before polling again. Units share nothing except the
//! source itself; a pool of zero units is valid and never computes anything.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use super::cost::CostModel;
use super::source::TaskSource;
use crate::error::CalcError;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

pub struct WorkerPool<S, C> {
    source: Arc<S>,
    cost: C,
    worker_count: usize,
    poll_interval: Duration,
}

/// A task a worker finished and reported.
#[derive(Debug, Clone, PartialEq)]
pub struct Completed {
    pub id: String,
    pub result: f64,
}

impl<S: TaskSource, C: CostModel> WorkerPool<S, C> {
    pub fn new(source: Arc<S>, cost: C, worker_count: usize, poll_interval: Duration) -> Arc<Self> {
        Arc::new(Self {
            source,
            cost,
            worker_count,
            poll_interval,
        })
    }

    /// Spawns every worker and returns their handles immediately.
    pub fn start(self: Arc<Self>) -> Vec<JoinHandle<()>> {
        tracing::info!("Starting {} compute workers", self.worker_count);

        (0..self.worker_count)
            .map(|worker_id| {
                let pool = self.clone();
                tokio::spawn(async move { pool.worker_loop(worker_id).await })
            })
            .collect()
    }

    async fn worker_loop(&self, worker_id: usize) {
        tracing::debug!("Worker {} started", worker_id);

        loop {
            match self.run_once(worker_id).await {
                Ok(Some(done)) => {
                    tracing::debug!("Worker {} finished {} = {}", worker_id, done.id, done.result);
                }
                Ok(None) => {
                    tracing::trace!("Worker {} found no task", worker_id);
                }
                Err(e) => {
                    tracing::warn!("Worker {} could not reach the task source: {}", worker_id, e);
                }
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// One poll/compute/report cycle, without the idle sleep.
    pub async fn run_once(&self, worker_id: usize) -> Result<Option<Completed>, CalcError> {
        let Some(task) = self.source.poll_task().await? else {
            return Ok(None);
        };

        let delay = self.cost.delay(&task.operation);
        tracing::debug!(
            "Worker {} computing {} {} {} for {} ({:?})",
            worker_id,
            task.arg1,
            task.operation,
            task.arg2,
            task.id,
            delay
        );
        tokio::time::sleep(delay).await;

        let result = task.compute();
        self.source.report_result(&task.id, result).await?;

        Ok(Some(Completed {
            id: task.id,
            result,
        }))
    }
}

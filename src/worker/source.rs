use std::future::Future;

use crate::dispatch::Task;
use crate::error::CalcError;
use crate::orchestrator::Orchestrator;

/// Where a worker gets tasks from and sends results to.
///
/// Implemented in-process by [`Orchestrator`] and over HTTP by
/// [`HttpTaskSource`](super::client::HttpTaskSource).
pub trait TaskSource: Send + Sync + 'static {
    /// Claim the next task. `Ok(None)` means nothing is queued right now.
    fn poll_task(&self) -> impl Future<Output = Result<Option<Task>, CalcError>> + Send;

    fn report_result(
        &self,
        id: &str,
        value: f64,
    ) -> impl Future<Output = Result<(), CalcError>> + Send;
}

impl TaskSource for Orchestrator {
    async fn poll_task(&self) -> Result<Option<Task>, CalcError> {
        Ok(Orchestrator::poll_task(self))
    }

    async fn report_result(&self, id: &str, value: f64) -> Result<(), CalcError> {
        Orchestrator::report_result(self, id, value);
        Ok(())
    }
}

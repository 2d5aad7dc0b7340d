use std::time::Duration;

use reqwest::{Client, StatusCode};

use super::source::TaskSource;
use crate::dispatch::Task;
use crate::error::CalcError;
use crate::server::protocol::{ENDPOINT_INTERNAL_TASK, ResultReport};

/// Talks to a remote orchestrator's `/internal/task` endpoints.
pub struct HttpTaskSource {
    client: Client,
    task_url: String,
}

impl HttpTaskSource {
    /// `base_url` is the orchestrator root, e.g. `http://localhost:8080`.
    pub fn new(base_url: &str) -> Result<Self, CalcError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            task_url: format!("{}{}", base_url.trim_end_matches('/'), ENDPOINT_INTERNAL_TASK),
        })
    }

    async fn unexpected(response: reqwest::Response) -> CalcError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        CalcError::UnexpectedStatus { status, message }
    }
}

impl TaskSource for HttpTaskSource {
    async fn poll_task(&self) -> Result<Option<Task>, CalcError> {
        let response = self.client.get(&self.task_url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json::<Task>().await?)),
            _ => Err(Self::unexpected(response).await),
        }
    }

    async fn report_result(&self, id: &str, value: f64) -> Result<(), CalcError> {
        let report = ResultReport {
            id: id.to_string(),
            result: value,
        };
        let response = self
            .client
            .post(&self.task_url)
            .json(&report)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::unexpected(response).await)
        }
    }
}

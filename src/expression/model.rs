use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a submitted expression.
///
/// Statuses are ordered: an expression flows `Pending → InProgress → Completed`
/// and never moves back, except when a new submission replaces it entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionStatus {
    Pending,
    InProgress,
    Completed,
}

impl fmt::Display for ExpressionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpressionStatus::Pending => write!(f, "pending"),
            ExpressionStatus::InProgress => write!(f, "in_progress"),
            ExpressionStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A client-submitted unit of work as held by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub id: String,
    pub status: ExpressionStatus,
    pub expression: String,
    /// Only present once `status` is `Completed`.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::wire::float::option"
    )]
    pub result: Option<f64>,
    pub submitted_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Expression {
    pub fn new(id: String, expression: String) -> Self {
        Self {
            id,
            status: ExpressionStatus::Pending,
            expression,
            result: None,
            submitted_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Advance to `status` if it is ahead of the current one.
    ///
    /// Returns `false` and leaves the expression untouched otherwise.
    pub fn advance(&mut self, status: ExpressionStatus) -> bool {
        if status <= self.status {
            return false;
        }
        self.status = status;
        true
    }

    /// Record the computed value and mark the expression completed.
    pub fn complete(&mut self, value: f64) {
        self.result = Some(value);
        self.status = ExpressionStatus::Completed;
        self.completed_at = Some(Utc::now());
    }
}

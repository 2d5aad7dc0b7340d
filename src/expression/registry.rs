//! Expression Registry
//!
//! Owns the authoritative record of every submitted expression. Entries live
//! in a sharded concurrent map, so mutation of a single id is atomic and
//! serialized while different ids can be touched in parallel. Readers always
//! receive cloned snapshots and never observe a half-applied update.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::model::{Expression, ExpressionStatus};

#[derive(Debug, Default)]
pub struct ExpressionRegistry {
    entries: DashMap<String, Expression>,
}

impl ExpressionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fresh `Pending` entry, replacing any previous one with the same id.
    pub fn put(&self, id: &str, expression: &str) -> Expression {
        let entry = Expression::new(id.to_string(), expression.to_string());
        self.entries.insert(id.to_string(), entry.clone());
        tracing::debug!("Registered expression {} as pending", id);
        entry
    }

    pub fn get(&self, id: &str) -> Option<Expression> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    /// Snapshot of all entries, in no particular order.
    pub fn list(&self) -> Vec<Expression> {
        self.entries
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Moves the entry forward to `status`.
    ///
    /// Returns `false` for unknown ids or when `status` would not be a
    /// forward transition.
    pub fn set_status(&self, id: &str, status: ExpressionStatus) -> bool {
        match self.entries.get_mut(id) {
            Some(mut entry) => entry.advance(status),
            None => false,
        }
    }

    /// Advances `id` to `status` only while it still holds the submission
    /// made at `submitted_at`, then runs `then` before the entry is released.
    ///
    /// Returns `None` when the id is unknown or was resubmitted. `then` must
    /// not touch this registry.
    pub fn advance_current<T>(
        &self,
        id: &str,
        submitted_at: DateTime<Utc>,
        status: ExpressionStatus,
        then: impl FnOnce() -> T,
    ) -> Option<T> {
        let mut entry = self.entries.get_mut(id)?;
        if entry.submitted_at != submitted_at {
            return None;
        }
        entry.advance(status);
        Some(then())
    }

    /// Stores the result and marks the entry completed in one step.
    ///
    /// Returns `false` if the id is unknown.
    pub fn set_result(&self, id: &str, value: f64) -> bool {
        match self.entries.get_mut(id) {
            Some(mut entry) => {
                entry.complete(value);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// The binary operation carried by a task.
///
/// Tokens outside the four known words are kept verbatim in `Other`; they
/// are dispatched like any task and compute to `0`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Other(String),
}

impl Operation {
    /// Applies the operation. Division follows IEEE-754, so dividing by zero
    /// yields an infinity or NaN rather than an error.
    pub fn apply(&self, arg1: f64, arg2: f64) -> f64 {
        match self {
            Operation::Add => arg1 + arg2,
            Operation::Subtract => arg1 - arg2,
            Operation::Multiply => arg1 * arg2,
            Operation::Divide => arg1 / arg2,
            Operation::Other(_) => 0.0,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Divide => "divide",
            Operation::Other(token) => token,
        }
    }
}

impl From<&str> for Operation {
    fn from(token: &str) -> Self {
        match token {
            "add" => Operation::Add,
            "subtract" => Operation::Subtract,
            "multiply" => Operation::Multiply,
            "divide" => Operation::Divide,
            other => Operation::Other(other.to_string()),
        }
    }
}

impl From<String> for Operation {
    fn from(token: String) -> Self {
        Operation::from(token.as_str())
    }
}

impl From<Operation> for String {
    fn from(op: Operation) -> Self {
        match op {
            Operation::Other(token) => token,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A decomposed expression waiting for (or claimed by) a worker.
///
/// Shares its `id` with the owning expression; results are correlated by id only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(with = "crate::wire::float")]
    pub arg1: f64,
    #[serde(with = "crate::wire::float")]
    pub arg2: f64,
    pub operation: Operation,
}

impl Task {
    pub fn compute(&self) -> f64 {
        self.operation.apply(self.arg1, self.arg2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(arg1: f64, op: &str, arg2: f64) -> Task {
        Task {
            id: "t".into(),
            arg1,
            arg2,
            operation: Operation::from(op),
        }
    }

    #[test]
    fn known_operations_compute() {
        assert_eq!(task(3.0, "add", 4.0).compute(), 7.0);
        assert_eq!(task(3.0, "subtract", 4.0).compute(), -1.0);
        assert_eq!(task(3.0, "multiply", 4.0).compute(), 12.0);
        assert_eq!(task(3.0, "divide", 4.0).compute(), 0.75);
    }

    #[test]
    fn division_by_zero_is_not_finite() {
        assert_eq!(task(8.0, "divide", 0.0).compute(), f64::INFINITY);
        assert_eq!(task(-8.0, "divide", 0.0).compute(), f64::NEG_INFINITY);
        assert!(task(0.0, "divide", 0.0).compute().is_nan());
    }

    #[test]
    fn unknown_operation_defaults_to_zero() {
        let t = task(3.0, "power", 4.0);
        assert_eq!(t.operation, Operation::Other("power".into()));
        assert_eq!(t.compute(), 0.0);
    }

    #[test]
    fn task_json_matches_worker_contract() {
        let json = serde_json::to_value(task(3.0, "add", 4.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "t", "arg1": 3.0, "arg2": 4.0, "operation": "add"})
        );

        let parsed: Task =
            serde_json::from_str(r#"{"id":"x","arg1":1,"arg2":2,"operation":"modulo"}"#).unwrap();
        assert_eq!(parsed.operation, Operation::Other("modulo".into()));
        assert_eq!(parsed.arg2, 2.0);
    }
}

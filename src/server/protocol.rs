//! Request and response bodies for the public API and the worker endpoints.

use serde::{Deserialize, Serialize};

use crate::expression::Expression;

pub const ENDPOINT_CALCULATE: &str = "/api/v1/calculate";
pub const ENDPOINT_EXPRESSIONS: &str = "/api/v1/expressions";
pub const ENDPOINT_EXPRESSION: &str = "/api/v1/expressions/{id}";
pub const ENDPOINT_INTERNAL_TASK: &str = "/internal/task";

/// Missing fields decode as empty strings and are rejected by validation.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub expression: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExpressionsResponse {
    pub expressions: Vec<Expression>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExpressionResponse {
    pub expression: Expression,
}

/// Body a worker posts back to `/internal/task`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultReport {
    pub id: String,
    #[serde(with = "crate::wire::float")]
    pub result: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_request_tolerates_missing_fields() {
        let req: SubmitRequest = serde_json::from_str(r#"{"id": "t1"}"#).unwrap();
        assert_eq!(req.id, "t1");
        assert!(req.expression.is_empty());
    }

    #[test]
    fn result_report_requires_both_fields() {
        assert!(serde_json::from_str::<ResultReport>(r#"{"id": "t1"}"#).is_err());
        assert!(serde_json::from_str::<ResultReport>(r#"{"result": 1}"#).is_err());

        let report: ResultReport =
            serde_json::from_str(r#"{"id": "t1", "result": "Infinity"}"#).unwrap();
        assert_eq!(report.result, f64::INFINITY);
    }
}

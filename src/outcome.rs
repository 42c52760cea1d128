use crate::errors::ToolError;
use serde::Serialize;
use serde_json::Value;

/// Success/failure as data. Every hub operation resolves to one of these
/// two variants; transport errors are folded in here and never cross the
/// operation boundary as `Err`.
#[derive(Debug, Clone, PartialEq)]
pub enum OpResult<T> {
    Success {
        data: T,
        message: String,
        params: Option<Value>,
    },
    Failure {
        error: String,
        message: String,
        params: Option<Value>,
    },
}

impl<T> OpResult<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        OpResult::Success {
            data,
            message: message.into(),
            params: None,
        }
    }

    pub fn success_with_params(data: T, message: impl Into<String>, params: Value) -> Self {
        OpResult::Success {
            data,
            message: message.into(),
            params: Some(params),
        }
    }

    /// Converts a transport error into a `Failure`. The human message names
    /// the operation and the HTTP status when the transport recorded one.
    pub fn failure(operation: &str, err: &ToolError, params: Option<Value>) -> Self {
        let status = err.status_text().unwrap_or("Unknown error");
        OpResult::Failure {
            error: err.message.clone(),
            message: format!("Failed to {}: {}", operation, status),
            params,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, OpResult::Success { .. })
    }
}

impl<T: Serialize> OpResult<T> {
    pub fn into_value(self) -> Value {
        match self {
            OpResult::Success {
                data,
                message,
                params,
            } => {
                let mut out = serde_json::json!({
                    "success": true,
                    "data": data,
                    "message": message,
                });
                if let (Some(map), Some(params)) = (out.as_object_mut(), params) {
                    map.insert("params".to_string(), params);
                }
                out
            }
            OpResult::Failure {
                error,
                message,
                params,
            } => {
                let mut out = serde_json::json!({
                    "success": false,
                    "error": error,
                    "message": message,
                });
                if let (Some(map), Some(params)) = (out.as_object_mut(), params) {
                    map.insert("params".to_string(), params);
                }
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ToolError;

    #[test]
    fn failure_message_carries_status_text() {
        let err = ToolError::denied("Backend request failed (401)").with_details(
            serde_json::json!({ "status": 401, "status_text": "401 Unauthorized" }),
        );
        let result: OpResult<Value> = OpResult::failure("get current user", &err, None);
        match result {
            OpResult::Failure { error, message, .. } => {
                assert!(message.contains("401"), "message: {}", message);
                assert!(message.starts_with("Failed to get current user"));
                assert_eq!(error, "Backend request failed (401)");
            }
            OpResult::Success { .. } => panic!("expected failure"),
        }
    }

    #[test]
    fn failure_without_status_reports_unknown_error() {
        let err = ToolError::retryable("connection refused");
        let result: OpResult<Value> = OpResult::failure("list catalogues", &err, None);
        match result {
            OpResult::Failure { message, .. } => {
                assert_eq!(message, "Failed to list catalogues: Unknown error");
            }
            OpResult::Success { .. } => panic!("expected failure"),
        }
    }

    #[test]
    fn into_value_uses_success_discriminant() {
        let ok = OpResult::success(serde_json::json!([1, 2]), "ok").into_value();
        assert_eq!(ok.get("success"), Some(&Value::Bool(true)));
        assert!(ok.get("error").is_none());

        let err = ToolError::timeout("request timed out");
        let failed: Value = OpResult::<Value>::failure("search projects", &err, None).into_value();
        assert_eq!(failed.get("success"), Some(&Value::Bool(false)));
        assert!(failed.get("data").is_none());
    }

    #[test]
    fn params_echo_is_preserved() {
        let result = OpResult::success_with_params(
            serde_json::json!({}),
            "ok",
            serde_json::json!({ "page": 0 }),
        )
        .into_value();
        assert_eq!(result["params"]["page"], serde_json::json!(0));
    }
}

use crate::errors::ToolError;
use serde_json::Value;

#[derive(Clone)]
pub struct Validation;

impl Validation {
    pub fn new() -> Self {
        Self
    }

    pub fn ensure_string(&self, value: &Value, label: &str) -> Result<String, ToolError> {
        let text = value.as_str().ok_or_else(|| {
            ToolError::invalid_params(format!("{} must be a non-empty string", label))
        })?;
        let normalized = text.trim();
        if normalized.is_empty() {
            return Err(ToolError::invalid_params(format!(
                "{} must be a non-empty string",
                label
            )));
        }
        Ok(normalized.to_string())
    }

    pub fn ensure_optional_string(
        &self,
        value: Option<&Value>,
        label: &str,
    ) -> Result<Option<String>, ToolError> {
        match value {
            None => Ok(None),
            Some(val) if val.is_null() => Ok(None),
            Some(val) => {
                let text = val.as_str().ok_or_else(|| {
                    ToolError::invalid_params(format!("{} must be a string", label))
                })?;
                Ok(Some(text.to_string()))
            }
        }
    }

    pub fn ensure_optional_bool(
        &self,
        value: Option<&Value>,
        label: &str,
    ) -> Result<Option<bool>, ToolError> {
        match value {
            None => Ok(None),
            Some(val) if val.is_null() => Ok(None),
            Some(val) => val
                .as_bool()
                .map(Some)
                .ok_or_else(|| ToolError::invalid_params(format!("{} must be a boolean", label))),
        }
    }

    pub fn ensure_optional_u64(
        &self,
        value: Option<&Value>,
        label: &str,
    ) -> Result<Option<u64>, ToolError> {
        match value {
            None => Ok(None),
            Some(val) if val.is_null() => Ok(None),
            Some(val) => {
                let numeric = val
                    .as_u64()
                    .or_else(|| val.as_str().and_then(|text| text.parse().ok()))
                    .ok_or_else(|| {
                        ToolError::invalid_params(format!(
                            "{} must be a non-negative integer",
                            label
                        ))
                    })?;
                Ok(Some(numeric))
            }
        }
    }

    pub fn ensure_string_array(
        &self,
        value: Option<&Value>,
        label: &str,
    ) -> Result<Vec<String>, ToolError> {
        let Some(value) = value else {
            return Ok(Vec::new());
        };
        if value.is_null() {
            return Ok(Vec::new());
        }
        let items = value.as_array().ok_or_else(|| {
            ToolError::invalid_params(format!("{} must be an array of strings", label))
        })?;
        let mut out = Vec::with_capacity(items.len());
        for item in items {
            let text = item.as_str().ok_or_else(|| {
                ToolError::invalid_params(format!("{} must be an array of strings", label))
            })?;
            out.push(text.to_string());
        }
        Ok(out)
    }
}

impl Default for Validation {
    fn default() -> Self {
        Self::new()
    }
}

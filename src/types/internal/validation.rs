use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// A single failed field constraint
#[derive(Object, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending request parameter
    pub param: String,

    /// Human-readable explanation
    pub message: String,
}

impl FieldError {
    pub fn new(param: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            param: param.into(),
            message: message.into(),
        }
    }
}

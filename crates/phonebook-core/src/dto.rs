use serde::{Deserialize, Serialize};

pub const STATUS_ERROR: &str = "ERROR";

/// Body returned in place of a record when a request fails.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDto {
    pub status: String,
    pub code: u16,
    pub message: String,
}

impl StatusDto {
    pub fn error(code: u16, message: impl Into<String>) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            code,
            message: message.into(),
        }
    }
}

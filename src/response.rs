//! Uniform envelope returned by every roster operation.

use serde::{Deserialize, Serialize};

/// `{ "data": T?, "success": bool, "message": string? }`
///
/// Domain failures travel inside the envelope with `success = false`, so callers
/// can tell them apart from transport failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceResponse<T> {
    pub data: Option<T>,
    pub success: bool,
    pub message: Option<String>,
}

impl<T> ServiceResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            success: true,
            message: None,
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            data: None,
            success: false,
            message: Some(message.into()),
        }
    }

    /// A failure with neither payload nor message (plain lookup miss).
    pub fn empty_failure() -> Self {
        Self {
            data: None,
            success: false,
            message: None,
        }
    }

    /// Fold an explicit outcome into the envelope, stringifying the error.
    pub fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::fail(e.to_string()),
        }
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }
}

impl<T> Default for ServiceResponse<T> {
    fn default() -> Self {
        Self {
            data: None,
            success: true,
            message: None,
        }
    }
}

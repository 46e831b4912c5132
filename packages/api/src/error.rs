//! Error taxonomy for backend calls.

use thiserror::Error;

/// Fallback message when the backend gave no usable `detail`.
pub const GENERIC_FAILURE: &str = "Request failed";

/// Everything that can go wrong talking to the backend, plus the local
/// validation failures that stop a call before it is made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unauthorized: {}", .0.as_deref().unwrap_or("no detail"))]
    Unauthorized(Option<String>),

    #[error("Forbidden: {}", .0.as_deref().unwrap_or("no detail"))]
    Forbidden(Option<String>),

    #[error("Not found: {}", .0.as_deref().unwrap_or("no detail"))]
    NotFound(Option<String>),

    #[error("Rejected: {}", .0.as_deref().unwrap_or("no detail"))]
    Rejected(Option<String>),

    #[error("Backend returned {status}")]
    Backend { status: u16, detail: Option<String> },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotAuthenticated(String),
}

impl ApiError {
    /// Classify a non-success HTTP status with the backend's `detail`, if any.
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        match status {
            401 => ApiError::Unauthorized(detail),
            403 => ApiError::Forbidden(detail),
            404 => ApiError::NotFound(detail),
            400 | 422 => ApiError::Rejected(detail),
            _ => ApiError::Backend { status, detail },
        }
    }

    /// Expired or invalid credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// Short message for the user: the backend's detail, or a generic fallback.
    pub fn user_message(&self) -> String {
        let detail = match self {
            ApiError::Validation(msg) | ApiError::NotAuthenticated(msg) => Some(msg),
            ApiError::Unauthorized(detail)
            | ApiError::Forbidden(detail)
            | ApiError::NotFound(detail)
            | ApiError::Rejected(detail)
            | ApiError::Backend { detail, .. } => detail.as_ref(),
            ApiError::Transport(_) | ApiError::Decode(_) => None,
        };
        detail
            .filter(|d| !d.trim().is_empty())
            .cloned()
            .unwrap_or_else(|| GENERIC_FAILURE.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// Pull a string `detail` out of an error body such as `{"detail": "List not found"}`.
pub fn parse_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        // Validation errors carry a list of `{ "msg": ... }` objects.
        serde_json::Value::Array(items) => items
            .first()
            .and_then(|i| i.get("msg"))
            .and_then(|m| m.as_str())
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(ApiError::from_status(401, None).is_auth_failure());
        assert!(ApiError::from_status(404, None).is_not_found());
        assert!(matches!(ApiError::from_status(403, None), ApiError::Forbidden(_)));
        assert!(matches!(ApiError::from_status(422, None), ApiError::Rejected(_)));
        assert!(matches!(
            ApiError::from_status(500, None),
            ApiError::Backend { status: 500, .. }
        ));
    }

    #[test]
    fn test_user_message_prefers_detail() {
        let err = ApiError::from_status(400, Some("Location already in list".to_string()));
        assert_eq!(err.user_message(), "Location already in list");

        let err = ApiError::from_status(500, None);
        assert_eq!(err.user_message(), GENERIC_FAILURE);

        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.user_message(), GENERIC_FAILURE);

        let err = ApiError::Validation("Passwords do not match".to_string());
        assert_eq!(err.user_message(), "Passwords do not match");
    }

    #[test]
    fn test_parse_detail() {
        assert_eq!(
            parse_detail(r#"{"detail": "Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(
            parse_detail(r#"{"detail": [{"loc": ["body"], "msg": "field required"}]}"#).as_deref(),
            Some("field required")
        );
        assert_eq!(parse_detail("<html>oops</html>"), None);
        assert_eq!(parse_detail(r#"{"message": "x"}"#), None);
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::Unauthorized(Some("Token expired".to_string()));
        assert_eq!(err.to_string(), "Unauthorized: Token expired");
        let err = ApiError::Backend { status: 502, detail: None };
        assert_eq!(err.to_string(), "Backend returned 502");
    }
}

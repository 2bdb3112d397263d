use thiserror::Error;

/// Why a request produced no data.
///
/// Callers treat every variant the same way (the request yielded nothing);
/// the distinction exists so the reason can be logged.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Image decode failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Maximum length for error response bodies in error messages
const MAX_ERROR_BODY_LENGTH: usize = 200;

impl ApiError {
    /// Truncate a response body to avoid logging excessive data
    fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            let cut: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
            format!("{}... (truncated, {} total bytes)", cut, body.len())
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        ApiError::Status {
            status,
            body: Self::truncate_body(body),
        }
    }

    /// True when the server answered 404, e.g. a page past the last one.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status, .. } if *status == reqwest::StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_truncates_long_bodies() {
        let body = "x".repeat(1000);
        let err = ApiError::from_status(reqwest::StatusCode::INTERNAL_SERVER_ERROR, &body);
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("truncated, 1000 total bytes"));
        assert!(msg.len() < 400);
    }

    #[test]
    fn test_is_not_found() {
        let err = ApiError::from_status(reqwest::StatusCode::NOT_FOUND, r#"{"error":"There is nothing here"}"#);
        assert!(err.is_not_found());

        let err = ApiError::from_status(reqwest::StatusCode::BAD_GATEWAY, "");
        assert!(!err.is_not_found());

        assert!(!ApiError::InvalidResponse("bad".to_string()).is_not_found());
    }
}

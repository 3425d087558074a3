use reqwest::StatusCode;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single call against the agent service.
///
/// Every variant carries the full request URL so a log line or terminal
/// message can stand on its own.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (connect failure,
    /// timeout, protocol error).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("agent service returned {status} for {url}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    /// A 2xx reply whose body did not decode as the expected JSON.
    #[error("malformed response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub(crate) fn transport(url: &str, source: reqwest::Error) -> Self {
        ApiError::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn status(url: &str, status: StatusCode, body: String) -> Self {
        ApiError::Status {
            url: url.to_string(),
            status: status.as_u16(),
            body,
        }
    }

    pub(crate) fn decode(url: &str, source: serde_json::Error) -> Self {
        ApiError::Decode {
            url: url.to_string(),
            source,
        }
    }

    /// HTTP status of the reply, when one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// URL of the failed request.
    pub fn url(&self) -> &str {
        match self {
            ApiError::Transport { url, .. }
            | ApiError::Status { url, .. }
            | ApiError::Decode { url, .. } => url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = ApiError::status(
            "http://127.0.0.1:5009/api/frame?id=@X.Y.1",
            StatusCode::INTERNAL_SERVER_ERROR,
            "no such frame".to_string(),
        );

        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("/api/frame?id=@X.Y.1"));
        assert!(message.contains("no such frame"));
        assert_eq!(err.status_code(), Some(500));
    }

    #[test]
    fn test_decode_error_display() {
        let source = serde_json::from_str::<serde_json::Value>("OK").unwrap_err();
        let err = ApiError::decode("http://127.0.0.1:5009/signal/release", source);

        assert!(err.to_string().contains("malformed response"));
        assert_eq!(err.status_code(), None);
        assert_eq!(err.url(), "http://127.0.0.1:5009/signal/release");
    }
}

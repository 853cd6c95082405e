use std::fmt;

/// Errors that can occur while talking to the persona backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Client misconfigured (bad base URL, TLS setup). Not retryable.
    Config(String),
    /// Transport failure (timeout, DNS, connection refused).
    Network(String),
    /// Non-2xx response. `detail` is the server's message, if it sent one.
    Api { status: u16, detail: Option<String> },
    /// A 2xx response whose body wasn't what we expected.
    Parse(String),
    /// Writing a downloaded file failed.
    Io(String),
}

impl ApiError {
    /// Banner text for this error.
    ///
    /// The server's `detail` is shown verbatim; otherwise the operation's
    /// `fallback` is used, with the cause appended where there is one.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Api {
                detail: Some(detail),
                ..
            } => detail.clone(),
            ApiError::Api { detail: None, .. } => fallback.to_string(),
            ApiError::Network(cause) => format!("Failed to fetch: {cause}"),
            ApiError::Config(cause) | ApiError::Parse(cause) | ApiError::Io(cause) => {
                format!("{fallback}: {cause}")
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api {
                status,
                detail: Some(detail),
            } => write!(f, "API error (HTTP {status}): {detail}"),
            ApiError::Api {
                status,
                detail: None,
            } => write!(f, "API error (HTTP {status})"),
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
            ApiError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_is_shown_verbatim() {
        let err = ApiError::Api {
            status: 404,
            detail: Some("No data found for Reddit user: ghost".into()),
        };
        assert_eq!(
            err.user_message("Failed to generate persona"),
            "No data found for Reddit user: ghost"
        );
    }

    #[test]
    fn missing_detail_uses_fallback() {
        let err = ApiError::Api {
            status: 500,
            detail: None,
        };
        assert_eq!(err.user_message("Failed to get response"), "Failed to get response");
    }

    #[test]
    fn network_errors_read_as_fetch_failures() {
        let err = ApiError::Network("connection refused".into());
        assert_eq!(err.user_message("ignored"), "Failed to fetch: connection refused");
    }

    #[test]
    fn display_includes_status() {
        let err = ApiError::Api {
            status: 502,
            detail: None,
        };
        assert_eq!(err.to_string(), "API error (HTTP 502)");
    }
}

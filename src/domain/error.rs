use thiserror::Error;

/// Core domain errors
///
/// Every failure a handler can surface maps to exactly one of these variants.
/// The HTTP layer collapses them to fixed client messages; internal detail
/// stays in the variant payloads for logging.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Missing '{name}' parameter")]
    MissingParameter { name: String },

    /// Covers both unknown and expired keys; callers must not be able to
    /// tell the two apart.
    #[error("Invalid or expired API key")]
    InvalidKey,

    #[error("IP request limit reached")]
    RateLimited,

    /// A required provider endpoint is absent from the configuration.
    #[error("Api not configured")]
    NotConfigured,

    #[error("Upstream unavailable: {message}")]
    UpstreamUnavailable { message: String },

    /// The upstream responded but produced no usable media.
    #[error("No media found")]
    NoMediaFound,

    #[error("Malformed proxy token")]
    MalformedToken,
}

impl DomainError {
    pub fn missing_parameter(name: impl Into<String>) -> Self {
        Self::MissingParameter { name: name.into() }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        Self::UpstreamUnavailable {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_message() {
        let error = DomainError::missing_parameter("url");
        assert_eq!(error.to_string(), "Missing 'url' parameter");
    }

    #[test]
    fn test_invalid_key_does_not_mention_expiry() {
        // Expired and unknown keys share one message.
        assert_eq!(
            DomainError::InvalidKey.to_string(),
            "Invalid or expired API key"
        );
    }

    #[test]
    fn test_upstream_message() {
        let error = DomainError::upstream("HTTP 503");
        assert_eq!(error.to_string(), "Upstream unavailable: HTTP 503");
    }
}

//! Client error types.

/// Errors that can occur when fetching billing records.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced an upstream response.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The billing service responded with a non-success status.
    #[error("upstream returned {status}: {body}")]
    Upstream {
        /// HTTP status code.
        status: u16,
        /// Raw response body, preserved unmodified.
        body: String,
    },

    /// The response body could not be decoded as billing records.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl ClientError {
    /// The upstream HTTP status, if the billing service responded at all.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Name resolution and connection-level failures.
///
/// These are never retried; they propagate to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The logical service name could not be resolved to an address.
    #[error("failed to resolve service {service:?}: {reason}")]
    Resolve {
        /// The logical service name that was looked up.
        service: String,
        /// Why resolution failed.
        reason: String,
    },

    /// Connection, read or timeout failure in the HTTP transport.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Failures while decoding the streamed response body.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The body was not a well-formed JSON array of records.
    #[error("malformed billing payload: {0}")]
    Malformed(String),

    /// A record element failed to deserialize.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_accessor() {
        let err = ClientError::Upstream {
            status: 503,
            body: "{\"error\":\"unavailable\"}".to_string(),
        };
        assert_eq!(err.status(), Some(503));

        let err = ClientError::Transport(TransportError::Resolve {
            service: "billing-service".to_string(),
            reason: "unknown service".to_string(),
        });
        assert_eq!(err.status(), None);
    }
}

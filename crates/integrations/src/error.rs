//! Error type shared by the external-service clients.

use thiserror::Error;

/// Failures surfaced by the completion, table, and webhook clients.
///
/// The `service` field names which upstream failed so callers can log it
/// without tearing the error apart.
#[derive(Debug, Error)]
pub enum IntegrationError {
    /// The request never produced a response (connect, DNS, or body read
    /// failure).
    #[error("{service} request failed: {source}")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("{service} returned status {status}: {message}")]
    Api {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// The service answered 2xx but the body did not match the expected
    /// shape.
    #[error("{service} response could not be parsed: {reason}")]
    Protocol {
        service: &'static str,
        reason: String,
    },
}

impl IntegrationError {
    /// Which upstream produced this error.
    #[must_use]
    pub fn service(&self) -> &'static str {
        match self {
            Self::Request { service, .. }
            | Self::Api { service, .. }
            | Self::Protocol { service, .. } => service,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_service() {
        let err = IntegrationError::Api {
            service: "webhook",
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.service(), "webhook");
        assert_eq!(
            err.to_string(),
            "webhook returned status 503: unavailable"
        );
    }

    #[test]
    fn test_protocol_error_display() {
        let err = IntegrationError::Protocol {
            service: "completion",
            reason: "no choices in response".to_string(),
        };
        assert!(err.to_string().contains("no choices"));
    }
}

//! Error types for the panhandler library.
//!
//! Option and credential errors surface before any request is built; the
//! transport, timeout and vendor variants surface as the outcome of a single
//! call. Malformed XML and vendor "help/exception" bodies are deliberately
//! *not* errors — drivers degrade those to an empty result.

use thiserror::Error;

/// Errors surfaced by drivers and the facade.
#[derive(Debug, Error)]
pub enum PanhandlerError {
    /// The caller passed an option name outside the driver's allowlist.
    /// Raised before any network I/O occurs.
    #[error("received unsupported option '{option}'")]
    UnsupportedOption {
        /// The offending option name.
        option: String,
    },

    /// A numeric option carried text that does not parse.
    /// Raised before any network I/O occurs.
    #[error("invalid value '{value}' for option '{option}'")]
    InvalidOptionValue {
        /// The option name.
        option: String,
        /// The value that failed to parse.
        value: String,
    },

    /// A credential required to build the request is unset, so no request
    /// was sent.
    #[error("cannot build a request: {credential} is not set")]
    MissingCredential {
        /// Name of the missing credential.
        credential: &'static str,
    },

    /// Network-level failure other than a timeout.
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// No response arrived within the configured wait period.
    #[error("did not get a response within {wait_for} seconds; consider increasing the wait_for setting")]
    Timeout {
        /// The configured wait period in seconds.
        wait_for: u64,
    },

    /// The vendor answered with an HTTP error status.
    #[error("vendor returned HTTP {status}: {body}")]
    Vendor {
        /// The HTTP status code (>= 400).
        status: u16,
        /// The raw response body.
        body: String,
    },

    /// The vendor answered 200 but the document carried an error message
    /// (Commission Junction's `<error-message>` node).
    #[error("vendor reported an error: {message}")]
    VendorMessage {
        /// The vendor's error text.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_message_names_wait_period() {
        let error = PanhandlerError::Timeout { wait_for: 30 };
        let message = error.to_string();
        assert!(message.contains("30"));
        assert!(message.contains("wait_for"));
    }

    #[test]
    fn test_unsupported_option_names_option() {
        let error = PanhandlerError::UnsupportedOption {
            option: "colour".to_string(),
        };
        assert!(error.to_string().contains("colour"));
    }

    #[test]
    fn test_vendor_error_carries_body() {
        let error = PanhandlerError::Vendor {
            status: 403,
            body: "AccessDenied".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("403"));
        assert!(message.contains("AccessDenied"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = PanhandlerError::MissingCredential {
            credential: "secret_access_key",
        };
        let _: &dyn std::error::Error = &error;
    }
}

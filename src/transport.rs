//! One-shot HTTP GET transport shared by all drivers.
//!
//! Each `get_products` call performs exactly one request and classifies the
//! outcome: a timeout becomes [`PanhandlerError::Timeout`] naming the
//! configured wait period, any other network failure becomes
//! [`PanhandlerError::Transport`], and a status of 400 or above becomes
//! [`PanhandlerError::Vendor`] carrying the response body. No retries.

use std::time::Duration;

use crate::error::PanhandlerError;

/// Thin wrapper around a shared `reqwest` client.
#[derive(Debug)]
pub(crate) struct Transport {
    client: reqwest::Client,
}

impl Transport {
    /// Creates a transport.
    ///
    /// Panics only if the underlying TLS backend cannot be initialized,
    /// which reqwest treats as unrecoverable as well.
    pub(crate) fn new() -> Self {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("failed to create HTTP client");
        Self { client }
    }

    /// Issues one GET and returns the body of a successful response.
    pub(crate) async fn get(
        &self,
        url: &str,
        headers: &[(&str, String)],
        wait_for: u64,
    ) -> Result<String, PanhandlerError> {
        tracing::debug!(%url, "requesting product list");

        let mut request = self
            .client
            .get(url)
            .timeout(Duration::from_secs(wait_for));
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let response = request
            .send()
            .await
            .map_err(|err| classify(err, wait_for))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|err| classify(err, wait_for))?;

        tracing::debug!(status, body = %body, "vendor response");

        if status >= 400 {
            return Err(PanhandlerError::Vendor { status, body });
        }
        Ok(body)
    }
}

/// Separates timeouts from other network failures.
fn classify(err: reqwest::Error, wait_for: u64) -> PanhandlerError {
    if err.is_timeout() {
        PanhandlerError::Timeout { wait_for }
    } else {
        PanhandlerError::Transport(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Transport>();
    }
}

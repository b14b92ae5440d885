//! Request signing for the Amazon Product Advertising API.
//!
//! Amazon requires every request to carry an HMAC-SHA256 signature computed
//! over a canonical query string: empty-valued parameters dropped, the rest
//! sorted lexicographically by key, URL-encoded, and joined as `key=value`
//! pairs. The string-to-sign prepends the HTTP method, host, and fixed
//! `/onca/xml` path. The output is deterministic and independent of the
//! iteration order of the input parameters.

use base64::prelude::*;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::PanhandlerError;

type HmacSha256 = Hmac<Sha256>;

/// The fixed request path on every Amazon Product Advertising endpoint.
const REQUEST_PATH: &str = "/onca/xml";

/// Builds the canonical query string for the given parameters.
///
/// Empty-valued parameters are dropped and the remainder sorted by key,
/// regardless of the order the caller supplied them in. Both keys and values
/// are URL-encoded.
#[must_use]
pub fn canonical_query_string(params: &[(&str, String)]) -> String {
    let sorted: std::collections::BTreeMap<&str, &str> = params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| (*key, value.as_str()))
        .collect();

    sorted
        .iter()
        .map(|(key, value)| {
            format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Builds a fully signed Amazon request URL.
///
/// # Errors
///
/// Returns [`PanhandlerError::MissingCredential`] when `secret_key` is empty;
/// an unsigned request must never be sent.
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn signed_request_url(
    host: &str,
    params: &[(&str, String)],
    secret_key: &str,
) -> Result<String, PanhandlerError> {
    if secret_key.is_empty() {
        return Err(PanhandlerError::MissingCredential {
            credential: "secret_access_key",
        });
    }

    let query = canonical_query_string(params);
    let string_to_sign = format!("GET\n{host}\n{REQUEST_PATH}\n{query}");

    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(string_to_sign.as_bytes());
    let signature = BASE64_STANDARD.encode(mac.finalize().into_bytes());

    Ok(format!(
        "http://{host}{REQUEST_PATH}?{query}&Signature={}",
        urlencoding::encode(&signature)
    ))
}

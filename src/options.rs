//! Per-call option handling shared by all drivers.
//!
//! Callers hand drivers a small name/value bag. Each driver validates the
//! names against its static allowlist and parses numeric values before any
//! request is built, so a bad option never costs a network round trip.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::PanhandlerError;

/// Default request timeout in seconds, shared by every driver.
pub const DEFAULT_WAIT_FOR: u64 = 30;

/// A per-call option bag: option name to vendor-formatted text value.
///
/// Ordered so that validation errors are reported deterministically.
pub type ProductOptions = BTreeMap<String, String>;

/// Parses the text value of a numeric option.
///
/// Fails fast with [`PanhandlerError::InvalidOptionValue`] so a typo in a
/// count or timeout never reaches the wire.
pub(crate) fn parse_option<T: FromStr>(option: &str, value: &str) -> Result<T, PanhandlerError> {
    value
        .trim()
        .parse()
        .map_err(|_| PanhandlerError::InvalidOptionValue {
            option: option.to_string(),
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_option_accepts_numeric_text() {
        let parsed: u32 = parse_option("page", "7").unwrap();
        assert_eq!(parsed, 7);
    }

    #[test]
    fn test_parse_option_trims_whitespace() {
        let parsed: u64 = parse_option("wait_for", " 30 ").unwrap();
        assert_eq!(parsed, 30);
    }

    #[test]
    fn test_parse_option_rejects_garbage() {
        let result: Result<u32, _> = parse_option("page", "seven");
        assert!(matches!(
            result,
            Err(PanhandlerError::InvalidOptionValue { option, value })
                if option == "page" && value == "seven"
        ));
    }
}

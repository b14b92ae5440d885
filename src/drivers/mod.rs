//! Vendor drivers implementing the common product-fetch contract.
//!
//! A driver owns a typed configuration struct built at construction, plus a
//! static allowlist of the option names callers may override per call. All
//! four drivers follow the same shape: validate and merge options onto a
//! copy of the configuration, build the vendor URL, issue one GET, map the
//! XML body onto [`ProductRecord`]s in document order.

pub mod amazon;
pub mod cafepress;
pub mod commission_junction;
pub mod ebay;
pub(crate) mod listing;

pub use amazon::{AmazonConfig, AmazonDriver};
pub use cafepress::{CafePressConfig, CafePressDriver};
pub use commission_junction::{CommissionJunctionConfig, CommissionJunctionDriver};
pub use ebay::{EbayConfig, EbayDriver};

use async_trait::async_trait;

use crate::error::PanhandlerError;
use crate::options::ProductOptions;
use crate::product::ProductRecord;

/// The common contract every vendor driver implements.
///
/// Implementations take `&self` on the fetch methods and merge per-call
/// options into a cloned configuration, so a shared driver cannot race a
/// concurrent `set_default_option_values` (which requires `&mut self`).
#[async_trait]
pub trait ProductDriver: Send + Sync {
    /// The option names `get_products` accepts for this driver.
    fn supported_options(&self) -> &'static [&'static str];

    /// Persists new default option values across calls.
    ///
    /// This is the only way to change stored configuration; options passed
    /// to [`ProductDriver::get_products`] apply to that call alone.
    fn set_default_option_values(
        &mut self,
        options: &ProductOptions,
    ) -> Result<(), PanhandlerError>;

    /// Fetches products using stored configuration plus per-call overrides.
    ///
    /// Performs exactly one outbound request. Returns the vendor's results
    /// in document order, or an empty list when the vendor sent no usable
    /// body (empty, malformed, or flagged with a help/exception node).
    async fn get_products(
        &self,
        options: Option<&ProductOptions>,
    ) -> Result<Vec<ProductRecord>, PanhandlerError>;

    /// Fetches products matching the given keywords.
    ///
    /// Keywords are joined with spaces and applied as this call's keyword
    /// override. Drivers whose API has no keyword search (CafePress) ignore
    /// them and return their regular listing.
    async fn get_products_by_keywords(
        &self,
        keywords: &[String],
        options: Option<&ProductOptions>,
    ) -> Result<Vec<ProductRecord>, PanhandlerError>;

    /// Sets the default number of products returned per call.
    fn set_maximum_product_count(&mut self, count: u32);

    /// Sets the default results page requested per call.
    fn set_results_page(&mut self, page: u32);
}

/// Joins fixed-name parameters into a query string, URL-encoding values.
pub(crate) fn encode_query(params: &[(&str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| format!("{key}={}", urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Wraps a parsed URL in a single-element list, or none when the source
/// node was absent.
pub(crate) fn url_list(url: String) -> Vec<String> {
    if url.is_empty() {
        Vec::new()
    } else {
        vec![url]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_query_preserves_order_and_encodes_values() {
        let params = [
            ("appKey", "abc 123".to_string()),
            ("storeId", "demo".to_string()),
        ];
        assert_eq!(encode_query(&params), "appKey=abc%20123&storeId=demo");
    }

    #[test]
    fn test_url_list_drops_empty_urls() {
        assert!(url_list(String::new()).is_empty());
        assert_eq!(
            url_list("http://example.com".to_string()),
            vec!["http://example.com".to_string()]
        );
    }
}

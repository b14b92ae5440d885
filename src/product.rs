//! The vendor-neutral product representation.

use serde::{Deserialize, Serialize};

/// One product as returned to callers, regardless of vendor.
///
/// Every field defaults to an empty string or empty sequence when the source
/// XML lacks the corresponding node — callers never see a missing field.
/// Records are plain values: constructed once per parsed item, compared by
/// value, owned by the caller.
///
/// `price` is left as vendor-formatted text; no currency parsing is done.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Product name or listing title.
    pub name: String,
    /// Free-text description, often empty.
    pub description: String,
    /// Price exactly as the vendor formatted it.
    pub price: String,
    /// Product page URLs; the first one is canonical.
    pub web_urls: Vec<String>,
    /// Product image URLs.
    pub image_urls: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_is_empty() {
        let record = ProductRecord::default();
        assert_eq!(record.name, "");
        assert_eq!(record.price, "");
        assert!(record.web_urls.is_empty());
        assert!(record.image_urls.is_empty());
    }

    #[test]
    fn test_value_equality() {
        let a = ProductRecord {
            name: "Widget".to_string(),
            price: "$4.99".to_string(),
            ..ProductRecord::default()
        };
        let b = a.clone();
        assert_eq!(a, b);
    }
}

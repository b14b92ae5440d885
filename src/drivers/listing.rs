//! Shared storefront-listing XML mapping (Amazon and CafePress).
//!
//! Both vendors answer with a flat list of `<product>` elements carrying the
//! product data as attributes, and signal problems with a `<help>` element
//! instead of an HTTP error. A non-empty help node means "no results", not a
//! failure; so does a body that is not XML at all.

use quick_xml::de;
use serde::Deserialize;

use crate::drivers::url_list;
use crate::product::ProductRecord;

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct StoreListing {
    #[serde(rename = "product")]
    products: Vec<ProductNode>,
    help: HelpNode,
}

/// The vendors are inconsistent about the shape of `<help>`: sometimes bare
/// text, sometimes a nested `<exception-message>`.
#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct HelpNode {
    #[serde(rename = "$text")]
    text: String,
    #[serde(rename = "exception-message")]
    exception_message: String,
}

impl HelpNode {
    fn is_flagged(&self) -> bool {
        !self.text.trim().is_empty() || !self.exception_message.trim().is_empty()
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct ProductNode {
    #[serde(rename = "@name")]
    name: String,
    #[serde(rename = "@sellPrice")]
    sell_price: String,
    #[serde(rename = "@defaultProductUri")]
    default_product_uri: String,
    #[serde(rename = "@description")]
    description: String,
    #[serde(rename = "@storeUri")]
    store_uri: String,
}

impl From<ProductNode> for ProductRecord {
    fn from(node: ProductNode) -> Self {
        Self {
            name: node.name,
            description: node.description,
            price: node.sell_price,
            web_urls: url_list(node.store_uri),
            image_urls: url_list(node.default_product_uri),
        }
    }
}

/// Maps a listing body onto product records in document order.
///
/// Total over its input: malformed XML and help-flagged responses both map
/// to an empty list.
pub(crate) fn extract_products(body: &str) -> Vec<ProductRecord> {
    let listing: StoreListing = match de::from_str(body) {
        Ok(listing) => listing,
        Err(err) => {
            tracing::debug!(%err, "discarding unparseable listing body");
            return Vec::new();
        }
    };

    if listing.help.is_flagged() {
        tracing::debug!(help = %listing.help.text, "vendor flagged the response; returning no results");
        return Vec::new();
    }

    listing.products.into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PRODUCTS: &str = r#"<products>
  <product name="Mug" sellPrice="$12.99" description="A mug."
           defaultProductUri="http://img.example.com/mug.jpg"
           storeUri="http://store.example.com/mug"/>
  <product name="Shirt" sellPrice="$19.99" description="A shirt."
           defaultProductUri="http://img.example.com/shirt.jpg"
           storeUri="http://store.example.com/shirt"/>
</products>"#;

    #[test]
    fn test_maps_every_product_in_document_order() {
        let products = extract_products(TWO_PRODUCTS);
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Mug");
        assert_eq!(products[0].price, "$12.99");
        assert_eq!(products[0].web_urls, vec!["http://store.example.com/mug"]);
        assert_eq!(
            products[0].image_urls,
            vec!["http://img.example.com/mug.jpg"]
        );
        assert_eq!(products[1].name, "Shirt");
    }

    #[test]
    fn test_missing_attributes_become_empty_fields() {
        let products = extract_products(r#"<products><product name="Mug"/></products>"#);
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Mug");
        assert_eq!(products[0].description, "");
        assert_eq!(products[0].price, "");
        assert!(products[0].web_urls.is_empty());
        assert!(products[0].image_urls.is_empty());
    }

    #[test]
    fn test_help_text_yields_empty_result() {
        let body = r#"<products><help>invalid api key</help></products>"#;
        assert!(extract_products(body).is_empty());
    }

    #[test]
    fn test_exception_message_yields_empty_result() {
        let body = r#"<products>
  <product name="Mug"/>
  <help><exception-message>store not found</exception-message></help>
</products>"#;
        assert!(extract_products(body).is_empty());
    }

    #[test]
    fn test_empty_help_is_not_a_flag() {
        let body = r#"<products><help></help><product name="Mug"/></products>"#;
        assert_eq!(extract_products(body).len(), 1);
    }

    #[test]
    fn test_malformed_xml_yields_empty_result() {
        assert!(extract_products("this is not xml").is_empty());
        assert!(extract_products("<products><product").is_empty());
    }

    #[test]
    fn test_no_products_yields_empty_result() {
        assert!(extract_products("<products/>").is_empty());
    }
}

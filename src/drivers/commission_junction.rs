//! Product driver for the Commission Junction product-search API.
//!
//! CJ authenticates with an `Authorization` header rather than a query
//! parameter, and reports failures inside an otherwise successful response
//! via an `<error-message>` element. That message surfaces as a single
//! [`PanhandlerError::VendorMessage`], never as an empty or partial list.

use async_trait::async_trait;
use quick_xml::de;
use serde::Deserialize;

use crate::drivers::{encode_query, url_list, ProductDriver};
use crate::error::PanhandlerError;
use crate::options::{parse_option, ProductOptions, DEFAULT_WAIT_FOR};
use crate::product::ProductRecord;
use crate::transport::Transport;

/// Option names accepted per call by the Commission Junction driver.
pub const SUPPORTED_OPTIONS: &[&str] = &[
    "advertiser-ids",
    "currency",
    "keywords",
    "page-number",
    "records-per-page",
    "serviceable-area",
    "wait_for",
];

const DEFAULT_SERVICE_URL: &str = "https://product-search.api.cj.com/v2/product-search";

/// Configuration for [`CommissionJunctionDriver`].
#[derive(Clone, Debug)]
pub struct CommissionJunctionConfig {
    /// Service endpoint; overridable for tests.
    pub service_url: String,
    /// Authorization key, sent as the `Authorization` header.
    pub api_key: String,
    /// Publisher web site ID, sent as `website-id`.
    pub website_id: String,
    /// Default search keywords.
    pub keywords: String,
    /// Space-separated advertiser IDs restricting the search; empty means
    /// all advertisers.
    pub advertiser_ids: String,
    /// Results per page. CJ caps this at 1,000.
    pub records_per_page: u32,
    /// Page of results. CJ documents page numbers from zero, but zero
    /// returns nothing in practice, so the default is 1.
    pub page_number: u32,
    /// Currency for returned prices.
    pub currency: String,
    /// Serviceable area filter.
    pub serviceable_area: String,
    /// Request timeout in seconds.
    pub wait_for: u64,
}

impl Default for CommissionJunctionConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            api_key: String::new(),
            website_id: String::new(),
            keywords: String::new(),
            advertiser_ids: String::new(),
            records_per_page: 50,
            page_number: 1,
            currency: "USD".to_string(),
            serviceable_area: "US".to_string(),
            wait_for: DEFAULT_WAIT_FOR,
        }
    }
}

/// Fetches products from Commission Junction.
#[derive(Debug)]
pub struct CommissionJunctionDriver {
    config: CommissionJunctionConfig,
    transport: Transport,
}

impl CommissionJunctionDriver {
    /// Creates a driver with the given authorization key and web site ID.
    #[must_use]
    pub fn new(api_key: impl Into<String>, website_id: impl Into<String>) -> Self {
        Self::from_config(CommissionJunctionConfig {
            api_key: api_key.into(),
            website_id: website_id.into(),
            ..CommissionJunctionConfig::default()
        })
    }

    /// Creates a driver from a full configuration.
    #[must_use]
    pub fn from_config(config: CommissionJunctionConfig) -> Self {
        Self {
            config,
            transport: Transport::new(),
        }
    }

    fn build_request_url(config: &CommissionJunctionConfig) -> String {
        let mut params = vec![
            ("website-id", config.website_id.clone()),
            ("serviceable-area", config.serviceable_area.clone()),
            ("currency", config.currency.clone()),
            ("records-per-page", config.records_per_page.to_string()),
            ("page-number", config.page_number.to_string()),
            ("keywords", config.keywords.clone()),
        ];
        if !config.advertiser_ids.is_empty() {
            params.push(("advertiser-ids", config.advertiser_ids.clone()));
        }
        format!("{}?{}", config.service_url, encode_query(&params))
    }

    fn apply_options(
        config: &mut CommissionJunctionConfig,
        options: &ProductOptions,
    ) -> Result<(), PanhandlerError> {
        for (name, value) in options {
            match name.as_str() {
                "advertiser-ids" => config.advertiser_ids = value.clone(),
                "currency" => config.currency = value.clone(),
                "keywords" => config.keywords = value.clone(),
                "page-number" => config.page_number = parse_option(name, value)?,
                "records-per-page" => config.records_per_page = parse_option(name, value)?,
                "serviceable-area" => config.serviceable_area = value.clone(),
                "wait_for" => config.wait_for = parse_option(name, value)?,
                _ => {
                    return Err(PanhandlerError::UnsupportedOption {
                        option: name.clone(),
                    })
                }
            }
        }
        Ok(())
    }

    /// Maps a CJ response body onto product records.
    ///
    /// An `<error-message>` element fails the whole call; malformed XML
    /// degrades to an empty list like everywhere else.
    fn extract_products(body: &str) -> Result<Vec<ProductRecord>, PanhandlerError> {
        let response: CjResponse = match de::from_str(body) {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(%err, "discarding unparseable product-search body");
                return Ok(Vec::new());
            }
        };

        let message = response.error_message.trim();
        if !message.is_empty() {
            return Err(PanhandlerError::VendorMessage {
                message: message.to_string(),
            });
        }

        Ok(response
            .products
            .product
            .into_iter()
            .map(|node| ProductRecord {
                name: node.name,
                description: node.description,
                price: node.price,
                web_urls: url_list(node.buy_url),
                image_urls: url_list(node.image_url),
            })
            .collect())
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct CjResponse {
    products: CjProducts,
    error_message: String,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct CjProducts {
    product: Vec<CjProduct>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
struct CjProduct {
    name: String,
    description: String,
    buy_url: String,
    image_url: String,
    price: String,
}

#[async_trait]
impl ProductDriver for CommissionJunctionDriver {
    fn supported_options(&self) -> &'static [&'static str] {
        SUPPORTED_OPTIONS
    }

    fn set_default_option_values(
        &mut self,
        options: &ProductOptions,
    ) -> Result<(), PanhandlerError> {
        Self::apply_options(&mut self.config, options)
    }

    async fn get_products(
        &self,
        options: Option<&ProductOptions>,
    ) -> Result<Vec<ProductRecord>, PanhandlerError> {
        let mut config = self.config.clone();
        if let Some(options) = options {
            Self::apply_options(&mut config, options)?;
        }

        let url = Self::build_request_url(&config);
        let headers = [("Authorization", config.api_key.clone())];
        let body = self.transport.get(&url, &headers, config.wait_for).await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        Self::extract_products(&body)
    }

    async fn get_products_by_keywords(
        &self,
        keywords: &[String],
        options: Option<&ProductOptions>,
    ) -> Result<Vec<ProductRecord>, PanhandlerError> {
        let mut merged = options.cloned().unwrap_or_default();
        merged.insert("keywords".to_string(), keywords.join(" "));
        self.get_products(Some(&merged)).await
    }

    fn set_maximum_product_count(&mut self, count: u32) {
        self.config.records_per_page = count;
    }

    fn set_results_page(&mut self, page: u32) {
        self.config.page_number = page;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PRODUCTS: &str = r#"<cj-api>
  <products total-matched="2" records-returned="2" page-number="1">
    <product>
      <name>Garden Gnome</name>
      <description>A gnome for the garden.</description>
      <buy-url>http://example.com/gnome</buy-url>
      <image-url>http://example.com/gnome.jpg</image-url>
      <price>14.50</price>
    </product>
    <product>
      <name>Lawn Flamingo</name>
      <buy-url>http://example.com/flamingo</buy-url>
      <price>9.99</price>
    </product>
  </products>
</cj-api>"#;

    #[test]
    fn test_maps_product_descendants_in_order() {
        let products = CommissionJunctionDriver::extract_products(TWO_PRODUCTS).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Garden Gnome");
        assert_eq!(products[0].price, "14.50");
        assert_eq!(products[0].web_urls, vec!["http://example.com/gnome"]);
        assert_eq!(products[1].name, "Lawn Flamingo");
        assert_eq!(products[1].description, "");
        assert!(products[1].image_urls.is_empty());
    }

    #[test]
    fn test_error_message_is_a_single_error_outcome() {
        let body = r#"<cj-api><error-message>Invalid developer key</error-message></cj-api>"#;
        let result = CommissionJunctionDriver::extract_products(body);
        assert!(matches!(
            result,
            Err(PanhandlerError::VendorMessage { message }) if message == "Invalid developer key"
        ));
    }

    #[test]
    fn test_malformed_body_degrades_to_empty() {
        let products = CommissionJunctionDriver::extract_products("<cj-api>").unwrap();
        assert!(products.is_empty());
    }

    #[test]
    fn test_request_url_omits_empty_advertiser_ids() {
        let config = CommissionJunctionConfig {
            website_id: "123".to_string(),
            keywords: "gnome".to_string(),
            ..CommissionJunctionConfig::default()
        };
        let url = CommissionJunctionDriver::build_request_url(&config);
        assert_eq!(
            url,
            "https://product-search.api.cj.com/v2/product-search?website-id=123\
             &serviceable-area=US&currency=USD&records-per-page=50&page-number=1&keywords=gnome"
        );
    }

    #[test]
    fn test_request_url_appends_advertiser_ids_when_set() {
        let config = CommissionJunctionConfig {
            website_id: "123".to_string(),
            advertiser_ids: "111 222".to_string(),
            ..CommissionJunctionConfig::default()
        };
        let url = CommissionJunctionDriver::build_request_url(&config);
        assert!(url.ends_with("&advertiser-ids=111%20222"));
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let mut config = CommissionJunctionConfig::default();
        let mut options = ProductOptions::new();
        options.insert("low-price".to_string(), "5".to_string());

        assert!(matches!(
            CommissionJunctionDriver::apply_options(&mut config, &options),
            Err(PanhandlerError::UnsupportedOption { option }) if option == "low-price"
        ));
    }
}

//! Product driver for the eBay Finding API (`findItemsByKeywords`).

use async_trait::async_trait;
use quick_xml::de;
use serde::Deserialize;

use crate::drivers::{encode_query, url_list, ProductDriver};
use crate::error::PanhandlerError;
use crate::options::{parse_option, ProductOptions, DEFAULT_WAIT_FOR};
use crate::product::ProductRecord;
use crate::transport::Transport;

/// Option names accepted per call by the eBay driver.
pub const SUPPORTED_OPTIONS: &[&str] =
    &["entries-per-page", "keywords", "page-number", "wait_for"];

const OPERATION_NAME: &str = "findItemsByKeywords";
const SERVICE_VERSION: &str = "1.0.0";
const DEFAULT_SERVICE_URL: &str = "http://svcs.ebay.com/services/search/FindingService/v1";

/// Configuration for [`EbayDriver`].
#[derive(Clone, Debug)]
pub struct EbayConfig {
    /// Service endpoint; overridable for tests.
    pub service_url: String,
    /// Application ID issued by eBay, sent as `SECURITY-APPNAME`.
    pub app_id: String,
    /// Default search keywords.
    pub keywords: String,
    /// Items per page, sent as `paginationInput.entriesPerPage`.
    pub entries_per_page: u32,
    /// Page of results, sent as `paginationInput.pageNumber`.
    pub page_number: u32,
    /// Request timeout in seconds.
    pub wait_for: u64,
}

impl Default for EbayConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            app_id: String::new(),
            keywords: String::new(),
            entries_per_page: 10,
            page_number: 1,
            wait_for: DEFAULT_WAIT_FOR,
        }
    }
}

/// Fetches products from eBay keyword search.
#[derive(Debug)]
pub struct EbayDriver {
    config: EbayConfig,
    transport: Transport,
}

impl EbayDriver {
    /// Creates a driver with the given eBay application ID.
    #[must_use]
    pub fn new(app_id: impl Into<String>) -> Self {
        Self::from_config(EbayConfig {
            app_id: app_id.into(),
            ..EbayConfig::default()
        })
    }

    /// Creates a driver from a full configuration.
    #[must_use]
    pub fn from_config(config: EbayConfig) -> Self {
        Self {
            config,
            transport: Transport::new(),
        }
    }

    fn build_request_url(config: &EbayConfig) -> String {
        let params = [
            ("OPERATION-NAME", OPERATION_NAME.to_string()),
            ("SERVICE-VERSION", SERVICE_VERSION.to_string()),
            ("SECURITY-APPNAME", config.app_id.clone()),
            ("RESPONSE-DATA-FORMAT", "XML".to_string()),
            ("REST-PAYLOAD", String::new()),
            (
                "paginationInput.entriesPerPage",
                config.entries_per_page.to_string(),
            ),
            ("paginationInput.pageNumber", config.page_number.to_string()),
            ("keywords", config.keywords.clone()),
        ];
        format!("{}?{}", config.service_url, encode_query(&params))
    }

    fn apply_options(
        config: &mut EbayConfig,
        options: &ProductOptions,
    ) -> Result<(), PanhandlerError> {
        for (name, value) in options {
            match name.as_str() {
                "entries-per-page" => config.entries_per_page = parse_option(name, value)?,
                "keywords" => config.keywords = value.clone(),
                "page-number" => config.page_number = parse_option(name, value)?,
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

    /// Maps the `searchResult/item` elements onto product records.
    fn extract_products(body: &str) -> Vec<ProductRecord> {
        let response: FindItemsResponse = match de::from_str(body) {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(%err, "discarding unparseable finding-service body");
                return Vec::new();
            }
        };

        response
            .search_result
            .item
            .into_iter()
            .map(|item| ProductRecord {
                name: item.title,
                description: String::new(),
                price: item.selling_status.current_price.value,
                web_urls: url_list(item.view_item_url),
                image_urls: url_list(item.gallery_url),
            })
            .collect()
    }
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct FindItemsResponse {
    #[serde(rename = "searchResult")]
    search_result: SearchResult,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct SearchResult {
    item: Vec<SearchItem>,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct SearchItem {
    title: String,
    #[serde(rename = "sellingStatus")]
    selling_status: SellingStatus,
    #[serde(rename = "viewItemURL")]
    view_item_url: String,
    #[serde(rename = "galleryURL")]
    gallery_url: String,
}

#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct SellingStatus {
    #[serde(rename = "currentPrice")]
    current_price: PriceNode,
}

/// `currentPrice` carries a `currencyId` attribute next to its text, so a
/// bare `String` field would not deserialize.
#[derive(Default, Debug, Deserialize)]
#[serde(default)]
struct PriceNode {
    #[serde(rename = "$text")]
    value: String,
}

#[async_trait]
impl ProductDriver for EbayDriver {
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
        let body = self.transport.get(&url, &[], config.wait_for).await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(Self::extract_products(&body))
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
        self.config.entries_per_page = count;
    }

    fn set_results_page(&mut self, page: u32) {
        self.config.page_number = page;
    }
}

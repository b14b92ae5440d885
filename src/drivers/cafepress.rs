//! Product driver for the CafePress open API.
//!
//! CafePress lists the products of one store section
//! (`product.listByStoreSection.cp`); there is no keyword search. When a
//! Commission Junction PID is configured, every product URL is rewrapped in
//! a CJ click-tracking link.

use async_trait::async_trait;

use crate::drivers::{encode_query, listing, ProductDriver};
use crate::error::PanhandlerError;
use crate::options::{parse_option, ProductOptions, DEFAULT_WAIT_FOR};
use crate::product::ProductRecord;
use crate::transport::Transport;

/// Option names accepted per call by the CafePress driver.
pub const SUPPORTED_OPTIONS: &[&str] = &[
    "api_key",
    "cj_pid",
    "page",
    "page_size",
    "section_id",
    "store_id",
    "wait_for",
];

const API_VERSION: &str = "3";
const DEFAULT_SERVICE_URL: &str = "http://open-api.cafepress.com/product.listByStoreSection.cp";

/// Configuration for [`CafePressDriver`].
#[derive(Clone, Debug)]
pub struct CafePressConfig {
    /// Service endpoint; overridable for tests.
    pub service_url: String,
    /// Application key issued by CafePress, sent as `appKey`.
    pub api_key: String,
    /// Store whose products are listed.
    pub store_id: String,
    /// Section within the store; 0 is the root section.
    pub section_id: u32,
    /// Page number, starting at 0 per the CafePress API.
    pub page: u32,
    /// Products per page (`pageSize`), clamped to at least 1.
    pub page_size: u32,
    /// Commission Junction affiliate PID; when set, product URLs are
    /// rewrapped in CJ click-tracking links.
    pub cj_pid: String,
    /// Request timeout in seconds.
    pub wait_for: u64,
}

impl Default for CafePressConfig {
    fn default() -> Self {
        Self {
            service_url: DEFAULT_SERVICE_URL.to_string(),
            api_key: String::new(),
            store_id: String::new(),
            section_id: 0,
            page: 0,
            page_size: 10,
            cj_pid: String::new(),
            wait_for: DEFAULT_WAIT_FOR,
        }
    }
}

/// Fetches products from a CafePress store section.
#[derive(Debug)]
pub struct CafePressDriver {
    config: CafePressConfig,
    transport: Transport,
}

impl CafePressDriver {
    /// Creates a driver from the given configuration.
    #[must_use]
    pub fn new(config: CafePressConfig) -> Self {
        Self {
            config,
            transport: Transport::new(),
        }
    }

    fn build_request_url(config: &CafePressConfig) -> String {
        // The API rejects a zero page size.
        let page_size = config.page_size.max(1);
        let params = [
            ("v", API_VERSION.to_string()),
            ("appKey", config.api_key.clone()),
            ("page", config.page.to_string()),
            ("pageSize", page_size.to_string()),
            ("storeId", config.store_id.clone()),
            ("sectionId", config.section_id.to_string()),
        ];
        format!("{}?{}", config.service_url, encode_query(&params))
    }

    fn apply_options(
        config: &mut CafePressConfig,
        options: &ProductOptions,
    ) -> Result<(), PanhandlerError> {
        for (name, value) in options {
            match name.as_str() {
                "api_key" => config.api_key = value.clone(),
                "cj_pid" => config.cj_pid = value.clone(),
                "page" => config.page = parse_option(name, value)?,
                "page_size" => config.page_size = parse_option(name, value)?,
                "section_id" => config.section_id = parse_option(name, value)?,
                "store_id" => config.store_id = value.clone(),
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

    /// Rewraps product URLs in Commission Junction click-tracking links.
    fn apply_cj_tracking(products: &mut [ProductRecord], cj_pid: &str) {
        for product in products.iter_mut() {
            product.web_urls = product
                .web_urls
                .iter()
                .map(|url| format!("http://www.tkqlhce.com/click-{cj_pid}-10467594?url={url}"))
                .collect();
        }
    }
}

#[async_trait]
impl ProductDriver for CafePressDriver {
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

        let mut products = listing::extract_products(&body);
        if !config.cj_pid.is_empty() {
            Self::apply_cj_tracking(&mut products, &config.cj_pid);
        }
        Ok(products)
    }

    async fn get_products_by_keywords(
        &self,
        _keywords: &[String],
        options: Option<&ProductOptions>,
    ) -> Result<Vec<ProductRecord>, PanhandlerError> {
        // The section-listing API has no keyword search.
        self.get_products(options).await
    }

    fn set_maximum_product_count(&mut self, count: u32) {
        self.config.page_size = count;
    }

    fn set_results_page(&mut self, page: u32) {
        self.config.page = page;
    }
}

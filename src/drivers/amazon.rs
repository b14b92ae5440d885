//! Product driver for the Amazon Product Advertising API.
//!
//! Amazon is the only vendor that requires signed requests; see
//! [`crate::signing`] for the canonicalization and HMAC details. The driver
//! issues `ItemSearch` operations against the configured regional host and
//! maps the listing response with the shared attribute scheme.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};

use crate::drivers::{listing, ProductDriver};
use crate::error::PanhandlerError;
use crate::options::{parse_option, ProductOptions, DEFAULT_WAIT_FOR};
use crate::product::ProductRecord;
use crate::signing;
use crate::transport::Transport;

/// Option names accepted per call by the Amazon driver.
pub const SUPPORTED_OPTIONS: &[&str] = &[
    "amazon_site",
    "keywords",
    "search_index",
    "secret_access_key",
    "wait_for",
];

const OPERATION: &str = "ItemSearch";
const SERVICE: &str = "AWSECommerceService";
const RESPONSE_GROUP: &str = "Medium,Images,Variations";
const API_VERSION: &str = "2009-03-31";

/// Configuration for [`AmazonDriver`], read once at construction and cloned
/// per call when options are merged.
#[derive(Clone, Debug)]
pub struct AmazonConfig {
    /// Host name of the regional endpoint, e.g. `ecs.amazonaws.com`.
    pub site: String,
    /// AWS access key identifier, sent as `AWSAccessKeyId`.
    pub access_key_id: String,
    /// Associate (affiliate) tag, sent as `AssociateTag`.
    pub associate_tag: String,
    /// Secret key used to sign requests. With this unset, no request is
    /// ever sent.
    pub secret_access_key: String,
    /// Default search keywords.
    pub keywords: String,
    /// Default search index, e.g. `Books`.
    pub search_index: String,
    /// Results page, sent as `ItemPage`.
    pub results_page: u32,
    /// Recorded for interface parity; ItemSearch pages are fixed-size, so
    /// this never reaches the wire.
    pub maximum_product_count: u32,
    /// Request timeout in seconds.
    pub wait_for: u64,
}

impl Default for AmazonConfig {
    fn default() -> Self {
        Self {
            site: "ecs.amazonaws.com".to_string(),
            access_key_id: String::new(),
            associate_tag: String::new(),
            secret_access_key: String::new(),
            keywords: String::new(),
            search_index: String::new(),
            results_page: 1,
            maximum_product_count: 10,
            wait_for: DEFAULT_WAIT_FOR,
        }
    }
}

/// Fetches products from the Amazon Product Advertising API.
#[derive(Debug)]
pub struct AmazonDriver {
    config: AmazonConfig,
    transport: Transport,
}

impl AmazonDriver {
    /// Creates a driver from the given configuration.
    #[must_use]
    pub fn new(config: AmazonConfig) -> Self {
        Self {
            config,
            transport: Transport::new(),
        }
    }

    /// Builds the signed ItemSearch URL for a merged configuration.
    ///
    /// The `Timestamp` parameter is stamped at build time, so two calls
    /// produce equal URLs only within the same second.
    fn build_request_url(config: &AmazonConfig) -> Result<String, PanhandlerError> {
        let params = [
            ("AWSAccessKeyId", config.access_key_id.clone()),
            ("AssociateTag", config.associate_tag.clone()),
            ("ItemPage", config.results_page.to_string()),
            ("Keywords", config.keywords.clone()),
            ("Operation", OPERATION.to_string()),
            ("ResponseGroup", RESPONSE_GROUP.to_string()),
            ("SearchIndex", config.search_index.clone()),
            ("Service", SERVICE.to_string()),
            (
                "Timestamp",
                Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            ),
            ("Version", API_VERSION.to_string()),
        ];
        signing::signed_request_url(&config.site, &params, &config.secret_access_key)
    }

    fn apply_options(
        config: &mut AmazonConfig,
        options: &ProductOptions,
    ) -> Result<(), PanhandlerError> {
        for (name, value) in options {
            match name.as_str() {
                "amazon_site" => config.site = value.clone(),
                "keywords" => config.keywords = value.clone(),
                "search_index" => config.search_index = value.clone(),
                "secret_access_key" => config.secret_access_key = value.clone(),
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
}

#[async_trait]
impl ProductDriver for AmazonDriver {
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

        let url = Self::build_request_url(&config)?;
        let body = self.transport.get(&url, &[], config.wait_for).await?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(listing::extract_products(&body))
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
        self.config.maximum_product_count = count;
    }

    fn set_results_page(&mut self, page: u32) {
        self.config.results_page = page;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AmazonConfig {
        AmazonConfig {
            access_key_id: "EXAMPLEKEYID".to_string(),
            associate_tag: "example-20".to_string(),
            secret_access_key: "example-secret".to_string(),
            keywords: "WordPress".to_string(),
            search_index: "Books".to_string(),
            ..AmazonConfig::default()
        }
    }

    #[test]
    fn test_request_url_parameters_are_alphabetical_and_signed() {
        let url = AmazonDriver::build_request_url(&test_config()).unwrap();
        let (_, query) = url.split_once('?').unwrap();

        let keys: Vec<&str> = query
            .split('&')
            .map(|pair| pair.split_once('=').unwrap().0)
            .collect();

        // Everything before the trailing Signature is in strict
        // alphabetical order.
        let (signature, params) = keys.split_last().unwrap();
        assert_eq!(*signature, "Signature");
        let mut sorted = params.to_vec();
        sorted.sort_unstable();
        assert_eq!(params, sorted.as_slice());

        assert!(query.contains("Keywords=WordPress"));
        assert!(query.contains("SearchIndex=Books"));
    }

    #[test]
    fn test_unset_secret_key_means_no_request() {
        let config = AmazonConfig {
            secret_access_key: String::new(),
            ..test_config()
        };
        assert!(matches!(
            AmazonDriver::build_request_url(&config),
            Err(PanhandlerError::MissingCredential { .. })
        ));
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let mut config = test_config();
        let mut options = ProductOptions::new();
        options.insert("locale".to_string(), "de".to_string());

        let result = AmazonDriver::apply_options(&mut config, &options);
        assert!(matches!(
            result,
            Err(PanhandlerError::UnsupportedOption { option }) if option == "locale"
        ));
    }

    #[test]
    fn test_wait_for_override_must_be_numeric() {
        let mut config = test_config();
        let mut options = ProductOptions::new();
        options.insert("wait_for".to_string(), "soon".to_string());

        assert!(matches!(
            AmazonDriver::apply_options(&mut config, &options),
            Err(PanhandlerError::InvalidOptionValue { .. })
        ));
    }

    #[test]
    fn test_options_merge_onto_config() {
        let mut config = test_config();
        let mut options = ProductOptions::new();
        options.insert("keywords".to_string(), "Emacs".to_string());
        options.insert("wait_for".to_string(), "5".to_string());

        AmazonDriver::apply_options(&mut config, &options).unwrap();
        assert_eq!(config.keywords, "Emacs");
        assert_eq!(config.wait_for, 5);
    }

    #[tokio::test]
    async fn test_per_call_options_do_not_persist() {
        let driver = AmazonDriver::new(test_config());
        let mut options = ProductOptions::new();
        // Drop the secret per call so the call fails before any I/O.
        options.insert("secret_access_key".to_string(), String::new());

        let result = driver.get_products(Some(&options)).await;
        assert!(matches!(
            result,
            Err(PanhandlerError::MissingCredential { .. })
        ));
        // The stored default is untouched.
        assert_eq!(driver.config.secret_access_key, "example-secret");
    }
}

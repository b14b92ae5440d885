//! The uniform entry point over one active vendor driver.

use crate::drivers::ProductDriver;
use crate::error::PanhandlerError;
use crate::options::ProductOptions;
use crate::product::ProductRecord;

/// A thin facade holding one active [`ProductDriver`].
///
/// Every method delegates directly to the underlying driver; the facade
/// itself keeps no state beyond the boxed driver, so swapping vendors is a
/// matter of constructing a different driver.
///
/// # Example
///
/// ```rust,ignore
/// use panhandler::{CommissionJunctionDriver, Panhandler};
///
/// let driver = CommissionJunctionDriver::new("dev-key", "website-id");
/// let mut panhandler = Panhandler::new(Box::new(driver));
/// panhandler.set_maximum_product_count(20);
///
/// let keywords = vec!["garden".to_string()];
/// let products = panhandler.get_products_by_keywords(&keywords, None).await?;
/// ```
pub struct Panhandler {
    driver: Box<dyn ProductDriver>,
}

impl Panhandler {
    /// Wraps the given driver.
    #[must_use]
    pub fn new(driver: Box<dyn ProductDriver>) -> Self {
        Self { driver }
    }

    /// The option names the active driver accepts per call.
    #[must_use]
    pub fn get_supported_options(&self) -> &'static [&'static str] {
        self.driver.supported_options()
    }

    /// Persists new default option values on the active driver.
    ///
    /// # Errors
    ///
    /// Returns [`PanhandlerError::UnsupportedOption`] or
    /// [`PanhandlerError::InvalidOptionValue`] without touching the stored
    /// defaults when any entry is rejected.
    pub fn set_default_option_values(
        &mut self,
        options: &ProductOptions,
    ) -> Result<(), PanhandlerError> {
        self.driver.set_default_option_values(options)
    }

    /// Fetches products using stored configuration plus per-call overrides.
    ///
    /// # Errors
    ///
    /// See [`ProductDriver::get_products`].
    pub async fn get_products(
        &self,
        options: Option<&ProductOptions>,
    ) -> Result<Vec<ProductRecord>, PanhandlerError> {
        self.driver.get_products(options).await
    }

    /// Fetches products matching the given keywords.
    ///
    /// # Errors
    ///
    /// See [`ProductDriver::get_products_by_keywords`].
    pub async fn get_products_by_keywords(
        &self,
        keywords: &[String],
        options: Option<&ProductOptions>,
    ) -> Result<Vec<ProductRecord>, PanhandlerError> {
        self.driver.get_products_by_keywords(keywords, options).await
    }

    /// Sets the default number of products returned per call.
    pub fn set_maximum_product_count(&mut self, count: u32) {
        self.driver.set_maximum_product_count(count);
    }

    /// Sets the default results page requested per call.
    pub fn set_results_page(&mut self, page: u32) {
        self.driver.set_results_page(page);
    }
}

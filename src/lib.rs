//! # Panhandler
//!
//! A small client library that fetches product listings from several
//! third-party affiliate/e-commerce APIs (Amazon, CafePress, Commission
//! Junction, eBay) through one common interface.
//!
//! ## Overview
//!
//! This crate provides:
//! - A vendor-neutral [`ProductRecord`] returned by every driver
//! - One driver per vendor, each implementing the [`ProductDriver`] contract
//! - Request signing for the Amazon Product Advertising API via [`signing`]
//! - A thin [`Panhandler`] facade over one active driver
//!
//! Each driver performs the same three steps: build a vendor-specific HTTP
//! GET URL from its configuration plus per-call options, issue exactly one
//! request with a bounded timeout, and map the vendor's XML response onto
//! ordered [`ProductRecord`]s. There is no caching, no retry policy, and no
//! pagination orchestration; a call returns either a complete result
//! sequence or an error.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use panhandler::{EbayConfig, EbayDriver, Panhandler};
//!
//! let driver = EbayDriver::new("my-app-id");
//! let panhandler = Panhandler::new(Box::new(driver));
//!
//! let keywords = vec!["wordpress".to_string()];
//! let products = panhandler.get_products_by_keywords(&keywords, None).await?;
//! for product in products {
//!     println!("{}: {}", product.name, product.price);
//! }
//! ```
//!
//! ## Per-call options
//!
//! Every driver declares a static allowlist of option names it accepts (see
//! each driver's `SUPPORTED_OPTIONS`). Options passed to
//! [`ProductDriver::get_products`] are validated against that allowlist and
//! merged onto a copy of the stored configuration for that call only; an
//! unknown name fails with [`PanhandlerError::UnsupportedOption`] before any
//! request is built. Only
//! [`ProductDriver::set_default_option_values`] persists new defaults.
//!
//! ## Design Principles
//!
//! - **No global state**: configuration is injected at driver construction
//! - **Fail-fast validation**: option names and values are checked before I/O
//! - **Copy-on-call**: per-call options never mutate shared configuration
//! - **Lenient responses**: malformed XML and vendor "help" bodies degrade to
//!   an empty result rather than an error

pub mod drivers;
pub mod error;
pub mod facade;
pub mod options;
pub mod product;
pub mod signing;
mod transport;

// Re-export public types at crate root for convenience
pub use drivers::{
    AmazonConfig, AmazonDriver, CafePressConfig, CafePressDriver, CommissionJunctionConfig,
    CommissionJunctionDriver, EbayConfig, EbayDriver, ProductDriver,
};
pub use error::PanhandlerError;
pub use facade::Panhandler;
pub use options::{ProductOptions, DEFAULT_WAIT_FOR};
pub use product::ProductRecord;

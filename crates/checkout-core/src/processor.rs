//! Payment Processor Contract
//!
//! Defines the interface every payment backend implements and the payload a
//! payment method hands to it. Methods are selected through the typed
//! [`PaymentMethodId`] rather than a string-keyed registry.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_core::processor::{PaymentMethodId, Processors};
//!
//! let processors = Processors::new(Rc::new(HttpRedirectProcessor::from_env()?));
//! let response = processors
//!     .for_method(PaymentMethodId::Alipay)
//!     .process(&request)
//!     .await?;
//! ```

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{CheckoutError, Result};
use crate::line_items::LineItem;

/// Supported payment methods
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethodId {
    Alipay,
}

impl PaymentMethodId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alipay => "alipay",
        }
    }
}

impl fmt::Display for PaymentMethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethodId {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "alipay" => Ok(Self::Alipay),
            other => Err(CheckoutError::Config(format!("unknown payment method: {other}"))),
        }
    }
}

/// Credentials identifying the merchant account at the gateway
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayHandle {
    /// Publishable (client-side) key
    pub public_key: String,

    /// Connected account, when charging on behalf of another merchant
    #[serde(default)]
    pub account: Option<String>,
}

impl GatewayHandle {
    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let public_key = std::env::var("CHECKOUT_GATEWAY_PUBLIC_KEY")
            .map_err(|_| CheckoutError::Config("CHECKOUT_GATEWAY_PUBLIC_KEY not set".into()))?;
        let account = std::env::var("CHECKOUT_GATEWAY_ACCOUNT").ok();

        Ok(Self { public_key, account })
    }
}

fn default_timeout_secs() -> u64 {
    120
}

/// Processor configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    /// Where the gateway sends the customer after a successful payment
    pub success_url: String,

    /// Where the gateway sends the customer after cancelling
    pub cancel_url: String,

    /// Site the purchase belongs to
    #[serde(default)]
    pub site_id: Option<String>,

    /// Billing country (ISO 3166-1 alpha-2)
    #[serde(default)]
    pub country_code: Option<String>,

    /// Deadline for one processor call in seconds; `0` disables it
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            success_url: "http://localhost:3000/checkout/thank-you".into(),
            cancel_url: "http://localhost:3000/checkout".into(),
            site_id: None,
            country_code: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ProcessorConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            success_url: std::env::var("CHECKOUT_SUCCESS_URL").unwrap_or(defaults.success_url),
            cancel_url: std::env::var("CHECKOUT_CANCEL_URL").unwrap_or(defaults.cancel_url),
            site_id: std::env::var("CHECKOUT_SITE_ID").ok(),
            country_code: std::env::var("CHECKOUT_COUNTRY_CODE").ok(),
            timeout_secs: std::env::var("CHECKOUT_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.timeout_secs),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

/// Everything a processor needs for one payment attempt
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorRequest {
    pub payment_method: PaymentMethodId,
    pub handle: GatewayHandle,
    pub name: String,
    pub items: Vec<LineItem>,
    pub total: LineItem,
    pub config: ProcessorConfig,
}

/// Processor answer for redirect-based methods
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect_url: Option<String>,
}

impl ProcessorResponse {
    pub fn redirect(url: impl Into<String>) -> Self {
        Self {
            redirect_url: Some(url.into()),
        }
    }
}

/// Strategy trait for payment backends.
///
/// Futures are not required to be `Send`: the checkout runs on a single UI
/// event loop and browser HTTP clients are not thread-safe.
#[async_trait(?Send)]
pub trait PaymentProcessor {
    /// Short name for logs
    fn name(&self) -> &str;

    /// Submit one payment attempt. Resolves or rejects exactly once.
    async fn process(&self, request: &ProcessorRequest) -> Result<ProcessorResponse>;
}

/// Processor per supported payment method
#[derive(Clone)]
pub struct Processors {
    alipay: Rc<dyn PaymentProcessor>,
}

impl Processors {
    pub fn new(alipay: Rc<dyn PaymentProcessor>) -> Self {
        Self { alipay }
    }

    pub fn for_method(&self, method: PaymentMethodId) -> &dyn PaymentProcessor {
        match method {
            PaymentMethodId::Alipay => self.alipay.as_ref(),
        }
    }
}

impl fmt::Debug for Processors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Processors")
            .field("alipay", &self.alipay.name())
            .finish()
    }
}

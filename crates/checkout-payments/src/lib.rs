//! # checkout-payments
//!
//! Payment methods for the checkout, starting with Alipay.
//!
//! ## Redirect flow
//!
//! Alipay never collects card data on the merchant page. The method gathers
//! the customer's name, asks the processor to create the payment and hands the
//! returned URL to the host, which navigates there.
//!
//! ```text
//! ┌─────────────┐  submit  ┌────────────────┐  POST   ┌──────────────────┐
//! │  Name field │─────────▶│  Submission    │────────▶│  Transactions    │
//! │  + Pay btn  │          │  Controller    │◀────────│  endpoint        │
//! └─────────────┘          └───────┬────────┘ redirect└──────────────────┘
//!                                  │ Redirecting { url }
//!                                  ▼
//!                          ┌────────────────┐         ┌──────────────────┐
//!                          │  Host (web)    │────────▶│  Alipay page     │
//!                          └────────────────┘         └──────────────────┘
//! ```
//!
//! Status moves `NotStarted → Pending → Redirecting | Error`. An error returns
//! the form to `Ready`; the customer retries by pressing pay again.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use checkout_payments::{AlipayMethod, HttpRedirectProcessor};
//!
//! let session = CheckoutSession::new(items);
//! let processors = Processors::new(Rc::new(HttpRedirectProcessor::from_env()?));
//! let alipay = AlipayMethod::new(
//!     &session,
//!     processors,
//!     GatewayHandle::from_env()?,
//!     ProcessorConfig::from_env(),
//! );
//!
//! alipay.input_customer_name("Jane Doe");
//! if let SubmitOutcome::Redirecting(url) = alipay.submit().await {
//!     // navigate to url
//! }
//! ```

pub mod alipay;
mod http;
pub mod mock;

pub use alipay::{AlipayMethod, NameFieldView, PaymentMethodDescriptor, SubmitOutcome};
pub use http::HttpRedirectProcessor;
pub use mock::{MockProcessor, MockReply};

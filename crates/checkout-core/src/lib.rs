//! # checkout-core
//!
//! Session-scoped state and collaborator contracts for checkout payment methods.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      CheckoutSession                         │
//! │  ┌────────────────────┐  ┌───────────────┐  ┌─────────────┐  │
//! │  │ TransactionTracker │  │ LineItemsCell │  │ Processors  │  │
//! │  │ (status, gating)   │  │ (cart total)  │  │ (per method)│  │
//! │  └────────────────────┘  └───────────────┘  └─────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//!            ▲                                      ▲
//!            │            payment method            │
//!   ┌────────┴──────────────────────────────────────┴───────┐
//!   │  FormStore ── submit ── EventEmitter ── Localizer     │
//!   └───────────────────────────────────────────────────────┘
//! ```
//!
//! Every piece of state is owned by a value passed in at construction; there
//! is no global store registry.

pub mod cell;
pub mod error;
pub mod events;
pub mod form;
pub mod i18n;
pub mod line_items;
pub mod processor;
pub mod session;
pub mod status;

pub use error::{CheckoutError, Result};
pub use events::{CheckoutEvent, EventEmitter, RecordingEmitter, TracingEmitter};
pub use form::{FormAction, FormField, FormStore};
pub use i18n::{CatalogLocalizer, IdentityLocalizer, Localizer};
pub use line_items::{Amount, LineItem, LineItems, LineItemsCell};
pub use processor::{
    GatewayHandle, PaymentMethodId, PaymentProcessor, ProcessorConfig, ProcessorRequest,
    ProcessorResponse, Processors,
};
pub use session::{CheckoutSession, SessionId};
pub use status::{FormStatus, StatusReceiver, TransactionStatus, TransactionTracker};

//! Error Types

use std::time::Duration;

use thiserror::Error;

/// Result type alias for checkout operations
pub type Result<T> = std::result::Result<T, CheckoutError>;

/// Shown when the processor answers without a redirect target.
pub const GENERIC_PROCESSING_ERROR: &str =
    "There was an error processing your payment. Please try again or contact support.";

/// Shown when the processor does not settle before the deadline.
pub const TIMEOUT_ERROR: &str = "The payment request timed out. Please try again.";

/// Checkout error types
#[derive(Error, Debug)]
pub enum CheckoutError {
    /// The processor rejected the payment; the message is the gateway's own text
    #[error("{0}")]
    Processor(String),

    /// The processor succeeded but returned no redirect URL
    #[error("Processor response did not include a redirect URL")]
    MissingRedirect,

    /// The processor call exceeded its deadline
    #[error("Processor call timed out after {0:?}")]
    Timeout(Duration),

    /// Network or transport failure talking to the gateway
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other/unknown error
    #[error("{0}")]
    Other(String),
}

impl CheckoutError {
    /// Check if error is retryable
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }

    /// Message placed in the transaction error status.
    ///
    /// Gateway rejections and transport failures are surfaced verbatim; the
    /// remaining variants map to fixed texts.
    pub fn user_message(&self) -> String {
        match self {
            Self::Processor(msg) | Self::Transport(msg) | Self::Other(msg) => msg.clone(),
            Self::MissingRedirect => GENERIC_PROCESSING_ERROR.into(),
            Self::Timeout(_) => TIMEOUT_ERROR.into(),
            Self::Config(_) | Self::Json(_) => GENERIC_PROCESSING_ERROR.into(),
        }
    }
}

impl From<anyhow::Error> for CheckoutError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

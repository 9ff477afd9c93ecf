//! Checkout Session
//!
//! Owns the state shared by every payment method during one checkout. Methods
//! receive their collaborators from here instead of a global store registry.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::Result;
use crate::line_items::{LineItems, LineItemsCell};
use crate::status::{FormStatus, TransactionTracker};

/// Unique checkout session identifier
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State for one checkout, from cart load until redirect or abandonment
#[derive(Clone, Debug)]
pub struct CheckoutSession {
    /// Unique identifier
    pub id: SessionId,

    /// Creation timestamp
    pub started_at: DateTime<Utc>,

    status: TransactionTracker,
    line_items: LineItemsCell,
}

impl CheckoutSession {
    pub fn new(items: LineItems) -> Self {
        let session = Self {
            id: SessionId::new(),
            started_at: Utc::now(),
            status: TransactionTracker::new(),
            line_items: LineItemsCell::new(items),
        };
        tracing::debug!(session_id = %session.id, "checkout session started");
        session
    }

    /// Create with specific ID
    pub fn with_id(id: SessionId, items: LineItems) -> Self {
        let mut session = Self::new(items);
        session.id = id;
        session
    }

    pub fn status(&self) -> &TransactionTracker {
        &self.status
    }

    pub fn line_items(&self) -> &LineItemsCell {
        &self.line_items
    }

    /// Load the cart with the form held in `Loading`.
    ///
    /// On failure the message is published as the transaction error and the
    /// form stays closed, so an empty cart cannot be paid for.
    pub async fn load_line_items<F>(&self, fetch: F) -> Result<()>
    where
        F: Future<Output = Result<LineItems>>,
    {
        self.status.set_form_status(FormStatus::Loading);

        match fetch.await {
            Ok(items) => {
                tracing::debug!(session_id = %self.id, items = items.items.len(), "cart loaded");
                self.line_items.replace(items);
                let form = FormStatus::from(&self.status.transaction_status());
                self.status.set_form_status(form);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(session_id = %self.id, error = %err, "failed to load cart");
                self.status.set_error(err.user_message());
                self.status.set_form_status(FormStatus::Loading);
                Err(err)
            }
        }
    }
}

impl Default for CheckoutSession {
    fn default() -> Self {
        Self::new(LineItems::default())
    }
}

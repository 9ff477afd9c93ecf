//! Line Items
//!
//! Read-only cart snapshot used for display and as part of the processor
//! payload.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cell::StateCell;

/// Monetary amount
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    /// ISO 4217 currency code
    pub currency: String,

    /// Value in minor units (cents, fen)
    pub value: i64,

    /// Pre-formatted string for display, e.g. "¥298.00"
    pub display_value: String,
}

impl Amount {
    pub fn new(currency: impl Into<String>, value: i64, display_value: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
            value,
            display_value: display_value.into(),
        }
    }
}

/// One row of the order summary
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub amount: Amount,
}

impl LineItem {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        item_type: impl Into<String>,
        amount: Amount,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            item_type: item_type.into(),
            amount,
        }
    }
}

/// Items plus their total
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItems {
    pub items: Vec<LineItem>,
    pub total: LineItem,
}

impl LineItems {
    /// Build a snapshot whose total is the sum of `items`.
    ///
    /// `display_value` is the caller's formatting of that sum.
    pub fn with_total(
        items: Vec<LineItem>,
        currency: impl Into<String>,
        display_value: impl Into<String>,
    ) -> Self {
        let value = items.iter().map(|item| item.amount.value).sum();
        let total = LineItem::new(
            "total",
            "Total",
            "total",
            Amount::new(currency, value, display_value),
        );
        Self { items, total }
    }

    pub fn total_display(&self) -> &str {
        &self.total.amount.display_value
    }
}

/// Session-scoped holder of the current line items
#[derive(Clone, Debug, Default)]
pub struct LineItemsCell {
    inner: Arc<StateCell<LineItems>>,
}

impl LineItemsCell {
    pub fn new(items: LineItems) -> Self {
        Self {
            inner: Arc::new(StateCell::new(items)),
        }
    }

    pub fn snapshot(&self) -> LineItems {
        self.inner.get()
    }

    pub fn total_display(&self) -> String {
        self.inner.with(|items| items.total_display().to_string())
    }

    /// Called by the cart owner when the order changes
    pub fn replace(&self, items: LineItems) {
        self.inner.replace(items);
    }
}

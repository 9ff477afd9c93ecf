//! Form State Store
//!
//! Holds the customer-name field of a payment method together with its
//! touched flag. The store is created with the method and lives as long as the
//! checkout session that owns it.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::cell::StateCell;

/// A single text field and whether it has been interacted with
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    /// Raw text entered by the user
    pub value: String,

    /// Set once the user edits the field or attempts to submit. Never cleared.
    pub is_touched: bool,
}

impl FormField {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            is_touched: false,
        }
    }

    /// Whether the field should render its "required" error
    pub fn shows_required_error(&self) -> bool {
        self.is_touched && self.value.is_empty()
    }
}

/// Actions accepted by the form reducer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FormAction {
    CustomerNameSet(String),
    CustomerNameTouched,
}

/// Pure reducer for the customer-name field
pub fn reduce(state: &FormField, action: FormAction) -> FormField {
    match action {
        FormAction::CustomerNameSet(value) => FormField {
            value,
            is_touched: true,
        },
        FormAction::CustomerNameTouched => FormField {
            value: state.value.clone(),
            is_touched: true,
        },
    }
}

/// Session-scoped store for the customer-name field.
///
/// Cloning yields another handle to the same state.
#[derive(Clone, Debug, Default)]
pub struct FormStore {
    customer_name: Arc<StateCell<FormField>>,
}

impl FormStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action and notify subscribers
    pub fn dispatch(&self, action: FormAction) {
        tracing::trace!(?action, "form action");
        self.customer_name.update(|field| *field = reduce(field, action));
    }

    /// Replace the value and mark the field touched. Cannot fail.
    pub fn set_customer_name(&self, value: impl Into<String>) {
        self.dispatch(FormAction::CustomerNameSet(value.into()));
    }

    /// Mark the field touched without changing its value
    pub fn touch_field(&self) {
        self.dispatch(FormAction::CustomerNameTouched);
    }

    pub fn customer_name(&self) -> FormField {
        self.customer_name.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<FormField> {
        self.customer_name.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let store = FormStore::new();
        assert_eq!(store.customer_name(), FormField::default());
        assert!(!store.customer_name().is_touched);
    }

    #[test]
    fn test_set_marks_touched() {
        let store = FormStore::new();
        for value in ["Jane Doe", "", "  spaced  ", "李雷"] {
            store.set_customer_name(value);
            let field = store.customer_name();
            assert_eq!(field.value, value);
            assert!(field.is_touched);
        }
    }

    #[test]
    fn test_touch_keeps_value() {
        let store = FormStore::new();
        store.dispatch(FormAction::CustomerNameSet("   ".into()));
        store.touch_field();
        assert_eq!(store.customer_name().value, "   ");
        assert!(store.customer_name().is_touched);
    }

    #[test]
    fn test_reduce_is_pure() {
        let before = FormField::new("Ann");
        let after = reduce(&before, FormAction::CustomerNameTouched);
        assert!(!before.is_touched);
        assert_eq!(after, FormField { value: "Ann".into(), is_touched: true });
    }

    #[test]
    fn test_required_error_rule() {
        assert!(!FormField::default().shows_required_error());
        assert!(FormField { value: String::new(), is_touched: true }.shows_required_error());
        assert!(!FormField { value: " ".into(), is_touched: true }.shows_required_error());
    }

    #[test]
    fn test_action_wire_format() {
        let json = serde_json::to_value(FormAction::CustomerNameSet("Jane".into())).unwrap();
        assert_eq!(json, serde_json::json!({"type": "CUSTOMER_NAME_SET", "payload": "Jane"}));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let store = FormStore::new();
        let mut rx = store.subscribe();
        let other = store.clone();

        other.set_customer_name("Jane Doe");

        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().value, "Jane Doe");
        assert_eq!(store.customer_name().value, "Jane Doe");
    }
}

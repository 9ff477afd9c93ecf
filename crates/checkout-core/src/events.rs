//! Checkout Events
//!
//! Fire-and-forget analytics signals emitted by payment methods.

use std::cell::RefCell;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::processor::PaymentMethodId;

/// Emitted right before a redirect-based processor is called
pub const REDIRECT_TRANSACTION_BEGIN: &str = "REDIRECT_TRANSACTION_BEGIN";

/// An analytics event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CheckoutEvent {
    #[serde(rename = "type")]
    pub event_type: String,

    pub payload: serde_json::Value,

    pub emitted_at: DateTime<Utc>,
}

impl CheckoutEvent {
    pub fn new(event_type: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            event_type: event_type.into(),
            payload,
            emitted_at: Utc::now(),
        }
    }

    pub fn redirect_begin(method: PaymentMethodId) -> Self {
        Self::new(
            REDIRECT_TRANSACTION_BEGIN,
            serde_json::json!({ "payment_method_id": method }),
        )
    }
}

/// Sink for analytics events. Emission never fails from the caller's view.
pub trait EventEmitter {
    fn emit(&self, event: CheckoutEvent);
}

/// Writes events to the `tracing` pipeline
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEmitter;

impl EventEmitter for TracingEmitter {
    fn emit(&self, event: CheckoutEvent) {
        tracing::info!(
            event_type = %event.event_type,
            payload = %event.payload,
            "checkout event"
        );
    }
}

/// Keeps events in memory, in emission order
#[derive(Debug, Default)]
pub struct RecordingEmitter {
    events: RefCell<Vec<CheckoutEvent>>,
}

impl RecordingEmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<CheckoutEvent> {
        self.events.borrow().clone()
    }
}

impl EventEmitter for RecordingEmitter {
    fn emit(&self, event: CheckoutEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_begin_payload() {
        let event = CheckoutEvent::redirect_begin(PaymentMethodId::Alipay);
        assert_eq!(event.event_type, REDIRECT_TRANSACTION_BEGIN);
        assert_eq!(event.payload["payment_method_id"], "alipay");
    }

    #[test]
    fn test_recording_emitter_keeps_order() {
        let emitter = RecordingEmitter::new();
        emitter.emit(CheckoutEvent::new("A", serde_json::Value::Null));
        emitter.emit(CheckoutEvent::new("B", serde_json::Value::Null));

        let types: Vec<_> = emitter.events().into_iter().map(|e| e.event_type).collect();
        assert_eq!(types, ["A", "B"]);
    }
}

//! Submission Controller
//!
//! Validates the customer name, then drives one redirect-based payment
//! attempt through the shared transaction status.

use std::cell::Cell;
use std::future::Future;
use std::pin::pin;
use std::rc::Rc;
use std::time::Duration;

use futures::future::{self, Either};

use checkout_core::{
    CheckoutError, CheckoutEvent, EventEmitter, FormStore, GatewayHandle, LineItemsCell,
    Localizer, PaymentMethodId, ProcessorConfig, ProcessorRequest, ProcessorResponse, Processors,
    Result, TransactionTracker,
};

/// Result of one call to [`SubmissionController::submit`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The name is empty; the field is now touched and nothing was sent
    Invalid,

    /// The form is not ready or another attempt is in flight
    Blocked,

    /// The processor returned a redirect target
    Redirecting(String),

    /// The attempt failed; the message was placed in the error status
    Failed(String),
}

/// Releases the in-flight flag on every exit path
struct InFlightGuard<'a>(&'a Cell<bool>);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        (!flag.replace(true)).then_some(Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Everything the controller reads or writes during a submission
pub struct ControllerParts {
    pub method: PaymentMethodId,
    pub store: FormStore,
    pub status: TransactionTracker,
    pub line_items: LineItemsCell,
    pub processors: Processors,
    pub handle: GatewayHandle,
    pub config: ProcessorConfig,
    pub events: Rc<dyn EventEmitter>,
    pub localizer: Rc<dyn Localizer>,
}

/// Gatekeeper for the pay action
pub struct SubmissionController {
    parts: ControllerParts,
    in_flight: Cell<bool>,
}

impl SubmissionController {
    pub fn new(parts: ControllerParts) -> Self {
        Self {
            parts,
            in_flight: Cell::new(false),
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.get()
    }

    /// Check the customer name.
    ///
    /// A blank name is cleared and the field touched, so the "required"
    /// error appears.
    pub fn is_form_valid(&self) -> bool {
        let field = self.parts.store.customer_name();
        if !field.value.trim().is_empty() {
            return true;
        }

        if field.value.is_empty() {
            self.parts.store.touch_field();
        } else {
            self.parts.store.set_customer_name(String::new());
        }
        false
    }

    /// Run one payment attempt.
    ///
    /// `Pending` and the redirect-begin event are published before the
    /// processor is called. Every failure ends in the error status; nothing is
    /// returned as `Err`.
    pub async fn submit(&self) -> SubmitOutcome {
        let method = self.parts.method;

        if !self.parts.status.form_status().is_ready() {
            tracing::debug!(%method, "submit ignored, form not ready");
            return SubmitOutcome::Blocked;
        }

        if !self.is_form_valid() {
            tracing::debug!(%method, "submit rejected, customer name is empty");
            return SubmitOutcome::Invalid;
        }

        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::warn!(%method, "submit ignored, payment already in flight");
            return SubmitOutcome::Blocked;
        };

        self.parts.status.set_pending();
        self.parts.events.emit(CheckoutEvent::redirect_begin(method));

        let request = self.build_request();
        let processor = self.parts.processors.for_method(method);
        tracing::info!(
            %method,
            processor = processor.name(),
            total = %request.total.amount.display_value,
            "submitting payment"
        );

        let result = with_deadline(self.parts.config.timeout(), processor.process(&request))
            .await
            .and_then(|response| response.redirect_url.ok_or(CheckoutError::MissingRedirect));

        match result {
            Ok(url) => {
                tracing::info!(%method, redirect_url = %url, "payment redirecting");
                self.parts.status.set_redirecting(url.clone());
                SubmitOutcome::Redirecting(url)
            }
            Err(err) => {
                let message = self.failure_message(&err);
                tracing::warn!(%method, error = %err, "payment failed");
                self.parts.status.set_error(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn build_request(&self) -> ProcessorRequest {
        let line_items = self.parts.line_items.snapshot();
        ProcessorRequest {
            payment_method: self.parts.method,
            handle: self.parts.handle.clone(),
            name: self.parts.store.customer_name().value,
            items: line_items.items,
            total: line_items.total,
            config: self.parts.config.clone(),
        }
    }

    /// Gateway text passes through untouched; fixed texts are translated.
    fn failure_message(&self, err: &CheckoutError) -> String {
        match err {
            CheckoutError::Processor(_) | CheckoutError::Transport(_) | CheckoutError::Other(_) => {
                err.user_message()
            }
            _ => self.parts.localizer.translate(&err.user_message()),
        }
    }
}

/// Race the processor call against `limit`
async fn with_deadline<F>(limit: Option<Duration>, call: F) -> Result<ProcessorResponse>
where
    F: Future<Output = Result<ProcessorResponse>>,
{
    let Some(limit) = limit else {
        return call.await;
    };

    match future::select(pin!(call), pin!(timer::sleep(limit))).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(CheckoutError::Timeout(limit)),
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod timer {
    use std::time::Duration;

    pub async fn sleep(limit: Duration) {
        tokio::time::sleep(limit).await;
    }
}

/// Browser timer backed by `setTimeout`
#[cfg(target_arch = "wasm32")]
mod timer {
    use std::time::Duration;

    use wasm_bindgen_futures::JsFuture;
    use wasm_bindgen_futures::js_sys::{Function, Promise};

    /// Never resolves outside a window context
    pub async fn sleep(limit: Duration) {
        let millis = i32::try_from(limit.as_millis()).unwrap_or(i32::MAX);
        let promise = Promise::new(&mut |resolve: Function, _reject: Function| {
            let Some(window) = web_sys::window() else {
                tracing::warn!("no window, processor deadline disabled");
                return;
            };
            if let Err(err) =
                window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis)
            {
                tracing::warn!(?err, "failed to schedule processor deadline");
            }
        });
        // The promise only ever resolves.
        let _ = JsFuture::from(promise).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockProcessor, MockReply};
    use checkout_core::error::{GENERIC_PROCESSING_ERROR, TIMEOUT_ERROR};
    use checkout_core::events::REDIRECT_TRANSACTION_BEGIN;
    use checkout_core::{
        Amount, FormField, IdentityLocalizer, LineItem, LineItems, RecordingEmitter,
        TransactionStatus,
    };

    struct Harness {
        controller: SubmissionController,
        store: FormStore,
        status: TransactionTracker,
        processor: Rc<MockProcessor>,
        events: Rc<RecordingEmitter>,
    }

    fn harness(processor: MockProcessor, timeout_secs: u64) -> Harness {
        let processor = Rc::new(processor);
        let events = Rc::new(RecordingEmitter::new());
        let store = FormStore::new();
        let status = TransactionTracker::new();
        let items = LineItems::with_total(
            vec![LineItem::new(
                "business-plan",
                "Business",
                "plan",
                Amount::new("CNY", 29_800, "¥298.00"),
            )],
            "CNY",
            "¥298.00",
        );

        let controller = SubmissionController::new(ControllerParts {
            method: PaymentMethodId::Alipay,
            store: store.clone(),
            status: status.clone(),
            line_items: LineItemsCell::new(items),
            processors: Processors::new(processor.clone()),
            handle: GatewayHandle {
                public_key: "pk_test_123".into(),
                account: None,
            },
            config: ProcessorConfig {
                timeout_secs,
                ..ProcessorConfig::default()
            },
            events: events.clone(),
            localizer: Rc::new(IdentityLocalizer),
        });

        Harness {
            controller,
            store,
            status,
            processor,
            events,
        }
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected() {
        let h = harness(MockProcessor::redirecting("https://pay.example/x"), 120);

        let outcome = h.controller.submit().await;

        assert_eq!(outcome, SubmitOutcome::Invalid);
        assert_eq!(
            h.store.customer_name(),
            FormField {
                value: String::new(),
                is_touched: true
            }
        );
        assert!(h.store.customer_name().shows_required_error());
        assert_eq!(h.processor.call_count(), 0);
        assert!(h.events.events().is_empty());
        assert_eq!(h.status.transaction_status(), TransactionStatus::NotStarted);
    }

    #[tokio::test]
    async fn test_blank_name_is_cleared_and_flagged() {
        let h = harness(MockProcessor::redirecting("https://pay.example/x"), 120);
        h.store.set_customer_name("   ");

        assert_eq!(h.controller.submit().await, SubmitOutcome::Invalid);
        assert_eq!(h.store.customer_name().value, "");
        assert!(h.store.customer_name().shows_required_error());
        assert_eq!(h.processor.call_count(), 0);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let h = harness(MockProcessor::redirecting("https://pay.example/x"), 120);
        assert!(!h.controller.is_form_valid());
        assert!(!h.controller.is_form_valid());

        h.store.set_customer_name("Jane Doe");
        assert!(h.controller.is_form_valid());
        assert!(h.controller.is_form_valid());
    }

    #[tokio::test]
    async fn test_redirect_flow() {
        let h = harness(MockProcessor::redirecting("https://pay.example/x"), 120);
        h.store.set_customer_name("Jane Doe");

        let outcome = h.controller.submit().await;

        assert_eq!(outcome, SubmitOutcome::Redirecting("https://pay.example/x".into()));
        assert_eq!(
            h.status.transaction_status(),
            TransactionStatus::Redirecting {
                url: "https://pay.example/x".into()
            }
        );

        let requests = h.processor.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].name, "Jane Doe");
        assert_eq!(requests[0].total.amount.display_value, "¥298.00");
        assert_eq!(requests[0].handle.public_key, "pk_test_123");

        let events = h.events.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type, REDIRECT_TRANSACTION_BEGIN);
        assert_eq!(events[0].payload["payment_method_id"], "alipay");
        assert!(!h.controller.is_in_flight());
    }

    #[tokio::test]
    async fn test_missing_redirect_uses_generic_message() {
        let h = harness(MockProcessor::scripted(vec![MockReply::NoRedirect]), 120);
        h.store.set_customer_name("Jane Doe");

        let outcome = h.controller.submit().await;

        assert_eq!(outcome, SubmitOutcome::Failed(GENERIC_PROCESSING_ERROR.into()));
        assert_eq!(
            h.status.transaction_status().error_message(),
            Some(GENERIC_PROCESSING_ERROR)
        );
    }

    #[tokio::test]
    async fn test_rejection_message_is_verbatim() {
        let h = harness(
            MockProcessor::scripted(vec![MockReply::Fail("card declined".into())]),
            120,
        );
        h.store.set_customer_name("Jane Doe");

        h.controller.submit().await;

        assert_eq!(h.status.transaction_status().error_message(), Some("card declined"));
        assert!(h.status.form_status().is_ready());
    }

    #[tokio::test]
    async fn test_pending_is_published_before_the_call() {
        let h = harness(
            MockProcessor::scripted(vec![MockReply::Redirect("https://pay.example/x".into())])
                .with_delay(Duration::from_millis(20)),
            120,
        );
        h.store.set_customer_name("Jane Doe");
        let mut rx = h.status.subscribe();

        let (outcome, first) = tokio::join!(h.controller.submit(), rx.changed());

        assert!(matches!(outcome, SubmitOutcome::Redirecting(_)));
        assert_eq!(first.unwrap().0, TransactionStatus::Pending);
    }

    #[tokio::test]
    async fn test_submit_blocked_while_not_ready() {
        let h = harness(MockProcessor::redirecting("https://pay.example/x"), 120);
        h.store.set_customer_name("Jane Doe");
        h.status.set_pending();

        assert_eq!(h.controller.submit().await, SubmitOutcome::Blocked);
        assert_eq!(h.processor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_in_flight_guard_rejects_second_submit() {
        let h = harness(
            MockProcessor::scripted(vec![MockReply::Redirect("https://pay.example/x".into())])
                .with_delay(Duration::from_millis(50)),
            120,
        );
        h.store.set_customer_name("Jane Doe");

        let second = async {
            // Simulate a host that re-enabled the form mid-flight.
            h.status.reset();
            h.controller.submit().await
        };

        let (first, second) = tokio::join!(h.controller.submit(), second);

        assert_eq!(second, SubmitOutcome::Blocked);
        assert_eq!(first, SubmitOutcome::Redirecting("https://pay.example/x".into()));
        assert_eq!(h.processor.call_count(), 1);
        assert!(!h.controller.is_in_flight());
    }

    #[tokio::test]
    async fn test_timeout_sets_error_and_releases_guard() {
        let h = harness(MockProcessor::scripted(vec![MockReply::Hang]), 1);
        h.store.set_customer_name("Jane Doe");

        let outcome = h.controller.submit().await;

        assert_eq!(outcome, SubmitOutcome::Failed(TIMEOUT_ERROR.into()));
        assert_eq!(h.status.transaction_status().error_message(), Some(TIMEOUT_ERROR));
        assert!(!h.controller.is_in_flight());
    }

    #[tokio::test]
    async fn test_deadline_passes_through_fast_calls() {
        let limit = Some(Duration::from_secs(1));

        let ok = with_deadline(limit, async {
            Ok::<_, CheckoutError>(ProcessorResponse::redirect("https://pay.example/x"))
        })
        .await;
        assert_eq!(ok.unwrap().redirect_url.as_deref(), Some("https://pay.example/x"));

        let slow = with_deadline(Some(Duration::from_millis(10)), std::future::pending()).await;
        assert!(matches!(slow, Err(CheckoutError::Timeout(_))));

        let unbounded =
            with_deadline(None, async { Ok::<_, CheckoutError>(ProcessorResponse::default()) })
                .await;
        assert!(unbounded.is_ok());
    }

    #[tokio::test]
    async fn test_retry_after_failure() {
        let h = harness(
            MockProcessor::scripted(vec![
                MockReply::Fail("card declined".into()),
                MockReply::Redirect("https://pay.example/y".into()),
            ]),
            120,
        );
        h.store.set_customer_name("Jane Doe");

        assert_eq!(
            h.controller.submit().await,
            SubmitOutcome::Failed("card declined".into())
        );
        assert_eq!(
            h.controller.submit().await,
            SubmitOutcome::Redirecting("https://pay.example/y".into())
        );
        assert_eq!(h.processor.call_count(), 2);
    }
}

//! Alipay Payment Method
//!
//! Redirect-based method: the customer enters a name, the processor creates
//! the payment and returns an Alipay URL, and the host navigates there.

mod controller;
pub mod view;

use std::rc::Rc;

use checkout_core::{
    CheckoutSession, EventEmitter, FormField, FormStore, GatewayHandle, IdentityLocalizer,
    LineItemsCell, Localizer, PaymentMethodId, ProcessorConfig, Processors, TracingEmitter,
    TransactionTracker,
};
use serde::{Deserialize, Serialize};

pub use controller::{ControllerParts, SubmissionController, SubmitOutcome};
pub use view::NameFieldView;

/// How the host lists this method
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodDescriptor {
    pub id: PaymentMethodId,
    pub label: String,
    pub aria_label: String,
}

/// One Alipay method instance, scoped to a checkout session
pub struct AlipayMethod {
    store: FormStore,
    status: TransactionTracker,
    line_items: LineItemsCell,
    localizer: Rc<dyn Localizer>,
    controller: SubmissionController,
}

impl AlipayMethod {
    /// Create with tracing events and untranslated strings
    pub fn new(
        session: &CheckoutSession,
        processors: Processors,
        handle: GatewayHandle,
        config: ProcessorConfig,
    ) -> Self {
        Self::with_collaborators(
            session,
            processors,
            handle,
            config,
            Rc::new(TracingEmitter),
            Rc::new(IdentityLocalizer),
        )
    }

    pub fn with_collaborators(
        session: &CheckoutSession,
        processors: Processors,
        handle: GatewayHandle,
        config: ProcessorConfig,
        events: Rc<dyn EventEmitter>,
        localizer: Rc<dyn Localizer>,
    ) -> Self {
        let store = FormStore::new();
        let controller = SubmissionController::new(ControllerParts {
            method: PaymentMethodId::Alipay,
            store: store.clone(),
            status: session.status().clone(),
            line_items: session.line_items().clone(),
            processors,
            handle,
            config,
            events,
            localizer: localizer.clone(),
        });

        tracing::debug!(session_id = %session.id, "alipay method created");

        Self {
            store,
            status: session.status().clone(),
            line_items: session.line_items().clone(),
            localizer,
            controller,
        }
    }

    pub fn descriptor(&self) -> PaymentMethodDescriptor {
        let label = view::method_label(self.localizer.as_ref());
        PaymentMethodDescriptor {
            id: PaymentMethodId::Alipay,
            aria_label: label.clone(),
            label,
        }
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    pub fn status(&self) -> &TransactionTracker {
        &self.status
    }

    pub fn customer_name(&self) -> FormField {
        self.store.customer_name()
    }

    /// Change handler for the name input.
    ///
    /// Ignored unless the form is ready, so a disabled control cannot write
    /// through. Returns whether the store was updated.
    pub fn input_customer_name(&self, value: impl Into<String>) -> bool {
        if !self.status.form_status().is_ready() {
            tracing::debug!("customer name input ignored, form not ready");
            return false;
        }
        self.store.set_customer_name(value);
        true
    }

    pub fn is_form_valid(&self) -> bool {
        self.controller.is_form_valid()
    }

    /// Pay button handler
    pub async fn submit(&self) -> SubmitOutcome {
        self.controller.submit().await
    }

    pub fn name_field(&self) -> NameFieldView {
        view::name_field(
            &self.store.customer_name(),
            self.status.form_status(),
            self.localizer.as_ref(),
        )
    }

    pub fn button_label(&self) -> String {
        view::button_label(
            self.status.form_status(),
            &self.line_items.total_display(),
            self.localizer.as_ref(),
        )
    }

    pub fn summary(&self) -> String {
        view::summary_line(&self.store.customer_name())
    }
}

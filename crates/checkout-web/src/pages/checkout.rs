//! Checkout Page

use std::rc::Rc;

use checkout_core::{
    CatalogLocalizer, CheckoutSession, FormField, FormStatus, LineItems, Processors,
    TracingEmitter,
};
use checkout_payments::{AlipayMethod, HttpRedirectProcessor};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{AlipayLabel, AlipayNameField, AlipayPayButton, AlipaySummary};

#[component]
pub fn CheckoutPage() -> impl IntoView {
    let session = CheckoutSession::new(LineItems::default());
    // Closed until the cart arrives.
    session.status().set_form_status(FormStatus::Loading);
    let localizer = CatalogLocalizer::default();

    let method = Rc::new(AlipayMethod::with_collaborators(
        &session,
        Processors::new(Rc::new(HttpRedirectProcessor::new(api::transactions_endpoint()))),
        api::gateway_handle(),
        api::processor_config(),
        Rc::new(TracingEmitter),
        Rc::new(localizer.clone()),
    ));

    let field = RwSignal::new(FormField::default());
    let form_status = RwSignal::new(session.status().form_status());
    let transaction = RwSignal::new(session.status().transaction_status());
    let total = RwSignal::new(String::new());
    let l10n = StoredValue::new(localizer);

    // Mirror the method's store into the view.
    let mut name_rx = method.store().subscribe();
    spawn_local(async move {
        while name_rx.changed().await.is_ok() {
            let next = name_rx.borrow_and_update().clone();
            field.set(next);
        }
    });

    // Mirror the transaction status; navigation is the host's job.
    let mut status_rx = session.status().subscribe();
    spawn_local(async move {
        while let Some((next, form)) = status_rx.changed().await {
            if let Some(url) = next.redirect_url() {
                api::navigate(url);
            }
            transaction.set(next);
            form_status.set(form);
        }
    });

    let cart_session = session.clone();
    spawn_local(async move {
        if cart_session.load_line_items(api::fetch_line_items()).await.is_ok() {
            total.set(cart_session.line_items().total_display());
        }
    });

    view! {
        <div class="checkout">
            <h1>"Checkout"</h1>

            <section class="payment-method">
                <AlipayLabel l10n=l10n />
                <AlipayNameField
                    method=Rc::clone(&method)
                    field=field
                    form_status=form_status
                    l10n=l10n
                />
                {move || {
                    let status = transaction.get();
                    status.error_message().map(str::to_string).map(|message| view! {
                        <p class="checkout-error" role="alert">{message}</p>
                    })
                }}
                <AlipayPayButton
                    method=method
                    form_status=form_status
                    total=total
                    l10n=l10n
                />
            </section>

            <aside class="checkout-summary">
                <AlipaySummary field=field l10n=l10n />
            </aside>
        </div>
    }
}

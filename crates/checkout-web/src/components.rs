//! UI Components
//!
//! Thin renderers over the Alipay view models.

use std::rc::Rc;

use checkout_core::{CatalogLocalizer, FormField, FormStatus};
use checkout_payments::AlipayMethod;
use checkout_payments::alipay::view as alipay_view;
use leptos::prelude::*;

/// Alipay wordmark
#[component]
pub fn AlipayLogo() -> impl IntoView {
    view! {
        <svg
            class="alipay-logo"
            xmlns="http://www.w3.org/2000/svg"
            viewBox="0 0 64 22"
            width="64"
            height="22"
            aria-hidden="true"
        >
            <rect width="22" height="22" rx="4" fill="#1677ff" />
            <path d="M6 7h10M11 4v6M7 13c3 3 7 4 10 4M16 10c-1 4-5 7-10 8" stroke="#fff" stroke-width="1.6" fill="none" />
            <text x="26" y="16" font-size="12" font-family="sans-serif" fill="#1677ff">"Alipay"</text>
        </svg>
    }
}

/// Method label shown in the payment method list
#[component]
pub fn AlipayLabel(l10n: StoredValue<CatalogLocalizer>) -> impl IntoView {
    let label = l10n.with_value(|l| alipay_view::method_label(l));

    view! {
        <div class="payment-method-label">
            <span>{label}</span>
            <AlipayLogo />
        </div>
    }
}

/// Customer-name input bound to the method's form store
#[component]
pub fn AlipayNameField(
    method: Rc<AlipayMethod>,
    field: RwSignal<FormField>,
    form_status: RwSignal<FormStatus>,
    l10n: StoredValue<CatalogLocalizer>,
) -> impl IntoView {
    let model = Memo::new(move |_| {
        l10n.with_value(|l| alipay_view::name_field(&field.get(), form_status.get(), l))
    });

    view! {
        <div class="field alipay-name">
            <label for="alipay-customer-name">{move || model.get().label}</label>
            <input
                id="alipay-customer-name"
                type="text"
                autocomplete="name"
                aria-invalid=move || model.get().error.is_some().to_string()
                prop:value=move || model.get().value
                disabled=move || model.get().disabled
                on:input=move |ev| {
                    method.input_customer_name(event_target_value(&ev));
                }
            />
            {move || model.get().error.map(|message| view! {
                <span class="field-error">{message}</span>
            })}
        </div>
    }
}

/// Collapsed view of the payment step
#[component]
pub fn AlipaySummary(
    field: RwSignal<FormField>,
    l10n: StoredValue<CatalogLocalizer>,
) -> impl IntoView {
    let label = l10n.with_value(|l| alipay_view::method_label(l));

    view! {
        <div class="payment-summary">
            <span class="summary-method">{label}</span>
            <span class="summary-name">{move || alipay_view::summary_line(&field.get())}</span>
        </div>
    }
}

/// Pay button; text follows the form status
#[component]
pub fn AlipayPayButton(
    method: Rc<AlipayMethod>,
    form_status: RwSignal<FormStatus>,
    total: RwSignal<String>,
    l10n: StoredValue<CatalogLocalizer>,
) -> impl IntoView {
    let label = move || {
        l10n.with_value(|l| alipay_view::button_label(form_status.get(), &total.get(), l))
    };

    let pay = move |_| {
        let method = Rc::clone(&method);
        leptos::task::spawn_local(async move {
            let outcome = method.submit().await;
            tracing::debug!(?outcome, "alipay submit finished");
        });
    };

    view! {
        <button
            class="btn btn-primary pay-button"
            disabled=move || !form_status.get().is_ready()
            on:click=pay
        >
            {label}
        </button>
    }
}

//! Thank-You Page

use leptos::prelude::*;

/// Landing page for the gateway's success redirect
#[component]
pub fn ThankYouPage() -> impl IntoView {
    view! {
        <div class="thank-you">
            <h1>"Thank you!"</h1>
            <p>"Your Alipay payment was received. A receipt is on its way to your inbox."</p>
            <a href="/checkout" class="btn">"Back to checkout"</a>
        </div>
    }
}

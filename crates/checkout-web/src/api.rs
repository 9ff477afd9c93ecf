//! API Client
//!
//! Cart loading, processor wiring and browser navigation.

use checkout_core::{CheckoutError, GatewayHandle, LineItems, ProcessorConfig, Result};

/// Page origin, falling back to the dev server
pub fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into())
}

pub fn transactions_endpoint() -> String {
    format!("{}/api/transactions", origin())
}

/// Redirect targets point back at this site
pub fn processor_config() -> ProcessorConfig {
    let origin = origin();
    ProcessorConfig {
        success_url: format!("{origin}/checkout/thank-you"),
        cancel_url: format!("{origin}/checkout"),
        ..ProcessorConfig::default()
    }
}

/// Publishable gateway credentials, baked in at build time
pub fn gateway_handle() -> GatewayHandle {
    GatewayHandle {
        public_key: option_env!("CHECKOUT_GATEWAY_PUBLIC_KEY")
            .unwrap_or_default()
            .to_string(),
        account: option_env!("CHECKOUT_GATEWAY_ACCOUNT").map(str::to_string),
    }
}

/// Load the current cart from the backend
pub async fn fetch_line_items() -> Result<LineItems> {
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/cart", origin()))
        .send()
        .await
        .map_err(|e| CheckoutError::Transport(e.to_string()))?;

    if response.status().is_success() {
        response
            .json::<LineItems>()
            .await
            .map_err(|e| CheckoutError::Transport(e.to_string()))
    } else {
        let data: serde_json::Value = response.json().await.unwrap_or_default();
        let message = data["error"].as_str().unwrap_or("Failed to load cart");
        Err(CheckoutError::Transport(message.to_string()))
    }
}

/// Send the browser to the gateway
pub fn navigate(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.location().set_href(url) {
            tracing::warn!(?err, url, "redirect failed");
        }
    }
}

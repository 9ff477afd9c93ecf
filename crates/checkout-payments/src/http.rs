//! HTTP Redirect Processor
//!
//! Posts the payment attempt to a transactions endpoint, which creates the
//! gateway source and answers with the URL the customer must be sent to.

use async_trait::async_trait;
use checkout_core::{
    CheckoutError, LineItem, PaymentMethodId, PaymentProcessor, ProcessorRequest,
    ProcessorResponse, Result,
};
use serde::Serialize;

/// JSON body sent to the transactions endpoint
#[derive(Debug, Serialize)]
struct TransactionBody<'a> {
    payment_method: PaymentMethodId,
    gateway_key: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    gateway_account: Option<&'a str>,
    name: &'a str,
    items: &'a [LineItem],
    total: &'a LineItem,
    success_url: &'a str,
    cancel_url: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    site_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country_code: Option<&'a str>,
}

impl<'a> From<&'a ProcessorRequest> for TransactionBody<'a> {
    fn from(request: &'a ProcessorRequest) -> Self {
        Self {
            payment_method: request.payment_method,
            gateway_key: &request.handle.public_key,
            gateway_account: request.handle.account.as_deref(),
            name: &request.name,
            items: &request.items,
            total: &request.total,
            success_url: &request.config.success_url,
            cancel_url: &request.config.cancel_url,
            site_id: request.config.site_id.as_deref(),
            country_code: request.config.country_code.as_deref(),
        }
    }
}

/// Processor backed by a JSON transactions endpoint
#[derive(Clone, Debug)]
pub struct HttpRedirectProcessor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpRedirectProcessor {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("CHECKOUT_TRANSACTIONS_URL")
            .map_err(|_| CheckoutError::Config("CHECKOUT_TRANSACTIONS_URL not set".into()))?;
        Ok(Self::new(endpoint))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait(?Send)]
impl PaymentProcessor for HttpRedirectProcessor {
    fn name(&self) -> &str {
        "http-redirect"
    }

    async fn process(&self, request: &ProcessorRequest) -> Result<ProcessorResponse> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&TransactionBody::from(request))
            .send()
            .await
            .map_err(|e| CheckoutError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<ProcessorResponse>()
                .await
                .map_err(|e| CheckoutError::Transport(e.to_string()));
        }

        let data: serde_json::Value = response.json().await.unwrap_or_default();
        let message = data["message"]
            .as_str()
            .or_else(|| data["error"].as_str())
            .map_or_else(|| format!("Payment request failed ({status})"), str::to_string);

        tracing::debug!(
            endpoint = %self.endpoint,
            %status,
            "transactions endpoint rejected payment"
        );
        Err(CheckoutError::Processor(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checkout_core::{Amount, GatewayHandle, ProcessorConfig};

    #[test]
    fn test_body_shape() {
        let request = ProcessorRequest {
            payment_method: PaymentMethodId::Alipay,
            handle: GatewayHandle {
                public_key: "pk_test_123".into(),
                account: None,
            },
            name: "Jane Doe".into(),
            items: vec![],
            total: LineItem::new("total", "Total", "total", Amount::new("CNY", 29_800, "¥298.00")),
            config: ProcessorConfig {
                site_id: Some("1234".into()),
                ..ProcessorConfig::default()
            },
        };

        let json = serde_json::to_value(TransactionBody::from(&request)).unwrap();

        assert_eq!(json["payment_method"], "alipay");
        assert_eq!(json["gateway_key"], "pk_test_123");
        assert_eq!(json["name"], "Jane Doe");
        assert_eq!(json["site_id"], "1234");
        assert_eq!(json["total"]["amount"]["value"], 29_800);
        assert!(json.get("gateway_account").is_none());
        assert!(json.get("country_code").is_none());
    }

    #[test]
    fn test_endpoint() {
        let processor = HttpRedirectProcessor::new("https://shop.example/api/transactions");
        assert_eq!(processor.endpoint(), "https://shop.example/api/transactions");
        assert_eq!(processor.name(), "http-redirect");
    }
}

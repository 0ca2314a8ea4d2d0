//! Razorpay order-creation client implementing the [`PaymentGateway`] port.
//!
//! Only order initiation is covered; capture and settlement happen on the
//! gateway's side and are out of scope.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::ports::{OrderRequest, PaymentGateway, PaymentGatewayError, PaymentOrder};

const DEFAULT_BASE_URL: &str = "https://api.razorpay.com";

/// Razorpay REST client authenticated with key id/secret basic auth.
pub struct RazorpayGateway {
    client: reqwest::Client,
    key_id: String,
    key_secret: String,
    base_url: String,
}

impl RazorpayGateway {
    /// Create a client for the production API host.
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self::with_base_url(key_id, key_secret, DEFAULT_BASE_URL)
    }

    /// Create a client against an alternative host (tests, sandboxes).
    pub fn with_base_url(
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            base_url: base_url.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OrderBody {
    id: String,
    amount: i64,
    currency: String,
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_order(
        &self,
        request: &OrderRequest,
    ) -> Result<PaymentOrder, PaymentGatewayError> {
        let amount_minor = request
            .amount
            .checked_mul(100)
            .ok_or_else(|| PaymentGatewayError::gateway("amount out of range"))?;
        let receipt = Uuid::new_v4().simple().to_string();

        let response = self
            .client
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&json!({
                "amount": amount_minor,
                "currency": request.currency,
                "receipt": receipt,
                "payment_capture": 1,
            }))
            .send()
            .await
            .map_err(|err| PaymentGatewayError::gateway(err.to_string()))?;

        if !response.status().is_success() {
            return Err(PaymentGatewayError::gateway(format!(
                "order endpoint returned {}",
                response.status()
            )));
        }

        let body: OrderBody = response
            .json()
            .await
            .map_err(|err| PaymentGatewayError::gateway(err.to_string()))?;
        Ok(PaymentOrder {
            order_id: body.id,
            amount_minor: body.amount,
            currency: body.currency,
        })
    }
}

/// Gateway used when no credentials are configured: every call reports
/// [`PaymentGatewayError::Unconfigured`].
#[derive(Debug, Default, Clone, Copy)]
pub struct UnconfiguredPaymentGateway;

#[async_trait]
impl PaymentGateway for UnconfiguredPaymentGateway {
    async fn create_order(
        &self,
        _request: &OrderRequest,
    ) -> Result<PaymentOrder, PaymentGatewayError> {
        Err(PaymentGatewayError::Unconfigured)
    }
}

//! Port for the third-party payment gateway's order API.

use async_trait::async_trait;

/// Order-creation request in whole currency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// Amount in whole currency units (e.g. rupees).
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
}

/// A created gateway order, echoed back to the client for checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOrder {
    /// Gateway order identifier.
    pub order_id: String,
    /// Amount in the smallest currency unit (e.g. paise).
    pub amount_minor: i64,
    /// ISO currency code.
    pub currency: String,
}

/// Errors raised by payment gateway adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaymentGatewayError {
    /// No gateway credentials are configured for this deployment.
    #[error("payment gateway is not configured")]
    Unconfigured,
    /// The gateway rejected the request or could not be reached.
    #[error("payment gateway request failed: {message}")]
    Gateway {
        /// Adapter-provided failure detail.
        message: String,
    },
}

impl PaymentGatewayError {
    /// Create a [`PaymentGatewayError::Gateway`] with the given message.
    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway {
            message: message.into(),
        }
    }
}

/// Create orders with the external payment gateway.
///
/// The gateway's own behaviour (capture, webhooks, settlement) is out of
/// scope; this port only initiates an order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Create an order for the given amount.
    async fn create_order(
        &self,
        request: &OrderRequest,
    ) -> Result<PaymentOrder, PaymentGatewayError>;
}

/// Deterministic gateway used by tests and database-less runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixturePaymentGateway;

#[async_trait]
impl PaymentGateway for FixturePaymentGateway {
    async fn create_order(
        &self,
        request: &OrderRequest,
    ) -> Result<PaymentOrder, PaymentGatewayError> {
        Ok(PaymentOrder {
            order_id: format!("order_fixture_{}", request.amount),
            amount_minor: request.amount * 100,
            currency: request.currency.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[tokio::test]
    async fn fixture_converts_to_minor_units() {
        let order = FixturePaymentGateway
            .create_order(&OrderRequest {
                amount: 500,
                currency: "INR".into(),
            })
            .await
            .expect("fixture order");
        assert_eq!(order.amount_minor, 50_000);
        assert_eq!(order.currency, "INR");
    }
}

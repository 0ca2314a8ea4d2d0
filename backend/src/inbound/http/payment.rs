//! Payment endpoint: initiate a gateway order for an entry fee.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::ports::{OrderRequest, PaymentGateway as _, PaymentGatewayError};
use crate::domain::Error;

use super::state::HttpState;
use super::validation::field_error;
use super::ApiResult;

/// Order-creation request body.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Amount in whole currency units.
    pub amount: i64,
    /// ISO currency code; defaults to INR.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "INR".to_owned()
}

/// A created gateway order, for client-side checkout.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    /// Gateway order identifier.
    pub id: String,
    /// Amount in the smallest currency unit.
    pub amount: i64,
    /// ISO currency code.
    pub currency: String,
}

/// Create a payment-gateway order for the given amount.
#[utoipa::path(
    post,
    path = "/api/v1/payment/order",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order created", body = OrderResponse),
        (status = 400, description = "Non-positive amount", body = Error),
        (status = 500, description = "Gateway request failed", body = Error),
        (status = 503, description = "Gateway not configured", body = Error)
    ),
    tags = ["payment"],
    operation_id = "createOrder",
    security([])
)]
#[post("/payment/order")]
pub async fn create_order(
    state: web::Data<HttpState>,
    payload: web::Json<CreateOrderRequest>,
) -> ApiResult<web::Json<OrderResponse>> {
    let payload = payload.into_inner();
    if payload.amount <= 0 {
        return Err(field_error(
            "amount must be positive",
            "amount",
            "non_positive_amount",
        ));
    }

    let order = state
        .payments
        .create_order(&OrderRequest {
            amount: payload.amount,
            currency: payload.currency,
        })
        .await
        .map_err(|err| match err {
            PaymentGatewayError::Unconfigured => {
                Error::service_unavailable("payment gateway is not configured")
            }
            PaymentGatewayError::Gateway { message } => {
                warn!(%message, "payment gateway order creation failed");
                Error::internal("failed to create order")
            }
        })?;

    Ok(web::Json(OrderResponse {
        id: order.order_id,
        amount: order.amount_minor,
        currency: order.currency,
    }))
}

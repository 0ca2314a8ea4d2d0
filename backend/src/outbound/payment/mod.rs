//! Payment gateway clients.

mod razorpay;

pub use razorpay::{RazorpayGateway, UnconfiguredPaymentGateway};

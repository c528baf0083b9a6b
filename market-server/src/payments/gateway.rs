//! Payment gateway collaborator
//!
//! The marketplace never talks to a real processor: the gateway is an
//! injected trait object, and the default implementation authorizes
//! everything. Swapping in a real integration (or a failing test double)
//! is a construction-time decision.

use async_trait::async_trait;
use shared::{AppResult, PaymentMethod};

/// External payment authorization
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Authorize a payment, returning the raw gateway response to be
    /// stored on the transaction.
    async fn authorize(
        &self,
        customer_ref: &str,
        amount: f64,
        mode: PaymentMethod,
    ) -> AppResult<String>;
}

/// Default gateway: authorizes unconditionally
pub struct NoopGateway;

#[async_trait]
impl PaymentGateway for NoopGateway {
    async fn authorize(
        &self,
        customer_ref: &str,
        amount: f64,
        mode: PaymentMethod,
    ) -> AppResult<String> {
        tracing::debug!(
            customer = %customer_ref,
            amount = amount,
            mode = ?mode,
            "Payment authorized (noop gateway)"
        );
        Ok("Payment is pending confirmation".to_string())
    }
}

//! Transaction Ledger
//!
//! Records payment attempts and guards the transaction lifecycle. A
//! transaction is created OPEN and leaves OPEN exactly once; the claim is
//! a single conditional update, never a read followed by a write.

use crate::db::models::Transaction;
use crate::db::repository::TransactionRepository;
use crate::orders::money;
use crate::payments::PaymentGateway;
use crate::pricing::OfferEvaluator;
use serde::Deserialize;
use shared::{AppError, AppResult, ErrorCode, PaymentMethod, TransactionStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Payload for opening a payment
#[derive(Debug, Clone, Deserialize)]
pub struct OpenPaymentRequest {
    /// Amount the client intends to pay (pre-discount)
    pub amount: f64,
    pub payment_mode: PaymentMethod,
    /// Optional offer applied to the amount
    #[serde(default)]
    pub offer_id: Option<String>,
}

#[derive(Clone)]
pub struct TransactionLedger {
    transactions: TransactionRepository,
    offers: OfferEvaluator,
}

impl TransactionLedger {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            transactions: TransactionRepository::new(db.clone()),
            offers: OfferEvaluator::new(db),
        }
    }

    /// Open a transaction for a customer.
    ///
    /// Resolves the optional offer (inactive offers fail the call), asks
    /// the gateway to authorize the discounted amount and persists the
    /// transaction in OPEN state.
    pub async fn open(
        &self,
        customer_ref: &str,
        req: OpenPaymentRequest,
        gateway: &dyn PaymentGateway,
    ) -> AppResult<Transaction> {
        money::validate_payment_amount(req.amount)?;

        let payable = match &req.offer_id {
            Some(offer_id) => self.offers.resolve_discount(offer_id, req.amount).await?,
            None => req.amount,
        };

        let response = gateway
            .authorize(customer_ref, payable, req.payment_mode)
            .await?;

        let txn = self
            .transactions
            .create_open(
                customer_ref,
                payable,
                req.offer_id.clone(),
                req.payment_mode,
                &response,
            )
            .await?;

        tracing::info!(
            customer = %customer_ref,
            order_value = payable,
            offer = ?req.offer_id,
            "Transaction opened"
        );
        Ok(txn)
    }

    /// Fetch a transaction and require it to still be OPEN.
    pub async fn validate_open(&self, transaction_id: &str) -> AppResult<Transaction> {
        let txn = self
            .transactions
            .find_by_id(transaction_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::TransactionNotFound,
                    format!("Transaction {} not found", transaction_id),
                )
            })?;

        if txn.status != TransactionStatus::Open {
            return Err(AppError::new(ErrorCode::TransactionAlreadyClosed));
        }

        Ok(txn)
    }

    /// Atomically claim an OPEN transaction for an order: set the order and
    /// vendor links and mark it SUCCESS. Exactly one caller can win; the
    /// rest fail with TransactionAlreadyClosed.
    pub async fn finalize(
        &self,
        transaction_id: &str,
        order_ref: &str,
        vendor_ref: &str,
    ) -> AppResult<Transaction> {
        let claimed = self
            .transactions
            .finalize_if_open(transaction_id, order_ref, vendor_ref)
            .await?;

        claimed.ok_or_else(|| AppError::new(ErrorCode::TransactionAlreadyClosed))
    }
}

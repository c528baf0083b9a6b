//! Transaction Repository
//!
//! The claim path (`finalize_if_open`) is a single conditional update so
//! that two concurrent order creations against the same transaction can
//! never both succeed.

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::Transaction;
use shared::{PaymentMethod, TransactionStatus};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct TransactionRepository {
    base: BaseRepository,
}

impl TransactionRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find transaction by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Transaction>> {
        let thing = parse_record_id(id)?;
        let txn: Option<Transaction> = self.base.db().select(thing).await?;
        Ok(txn)
    }

    /// All transactions, newest first (admin surface)
    pub async fn find_all(&self) -> RepoResult<Vec<Transaction>> {
        let txns: Vec<Transaction> = self
            .base
            .db()
            .query("SELECT * FROM `transaction` ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(txns)
    }

    /// Open a new transaction in OPEN state
    pub async fn create_open(
        &self,
        customer_ref: &str,
        order_value: f64,
        offer_used: Option<String>,
        payment_mode: PaymentMethod,
        payment_response: &str,
    ) -> RepoResult<Transaction> {
        let now = shared::util::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE `transaction` SET
                    customer = $customer,
                    order_value = $order_value,
                    offer_used = $offer_used,
                    payment_mode = $payment_mode,
                    payment_response = $payment_response,
                    status = $status,
                    `order` = NONE,
                    vendor = NONE,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("customer", customer_ref.to_string()))
            .bind(("order_value", order_value))
            .bind(("offer_used", offer_used))
            .bind(("payment_mode", payment_mode))
            .bind(("payment_response", payment_response.to_string()))
            .bind(("status", TransactionStatus::Open))
            .bind(("now", now))
            .await?;

        let created: Option<Transaction> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create transaction".to_string()))
    }

    /// Atomically claim an OPEN transaction for an order.
    ///
    /// Exactly one caller can win: the update only matches while the status
    /// is still OPEN. Returns `None` for the losers.
    ///
    /// The embedded engine may abort one of two conflicting write
    /// transactions instead of serializing them; aborted attempts are
    /// retried and the status condition decides the winner.
    pub async fn finalize_if_open(
        &self,
        id: &str,
        order_ref: &str,
        vendor_ref: &str,
    ) -> RepoResult<Option<Transaction>> {
        const CLAIM_ATTEMPTS: usize = 5;

        let thing = parse_record_id(id)?;
        let mut last_err = RepoError::Database("transaction claim failed".to_string());
        for _ in 0..CLAIM_ATTEMPTS {
            match self.try_claim(thing.clone(), order_ref, vendor_ref).await {
                Ok(claimed) => return Ok(claimed),
                Err(RepoError::Database(msg)) => {
                    tracing::debug!(transaction = %id, error = %msg, "Claim aborted, retrying");
                    last_err = RepoError::Database(msg);
                }
                Err(e) => return Err(e),
            }
        }
        Err(last_err)
    }

    async fn try_claim(
        &self,
        id: surrealdb::RecordId,
        order_ref: &str,
        vendor_ref: &str,
    ) -> RepoResult<Option<Transaction>> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $id SET status = $success, `order` = $order, vendor = $vendor
                   WHERE status = $open RETURN AFTER"#,
            )
            .bind(("id", id))
            .bind(("success", TransactionStatus::Success))
            .bind(("order", order_ref.to_string()))
            .bind(("vendor", vendor_ref.to_string()))
            .bind(("open", TransactionStatus::Open))
            .await?;
        let updated: Option<Transaction> = result.take(0)?;
        Ok(updated)
    }
}

//! Offer evaluation
//!
//! Computes the discounted payable amount at payment time. Offers are flat
//! discounts; promo-type targeting (USER/BANK/CARD) is stored but not
//! differentiated during evaluation, and the payable amount is not floored
//! at zero.

use crate::db::models::Offer;
use crate::db::repository::OfferRepository;
use crate::orders::money;
use shared::{AppError, AppResult, ErrorCode};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct OfferEvaluator {
    offers: OfferRepository,
}

impl OfferEvaluator {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            offers: OfferRepository::new(db),
        }
    }

    /// Fetch an offer and require it to be usable
    pub async fn verify_offer(&self, offer_id: &str) -> AppResult<Offer> {
        let offer = self.offers.find_by_id(offer_id).await?.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::OfferNotFound,
                format!("Offer {} not found", offer_id),
            )
        })?;

        if !offer.is_active {
            return Err(AppError::new(ErrorCode::OfferInactive));
        }

        Ok(offer)
    }

    /// Resolve the payable amount after applying an offer's flat discount
    pub async fn resolve_discount(&self, offer_id: &str, amount: f64) -> AppResult<f64> {
        let offer = self.verify_offer(offer_id).await?;
        money::apply_discount(amount, offer.offer_amount)
    }
}

//! Offer Repository

use super::{BaseRepository, RepoError, RepoResult, parse_record_id};
use crate::db::models::{Offer, OfferCreate, OfferUpdate};
use shared::OfferScope;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

#[derive(Clone)]
pub struct OfferRepository {
    base: BaseRepository,
}

impl OfferRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find offer by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Offer>> {
        let thing = parse_record_id(id)?;
        let offer: Option<Offer> = self.base.db().select(thing).await?;
        Ok(offer)
    }

    /// Offers visible to a vendor: its own plus marketplace-wide ones
    pub async fn find_for_vendor(&self, vendor_ref: &str) -> RepoResult<Vec<Offer>> {
        let offers: Vec<Offer> = self
            .base
            .db()
            .query(
                r#"SELECT * FROM offer
                   WHERE vendors CONTAINS $vendor OR offer_scope = 'GENERIC'
                   ORDER BY created_at DESC"#,
            )
            .bind(("vendor", vendor_ref.to_string()))
            .await?
            .take(0)?;
        Ok(offers)
    }

    /// Active offers for a service-area code (customer browsing)
    pub async fn find_active_by_pincode(&self, pincode: &str) -> RepoResult<Vec<Offer>> {
        let offers: Vec<Offer> = self
            .base
            .db()
            .query(
                r#"SELECT * FROM offer
                   WHERE pincode = $pincode AND is_active = true
                   ORDER BY created_at DESC"#,
            )
            .bind(("pincode", pincode.to_string()))
            .await?
            .take(0)?;
        Ok(offers)
    }

    /// Create an offer owned by a vendor
    pub async fn create(&self, vendor_ref: &str, data: OfferCreate) -> RepoResult<Offer> {
        let now = shared::util::now_millis();
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE offer SET
                    offer_scope = $offer_scope,
                    vendors = $vendors,
                    title = $title,
                    description = $description,
                    min_value = $min_value,
                    offer_amount = $offer_amount,
                    start_validity = $start_validity,
                    end_validity = $end_validity,
                    promo_code = $promo_code,
                    promo_type = $promo_type,
                    bank = $bank,
                    bins = $bins,
                    pincode = $pincode,
                    is_active = $is_active,
                    created_at = $now
                RETURN AFTER"#,
            )
            .bind(("offer_scope", OfferScope::Vendor))
            .bind(("vendors", vec![vendor_ref.to_string()]))
            .bind(("title", data.title))
            .bind(("description", data.description))
            .bind(("min_value", data.min_value))
            .bind(("offer_amount", data.offer_amount))
            .bind(("start_validity", data.start_validity))
            .bind(("end_validity", data.end_validity))
            .bind(("promo_code", data.promo_code))
            .bind(("promo_type", data.promo_type))
            .bind(("bank", data.bank))
            .bind(("bins", data.bins))
            .bind(("pincode", data.pincode))
            .bind(("is_active", data.is_active))
            .bind(("now", now))
            .await?;

        let created: Option<Offer> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create offer".to_string()))
    }

    /// Update an offer, only if the vendor owns it
    pub async fn update_if_owned(
        &self,
        vendor_ref: &str,
        offer_id: &str,
        data: OfferUpdate,
    ) -> RepoResult<Offer> {
        let existing = self
            .find_by_id(offer_id)
            .await?
            .filter(|o| o.vendors.iter().any(|v| v.to_string() == vendor_ref))
            .ok_or_else(|| RepoError::NotFound(format!("Offer {} not found", offer_id)))?;

        let thing = parse_record_id(offer_id)?;
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $id SET
                    title = $title,
                    description = $description,
                    min_value = $min_value,
                    offer_amount = $offer_amount,
                    start_validity = $start_validity,
                    end_validity = $end_validity,
                    promo_code = $promo_code,
                    promo_type = $promo_type,
                    bank = $bank,
                    bins = $bins,
                    pincode = $pincode,
                    is_active = $is_active
                RETURN AFTER"#,
            )
            .bind(("id", thing))
            .bind(("title", data.title.unwrap_or(existing.title)))
            .bind(("description", data.description.or(existing.description)))
            .bind(("min_value", data.min_value.unwrap_or(existing.min_value)))
            .bind((
                "offer_amount",
                data.offer_amount.unwrap_or(existing.offer_amount),
            ))
            .bind((
                "start_validity",
                data.start_validity.or(existing.start_validity),
            ))
            .bind(("end_validity", data.end_validity.or(existing.end_validity)))
            .bind(("promo_code", data.promo_code.unwrap_or(existing.promo_code)))
            .bind(("promo_type", data.promo_type.unwrap_or(existing.promo_type)))
            .bind(("bank", data.bank.unwrap_or(existing.bank)))
            .bind(("bins", data.bins.unwrap_or(existing.bins)))
            .bind(("pincode", data.pincode.unwrap_or(existing.pincode)))
            .bind(("is_active", data.is_active.unwrap_or(existing.is_active)))
            .await?;
        let updated: Option<Offer> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Offer {} not found", offer_id)))
    }
}

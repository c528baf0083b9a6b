//! Offer Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::{OfferScope, PromoType};
use surrealdb::RecordId;

/// Offer ID type
pub type OfferId = RecordId;

/// A flat-amount discount rule applied at payment time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<OfferId>,
    #[serde(default)]
    pub offer_scope: OfferScope,
    /// Vendors this offer applies to (VENDOR scope)
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub vendors: Vec<RecordId>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Minimum order value for the offer to apply
    pub min_value: f64,
    /// Flat discount amount
    pub offer_amount: f64,
    #[serde(default)]
    pub start_validity: Option<i64>,
    #[serde(default)]
    pub end_validity: Option<i64>,
    pub promo_code: String,
    #[serde(default)]
    pub promo_type: PromoType,
    #[serde(default)]
    pub bank: Vec<String>,
    #[serde(default)]
    pub bins: Vec<i64>,
    pub pincode: String,
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: i64,
}

/// Offer creation payload (vendor surface)
#[derive(Debug, Clone, Deserialize)]
pub struct OfferCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub min_value: f64,
    pub offer_amount: f64,
    #[serde(default)]
    pub start_validity: Option<i64>,
    #[serde(default)]
    pub end_validity: Option<i64>,
    pub promo_code: String,
    #[serde(default)]
    pub promo_type: PromoType,
    #[serde(default)]
    pub bank: Vec<String>,
    #[serde(default)]
    pub bins: Vec<i64>,
    pub pincode: String,
    #[serde(default)]
    pub is_active: bool,
}

/// Offer update payload (vendor surface, partial)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OfferUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub min_value: Option<f64>,
    #[serde(default)]
    pub offer_amount: Option<f64>,
    #[serde(default)]
    pub start_validity: Option<i64>,
    #[serde(default)]
    pub end_validity: Option<i64>,
    #[serde(default)]
    pub promo_code: Option<String>,
    #[serde(default)]
    pub promo_type: Option<PromoType>,
    #[serde(default)]
    pub bank: Option<Vec<String>>,
    #[serde(default)]
    pub bins: Option<Vec<i64>>,
    #[serde(default)]
    pub pincode: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

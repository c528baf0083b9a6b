//! Shopping API Handlers
//!
//! Anonymous catalog browsing by service-area code.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{Food, Offer, Vendor};
use crate::db::repository::{FoodRepository, OfferRepository, VendorRepository};
use crate::utils::validation::validate_pincode;
use shared::{AppError, AppResult, ErrorCode};

const TOP_RESTAURANT_LIMIT: usize = 10;
const QUICK_READY_TIME_MINUTES: i32 = 30;

/// A vendor with its menu resolved
#[derive(Debug, Serialize)]
pub struct RestaurantView {
    pub vendor: Vendor,
    pub foods: Vec<Food>,
}

async fn serving_vendors(state: &ServerState, pincode: &str) -> AppResult<Vec<Vendor>> {
    validate_pincode(pincode)?;
    let vendors = VendorRepository::new(state.db.clone())
        .find_available_by_pincode(pincode)
        .await?;
    if vendors.is_empty() {
        return Err(AppError::new(ErrorCode::NoServiceInArea));
    }
    Ok(vendors)
}

fn vendor_refs(vendors: &[Vendor]) -> Vec<String> {
    vendors
        .iter()
        .filter_map(|v| v.id.as_ref().map(|id| id.to_string()))
        .collect()
}

/// GET /api/shopping/{pincode} - serving restaurants with their menus,
/// best rated first
pub async fn availability(
    State(state): State<ServerState>,
    Path(pincode): Path<String>,
) -> AppResult<Json<Vec<RestaurantView>>> {
    let vendors = serving_vendors(&state, &pincode).await?;

    let foods = FoodRepository::new(state.db.clone())
        .find_by_vendors(vendor_refs(&vendors))
        .await?;

    let views = vendors
        .into_iter()
        .map(|vendor| {
            let key = vendor.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
            let menu = foods
                .iter()
                .filter(|f| f.vendor.to_string() == key)
                .cloned()
                .collect();
            RestaurantView {
                vendor,
                foods: menu,
            }
        })
        .collect();

    Ok(Json(views))
}

/// GET /api/shopping/top-restaurants/{pincode}
pub async fn top_restaurants(
    State(state): State<ServerState>,
    Path(pincode): Path<String>,
) -> AppResult<Json<Vec<Vendor>>> {
    let mut vendors = serving_vendors(&state, &pincode).await?;
    vendors.truncate(TOP_RESTAURANT_LIMIT);
    Ok(Json(vendors))
}

/// GET /api/shopping/foods-in-under-thirty-min/{pincode}
pub async fn foods_in_under_thirty_min(
    State(state): State<ServerState>,
    Path(pincode): Path<String>,
) -> AppResult<Json<Vec<Food>>> {
    let vendors = serving_vendors(&state, &pincode).await?;

    let foods = FoodRepository::new(state.db.clone())
        .find_by_vendors(vendor_refs(&vendors))
        .await?
        .into_iter()
        .filter(|f| f.ready_time <= QUICK_READY_TIME_MINUTES)
        .collect();
    Ok(Json(foods))
}

/// GET /api/shopping/search/{pincode} - all foods available in the area
pub async fn search_foods(
    State(state): State<ServerState>,
    Path(pincode): Path<String>,
) -> AppResult<Json<Vec<Food>>> {
    let vendors = serving_vendors(&state, &pincode).await?;

    let foods = FoodRepository::new(state.db.clone())
        .find_by_vendors(vendor_refs(&vendors))
        .await?;
    Ok(Json(foods))
}

/// GET /api/shopping/offers/{pincode} - active offers in the area
pub async fn offers(
    State(state): State<ServerState>,
    Path(pincode): Path<String>,
) -> AppResult<Json<Vec<Offer>>> {
    validate_pincode(&pincode)?;
    let offers = OfferRepository::new(state.db.clone())
        .find_active_by_pincode(&pincode)
        .await?;
    Ok(Json(offers))
}

/// GET /api/shopping/restaurant/{id}
pub async fn restaurant_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<RestaurantView>> {
    let vendor = VendorRepository::new(state.db.clone())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::VendorNotFound, "Restaurant not found")
        })?;

    let key = vendor.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
    let foods = FoodRepository::new(state.db.clone())
        .find_by_vendor(&key)
        .await?;
    Ok(Json(RestaurantView { vendor, foods }))
}

//! Cart Manager
//!
//! Per-customer mutable line-item collection. Mutations are serialized per
//! customer with an in-process lock map and written through a
//! compare-and-swap on `cart_version`, so a concurrent writer (another
//! process, or the order engine clearing the cart) forces a re-read
//! instead of a lost update.

use crate::db::models::CartLineItem;
use crate::db::repository::CustomerRepository;
use crate::orders::money;
use crate::services::CatalogService;
use dashmap::DashMap;
use shared::{AppError, AppResult, ErrorCode};
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use tokio::sync::Mutex;

/// Per-customer mutual-exclusion map, shared through [`ServerState`]
///
/// [`ServerState`]: crate::core::ServerState
pub type CartLocks = DashMap<String, Arc<Mutex<()>>>;

/// CAS attempts before giving up on a contended cart
const MAX_SWAP_ATTEMPTS: usize = 3;

#[derive(Clone)]
pub struct CartManager {
    customers: CustomerRepository,
    catalog: CatalogService,
    locks: Arc<CartLocks>,
}

impl CartManager {
    pub fn new(db: Surreal<Db>, locks: Arc<CartLocks>) -> Self {
        Self {
            customers: CustomerRepository::new(db.clone()),
            catalog: CatalogService::new(db),
            locks,
        }
    }

    fn lock_for(&self, customer_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(customer_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Add `delta_quantity` of a food to the cart (negative deltas remove).
    ///
    /// The line's amount is re-priced from the catalog at mutation time; a
    /// resulting quantity ≤ 0 removes the line, and removing an absent line
    /// is a no-op. Returns the resulting cart.
    pub async fn add_or_update_item(
        &self,
        customer_id: &str,
        food_id: &str,
        delta_quantity: i32,
    ) -> AppResult<Vec<CartLineItem>> {
        let lock = self.lock_for(customer_id);
        let _guard = lock.lock().await;

        let food = self.catalog.food(food_id).await?;
        let food_ref = food
            .id
            .clone()
            .ok_or_else(|| AppError::internal("food record missing id"))?;
        let food_key = food_ref.to_string();

        for _ in 0..MAX_SWAP_ATTEMPTS {
            let customer = self
                .customers
                .find_by_id(customer_id)
                .await?
                .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;

            let mut cart = customer.cart;
            match cart.iter().position(|line| line.food.to_string() == food_key) {
                Some(idx) => {
                    let quantity = cart[idx].quantity + delta_quantity;
                    if quantity <= 0 {
                        cart.remove(idx);
                    } else {
                        cart[idx].quantity = quantity;
                        cart[idx].amount = money::line_amount(food.price, quantity)?;
                    }
                }
                None => {
                    if delta_quantity <= 0 {
                        // removing an absent line is a no-op
                        return Ok(cart);
                    }
                    cart.push(CartLineItem {
                        food: food_ref.clone(),
                        quantity: delta_quantity,
                        amount: money::line_amount(food.price, delta_quantity)?,
                    });
                }
            }

            if let Some(updated) = self
                .customers
                .swap_cart(customer_id, cart, customer.cart_version)
                .await?
            {
                return Ok(updated.cart);
            }

            tracing::debug!(customer = %customer_id, "Cart version conflict, retrying");
        }

        Err(AppError::new(ErrorCode::CartConflict))
    }

    /// Empty the cart unconditionally
    pub async fn clear(&self, customer_id: &str) -> AppResult<()> {
        let lock = self.lock_for(customer_id);
        let _guard = lock.lock().await;

        self.customers.clear_cart(customer_id).await?;
        Ok(())
    }

    /// Current line items; an empty cart is an empty vec, not an error
    pub async fn snapshot(&self, customer_id: &str) -> AppResult<Vec<CartLineItem>> {
        let customer = self
            .customers
            .find_by_id(customer_id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::CustomerNotFound))?;
        Ok(customer.cart)
    }
}

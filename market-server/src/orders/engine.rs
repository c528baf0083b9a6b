//! Order Engine
//!
//! The central state machine of the marketplace: converts a validated
//! payment plus a set of cart items into an Order, and applies vendor-side
//! processing transitions.
//!
//! # Creation flow
//!
//! ```text
//! create_order(customer, items, transaction_id, paid_amount)
//!     ├─ 1. Require the transaction to be OPEN
//!     ├─ 2. Batch-resolve all foods (all-or-nothing)
//!     ├─ 3. Price each line server-side, sum the total
//!     ├─ 4. Derive the vendor; reject cross-vendor item sets
//!     ├─ 5. Claim the transaction (atomic conditional update)
//!     ├─ 6. Persist the order (WAITING)
//!     ├─ 7. Clear the cart + append the order to the customer
//!     └─ 8. Trigger delivery assignment (best-effort)
//! ```
//!
//! The claim in step 5 is the serialization point: of any number of
//! concurrent creations against one transaction, exactly one passes it,
//! and the losers abort before any order row exists. A crash between steps
//! 5 and 6 is recoverable through the transaction's order link (the
//! transaction id doubles as the idempotency key). Steps 7-8 failing never
//! roll back the committed order.

use crate::db::models::{CartLineItem, Order, OrderCreate, DEFAULT_READY_TIME_MINUTES};
use crate::db::repository::{CustomerRepository, OrderRepository};
use crate::orders::assignment::DeliveryAssigner;
use crate::orders::{money, transitions};
use crate::payments::TransactionLedger;
use crate::services::CatalogService;
use serde::Deserialize;
use shared::{AppError, AppResult, ErrorCode, OrderStatus};
use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use uuid::Uuid;

/// One requested line: client chooses food and quantity, never the price
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItemRequest {
    pub food_id: String,
    pub quantity: i32,
}

/// Payload for creating an order
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub transaction_id: String,
    pub paid_amount: f64,
}

/// Vendor-side processing payload
#[derive(Debug, Clone, Deserialize)]
pub struct ProcessOrderRequest {
    pub status: OrderStatus,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default)]
    pub ready_time: Option<i32>,
}

/// Outcome of a creation: the committed order plus the result of the
/// best-effort assignment step
#[derive(Debug)]
pub struct CreatedOrder {
    pub order: Order,
    /// Set when delivery assignment failed; the order persists regardless
    pub assignment_error: Option<AppError>,
}

#[derive(Clone)]
pub struct OrderEngine {
    orders: OrderRepository,
    customers: CustomerRepository,
    catalog: CatalogService,
    ledger: TransactionLedger,
    assigner: DeliveryAssigner,
}

impl OrderEngine {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            orders: OrderRepository::new(db.clone()),
            customers: CustomerRepository::new(db.clone()),
            catalog: CatalogService::new(db.clone()),
            ledger: TransactionLedger::new(db.clone()),
            assigner: DeliveryAssigner::new(db),
        }
    }

    /// Create an order for a customer from explicit items and an OPEN
    /// transaction. See the module docs for the full flow.
    pub async fn create_order(
        &self,
        customer_ref: &str,
        req: CreateOrderRequest,
    ) -> AppResult<CreatedOrder> {
        // 1. The transaction must exist and still be OPEN. This is a
        // fast-fail precheck; the authoritative gate is the claim below.
        self.ledger.validate_open(&req.transaction_id).await?;

        if req.items.is_empty() {
            return Err(AppError::with_message(ErrorCode::CartEmpty, "Cart is empty"));
        }

        // 2. Resolve every food id, all-or-nothing
        let food_ids: Vec<String> = req.items.iter().map(|i| i.food_id.clone()).collect();
        let foods = self.catalog.resolve_foods(&food_ids).await?;

        // 3. Price lines server-side
        let mut items: Vec<CartLineItem> = Vec::with_capacity(req.items.len());
        for item in &req.items {
            let food = foods
                .get(&item.food_id)
                .ok_or_else(|| AppError::new(ErrorCode::FoodNotFound))?;
            let food_ref = food
                .id
                .clone()
                .ok_or_else(|| AppError::internal("food record missing id"))?;
            items.push(CartLineItem {
                food: food_ref,
                quantity: item.quantity,
                amount: money::line_amount(food.price, item.quantity)?,
            });
        }
        let total_amount = money::sum_amounts(items.iter().map(|i| i.amount));

        // 4. Vendor comes from the first item; every item must agree
        let first_food = foods
            .get(&req.items[0].food_id)
            .ok_or_else(|| AppError::new(ErrorCode::FoodNotFound))?;
        let vendor_ref = first_food.vendor.clone();
        let vendor_key = vendor_ref.to_string();
        if let Some(stray) = foods
            .values()
            .find(|f| f.vendor.to_string() != vendor_key)
        {
            tracing::warn!(
                vendor = %vendor_key,
                other = %stray.vendor,
                "Order items span multiple vendors"
            );
            return Err(AppError::new(ErrorCode::VendorMismatch));
        }

        // 5. Claim the transaction before persisting anything. The order id
        // is generated up front so the claim can reference it.
        let order_id = RecordId::from_table_key("order", Uuid::new_v4().simple().to_string());
        let order_key = order_id.to_string();
        self.ledger
            .finalize(&req.transaction_id, &order_key, &vendor_key)
            .await?;

        // 6. Persist the order
        let ready_time = foods
            .values()
            .map(|f| f.ready_time)
            .max()
            .filter(|t| *t > 0)
            .unwrap_or(DEFAULT_READY_TIME_MINUTES);
        let order = self
            .orders
            .create(OrderCreate {
                id: order_id,
                order_number: shared::util::order_number(),
                vendor: vendor_ref,
                items,
                total_amount,
                paid_amount: req.paid_amount,
                ready_time,
                order_date: shared::util::now_millis(),
            })
            .await?;

        // 7. One single-document update: cart gone, order appended
        self.customers
            .clear_cart_and_append_order(customer_ref, &order_key)
            .await?;

        tracing::info!(
            order = %order_key,
            customer = %customer_ref,
            vendor = %vendor_key,
            total = total_amount,
            "Order created"
        );

        // 8. Best-effort assignment; a failure is reported, never unwound
        match self.assigner.assign(&order_key, &vendor_key).await {
            Ok(assigned) => Ok(CreatedOrder {
                order: assigned,
                assignment_error: None,
            }),
            Err(err) => Ok(CreatedOrder {
                order,
                assignment_error: Some(err),
            }),
        }
    }

    /// Vendor-side processing: status transition plus remarks/ready-time.
    ///
    /// The requested status is validated against the transition table;
    /// anything outside it fails with InvalidStatusTransition.
    pub async fn process_order(
        &self,
        vendor_ref: &str,
        order_id: &str,
        req: ProcessOrderRequest,
    ) -> AppResult<Order> {
        let order = self
            .orders
            .find_by_vendor_and_id(vendor_ref, order_id)
            .await?
            .ok_or_else(|| {
                AppError::with_message(
                    ErrorCode::OrderNotFound,
                    format!("Order {} not found", order_id),
                )
            })?;

        let next = transitions::transition(order.status, req.status)?;
        let remarks = req.remarks.unwrap_or(order.remarks);

        let updated = self
            .orders
            .update_processing(order_id, next, &remarks, req.ready_time)
            .await?;
        Ok(updated)
    }
}

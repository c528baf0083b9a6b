//! End-to-end order pipeline tests against the in-memory engine:
//! cart → payment transaction → order → delivery assignment.

use market_server::cart::{CartLocks, CartManager};
use market_server::db::DbService;
use market_server::db::models::{DeliveryUserCreate, FoodCreate, OfferCreate, VendorCreate};
use market_server::db::repository::{
    CustomerRepository, DeliveryUserRepository, FoodRepository, OfferRepository, OrderRepository,
    TransactionRepository, VendorRepository,
};
use market_server::orders::{
    CreateOrderRequest, DeliveryAssigner, OrderEngine, OrderItemRequest, ProcessOrderRequest,
};
use market_server::payments::{NoopGateway, OpenPaymentRequest, TransactionLedger};
use shared::{ErrorCode, OrderStatus, PaymentMethod, TransactionStatus};
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PINCODE: &str = "560001";

async fn setup() -> Surreal<Db> {
    DbService::new_in_memory().await.expect("db").db
}

async fn seed_vendor(db: &Surreal<Db>, email: &str) -> String {
    // derive a per-email phone so duplicate checks never collide in-test
    let phone = format!("9{:09}", email.bytes().map(u64::from).sum::<u64>());
    let vendor = VendorRepository::new(db.clone())
        .create(
            VendorCreate {
                name: "Spice Villa".into(),
                owner_name: "Asha".into(),
                food_type: vec!["indian".into()],
                address: Some("12 Market Road".into()),
                pincode: PINCODE.into(),
                email: email.into(),
                phone,
                password: "unused".into(),
            },
            "argon2-hash",
        )
        .await
        .expect("vendor");
    vendor.id.unwrap().to_string()
}

async fn seed_food(db: &Surreal<Db>, vendor_ref: &str, name: &str, price: f64) -> String {
    let food = FoodRepository::new(db.clone())
        .create(
            vendor_ref,
            FoodCreate {
                name: name.into(),
                description: format!("{name} from the tandoor"),
                category: "mains".into(),
                food_type: "veg".into(),
                price,
                ready_time: Some(20),
            },
        )
        .await
        .expect("food");
    food.id.unwrap().to_string()
}

async fn seed_customer(db: &Surreal<Db>, email: &str) -> String {
    let customer = CustomerRepository::new(db.clone())
        .create(email, "8877665544", "argon2-hash", 123456, 0)
        .await
        .expect("customer");
    customer.id.unwrap().to_string()
}

async fn seed_rider(db: &Surreal<Db>, email: &str) -> String {
    let repo = DeliveryUserRepository::new(db.clone());
    let rider = repo
        .create(
            DeliveryUserCreate {
                email: email.into(),
                phone: "7766554433".into(),
                address: "3 Depot Lane".into(),
                pincode: PINCODE.into(),
                first_name: Some("Ravi".into()),
                last_name: None,
            },
            "argon2-hash",
        )
        .await
        .expect("rider");
    let id = rider.id.unwrap().to_string();
    repo.set_verified(&id, true).await.expect("verify");
    repo.toggle_availability(&id, None, None).await.expect("toggle");
    id
}

fn cart_manager(db: &Surreal<Db>) -> CartManager {
    CartManager::new(db.clone(), Arc::new(CartLocks::new()))
}

#[tokio::test]
async fn cart_add_accumulates_and_prices_server_side() {
    let db = setup().await;
    let vendor = seed_vendor(&db, "v1@spice.example").await;
    let food = seed_food(&db, &vendor, "Paneer Tikka", 10.0).await;
    let customer = seed_customer(&db, "c1@example.com").await;
    let cart = cart_manager(&db);

    let items = cart.add_or_update_item(&customer, &food, 2).await.expect("add");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 2);
    assert_eq!(items[0].amount, 20.0);

    // sequential adds accumulate into a single line
    let items = cart.add_or_update_item(&customer, &food, 3).await.expect("add");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 5);
    assert_eq!(items[0].amount, 50.0);
}

#[tokio::test]
async fn cart_negative_delta_removes_line_idempotently() {
    let db = setup().await;
    let vendor = seed_vendor(&db, "v2@spice.example").await;
    let food = seed_food(&db, &vendor, "Dal Fry", 6.5).await;
    let customer = seed_customer(&db, "c2@example.com").await;
    let cart = cart_manager(&db);

    cart.add_or_update_item(&customer, &food, 2).await.expect("add");
    let items = cart.add_or_update_item(&customer, &food, -5).await.expect("remove");
    assert!(items.is_empty());

    // removing an absent line is a no-op, not an error
    let items = cart.add_or_update_item(&customer, &food, -1).await.expect("noop");
    assert!(items.is_empty());
}

#[tokio::test]
async fn cart_clear_empties_snapshot() {
    let db = setup().await;
    let vendor = seed_vendor(&db, "v3@spice.example").await;
    let food = seed_food(&db, &vendor, "Biryani", 12.0).await;
    let customer = seed_customer(&db, "c3@example.com").await;
    let cart = cart_manager(&db);

    cart.add_or_update_item(&customer, &food, 4).await.expect("add");
    cart.clear(&customer).await.expect("clear");
    assert!(cart.snapshot(&customer).await.expect("snapshot").is_empty());
}

#[tokio::test]
async fn cart_missing_food_fails_not_found() {
    let db = setup().await;
    let customer = seed_customer(&db, "c4@example.com").await;
    let cart = cart_manager(&db);

    let err = cart
        .add_or_update_item(&customer, "food:doesnotexist", 1)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::FoodNotFound);
}

#[tokio::test]
async fn full_pipeline_cart_payment_order_assignment() {
    let db = setup().await;
    let vendor = seed_vendor(&db, "v5@spice.example").await;
    let food_a = seed_food(&db, &vendor, "Paneer Tikka", 10.0).await;
    let food_b = seed_food(&db, &vendor, "Lassi", 5.0).await;
    let customer = seed_customer(&db, "c5@example.com").await;
    seed_rider(&db, "r5@ride.example").await;

    // cart: A ×2 + B ×1 = 25.00
    let cart = cart_manager(&db);
    cart.add_or_update_item(&customer, &food_a, 2).await.expect("add A");
    let items = cart.add_or_update_item(&customer, &food_b, 1).await.expect("add B");
    let cart_total: f64 = items.iter().map(|i| i.amount).sum();
    assert_eq!(cart_total, 25.0);

    // open a transaction for the cart total, no offer
    let ledger = TransactionLedger::new(db.clone());
    let txn = ledger
        .open(
            &customer,
            OpenPaymentRequest {
                amount: 25.0,
                payment_mode: PaymentMethod::Cod,
                offer_id: None,
            },
            &NoopGateway,
        )
        .await
        .expect("open");
    assert_eq!(txn.status, TransactionStatus::Open);
    assert_eq!(txn.order_value, 25.0);
    let txn_id = txn.id.unwrap().to_string();

    // create the order
    let engine = OrderEngine::new(db.clone());
    let created = engine
        .create_order(
            &customer,
            CreateOrderRequest {
                items: vec![
                    OrderItemRequest { food_id: food_a.clone(), quantity: 2 },
                    OrderItemRequest { food_id: food_b.clone(), quantity: 1 },
                ],
                transaction_id: txn_id.clone(),
                paid_amount: 25.0,
            },
        )
        .await
        .expect("create order");

    assert!(created.assignment_error.is_none());
    let order = created.order;
    assert_eq!(order.total_amount, 25.0);
    assert_eq!(order.paid_amount, 25.0);
    assert_eq!(order.status, OrderStatus::Waiting);
    assert!(order.delivery_user.is_some());
    assert!(order.order_number.starts_with("ORD-"));

    // transaction closed and linked
    let txn = TransactionRepository::new(db.clone())
        .find_by_id(&txn_id)
        .await
        .expect("find txn")
        .expect("txn exists");
    assert_eq!(txn.status, TransactionStatus::Success);
    assert_eq!(
        txn.order.as_ref().map(|o| o.to_string()),
        order.id.as_ref().map(|o| o.to_string())
    );
    assert_eq!(txn.vendor.as_ref().map(|v| v.to_string()), Some(vendor));

    // cart cleared, order appended to the customer
    let customer_doc = CustomerRepository::new(db.clone())
        .find_by_id(&customer)
        .await
        .expect("find customer")
        .expect("customer exists");
    assert!(customer_doc.cart.is_empty());
    assert_eq!(customer_doc.orders.len(), 1);
    assert_eq!(
        customer_doc.orders[0].to_string(),
        order.id.as_ref().unwrap().to_string()
    );

    // the claimed transaction cannot back a second order
    let err = engine
        .create_order(
            &customer,
            CreateOrderRequest {
                items: vec![OrderItemRequest { food_id: food_a, quantity: 1 }],
                transaction_id: txn_id,
                paid_amount: 10.0,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::TransactionAlreadyClosed);
}

#[tokio::test]
async fn order_creation_is_all_or_nothing_on_food_resolution() {
    let db = setup().await;
    let vendor = seed_vendor(&db, "v6@spice.example").await;
    let food = seed_food(&db, &vendor, "Samosa", 3.0).await;
    let customer = seed_customer(&db, "c6@example.com").await;

    let cart = cart_manager(&db);
    cart.add_or_update_item(&customer, &food, 2).await.expect("add");

    let ledger = TransactionLedger::new(db.clone());
    let txn = ledger
        .open(
            &customer,
            OpenPaymentRequest {
                amount: 6.0,
                payment_mode: PaymentMethod::Card,
                offer_id: None,
            },
            &NoopGateway,
        )
        .await
        .expect("open");
    let txn_id = txn.id.unwrap().to_string();

    let engine = OrderEngine::new(db.clone());
    let err = engine
        .create_order(
            &customer,
            CreateOrderRequest {
                items: vec![
                    OrderItemRequest { food_id: food.clone(), quantity: 2 },
                    OrderItemRequest { food_id: "food:missing".into(), quantity: 1 },
                ],
                transaction_id: txn_id.clone(),
                paid_amount: 6.0,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::FoodNotFound);

    // nothing happened: cart unchanged, transaction still OPEN, no orders
    let customer_doc = CustomerRepository::new(db.clone())
        .find_by_id(&customer)
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(customer_doc.cart.len(), 1);
    assert!(customer_doc.orders.is_empty());

    let txn = TransactionRepository::new(db.clone())
        .find_by_id(&txn_id)
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(txn.status, TransactionStatus::Open);
}

#[tokio::test]
async fn order_with_empty_items_is_rejected() {
    let db = setup().await;
    let customer = seed_customer(&db, "c7@example.com").await;

    let ledger = TransactionLedger::new(db.clone());
    let txn = ledger
        .open(
            &customer,
            OpenPaymentRequest {
                amount: 10.0,
                payment_mode: PaymentMethod::Cod,
                offer_id: None,
            },
            &NoopGateway,
        )
        .await
        .expect("open");

    let engine = OrderEngine::new(db.clone());
    let err = engine
        .create_order(
            &customer,
            CreateOrderRequest {
                items: vec![],
                transaction_id: txn.id.unwrap().to_string(),
                paid_amount: 10.0,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CartEmpty);
}

#[tokio::test]
async fn order_spanning_two_vendors_is_rejected() {
    let db = setup().await;
    let vendor_a = seed_vendor(&db, "v8a@spice.example").await;
    let vendor_b = seed_vendor(&db, "v8b@wok.example").await;
    let food_a = seed_food(&db, &vendor_a, "Naan", 2.0).await;
    let food_b = seed_food(&db, &vendor_b, "Noodles", 7.0).await;
    let customer = seed_customer(&db, "c8@example.com").await;

    let ledger = TransactionLedger::new(db.clone());
    let txn = ledger
        .open(
            &customer,
            OpenPaymentRequest {
                amount: 9.0,
                payment_mode: PaymentMethod::Cod,
                offer_id: None,
            },
            &NoopGateway,
        )
        .await
        .expect("open");
    let txn_id = txn.id.unwrap().to_string();

    let engine = OrderEngine::new(db.clone());
    let err = engine
        .create_order(
            &customer,
            CreateOrderRequest {
                items: vec![
                    OrderItemRequest { food_id: food_a, quantity: 1 },
                    OrderItemRequest { food_id: food_b, quantity: 1 },
                ],
                transaction_id: txn_id.clone(),
                paid_amount: 9.0,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::VendorMismatch);

    // the transaction survives untouched for a corrected retry
    let txn = TransactionRepository::new(db.clone())
        .find_by_id(&txn_id)
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(txn.status, TransactionStatus::Open);
}

#[tokio::test]
async fn offer_discount_applies_and_inactive_offer_fails() {
    let db = setup().await;
    let vendor = seed_vendor(&db, "v9@spice.example").await;
    let customer = seed_customer(&db, "c9@example.com").await;

    let offers = OfferRepository::new(db.clone());
    let active = offers
        .create(
            &vendor,
            OfferCreate {
                title: "Monsoon special".into(),
                description: None,
                min_value: 0.0,
                offer_amount: 5.0,
                start_validity: None,
                end_validity: None,
                promo_code: "MONSOON5".into(),
                promo_type: Default::default(),
                bank: vec![],
                bins: vec![],
                pincode: PINCODE.into(),
                is_active: true,
            },
        )
        .await
        .expect("offer");
    let inactive = offers
        .create(
            &vendor,
            OfferCreate {
                title: "Expired deal".into(),
                description: None,
                min_value: 0.0,
                offer_amount: 50.0,
                start_validity: None,
                end_validity: None,
                promo_code: "OLD50".into(),
                promo_type: Default::default(),
                bank: vec![],
                bins: vec![],
                pincode: PINCODE.into(),
                is_active: false,
            },
        )
        .await
        .expect("offer");

    let ledger = TransactionLedger::new(db.clone());

    // 25.00 with a 5.00 flat offer → order_value 20.00
    let txn = ledger
        .open(
            &customer,
            OpenPaymentRequest {
                amount: 25.0,
                payment_mode: PaymentMethod::Card,
                offer_id: Some(active.id.unwrap().to_string()),
            },
            &NoopGateway,
        )
        .await
        .expect("open");
    assert_eq!(txn.order_value, 20.0);

    let err = ledger
        .open(
            &customer,
            OpenPaymentRequest {
                amount: 25.0,
                payment_mode: PaymentMethod::Card,
                offer_id: Some(inactive.id.unwrap().to_string()),
            },
            &NoopGateway,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OfferInactive);

    let err = ledger
        .open(
            &customer,
            OpenPaymentRequest {
                amount: 25.0,
                payment_mode: PaymentMethod::Card,
                offer_id: Some("offer:missing".into()),
            },
            &NoopGateway,
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OfferNotFound);
}

#[tokio::test]
async fn assignment_failure_keeps_the_order_and_reassignment_recovers() {
    let db = setup().await;
    let vendor = seed_vendor(&db, "v10@spice.example").await;
    let food = seed_food(&db, &vendor, "Thali", 15.0).await;
    let customer = seed_customer(&db, "c10@example.com").await;
    // no rider seeded yet

    let ledger = TransactionLedger::new(db.clone());
    let txn = ledger
        .open(
            &customer,
            OpenPaymentRequest {
                amount: 15.0,
                payment_mode: PaymentMethod::Cod,
                offer_id: None,
            },
            &NoopGateway,
        )
        .await
        .expect("open");

    let engine = OrderEngine::new(db.clone());
    let created = engine
        .create_order(
            &customer,
            CreateOrderRequest {
                items: vec![OrderItemRequest { food_id: food, quantity: 1 }],
                transaction_id: txn.id.unwrap().to_string(),
                paid_amount: 15.0,
            },
        )
        .await
        .expect("create order");

    // assignment failed but the order was committed
    let err = created.assignment_error.expect("assignment should fail");
    assert_eq!(err.code, ErrorCode::DeliveryUserUnavailable);
    let order_id = created.order.id.unwrap().to_string();

    let stored = OrderRepository::new(db.clone())
        .find_by_id(&order_id)
        .await
        .expect("find")
        .expect("order persisted");
    assert_eq!(stored.status, OrderStatus::Waiting);
    assert!(stored.delivery_user.is_none());

    // a rider comes online; manual reassignment succeeds
    seed_rider(&db, "r10@ride.example").await;
    let assigner = DeliveryAssigner::new(db.clone());
    let order = assigner
        .assign(&order_id, &stored.vendor.to_string())
        .await
        .expect("reassign");
    assert!(order.delivery_user.is_some());
}

#[tokio::test]
async fn paid_amount_is_stored_as_reported_but_total_is_server_priced() {
    let db = setup().await;
    let vendor = seed_vendor(&db, "v11@spice.example").await;
    let food = seed_food(&db, &vendor, "Kulfi", 4.0).await;
    let customer = seed_customer(&db, "c11@example.com").await;

    let ledger = TransactionLedger::new(db.clone());
    let txn = ledger
        .open(
            &customer,
            OpenPaymentRequest {
                amount: 1.0,
                payment_mode: PaymentMethod::Cod,
                offer_id: None,
            },
            &NoopGateway,
        )
        .await
        .expect("open");

    let engine = OrderEngine::new(db.clone());
    let created = engine
        .create_order(
            &customer,
            CreateOrderRequest {
                items: vec![OrderItemRequest { food_id: food, quantity: 3 }],
                transaction_id: txn.id.unwrap().to_string(),
                paid_amount: 1.0,
            },
        )
        .await
        .expect("create order");

    // total is always the server-side priced sum, independent of payment
    assert_eq!(created.order.total_amount, 12.0);
    assert_eq!(created.order.paid_amount, 1.0);
}

#[tokio::test]
async fn vendor_processing_follows_the_transition_table() {
    let db = setup().await;
    let vendor = seed_vendor(&db, "v12@spice.example").await;
    let food = seed_food(&db, &vendor, "Chai", 2.0).await;
    let customer = seed_customer(&db, "c12@example.com").await;

    let ledger = TransactionLedger::new(db.clone());
    let txn = ledger
        .open(
            &customer,
            OpenPaymentRequest {
                amount: 2.0,
                payment_mode: PaymentMethod::Cod,
                offer_id: None,
            },
            &NoopGateway,
        )
        .await
        .expect("open");

    let engine = OrderEngine::new(db.clone());
    let created = engine
        .create_order(
            &customer,
            CreateOrderRequest {
                items: vec![OrderItemRequest { food_id: food, quantity: 1 }],
                transaction_id: txn.id.unwrap().to_string(),
                paid_amount: 2.0,
            },
        )
        .await
        .expect("create order");
    let order_id = created.order.id.unwrap().to_string();

    // a WAITING order cannot jump straight to READY
    let err = engine
        .process_order(
            &vendor,
            &order_id,
            ProcessOrderRequest {
                status: OrderStatus::Ready,
                remarks: None,
                ready_time: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStatusTransition);

    // the legal path runs to DELIVERED
    for status in [
        OrderStatus::Accept,
        OrderStatus::UnderProcess,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ] {
        let order = engine
            .process_order(
                &vendor,
                &order_id,
                ProcessOrderRequest {
                    status,
                    remarks: Some("on it".into()),
                    ready_time: Some(30),
                },
            )
            .await
            .expect("transition");
        assert_eq!(order.status, status);
        assert_eq!(order.ready_time, 30);
    }

    // DELIVERED is terminal
    let err = engine
        .process_order(
            &vendor,
            &order_id,
            ProcessOrderRequest {
                status: OrderStatus::Waiting,
                remarks: None,
                ready_time: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::InvalidStatusTransition);

    // another vendor never sees the order
    let other_vendor = seed_vendor(&db, "v12b@wok.example").await;
    let err = engine
        .process_order(
            &other_vendor,
            &order_id,
            ProcessOrderRequest {
                status: OrderStatus::Accept,
                remarks: None,
                ready_time: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::OrderNotFound);
}

//! Concurrency guarantees: the transaction claim admits exactly one
//! winner, and per-customer cart serialization never loses an update.

use market_server::cart::{CartLocks, CartManager};
use market_server::db::DbService;
use market_server::db::models::{DeliveryUserCreate, FoodCreate, VendorCreate};
use market_server::db::repository::{
    CustomerRepository, DeliveryUserRepository, FoodRepository, VendorRepository,
};
use market_server::orders::{CreateOrderRequest, OrderEngine, OrderItemRequest};
use market_server::payments::{NoopGateway, OpenPaymentRequest, TransactionLedger};
use shared::{ErrorCode, PaymentMethod};
use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PINCODE: &str = "110011";
const RACERS: usize = 8;

async fn setup() -> Surreal<Db> {
    DbService::new_in_memory().await.expect("db").db
}

async fn seed_world(db: &Surreal<Db>) -> (String, String, String) {
    let vendor = VendorRepository::new(db.clone())
        .create(
            VendorCreate {
                name: "Wok Express".into(),
                owner_name: "Lin".into(),
                food_type: vec!["chinese".into()],
                address: None,
                pincode: PINCODE.into(),
                email: "wok@example.com".into(),
                phone: "9111111111".into(),
                password: "unused".into(),
            },
            "argon2-hash",
        )
        .await
        .expect("vendor");
    let vendor_ref = vendor.id.unwrap().to_string();

    let food = FoodRepository::new(db.clone())
        .create(
            &vendor_ref,
            FoodCreate {
                name: "Fried Rice".into(),
                description: "wok-fried".into(),
                category: "mains".into(),
                food_type: "veg".into(),
                price: 8.0,
                ready_time: Some(15),
            },
        )
        .await
        .expect("food");
    let food_ref = food.id.unwrap().to_string();

    let customer = CustomerRepository::new(db.clone())
        .create("race@example.com", "8123456789", "argon2-hash", 123456, 0)
        .await
        .expect("customer");
    let customer_ref = customer.id.unwrap().to_string();

    let riders = DeliveryUserRepository::new(db.clone());
    let rider = riders
        .create(
            DeliveryUserCreate {
                email: "rider@example.com".into(),
                phone: "7123456789".into(),
                address: "1 Depot Lane".into(),
                pincode: PINCODE.into(),
                first_name: None,
                last_name: None,
            },
            "argon2-hash",
        )
        .await
        .expect("rider");
    let rider_ref = rider.id.unwrap().to_string();
    riders.set_verified(&rider_ref, true).await.expect("verify");
    riders
        .toggle_availability(&rider_ref, None, None)
        .await
        .expect("toggle");

    (vendor_ref, food_ref, customer_ref)
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn one_open_transaction_admits_exactly_one_order() {
    let db = setup().await;
    let (_vendor, food, customer) = seed_world(&db).await;

    let ledger = TransactionLedger::new(db.clone());
    let txn = ledger
        .open(
            &customer,
            OpenPaymentRequest {
                amount: 8.0,
                payment_mode: PaymentMethod::Card,
                offer_id: None,
            },
            &NoopGateway,
        )
        .await
        .expect("open");
    let txn_id = txn.id.unwrap().to_string();

    let mut handles = Vec::with_capacity(RACERS);
    for _ in 0..RACERS {
        let db = db.clone();
        let txn_id = txn_id.clone();
        let food = food.clone();
        let customer = customer.clone();
        handles.push(tokio::spawn(async move {
            let engine = OrderEngine::new(db);
            engine
                .create_order(
                    &customer,
                    CreateOrderRequest {
                        items: vec![OrderItemRequest { food_id: food, quantity: 1 }],
                        transaction_id: txn_id,
                        paid_amount: 8.0,
                    },
                )
                .await
        }));
    }

    let mut successes = 0;
    let mut already_closed = 0;
    for handle in handles {
        match handle.await.expect("join") {
            Ok(_) => successes += 1,
            Err(err) => {
                assert_eq!(err.code, ErrorCode::TransactionAlreadyClosed);
                already_closed += 1;
            }
        }
    }
    assert_eq!(successes, 1, "exactly one racer may claim the transaction");
    assert_eq!(already_closed, RACERS - 1);

    // exactly one order row exists, and it is the one the customer owns
    let customer_doc = CustomerRepository::new(db.clone())
        .find_by_id(&customer)
        .await
        .expect("find")
        .expect("exists");
    assert_eq!(customer_doc.orders.len(), 1);

    #[derive(serde::Deserialize)]
    struct Count {
        total: i64,
    }
    let mut res = db
        .query("SELECT count() AS total FROM `order` GROUP ALL")
        .await
        .expect("count");
    let counts: Vec<Count> = res.take(0).expect("take");
    assert_eq!(counts.first().map(|c| c.total), Some(1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_cart_adds_never_lose_an_update() {
    let db = setup().await;
    let (_vendor, food, customer) = seed_world(&db).await;

    // one shared lock map, as ServerState would hold it
    let locks = Arc::new(CartLocks::new());

    let mut handles = Vec::with_capacity(10);
    for _ in 0..10 {
        let manager = CartManager::new(db.clone(), locks.clone());
        let food = food.clone();
        let customer = customer.clone();
        handles.push(tokio::spawn(async move {
            manager.add_or_update_item(&customer, &food, 1).await
        }));
    }
    for handle in handles {
        handle.await.expect("join").expect("add");
    }

    let manager = CartManager::new(db.clone(), locks);
    let cart = manager.snapshot(&customer).await.expect("snapshot");
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].quantity, 10);
    assert_eq!(cart[0].amount, 80.0);
}

//! Server state - shared handles for all request handlers

use std::sync::Arc;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::cart::CartLocks;
use crate::core::Config;
use crate::db::DbService;
use crate::payments::{NoopGateway, PaymentGateway};
use crate::services::{LogNotifier, OtpNotifier};

/// Server state - holds shared references to every service
///
/// Cloning is cheap (Arc shallow copies); one instance is shared across
/// all request handlers via axum's `State`.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database handle
    pub db: Surreal<Db>,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
    /// Per-customer cart mutexes
    pub cart_locks: Arc<CartLocks>,
    /// Injected payment gateway
    pub payment_gateway: Arc<dyn PaymentGateway>,
    /// Injected OTP delivery sink
    pub otp_notifier: Arc<dyn OtpNotifier>,
}

impl ServerState {
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        payment_gateway: Arc<dyn PaymentGateway>,
        otp_notifier: Arc<dyn OtpNotifier>,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            cart_locks: Arc::new(CartLocks::new()),
            payment_gateway,
            otp_notifier,
        }
    }

    /// Initialize the full production state: work directory, RocksDB-backed
    /// database, JWT service and the default collaborators.
    ///
    /// # Panics
    ///
    /// Panics when the work directory or database cannot be initialized.
    pub async fn initialize(config: &Config) -> Self {
        config
            .ensure_work_dir_structure()
            .expect("Failed to create work directory structure");

        let db_path = config.database_dir().join("market.db");
        let db_service = DbService::new(&db_path)
            .await
            .expect("Failed to initialize database");

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        Self::new(
            config.clone(),
            db_service.db,
            jwt_service,
            Arc::new(NoopGateway),
            Arc::new(LogNotifier),
        )
    }

    /// Get the database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }
}

//! Database Module
//!
//! Embedded SurrealDB: RocksDB-backed in production, in-memory in tests.

pub mod models;
pub mod repository;

use shared::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "tiffin";
const DATABASE: &str = "market";

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone, Debug)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the RocksDB-backed database at the given path
    pub async fn new(db_path: &Path) -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::prepare(db).await
    }

    /// Open a fresh in-memory database (tests)
    pub async fn new_in_memory() -> Result<Self, AppError> {
        let db: Surreal<Db> = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::prepare(db).await
    }

    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        ensure_schema(&db).await?;
        tracing::info!("Database ready (SurrealDB, ns={NAMESPACE} db={DATABASE})");

        Ok(Self { db })
    }
}

/// Idempotent schema bootstrap.
///
/// Tables are schemaless; only uniqueness constraints on account emails are
/// enforced at the storage layer.
async fn ensure_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query(
        r#"
        DEFINE INDEX IF NOT EXISTS uniq_customer_email ON TABLE customer COLUMNS email UNIQUE;
        DEFINE INDEX IF NOT EXISTS uniq_vendor_email ON TABLE vendor COLUMNS email UNIQUE;
        DEFINE INDEX IF NOT EXISTS uniq_delivery_user_email ON TABLE delivery_user COLUMNS email UNIQUE;
        "#,
    )
    .await
    .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
    .check()
    .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;
    Ok(())
}

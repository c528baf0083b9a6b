//! Server startup errors
//!
//! Request-level failures use [`shared::AppError`]; this type only covers
//! boot-time problems (config, database open, socket bind).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database initialization failed: {0}")]
    Database(String),

    #[error("Failed to bind {0}: {1}")]
    Bind(std::net::SocketAddr, std::io::Error),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Result type for server bootstrap
pub type Result<T> = std::result::Result<T, ServerError>;

//! Database Models

// Serde helpers
pub mod serde_helpers;

// Accounts
pub mod customer;
pub mod delivery_user;
pub mod vendor;

// Catalog
pub mod food;
pub mod offer;

// Order pipeline
pub mod order;
pub mod transaction;

// Re-exports
pub use customer::{CartLineItem, Customer, CustomerId, hash_password, verify_password};
pub use delivery_user::{DeliveryUser, DeliveryUserCreate, DeliveryUserId};
pub use food::{Food, FoodCreate, FoodId};
pub use offer::{Offer, OfferCreate, OfferId, OfferUpdate};
pub use order::{DEFAULT_READY_TIME_MINUTES, Order, OrderCreate, OrderId};
pub use transaction::{Transaction, TransactionId};
pub use vendor::{Vendor, VendorCreate, VendorId, VendorUpdate};

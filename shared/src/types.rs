//! Domain enums shared between the server and its clients
//!
//! Wire format is SCREAMING_SNAKE_CASE strings, matching the values stored
//! in the database.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle status
///
/// ```text
/// WAITING       → ACCEPT | REJECT | FAILED
/// ACCEPT        → UNDER_PROCESS | REJECT | FAILED
/// UNDER_PROCESS → READY | FAILED
/// READY         → DELIVERED | FAILED
/// REJECT, FAILED, DELIVERED are terminal
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Created, waiting for the vendor to accept
    #[default]
    Waiting,
    /// Accepted by the vendor
    Accept,
    /// Rejected by the vendor
    Reject,
    /// Being prepared
    UnderProcess,
    /// Ready for pickup by the delivery user
    Ready,
    /// Delivered to the customer
    Delivered,
    /// Failed (vendor-side abort, any stage)
    Failed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "WAITING",
            Self::Accept => "ACCEPT",
            Self::Reject => "REJECT",
            Self::UnderProcess => "UNDER_PROCESS",
            Self::Ready => "READY",
            Self::Delivered => "DELIVERED",
            Self::Failed => "FAILED",
        }
    }

    /// Terminal states admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Reject | Self::Failed | Self::Delivered)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment transaction status
///
/// A transaction is created OPEN and leaves OPEN exactly once, via the
/// order engine's atomic claim (→ SUCCESS) or a gateway failure (→ FAILED).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    #[default]
    Open,
    Confirmed,
    Success,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Confirmed => "CONFIRMED",
            Self::Success => "SUCCESS",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment method chosen when opening a transaction
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Cash on delivery
    #[default]
    Cod,
    Card,
}

/// Promo targeting of an offer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PromoType {
    User,
    Bank,
    Card,
    #[default]
    All,
}

/// Applicability scope of an offer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferScope {
    /// Restricted to the offer's vendor list
    Vendor,
    /// Marketplace-wide
    #[default]
    Generic,
}

/// Authenticated actor role, carried in JWT claims
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Admin,
    Vendor,
    Customer,
    Delivery,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Vendor => "vendor",
            Self::Customer => "customer",
            Self::Delivery => "delivery",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(Self::Admin),
            "vendor" => Some(Self::Vendor),
            "customer" => Some(Self::Customer),
            "delivery" => Some(Self::Delivery),
            _ => None,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_wire_format() {
        let json = serde_json::to_string(&OrderStatus::UnderProcess).unwrap();
        assert_eq!(json, "\"UNDER_PROCESS\"");
        let back: OrderStatus = serde_json::from_str("\"DELIVERED\"").unwrap();
        assert_eq!(back, OrderStatus::Delivered);
    }

    #[test]
    fn test_terminal_states() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Reject.is_terminal());
        assert!(OrderStatus::Failed.is_terminal());
        assert!(!OrderStatus::Waiting.is_terminal());
        assert!(!OrderStatus::Ready.is_terminal());
    }

    #[test]
    fn test_payment_method_wire_format() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Cod).unwrap(), "\"COD\"");
        assert_eq!(
            serde_json::to_string(&PaymentMethod::Card).unwrap(),
            "\"CARD\""
        );
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(UserRole::parse("vendor"), Some(UserRole::Vendor));
        assert_eq!(UserRole::parse("nobody"), None);
    }
}

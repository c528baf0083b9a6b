//! Payments - transaction ledger and the gateway collaborator

pub mod gateway;
pub mod ledger;

pub use gateway::{NoopGateway, PaymentGateway};
pub use ledger::{OpenPaymentRequest, TransactionLedger};

//! Service layer - catalog reads and external collaborators

pub mod catalog;
pub mod notification;

pub use catalog::CatalogService;
pub use notification::{LogNotifier, OtpCode, OtpNotifier, generate_otp, otp_matches};

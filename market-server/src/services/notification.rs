//! OTP generation and the notification sink
//!
//! OTP delivery is an injected collaborator: the default implementation
//! logs instead of calling an SMS provider, and tests can substitute their
//! own sink.

use async_trait::async_trait;
use rand::Rng;
use shared::AppResult;

/// OTP validity window
const OTP_TTL_MINUTES: i64 = 30;

/// A freshly generated one-time passcode
#[derive(Debug, Clone, Copy)]
pub struct OtpCode {
    /// Six-digit code
    pub code: i32,
    /// Expiry, millis since epoch
    pub expires_at: i64,
}

/// Generate a six-digit OTP valid for 30 minutes
pub fn generate_otp() -> OtpCode {
    let code = rand::thread_rng().gen_range(100_000..1_000_000);
    let expires_at = shared::util::now_millis() + OTP_TTL_MINUTES * 60 * 1000;
    OtpCode { code, expires_at }
}

/// Check an OTP attempt against the stored code and expiry
pub fn otp_matches(stored: Option<i32>, expires_at: Option<i64>, attempt: i32) -> bool {
    match (stored, expires_at) {
        (Some(code), Some(expiry)) => code == attempt && shared::util::now_millis() < expiry,
        _ => false,
    }
}

/// Outbound OTP delivery
#[async_trait]
pub trait OtpNotifier: Send + Sync {
    /// Deliver the code to a phone number. Failures propagate to the
    /// caller's own failure, since delivery is awaited inline.
    async fn send(&self, otp: i32, phone: &str) -> AppResult<()>;
}

/// Development sink: logs the code instead of sending SMS
pub struct LogNotifier;

#[async_trait]
impl OtpNotifier for LogNotifier {
    async fn send(&self, otp: i32, phone: &str) -> AppResult<()> {
        tracing::info!(phone = %phone, otp = otp, "OTP notification (log sink)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_otp_shape() {
        for _ in 0..32 {
            let otp = generate_otp();
            assert!((100_000..1_000_000).contains(&otp.code));
            assert!(otp.expires_at > shared::util::now_millis());
        }
    }

    #[test]
    fn test_otp_matching() {
        let future = shared::util::now_millis() + 60_000;
        let past = shared::util::now_millis() - 60_000;

        assert!(otp_matches(Some(123456), Some(future), 123456));
        assert!(!otp_matches(Some(123456), Some(future), 654321));
        assert!(!otp_matches(Some(123456), Some(past), 123456));
        assert!(!otp_matches(None, Some(future), 123456));
        assert!(!otp_matches(Some(123456), None, 123456));
    }
}

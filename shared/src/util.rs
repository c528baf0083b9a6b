/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate an opaque, globally unique order number.
///
/// Order numbers are exposed to customers and printed on receipts, so they
/// are independent of the database record id.
pub fn order_number() -> String {
    format!("ORD-{}", uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_numbers_are_unique() {
        let a = order_number();
        let b = order_number();
        assert_ne!(a, b);
        assert!(a.starts_with("ORD-"));
    }
}

//! Order status transition table
//!
//! Statuses used to be overwritten freely; the table below makes the
//! lifecycle explicit and rejects everything outside it. Rejections are
//! logged so any workflow that relied on a free-form transition shows up
//! in the logs during rollout.
//!
//! ```text
//! WAITING       → ACCEPT | REJECT | FAILED
//! ACCEPT        → UNDER_PROCESS | REJECT | FAILED
//! UNDER_PROCESS → READY | FAILED
//! READY         → DELIVERED | FAILED
//! REJECT, FAILED, DELIVERED: terminal
//! ```

use shared::{AppError, AppResult, ErrorCode, OrderStatus};

/// Whether `from → to` is an allowed transition. Same-status updates are
/// allowed so remarks/ready-time can be touched without a status change.
pub fn is_allowed(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;

    if from == to {
        return true;
    }

    match from {
        Waiting => matches!(to, Accept | Reject | Failed),
        Accept => matches!(to, UnderProcess | Reject | Failed),
        UnderProcess => matches!(to, Ready | Failed),
        Ready => matches!(to, Delivered | Failed),
        Reject | Failed | Delivered => false,
    }
}

/// Validate a requested transition, returning the next status or an
/// InvalidStatusTransition error.
pub fn transition(current: OrderStatus, requested: OrderStatus) -> AppResult<OrderStatus> {
    if is_allowed(current, requested) {
        Ok(requested)
    } else {
        tracing::warn!(
            from = %current,
            to = %requested,
            "Rejected order status transition"
        );
        Err(AppError::with_message(
            ErrorCode::InvalidStatusTransition,
            format!("Cannot transition order from {} to {}", current, requested),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    const ALL: [OrderStatus; 7] = [Waiting, Accept, Reject, UnderProcess, Ready, Delivered, Failed];

    #[test]
    fn test_allowed_edges() {
        assert!(is_allowed(Waiting, Accept));
        assert!(is_allowed(Waiting, Reject));
        assert!(is_allowed(Waiting, Failed));
        assert!(is_allowed(Accept, UnderProcess));
        assert!(is_allowed(UnderProcess, Ready));
        assert!(is_allowed(Ready, Delivered));
        assert!(is_allowed(Ready, Failed));
    }

    #[test]
    fn test_terminal_states_admit_nothing() {
        for terminal in [Reject, Failed, Delivered] {
            for next in ALL {
                if next != terminal {
                    assert!(
                        !is_allowed(terminal, next),
                        "{terminal:?} -> {next:?} must be rejected"
                    );
                }
            }
        }
    }

    #[test]
    fn test_no_skipping_stages() {
        assert!(!is_allowed(Waiting, UnderProcess));
        assert!(!is_allowed(Waiting, Ready));
        assert!(!is_allowed(Waiting, Delivered));
        assert!(!is_allowed(Accept, Delivered));
        assert!(!is_allowed(UnderProcess, Delivered));
    }

    #[test]
    fn test_same_status_allowed() {
        for status in ALL {
            assert!(is_allowed(status, status));
        }
    }

    #[test]
    fn test_transition_error_kind() {
        let err = transition(Delivered, Waiting).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
    }
}

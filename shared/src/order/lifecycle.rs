//! Order status lifecycle - the transition table
//!
//! ```text
//! scheduled ──► confirmed ──► preparing ──► ready ──► delivered
//! pending  ──┘      │             │           │
//!     │             └─────────────┴───────────┴─────► cancelled
//!     └──────────────────────────────────────────────►
//! ```
//!
//! `delivered` and `cancelled` are absorbing. There is no skip-ahead: every
//! order walks the path one step at a time.

use super::types::OrderStatus;
use thiserror::Error;

/// A transition request outside the table
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("cannot transition order from '{from}' to '{to}'")]
pub struct TransitionError {
    pub from: OrderStatus,
    pub to: OrderStatus,
}

/// Allowed target statuses for a given source status
pub fn allowed_targets(from: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match from {
        Scheduled => &[Confirmed, Cancelled],
        Pending => &[Confirmed, Cancelled],
        Confirmed => &[Preparing, Cancelled],
        Preparing => &[Ready, Cancelled],
        Ready => &[Delivered, Cancelled],
        Delivered => &[],
        Cancelled => &[],
    }
}

/// Check a single transition against the table
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    allowed_targets(from).contains(&to)
}

/// Validate a transition, returning the offending pair on failure
pub fn check_transition(from: OrderStatus, to: OrderStatus) -> Result<(), TransitionError> {
    if can_transition(from, to) {
        Ok(())
    } else {
        Err(TransitionError { from, to })
    }
}

/// Terminal statuses accept no further transitions
pub fn is_terminal(status: OrderStatus) -> bool {
    allowed_targets(status).is_empty()
}

/// An order still needing kitchen attention
pub fn is_active(status: OrderStatus) -> bool {
    !matches!(status, OrderStatus::Delivered | OrderStatus::Cancelled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn happy_path_walks_one_step_at_a_time() {
        assert!(can_transition(Pending, Confirmed));
        assert!(can_transition(Confirmed, Preparing));
        assert!(can_transition(Preparing, Ready));
        assert!(can_transition(Ready, Delivered));
    }

    #[test]
    fn no_skip_ahead() {
        assert!(!can_transition(Pending, Preparing));
        assert!(!can_transition(Pending, Ready));
        assert!(!can_transition(Pending, Delivered));
        assert!(!can_transition(Confirmed, Ready));
        assert!(!can_transition(Confirmed, Delivered));
        assert!(!can_transition(Preparing, Delivered));
    }

    #[test]
    fn no_backwards_moves() {
        assert!(!can_transition(Confirmed, Pending));
        assert!(!can_transition(Preparing, Confirmed));
        assert!(!can_transition(Ready, Preparing));
    }

    #[test]
    fn every_active_status_can_cancel() {
        for from in [Scheduled, Pending, Confirmed, Preparing, Ready] {
            assert!(can_transition(from, Cancelled), "{from} should cancel");
        }
    }

    #[test]
    fn terminal_statuses_are_absorbing() {
        for from in [Delivered, Cancelled] {
            assert!(is_terminal(from));
            for to in [Scheduled, Pending, Confirmed, Preparing, Ready, Delivered, Cancelled] {
                assert!(!can_transition(from, to), "{from} -> {to} must be rejected");
            }
        }
    }

    #[test]
    fn scheduled_mirrors_pending() {
        assert_eq!(allowed_targets(Scheduled), &[Confirmed, Cancelled]);
    }

    #[test]
    fn check_transition_names_both_statuses() {
        let err = check_transition(Confirmed, Ready).unwrap_err();
        assert_eq!(err.from, Confirmed);
        assert_eq!(err.to, Ready);
    }

    #[test]
    fn active_excludes_exactly_the_terminals() {
        assert!(is_active(Pending));
        assert!(is_active(Scheduled));
        assert!(is_active(Ready));
        assert!(!is_active(Delivered));
        assert!(!is_active(Cancelled));
    }
}

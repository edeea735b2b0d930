//! Daily kitchen stats
//!
//! Per-status counts over the orders created today (business timezone).
//! `total_today` sums the counts observed in the group-by rather than
//! issuing a second count query, so the two can never disagree.

use serde::Serialize;
use shared::order::OrderStatus;

/// Per-status counts for the current day
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DailyStats {
    pub pending: i64,
    pub preparing: i64,
    pub ready: i64,
    /// Orders that reached `delivered`
    pub completed: i64,
    pub total_today: i64,
}

impl DailyStats {
    /// Fold group-by rows into the reported keys.
    ///
    /// Statuses outside the four reported keys (confirmed, scheduled,
    /// cancelled) still count toward `total_today`.
    pub fn from_counts(rows: &[(OrderStatus, i64)]) -> Self {
        let mut stats = Self::default();
        for (status, count) in rows {
            match status {
                OrderStatus::Pending => stats.pending += count,
                OrderStatus::Preparing => stats.preparing += count,
                OrderStatus::Ready => stats.ready += count,
                OrderStatus::Delivered => stats.completed += count,
                _ => {}
            }
            stats.total_today += count;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn absent_statuses_report_zero() {
        let stats = DailyStats::from_counts(&[(Pending, 1), (Preparing, 1)]);
        assert_eq!(
            stats,
            DailyStats {
                pending: 1,
                preparing: 1,
                ready: 0,
                completed: 0,
                total_today: 2,
            }
        );
    }

    #[test]
    fn delivered_counts_as_completed() {
        let stats = DailyStats::from_counts(&[(Delivered, 3), (Ready, 2)]);
        assert_eq!(stats.completed, 3);
        assert_eq!(stats.ready, 2);
        assert_eq!(stats.total_today, 5);
    }

    #[test]
    fn unreported_statuses_still_reach_the_total() {
        let stats = DailyStats::from_counts(&[(Confirmed, 4), (Cancelled, 1), (Pending, 1)]);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.total_today, 6);
    }

    #[test]
    fn keys_serialize_camel_case() {
        let json = serde_json::to_value(DailyStats::default()).unwrap();
        assert!(json.get("totalToday").is_some());
        assert!(json.get("completed").is_some());
    }
}

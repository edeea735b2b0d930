//! Time helpers — business-timezone day windows
//!
//! All date→timestamp conversion happens in the API/domain layer; the
//! repository layer only ever receives `i64` Unix millis.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// Date + midnight → Unix millis in the business timezone.
///
/// DST gap fallback: if local midnight does not exist, fall back to UTC.
fn day_start_millis(date: NaiveDate, tz: Tz) -> i64 {
    let naive = date.and_hms_opt(0, 0, 0).unwrap();
    naive
        .and_local_timezone(tz)
        .latest()
        .map(|dt| dt.timestamp_millis())
        .unwrap_or_else(|| naive.and_utc().timestamp_millis())
}

/// The `[startOfToday, startOfTomorrow)` window containing `now`,
/// in the business timezone. Returned as Unix millis.
pub fn today_window(now: DateTime<Utc>, tz: Tz) -> (i64, i64) {
    let today = now.with_timezone(&tz).date_naive();
    let tomorrow = today + Duration::days(1);
    (day_start_millis(today, tz), day_start_millis(tomorrow, tz))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn utc_window_is_exactly_24h() {
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 15, 9, 26).unwrap();
        let (start, end) = today_window(now, chrono_tz::UTC);
        assert_eq!(end - start, 24 * 3600 * 1000);
        assert!(start <= now.timestamp_millis() && now.timestamp_millis() < end);
    }

    #[test]
    fn window_respects_business_timezone() {
        // 01:00 UTC on the 15th is still the evening of the 14th in New York
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 1, 0, 0).unwrap();
        let (start, _) = today_window(now, chrono_tz::America::New_York);
        let (utc_start, _) = today_window(now, chrono_tz::UTC);
        assert!(start < utc_start);
    }
}

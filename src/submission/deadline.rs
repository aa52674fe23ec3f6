//! Deadline countdown text

use chrono::{DateTime, NaiveDate, Utc};

const HOUR_MS: i64 = 60 * 60 * 1000;
const DAY_MS: i64 = 24 * HOUR_MS;

/// Last instant of a deadline day (23:59:59 UTC)
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(23, 59, 59)
        .unwrap_or_default()
        .and_utc()
}

/// Human countdown until `deadline`
///
/// Whole days and hours only. Under an hour left reads as passed.
pub fn countdown(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let remaining = (deadline - now).num_milliseconds();
    if remaining <= 0 {
        return "Deadline passed".to_string();
    }

    let days = remaining / DAY_MS;
    let hours = (remaining % DAY_MS) / HOUR_MS;

    if days > 0 {
        format!("{}d {}h remaining", days, hours)
    } else if hours > 0 {
        format!("{}h remaining", hours)
    } else {
        "Deadline passed".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn deadline() -> DateTime<Utc> {
        end_of_day(NaiveDate::from_ymd_opt(2023, 12, 10).unwrap())
    }

    #[test]
    fn test_days_and_hours() {
        let now = deadline() - Duration::days(3) - Duration::hours(5) - Duration::minutes(10);
        assert_eq!(countdown(deadline(), now), "3d 5h remaining");
    }

    #[test]
    fn test_hours_only() {
        let now = deadline() - Duration::hours(7) - Duration::minutes(59);
        assert_eq!(countdown(deadline(), now), "7h remaining");
    }

    #[test]
    fn test_passed() {
        assert_eq!(
            countdown(deadline(), deadline() + Duration::seconds(1)),
            "Deadline passed"
        );
        assert_eq!(
            countdown(deadline(), deadline() - Duration::minutes(30)),
            "Deadline passed"
        );
    }

    #[test]
    fn test_end_of_day() {
        assert_eq!(deadline().to_rfc3339(), "2023-12-10T23:59:59+00:00");
    }
}

//! Human-readable date formatting for rendered pages and feeds.
//!
//! All timestamps are stored and rendered in UTC.

use chrono::{DateTime, Utc};

/// Long form used on the article page, e.g. "January 2, 2024".
pub fn format_long(dt: &DateTime<Utc>) -> String {
    dt.format("%B %-d, %Y").to_string()
}

/// Short form used on list cards, e.g. "Jan 2, 2024".
pub fn format_short(dt: &DateTime<Utc>) -> String {
    dt.format("%b %-d, %Y").to_string()
}

/// RFC 2822 form required by rss `pubDate`.
pub fn to_rfc2822(dt: &DateTime<Utc>) -> String {
    dt.to_rfc2822()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 2, 15, 4, 5).unwrap()
    }

    #[test]
    fn test_format_long() {
        assert_eq!(format_long(&sample()), "January 2, 2024");
    }

    #[test]
    fn test_format_short() {
        assert_eq!(format_short(&sample()), "Jan 2, 2024");
    }

    #[test]
    fn test_format_double_digit_day() {
        let dt = Utc.with_ymd_and_hms(2023, 11, 28, 0, 0, 0).unwrap();
        assert_eq!(format_long(&dt), "November 28, 2023");
        assert_eq!(format_short(&dt), "Nov 28, 2023");
    }

    #[test]
    fn test_to_rfc2822() {
        let s = to_rfc2822(&sample());
        assert!(s.contains("2 Jan 2024"));
        assert!(s.starts_with("Tue"));
    }
}

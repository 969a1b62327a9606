//! Shared formatting utilities for the UI layer.
//!
//! Timestamps arrive as UTC `DateTime`s; bill dates as `YYYY-MM-DD` strings.

use chrono::{DateTime, NaiveDate, Utc};

/// Format a `YYYY-MM-DD` date as "Jan 20, 2026".
///
/// Falls back to the input when it does not parse.
pub fn format_date_human(date_str: &str) -> String {
    match NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%b %-d, %Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

/// Long group heading for a bill date, e.g. "Friday, February 14, 2025".
pub fn format_date_heading(date_str: &str) -> String {
    match NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d") {
        Ok(date) => date.format("%A, %B %-d, %Y").to_string(),
        Err(_) => date_str.to_string(),
    }
}

pub fn format_day(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y").to_string()
}

/// 12-hour clock time, e.g. "9:05 AM".
pub fn format_time(ts: &DateTime<Utc>) -> String {
    ts.format("%-I:%M %p").to_string()
}

/// "9:05 AM" or "---" for a shift that is still open.
pub fn format_optional_time(ts: Option<&DateTime<Utc>>) -> String {
    ts.map(format_time).unwrap_or_else(|| "---".to_string())
}

pub fn format_amount(amount: f64) -> String {
    format!("{amount:.2}")
}

/// Coarse "x ago" label for request timestamps.
pub fn format_relative(ts: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    let secs = (*now - *ts).num_seconds().max(0);
    match secs {
        0..=59 => "just now".to_string(),
        60..=3599 => format!("{}m ago", secs / 60),
        3600..=86_399 => format!("{}h ago", secs / 3600),
        _ => format!("{}d ago", secs / 86_400),
    }
}

/// `wa.me` link that pre-fills `message` followed by `link`.
pub fn whatsapp_share_url(message: &str, link: &str) -> String {
    format!(
        "https://wa.me/?text={}",
        urlencoding::encode(&format!("{message} {link}"))
    )
}

/// Undo the percent-encoding a name picks up when it travels in a query
/// string. Text that is not valid encoding passes through unchanged.
pub fn decode_query_value(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

/// Google Maps link for a point.
pub fn maps_link(lat: f64, lng: f64) -> String {
    format!("https://www.google.com/maps?q={lat},{lng}")
}

/// "12.9716, 77.5946" with four decimals.
pub fn format_coordinates(lat: f64, lng: f64) -> String {
    format!("{lat:.4}, {lng:.4}")
}

/// Turn "SOME_ENUM_NAME" into "Some Enum Name".
pub fn format_screaming_title(s: &str) -> String {
    s.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c.to_uppercase().to_string() + &chars.as_str().to_lowercase(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn bill_dates() {
        assert_eq!(format_date_human("2025-02-04"), "Feb 4, 2025");
        assert_eq!(format_date_heading("2025-02-14"), "Friday, February 14, 2025");
        assert_eq!(format_date_human("someday"), "someday");
    }

    #[test]
    fn clock_times() {
        let morning = Utc.with_ymd_and_hms(2025, 3, 1, 9, 5, 0).unwrap();
        let midnight = Utc.with_ymd_and_hms(2025, 3, 1, 0, 30, 0).unwrap();
        assert_eq!(format_time(&morning), "9:05 AM");
        assert_eq!(format_time(&midnight), "12:30 AM");
        assert_eq!(format_optional_time(None), "---");
        assert_eq!(format_day(&morning), "Mar 1, 2025");
    }

    #[test]
    fn relative_labels() {
        let now = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        assert_eq!(format_relative(&now, &now), "just now");
        assert_eq!(format_relative(&(now - chrono::Duration::minutes(5)), &now), "5m ago");
        assert_eq!(format_relative(&(now - chrono::Duration::hours(3)), &now), "3h ago");
    }

    #[test]
    fn whatsapp_link_is_encoded() {
        let url = whatsapp_share_url(
            "My live professional location:",
            "https://www.google.com/maps?q=1.5,2.5",
        );
        assert_eq!(
            url,
            "https://wa.me/?text=My%20live%20professional%20location%3A%20https%3A%2F%2Fwww.google.com%2Fmaps%3Fq%3D1.5%2C2.5"
        );
    }

    #[test]
    fn query_values_decode() {
        assert_eq!(decode_query_value("Sarah%20Chen"), "Sarah Chen");
        assert_eq!(decode_query_value("Marcus"), "Marcus");
    }

    #[test]
    fn map_links() {
        assert_eq!(maps_link(1.5, 2.5), "https://www.google.com/maps?q=1.5,2.5");
        assert_eq!(maps_link(-33.8688, 151.2093), "https://www.google.com/maps?q=-33.8688,151.2093");
    }

    #[test]
    fn screaming_titles() {
        assert_eq!(format_screaming_title("PENDING_APPROVAL"), "Pending Approval");
        assert_eq!(format_amount(12.5), "12.50");
        assert_eq!(format_coordinates(12.97161, 77.59463), "12.9716, 77.5946");
    }
}

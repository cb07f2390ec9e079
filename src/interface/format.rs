use chrono::{DateTime, NaiveDate, Utc};

/// `(555) 123-4567` for ten-digit numbers; anything else is returned as-is.
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == 10 {
        format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..])
    } else {
        phone.to_string()
    }
}

/// Long date, e.g. `October 18, 2026`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Short date and 12-hour time for record timestamps.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%m/%d/%Y %-I:%M %p").to_string()
}

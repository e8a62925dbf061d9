//! Leaf value coercions shared by the entity constructors.
//!
//! Each function returns `None` when the text is not valid for its type; the
//! caller turns that into a `FieldTypeMismatch` naming the field.

use chrono::{DateTime, FixedOffset, NaiveDate};

/// Parse a `J`/`N` flag.
pub fn flag(s: &str) -> Option<bool> {
    match s {
        "J" => Some(true),
        "N" => Some(false),
        _ => None,
    }
}

/// Parse a `YYYY-MM-DD` date.
pub fn date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Parse an RFC 3339 timestamp, keeping its offset.
pub fn timestamp(s: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(s).ok()
}

/// Returns the input if it is a non-empty run of ASCII digits.
pub fn digits(s: &str) -> Option<String> {
    (!s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())).then(|| s.to_string())
}

/// Parse an unsigned decimal integer without sign or spaces.
pub fn unsigned<T: std::str::FromStr>(s: &str) -> Option<T> {
    digits(s)?;
    s.parse().ok()
}

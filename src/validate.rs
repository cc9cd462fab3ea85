//! Pre-submit field validation.
//!
//! Screens validate locally before anything goes on the wire; a failure here
//! carries the user-facing message and guarantees no request was issued.

use crate::error::Error;

/// Validates a calendar date in `YYYY-MM-DD` form.
///
/// Shape check only: four digits, dash, two digits, dash, two digits, with
/// month 01-12 and day 01-31.
#[must_use]
pub fn is_iso_date(s: &str) -> bool {
    let b = s.as_bytes();
    if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
        return false;
    }
    let digits_ok = b
        .iter()
        .enumerate()
        .all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !digits_ok {
        return false;
    }
    let month = (b[5] - b'0') * 10 + (b[6] - b'0');
    let day = (b[8] - b'0') * 10 + (b[9] - b'0');
    (1..=12).contains(&month) && (1..=31).contains(&day)
}

/// Returns the trimmed value, or [`Error::Validation`] carrying `message`.
pub(crate) fn require(value: &str, message: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation(message.into()));
    }
    Ok(trimmed.to_owned())
}

/// Parses a page count typed into a free-form numeric field.
pub(crate) fn parse_page_count(value: &str, message: &str) -> Result<u32, Error> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Validation(message.into()))
}

/// Returns the trimmed value if it is a `YYYY-MM-DD` date.
pub(crate) fn require_date(value: &str, message: &str) -> Result<String, Error> {
    let trimmed = value.trim();
    if !is_iso_date(trimmed) {
        return Err(Error::Validation(message.into()));
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dates() {
        assert!(is_iso_date("2024-01-01"));
        assert!(is_iso_date("2025-12-31"));
        assert!(is_iso_date("1999-06-15"));
    }

    #[test]
    fn test_invalid_date_shape() {
        assert!(!is_iso_date("2024/01/01"));
        assert!(!is_iso_date("24-01-01"));
        assert!(!is_iso_date("2024-1-1"));
        assert!(!is_iso_date(""));
    }

    #[test]
    fn test_invalid_date_components() {
        assert!(!is_iso_date("2024-13-01"));
        assert!(!is_iso_date("2024-00-10"));
        assert!(!is_iso_date("2024-05-32"));
        assert!(!is_iso_date("2024-05-00"));
    }

    #[test]
    fn test_invalid_date_non_digits() {
        assert!(!is_iso_date("2O24-01-01"));
        assert!(!is_iso_date("2024-01-0a"));
    }

    #[test]
    fn require_trims_and_rejects_blank() {
        assert_eq!(require("  달밤  ", "msg").unwrap(), "달밤");
        let err = require("   ", "모든 항목을 입력해주세요.").unwrap_err();
        assert_eq!(err.to_string(), "모든 항목을 입력해주세요.");
    }

    #[test]
    fn page_count_rejects_non_numeric() {
        assert_eq!(parse_page_count(" 30 ", "msg").unwrap(), 30);
        assert!(parse_page_count("서른", "msg").is_err());
        assert!(parse_page_count("", "msg").is_err());
        assert!(parse_page_count("-3", "msg").is_err());
    }
}

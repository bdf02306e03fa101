//! Ghanaian mobile number checks and as-you-type formatting.

use once_cell::sync::Lazy;
use regex::Regex;

/// "+233" or "0", a network digit 2-5, then 8 digits.
static GHANA_MOBILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\+233|0)[2-5][0-9]{8}$").expect("phone pattern compiles"));

pub fn is_valid_phone_number(value: &str) -> bool {
    GHANA_MOBILE.is_match(value)
}

/// Normalizes raw input into the shape the validator expects.
///
/// - non-digits are stripped
/// - "233…" gets a leading "+"
/// - "0…" is kept as-is
/// - anything else up to 10 digits gets a leading "0"
pub fn format_phone_number(value: &str) -> String {
    let digits: String = value.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.starts_with("233") {
        format!("+{digits}")
    } else if digits.starts_with('0') || digits.is_empty() || digits.len() > 10 {
        digits
    } else {
        format!("0{digits}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_local_and_international() {
        assert!(is_valid_phone_number("0241234567"));
        assert!(is_valid_phone_number("+233241234567"));
        assert!(is_valid_phone_number("0551234567"));
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(!is_valid_phone_number("123456789"));
        assert!(!is_valid_phone_number("0141234567"));
        assert!(!is_valid_phone_number("0641234567"));
        assert!(!is_valid_phone_number("024123456"));
        assert!(!is_valid_phone_number("02412345678"));
        assert!(!is_valid_phone_number("233241234567"));
        assert!(!is_valid_phone_number(""));
    }

    #[test]
    fn test_format_country_code() {
        assert_eq!(format_phone_number("233241234567"), "+233241234567");
        assert_eq!(format_phone_number("+233 24 123 4567"), "+233241234567");
    }

    #[test]
    fn test_format_local_kept() {
        assert_eq!(format_phone_number("0241234567"), "0241234567");
        assert_eq!(format_phone_number("024-123-4567"), "0241234567");
    }

    #[test]
    fn test_format_prepends_zero() {
        assert_eq!(format_phone_number("241234567"), "0241234567");
        assert_eq!(format_phone_number("2"), "02");
    }

    #[test]
    fn test_format_empty_and_long() {
        assert_eq!(format_phone_number(""), "");
        assert_eq!(format_phone_number("abc"), "");
        assert_eq!(format_phone_number("12345678901"), "12345678901");
    }

    #[test]
    fn test_formatted_numbers_validate() {
        for raw in ["233241234567", "0241234567", "241234567"] {
            assert!(is_valid_phone_number(&format_phone_number(raw)), "{raw}");
        }
    }
}

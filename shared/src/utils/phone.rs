//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// E.164 digit string (no leading +), 8 to 15 digits
static E164_DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[1-9]\d{7,14}$").unwrap()
});

/// Strip all non-digit characters from a phone number
pub fn strip_non_digits(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Normalize a phone number to an E.164 digit string.
///
/// Non-digits are stripped; when exactly 10 digits remain the default
/// country code is prefixed. Returns `None` when the result is not a
/// plausible E.164 number.
pub fn normalize_to_e164(phone: &str, default_country_code: &str) -> Option<String> {
    let digits = strip_non_digits(phone);
    let normalized = if digits.len() == 10 {
        format!("{}{}", default_country_code, digits)
    } else {
        digits
    };

    if E164_DIGITS_REGEX.is_match(&normalized) {
        Some(normalized)
    } else {
        None
    }
}

/// Check whether a phone number normalizes to a valid E.164 digit string
pub fn is_valid_phone(phone: &str, default_country_code: &str) -> bool {
    normalize_to_e164(phone, default_country_code).is_some()
}

/// Mask a phone number for display and logs (e.g., 919876****3210 -> ****3210)
pub fn mask_phone_number(phone: &str) -> String {
    let digits = strip_non_digits(phone);
    if digits.len() >= 7 {
        format!("****{}", &digits[digits.len() - 4..])
    } else {
        "****".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_non_digits() {
        assert_eq!(strip_non_digits("+91 98765-43210"), "919876543210");
        assert_eq!(strip_non_digits("(987) 654 3210"), "9876543210");
    }

    #[test]
    fn test_normalize_prefixes_country_code_for_ten_digits() {
        assert_eq!(
            normalize_to_e164("9876543210", "91"),
            Some("919876543210".to_string())
        );
    }

    #[test]
    fn test_normalize_keeps_full_numbers() {
        assert_eq!(
            normalize_to_e164("+919876543210", "91"),
            Some("919876543210".to_string())
        );
        assert_eq!(
            normalize_to_e164("14155552671", "91"),
            Some("14155552671".to_string())
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert_eq!(normalize_to_e164("12345", "91"), None);
        assert_eq!(normalize_to_e164("", "91"), None);
        assert_eq!(normalize_to_e164("abc", "91"), None);
    }

    #[test]
    fn test_mask_phone_number() {
        assert_eq!(mask_phone_number("919876543210"), "****3210");
        assert_eq!(mask_phone_number("12345"), "****");
    }
}

//! Indian mobile number normalization

use std::fmt::Display;

/// First digits allowed for an Indian mobile number (TRAI numbering plan)
pub const VALID_MOBILE_PREFIXES: [char; 4] = ['6', '7', '8', '9'];

/// Normalize an Indian mobile number to `+91XXXXXXXXXX`.
///
/// Everything except digits and `+` is discarded, then a `+91` or `91`
/// country code and any leading zeros are dropped. What remains must be
/// exactly ten digits starting with 6, 7, 8 or 9; anything else is `None`.
///
/// ```rust
/// use inaddr::phone::clean_indian_phone;
///
/// assert_eq!(clean_indian_phone("+91 98765 43210").as_deref(), Some("+919876543210"));
/// assert_eq!(clean_indian_phone("098765-43210").as_deref(), Some("+919876543210"));
/// assert_eq!(clean_indian_phone(9876543210u64).as_deref(), Some("+919876543210"));
/// assert_eq!(clean_indian_phone("5876543210"), None);
/// ```
pub fn clean_indian_phone(input: impl Display) -> Option<String> {
    let raw = input.to_string();
    let kept: String = raw
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    let number = kept
        .strip_prefix("+91")
        .or_else(|| kept.strip_prefix("91"))
        .unwrap_or(kept.as_str())
        .trim_start_matches('0');

    let valid = number.len() == 10
        && number.starts_with(VALID_MOBILE_PREFIXES)
        && number.bytes().all(|b| b.is_ascii_digit());

    valid.then(|| format!("+91{}", number))
}

/// [`clean_indian_phone`] for a value that may be absent.
pub fn clean_indian_phone_opt<T: Display>(input: Option<T>) -> Option<String> {
    input.and_then(|value| clean_indian_phone(value))
}

/// Whether the input normalizes to a valid Indian mobile number
pub fn is_valid_indian_mobile(input: impl Display) -> bool {
    clean_indian_phone(input).is_some()
}

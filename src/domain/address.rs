use std::fmt;

use serde::Serialize;

/// Country calling code of the dispatch region (Tanzania).
pub const COUNTRY_CODE: &str = "255";

/// Trunk prefix dialled before a national number.
const TRUNK_PREFIX: char = '0';

/// Leading digit of a mobile subscriber number written without the trunk prefix.
const MOBILE_PREFIX: char = '7';

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
/// Destination address in canonical `+<country code><subscriber>` form.
///
/// Invariant: starts with `+`, followed only by ASCII digits. The only way to get one is
/// [`normalize`], so the digits are not guaranteed to form a dialable number.
pub struct NormalizedAddress(String);

impl NormalizedAddress {
    /// Borrow the canonical form, including the leading `+`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digits after the leading `+`.
    pub fn digits(&self) -> &str {
        &self.0[1..]
    }

    /// Whether the address is a valid number according to libphonenumber metadata.
    ///
    /// Only used for diagnostics; dispatch never rejects an address on this basis.
    pub fn is_plausible(&self) -> bool {
        phonenumber::parse(None, &self.0)
            .map(|parsed| parsed.is_valid())
            .unwrap_or(false)
    }

    /// Mask all but the last four digits, for logs.
    pub fn masked(&self) -> String {
        mask_address(&self.0)
    }
}

impl fmt::Display for NormalizedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalize a free-form phone number into canonical form.
///
/// Non-digits are stripped. Digits already carrying the country code are kept, a
/// leading trunk `0` is replaced by the country code, a bare mobile number starting
/// with `7` gets the country code prepended, and anything else passes through as is.
/// This never fails: unrecognised input yields a `+digits` value the provider may reject.
pub fn normalize(raw: &str) -> NormalizedAddress {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();

    let national = if digits.starts_with(COUNTRY_CODE) {
        digits
    } else if let Some(rest) = digits.strip_prefix(TRUNK_PREFIX) {
        format!("{COUNTRY_CODE}{rest}")
    } else if digits.starts_with(MOBILE_PREFIX) {
        format!("{COUNTRY_CODE}{digits}")
    } else {
        digits
    };

    NormalizedAddress(format!("+{national}"))
}

/// Mask a phone number for logging, keeping a leading `+` and the last four characters.
pub fn mask_address(phone: &str) -> String {
    let (plus, rest) = match phone.strip_prefix('+') {
        Some(rest) => ("+", rest),
        None => ("", phone),
    };
    let len = rest.chars().count();
    if len <= 4 {
        return format!("{plus}{}", "*".repeat(len));
    }
    let visible: String = rest.chars().skip(len - 4).collect();
    format!("{plus}{}{visible}", "*".repeat(len - 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_local_and_international_forms() {
        assert_eq!(normalize("0712345678").as_str(), "+255712345678");
        assert_eq!(normalize("712345678").as_str(), "+255712345678");
        assert_eq!(normalize("255712345678").as_str(), "+255712345678");
        assert_eq!(normalize("+255 712 345 678").as_str(), "+255712345678");
        assert_eq!(normalize("(0712) 345-678").as_str(), "+255712345678");
    }

    #[test]
    fn normalization_is_idempotent_for_canonical_input() {
        for raw in ["0712345678", "712345678", "+255 712 345 678", "0655000111"] {
            let once = normalize(raw);
            let twice = normalize(once.as_str());
            assert_eq!(once, twice, "input {raw:?}");
        }
    }

    #[test]
    fn unrecognised_prefixes_pass_through() {
        assert_eq!(normalize("+1 415 555 0100").as_str(), "+14155550100");
        assert_eq!(normalize("612345678").as_str(), "+612345678");
    }

    #[test]
    fn normalization_is_total() {
        assert_eq!(normalize("").as_str(), "+");
        assert_eq!(normalize("call me").as_str(), "+");
        assert_eq!(normalize("0").as_str(), "+255");
        assert_eq!(normalize("٠٧١٢").as_str(), "+");
    }

    #[test]
    fn country_code_wins_over_mobile_prefix() {
        // 255... is never treated as a bare subscriber number.
        assert_eq!(normalize("2557").as_str(), "+2557");
        assert_eq!(normalize("7255").as_str(), "+2557255");
    }

    #[test]
    fn digits_excludes_plus() {
        assert_eq!(normalize("0712345678").digits(), "255712345678");
    }

    #[test]
    fn plausibility_uses_phone_metadata() {
        assert!(normalize("0712345678").is_plausible());
        assert!(!normalize("12").is_plausible());
        assert!(!normalize("").is_plausible());
    }

    #[test]
    fn mask_keeps_last_four_digits() {
        assert_eq!(mask_address("+255712345678"), "+********5678");
        assert_eq!(mask_address("0712345678"), "******5678");
        assert_eq!(mask_address("+123"), "+***");
        assert_eq!(mask_address(""), "");
        assert_eq!(normalize("0712345678").masked(), "+********5678");
    }
}

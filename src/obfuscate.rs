//! Contact masking and reversible obfuscation.
//!
//! The visible page shows a masked email and phone. The full values travel in
//! a `data-pii` attribute as a JSON array of code points shifted by
//! [`SHIFT`]; client-side script subtracts the shift on interaction. This
//! only defeats scrapers that grep for `@` or digit runs. It is not
//! encryption.

/// Added to every code point of an obfuscated value.
pub const SHIFT: u32 = 7;

const MASK: &str = "***";
const PHONE_MASK: &str = "*** *** ****";

/// Keep the domain, hide the local part: `jane@example.com` → `***@example.com`.
pub fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at) => format!("{MASK}{}", &email[at..]),
        None => MASK.to_string(),
    }
}

/// Keep the country code and the last four characters of the final group:
/// `+39 345 123 7212` → `+39 *** *** 7212`.
///
/// Single-group numbers are fully masked.
pub fn mask_phone(phone: &str) -> String {
    let parts: Vec<&str> = phone.split_whitespace().collect();
    match parts.as_slice() {
        [first, .., last] => {
            let tail_start = last
                .char_indices()
                .rev()
                .nth(3)
                .map(|(i, _)| i)
                .unwrap_or(0);
            format!("{first} *** *** {}", &last[tail_start..])
        }
        _ => PHONE_MASK.to_string(),
    }
}

/// Shift each code point by [`SHIFT`].
pub fn obfuscate(value: &str) -> Vec<u32> {
    value.chars().map(|c| u32::from(c) + SHIFT).collect()
}

/// Shifted code points serialized as a JSON array, e.g. `[113,104,117]`.
pub fn obfuscated_payload(value: &str) -> String {
    serde_json::to_string(&obfuscate(value)).expect("integer array always serializes")
}

/// Inverse of [`obfuscate`]. `None` if any entry is not a shifted code point.
pub fn reveal(codes: &[u32]) -> Option<String> {
    codes
        .iter()
        .map(|&code| code.checked_sub(SHIFT).and_then(char::from_u32))
        .collect()
}

/// Decode a payload produced by [`obfuscated_payload`].
pub fn reveal_payload(payload: &str) -> Option<String> {
    let codes: Vec<u32> = serde_json::from_str(payload).ok()?;
    reveal(&codes)
}

//! Phone number utilities

/// Strip formatting characters, keeping digits and a leading `+`.
fn significant_chars(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Mask a phone number for log output (e.g., 138****5678).
///
/// Numbers too short to mask meaningfully come back fully masked.
pub fn mask_phone(phone: &str) -> String {
    let normalized = significant_chars(phone);
    if normalized.len() >= 7 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}

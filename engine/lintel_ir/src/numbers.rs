//! Numeric literal normalization.
//!
//! Hexadecimal, octal and binary integer literals are rewritten to their
//! decimal spelling when tokens are added, so every later pass compares
//! numeric values textually without caring about the source radix.
//! Literals that overflow `u64`, carry suffixes, or are floating point
//! are kept verbatim.

/// Check for a hexadecimal integer literal (`0x1F`, `0X1f`).
pub fn is_hex(text: &str) -> bool {
    let rest = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(rest) => rest,
        None => return false,
    };
    !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Check for an octal integer literal (`017`, but not `0` or `08`).
pub fn is_oct(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() > 1 && bytes[0] == b'0' && bytes[1..].iter().all(|b| (b'0'..=b'7').contains(b))
}

/// Check for a binary integer literal (`0b101`).
pub fn is_bin(text: &str) -> bool {
    let rest = match text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        Some(rest) => rest,
        None => return false,
    };
    !rest.is_empty() && rest.bytes().all(|b| b == b'0' || b == b'1')
}

/// Rewrite a hex/octal/binary literal to decimal; `None` for anything
/// that is not one of those forms or does not fit in `u64`.
pub fn to_decimal(text: &str) -> Option<String> {
    let (digits, radix) = if is_hex(text) {
        (&text[2..], 16)
    } else if is_bin(text) {
        (&text[2..], 2)
    } else if is_oct(text) {
        (&text[1..], 8)
    } else {
        return None;
    };
    let value = u64::from_str_radix(digits, radix).ok()?;
    Some(value.to_string())
}

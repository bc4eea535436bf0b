use crate::constants::{NANP_E164_LEN, NANP_PREFIX};

/// Format a `+1` E.164 number as `(AAA) BBB-CCCC`.
///
/// Anything that is not exactly twelve bytes starting with `+1` is returned
/// unchanged.  This is slicing, not validation.
pub fn format_number(number: &str) -> String {
    if number.len() != NANP_E164_LEN || !number.starts_with(NANP_PREFIX) {
        return number.to_string();
    }

    match (number.get(2..5), number.get(5..8), number.get(8..)) {
        (Some(area), Some(exchange), Some(line)) => format!("({area}) {exchange}-{line}"),
        // Multi-byte characters straddle a slice boundary.
        _ => number.to_string(),
    }
}

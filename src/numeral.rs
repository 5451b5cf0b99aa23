//! Fullwidth numeral rendering for page indicators and catalog indices.

const FULLWIDTH_ZERO: u32 = '０' as u32;

/// Map one ASCII digit to its fullwidth glyph; other chars pass through.
fn fullwidth_digit(ch: char) -> char {
    match ch.to_digit(10) {
        Some(d) if ch.is_ascii_digit() => char::from_u32(FULLWIDTH_ZERO + d).unwrap_or(ch),
        _ => ch,
    }
}

/// Convert every ASCII digit in `text` to its fullwidth counterpart.
pub fn to_fullwidth(text: &str) -> String {
    text.chars().map(fullwidth_digit).collect()
}

/// Render `n` with fullwidth digits.
pub fn to_fullwidth_number(n: usize) -> String {
    to_fullwidth(&n.to_string())
}

/// Render `n` zero-padded to `width` digits, then convert to fullwidth.
pub fn to_fullwidth_padded(n: usize, width: usize) -> String {
    to_fullwidth(&format!("{:0width$}", n, width = width))
}

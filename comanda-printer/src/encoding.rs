//! CP-1252 text encoding for Spanish thermal printers
//!
//! The printer is initialized with the Windows-1252 code page, so every
//! printable character is exactly one byte. This module provides:
//! - The lossy char -> byte transform
//! - Column-width calculation, truncation and padding
//!
//! Characters above U+00FF have no single-byte representation and are
//! replaced with `?`. This is the documented behavior, not a defect: the
//! protocol has no multi-byte mode enabled and a receipt with a `?` is
//! preferable to one that never prints.

/// Encode one character as a single CP-1252 byte.
///
/// Code points 0x00-0xFF map directly; everything else becomes `?`.
pub fn encode_cp1252(c: char) -> u8 {
    let cp = c as u32;
    if cp <= 0xFF { cp as u8 } else { b'?' }
}

/// Printed column width of a string.
///
/// One byte per character after the lossy transform, so the width is
/// simply the character count.
pub fn text_width(s: &str) -> usize {
    s.chars().count()
}

/// Truncate a string to fit within a column width.
pub fn truncate_cp1252(s: &str, max_width: usize) -> String {
    s.chars().take(max_width).collect()
}

/// Pad a string to a specific column width.
///
/// If the string is longer than the width, it will be truncated.
pub fn pad_cp1252(s: &str, width: usize, align_right: bool) -> String {
    let current = text_width(s);
    if current >= width {
        return truncate_cp1252(s, width);
    }
    let spaces = width - current;
    if align_right {
        format!("{}{}", " ".repeat(spaces), s)
    } else {
        format!("{}{}", s, " ".repeat(spaces))
    }
}

//! Text helpers for the renderers.

/// Placeholder shown for absent optional fields.
pub const PLACEHOLDER: &str = "—";

/// Return the value, or the em-dash placeholder when it is blank.
pub fn placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        PLACEHOLDER
    } else {
        value
    }
}

/// Restrict text to Latin-1 so it can be drawn with the standard PDF fonts.
///
/// Common typographic characters are mapped to ASCII look-alikes and the
/// rupee sign becomes `Rs.`; anything else outside Latin-1 is dropped.
pub fn pdf_safe(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\u{20B9}' => out.push_str("Rs."),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            c if (c as u32) <= 0xFF => out.push(c),
            _ => {}
        }
    }
    out
}

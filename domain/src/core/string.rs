//! String utilities for the domain layer.

/// Marker appended to labels cut by [`truncate_label`]
pub const ELLIPSIS: &str = "...";

/// Truncate a label to `max_chars` characters, appending `...` when cut.
///
/// Counts Unicode scalar values rather than bytes, so the result never splits
/// a character and is at most `max_chars + 3` characters long.
pub fn truncate_label(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}{}", &s[..end], ELLIPSIS),
        None => s.to_string(),
    }
}

/// Truncate a string to fit `width` display columns, ending with `...`.
///
/// Used for table cells, where the ellipsis has to fit inside the width.
pub fn fit_width(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let keep = width.saturating_sub(ELLIPSIS.len());
    let head: String = s.chars().take(keep).collect();
    format!("{}{}", head, ELLIPSIS)
}

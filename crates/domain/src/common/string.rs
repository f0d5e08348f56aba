//! String conversion utilities.

/// Trims `value` and returns `None` when nothing is left.
///
/// # Examples
///
/// ```
/// use condtrack_domain::common::none_if_blank;
///
/// assert_eq!(none_if_blank("  Cold  "), Some("Cold"));
/// assert_eq!(none_if_blank(""), None);
/// assert_eq!(none_if_blank(" \t\n"), None);
/// ```
pub fn none_if_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Derives a condition key from a display label.
///
/// Lower-cases the label, replaces each run of whitespace with a single `-`,
/// then drops every character outside `[a-z0-9-]`. Leading and trailing
/// whitespace runs become hyphens too, so callers trim first.
///
/// # Examples
///
/// ```
/// use condtrack_domain::common::condition_key_from_label;
///
/// assert_eq!(condition_key_from_label("Cold  Burn"), "cold-burn");
/// assert_eq!(condition_key_from_label("Bleed (x2)!"), "bleed-x2");
/// ```
pub fn condition_key_from_label(label: &str) -> String {
    let mut key = String::with_capacity(label.len());
    let mut in_whitespace = false;

    for c in label.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                key.push('-');
            }
            in_whitespace = true;
            continue;
        }
        in_whitespace = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            key.push(c);
        }
    }

    key
}

//! Short name derivation.
//!
//! Short names are the stable, lower-case identifiers used to address CI types
//! and attributes. The permitted alphabet is ASCII lower-case letters, digits,
//! `-` and `_`. The `.` character is reserved as the attribute path separator.

/// Derive a short name from a human-readable name.
///
/// The name is lower-cased, runs of whitespace become a single `_` and every
/// other character outside the alphabet is dropped. The result may be empty,
/// which [`is_valid_short_name`] rejects.
pub fn short_name(name: &str) -> String {
    let mut derived = String::with_capacity(name.len());
    let mut pending_separator = false;

    for c in name.trim().chars() {
        if c.is_whitespace() {
            pending_separator = true;
            continue;
        }

        let c = c.to_ascii_lowercase();
        if !is_short_name_char(c) {
            continue;
        }

        if pending_separator && !derived.is_empty() {
            derived.push('_');
        }
        pending_separator = false;
        derived.push(c);
    }

    derived
}

/// Check that `value` is a non-empty string drawn from the short name alphabet.
pub fn is_valid_short_name(value: &str) -> bool {
    !value.is_empty() && value.chars().all(is_short_name_char)
}

fn is_short_name_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-' | '_')
}

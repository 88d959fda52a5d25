//! Utility functions for label escaping in extended Newick strings.
//!
//! Labels containing delimiters, quotes or the hybrid marker `#` must be
//! written single-quoted, so that the parser reads them back as one label.

/// Characters that force a label into single quotes.
const SPECIAL_CHARS: &[char] = &[',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\'', '#'];

/// Checks if a label is enclosed in single quotes.
///
/// # Examples
/// ```
/// # use treedisplay::parser::utils::is_single_quoted;
/// assert_eq!(is_single_quoted("Kea"), false);
/// assert_eq!(is_single_quoted("'Kea parrot'"), true);
/// assert_eq!(is_single_quoted("'"), false);
/// ```
pub fn is_single_quoted(label: &str) -> bool {
    label.len() >= 2 && label.starts_with('\'') && label.ends_with('\'')
}

/// Checks if a label can be written as is:
/// - wrapped in single quotes with each internal single quote doubled, or
/// - without spaces and special characters
///
/// # Examples
/// ```
/// # use treedisplay::parser::utils::is_escaped;
/// assert_eq!(is_escaped("Kakapo"), true);
/// assert_eq!(is_escaped("Kaka#po"), false);
/// assert_eq!(is_escaped("Night parrot"), false);
/// assert_eq!(is_escaped("'Night parrot'"), true);
/// assert_eq!(is_escaped("'Forbes''s parakeet'"), true);
/// assert_eq!(is_escaped("'Forbes's parakeet'"), false);
/// ```
pub fn is_escaped(label: &str) -> bool {
    if is_single_quoted(label) {
        let inner = &label[1..label.len() - 1];
        // Quotes inside must come in pairs
        inner
            .split("''")
            .all(|part| !part.contains('\''))
    } else {
        !label.chars().any(|c| c == ' ' || SPECIAL_CHARS.contains(&c))
    }
}

/// Escapes a label for use in an extended Newick string.
///
/// Labels with special characters are wrapped in single quotes, doubling
/// internal single quotes. Otherwise spaces are replaced with underscores.
/// Already escaped labels are returned as is.
///
/// # Examples
/// ```
/// # use treedisplay::parser::utils::escape_label;
/// assert_eq!(escape_label("Kakapo"), "Kakapo");
/// assert_eq!(escape_label("Night parrot"), "Night_parrot");
/// assert_eq!(escape_label("Kaka#po"), "'Kaka#po'");
/// assert_eq!(escape_label("Forbes's (Chatham)"), "'Forbes''s (Chatham)'");
/// ```
pub fn escape_label(label: &str) -> String {
    if is_escaped(label) {
        return label.to_string();
    }

    if label.chars().any(|c| SPECIAL_CHARS.contains(&c)) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.replace(' ', "_")
    }
}

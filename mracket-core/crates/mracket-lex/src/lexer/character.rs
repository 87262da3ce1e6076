//! `#\` character literal scanning.

const NAMED_CHARS: &[&str] = &[
    "nul", "null", "backspace", "tab", "newline", "linefeed", "vtab", "page", "return",
    "space", "rubout", "delete", "altmode", "escape", "esc", "backnext", "nul", "alarm",
];

/// Given the remainder of the source starting just after `#\`, returns the byte length
/// of the character name/escape that follows (not including the `#\` prefix itself).
///
/// Tries, in order: a named character (longest match wins), an octal triple, `u` + 1-4
/// hex digits, `U` + 1-8 hex digits, or a single character (anything, since `#\(`,
/// `#\ `, `#\)` etc. are all valid).
pub(super) fn match_char_body(s: &str) -> Option<usize> {
    if let Some(len) = match_named(s) {
        return Some(len);
    }
    if let Some(len) = match_octal(s) {
        return Some(len);
    }
    if let Some(len) = match_unicode_escape(s, 'u', 4) {
        return Some(len);
    }
    if let Some(len) = match_unicode_escape(s, 'U', 8) {
        return Some(len);
    }
    s.chars().next().map(|c| c.len_utf8())
}

fn match_named(s: &str) -> Option<usize> {
    let lower = s.to_ascii_lowercase();
    NAMED_CHARS
        .iter()
        .filter(|name| lower.starts_with(*name))
        .filter(|name| {
            // require the name not be merely a prefix of a longer identifier run
            let after = &s[name.len()..];
            after.chars().next().map(|c| !c.is_alphanumeric()).unwrap_or(true)
        })
        .map(|name| name.len())
        .max()
}

fn match_octal(s: &str) -> Option<usize> {
    let digits: usize = s.chars().take(3).take_while(|c| c.is_digit(8)).count();
    if digits == 3 {
        Some(3)
    } else {
        None
    }
}

fn match_unicode_escape(s: &str, marker: char, max_digits: usize) -> Option<usize> {
    let mut chars = s.chars();
    if chars.next()? != marker {
        return None;
    }
    let rest = &s[marker.len_utf8()..];
    let digits: usize = rest.chars().take(max_digits).take_while(|c| c.is_ascii_hexdigit()).count();
    if digits == 0 {
        return None;
    }
    Some(marker.len_utf8() + digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named() {
        assert_eq!(match_char_body("newline rest"), Some(7));
        assert_eq!(match_char_body("space"), Some(5));
    }

    #[test]
    fn single_char() {
        assert_eq!(match_char_body("4"), Some(1));
        assert_eq!(match_char_body("("), Some(1));
    }

    #[test]
    fn octal() {
        assert_eq!(match_char_body("101"), Some(3));
    }

    #[test]
    fn unicode_escape() {
        assert_eq!(match_char_body("u41"), Some(3));
        assert_eq!(match_char_body("U1F600"), Some(7));
    }

    #[test]
    fn forty_nine_is_single_digit_then_digit() {
        // #\49 must lex as char `#\4` followed by number `9` -- the caller only ever
        // asks for a single char here when no named/octal/unicode escape matches.
        assert_eq!(match_char_body("49"), Some(1));
    }
}

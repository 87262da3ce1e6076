//! Racket numeric literal grammar.
//!
//! Hand-rolled (no `regex` crate) recursive matcher mirroring the original reader's
//! regex grammar: optional radix/exactness prefixes (either order), signed
//! integer/rational/decimal forms, `inf.0`/`nan.0`/`inf.f`/`nan.f` specials,
//! digit-pound notation, exponent markers, and a rectangular complex suffix.
//!
//! Polar complex literals (`a@b`) are not supported; see DESIGN.md.

#[derive(Clone, Copy, PartialEq, Eq)]
enum Radix {
    Bin,
    Oct,
    Dec,
    Hex,
}

impl Radix {
    fn is_digit(self, c: char) -> bool {
        match self {
            Radix::Bin => matches!(c, '0'..='1'),
            Radix::Oct => matches!(c, '0'..='7'),
            Radix::Dec => c.is_ascii_digit(),
            Radix::Hex => c.is_ascii_hexdigit(),
        }
    }
}

/// Attempts to match a complete numeric literal at the start of `s`.
///
/// Returns the byte length of the match, or `None` if `s` does not start with a valid
/// number. Does not itself enforce the followed-by-delimiter rule; the caller
/// (`core::next_token`) is responsible for that, since it needs the maximal symbol-run
/// length to decide whether to fall back to a symbol token.
pub(super) fn match_number(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 0usize;

    let mut radix = None;
    let mut exactness = None;
    // Prefixes may appear in either order, each is exactly `#` + one letter.
    for _ in 0..2 {
        if bytes.get(i) == Some(&b'#') {
            match bytes.get(i + 1).map(|b| (*b as char).to_ascii_lowercase()) {
                Some('b') if radix.is_none() => {
                    radix = Some(Radix::Bin);
                    i += 2;
                }
                Some('o') if radix.is_none() => {
                    radix = Some(Radix::Oct);
                    i += 2;
                }
                Some('d') if radix.is_none() => {
                    radix = Some(Radix::Dec);
                    i += 2;
                }
                Some('x') if radix.is_none() => {
                    radix = Some(Radix::Hex);
                    i += 2;
                }
                Some('e') if exactness.is_none() => {
                    exactness = Some(());
                    i += 2;
                }
                Some('i') if exactness.is_none() => {
                    exactness = Some(());
                    i += 2;
                }
                _ => break,
            }
        } else {
            break;
        }
    }
    let radix = radix.unwrap_or(Radix::Dec);

    let rest = &s[i..];
    let real_len = match_complex(rest, radix)?;
    Some(i + real_len)
}

/// `<real> | <real>@<real> (unsupported) | <real>[+-]<ureal>i | [+-]<ureal>i | <real>[+-]i`
fn match_complex(s: &str, radix: Radix) -> Option<usize> {
    if let Some(len) = match_imaginary_only(s, radix) {
        return Some(len);
    }
    let real_len = match_real(s, radix)?;
    let rest = &s[real_len..];
    if let Some(tail) = match_imaginary_suffix(rest, radix) {
        return Some(real_len + tail);
    }
    Some(real_len)
}

/// `[+-]<ureal>i` or `[+-]i`, with no leading real part (e.g. `+i`, `-3i`... the latter is
/// actually the suffix form; this handles the case where the whole number IS the
/// imaginary part, such as bare `+i` or `-2.5i`).
fn match_imaginary_only(s: &str, radix: Radix) -> Option<usize> {
    let mut chars = s.char_indices();
    let (_, sign_char) = chars.next()?;
    if sign_char != '+' && sign_char != '-' {
        return None;
    }
    let rest = &s[sign_char.len_utf8()..];
    if rest.starts_with('i') && !rest[1..].chars().next().map(is_symbol_continuation).unwrap_or(false) {
        return Some(sign_char.len_utf8() + 1);
    }
    let ulen = match_unsigned_real(rest, radix)?;
    let after = &rest[ulen..];
    if after.starts_with('i') {
        Some(sign_char.len_utf8() + ulen + 1)
    } else {
        None
    }
}

fn match_imaginary_suffix(s: &str, radix: Radix) -> Option<usize> {
    let mut chars = s.chars();
    let sign_char = chars.next()?;
    if sign_char != '+' && sign_char != '-' {
        return None;
    }
    let rest = &s[sign_char.len_utf8()..];
    if let Some(stripped) = rest.strip_prefix('i') {
        let _ = stripped;
        return Some(sign_char.len_utf8() + 1);
    }
    let ulen = match_unsigned_real(rest, radix)?;
    let after = &rest[ulen..];
    if after.starts_with('i') {
        Some(sign_char.len_utf8() + ulen + 1)
    } else {
        None
    }
}

fn is_symbol_continuation(c: char) -> bool {
    !is_delimiter_char(c) && !c.is_whitespace()
}

fn is_delimiter_char(c: char) -> bool {
    matches!(c, '(' | ')' | '[' | ']' | '{' | '}' | '"' | ';' | '\'' | '`' | ',' | '|')
}

/// `[+-]? <ureal>` or a signed special value.
fn match_real(s: &str, radix: Radix) -> Option<usize> {
    let mut i = 0;
    let mut chars = s.chars();
    if let Some(c) = chars.clone().next() {
        if c == '+' || c == '-' {
            i += c.len_utf8();
        }
    }
    if let Some(len) = match_special(&s[i..]) {
        return Some(i + len);
    }
    let ulen = match_unsigned_real(&s[i..], radix)?;
    if ulen == 0 {
        return None;
    }
    Some(i + ulen)
}

/// `inf.0 | nan.0 | inf.f | nan.f`
fn match_special(s: &str) -> Option<usize> {
    for kw in ["inf.0", "nan.0", "inf.f", "nan.f"] {
        if s.starts_with(kw) {
            return Some(kw.len());
        }
    }
    None
}

/// `<uinteger> | <uinteger>/<uinteger> | <decimal>` (decimal only valid for radix 10).
fn match_unsigned_real(s: &str, radix: Radix) -> Option<usize> {
    if radix == Radix::Dec {
        if let Some(len) = match_decimal(s) {
            return Some(len);
        }
    }
    let num_len = match_uinteger(s, radix)?;
    let rest = &s[num_len..];
    if let Some(stripped) = rest.strip_prefix('/') {
        let den_len = match_uinteger(stripped, radix)?;
        if den_len > 0 {
            return Some(num_len + 1 + den_len);
        }
        return None;
    }
    Some(num_len)
}

/// A run of radix digits, allowing trailing `#` digit placeholders (digit-pound notation).
fn match_uinteger(s: &str, radix: Radix) -> Option<usize> {
    let mut i = 0;
    let mut chars = s.chars();
    let mut saw_digit = false;
    while let Some(c) = chars.clone().next() {
        if radix.is_digit(c) {
            saw_digit = true;
            i += c.len_utf8();
            chars.next();
        } else {
            break;
        }
    }
    if !saw_digit {
        return None;
    }
    while let Some(c) = chars.clone().next() {
        if c == '#' {
            i += 1;
            chars.next();
        } else {
            break;
        }
    }
    Some(i)
}

/// Decimal forms: `<digits>.<digits>?<exp>? | .<digits><exp>? | <digits><exp>`.
/// Only meaningful for radix 10.
fn match_decimal(s: &str) -> Option<usize> {
    let digits = |t: &str| -> usize {
        t.chars().take_while(|c| c.is_ascii_digit()).map(|c| c.len_utf8()).sum()
    };
    let mut i = 0;
    let int_part = digits(s);
    i += int_part;
    let mut saw_dot = false;
    let mut saw_frac = false;
    if s[i..].starts_with('.') {
        saw_dot = true;
        i += 1;
        let frac = digits(&s[i..]);
        saw_frac = frac > 0;
        i += frac;
    }
    if int_part == 0 && !saw_frac {
        return None;
    }
    if !saw_dot && int_part == 0 {
        return None;
    }
    // A bare integer (no dot) is only a "decimal" match if it carries an exponent;
    // otherwise match_uinteger already covers it.
    if !saw_dot {
        let exp_len = match_exponent(&s[i..]);
        return exp_len.map(|e| i + e).filter(|_| exp_len.is_some());
    }
    let exp_len = match_exponent(&s[i..]).unwrap_or(0);
    Some(i + exp_len)
}

/// `[slSLdDeEfF] [+-]? <digits>`
fn match_exponent(s: &str) -> Option<usize> {
    let mut chars = s.chars();
    let marker = chars.next()?;
    if !matches!(marker.to_ascii_lowercase(), 's' | 'l' | 'd' | 'e' | 'f') {
        return None;
    }
    let mut i = marker.len_utf8();
    if let Some(c) = s[i..].chars().next() {
        if c == '+' || c == '-' {
            i += c.len_utf8();
        }
    }
    let digit_len: usize = s[i..].chars().take_while(|c| c.is_ascii_digit()).map(|c| c.len_utf8()).sum();
    if digit_len == 0 {
        return None;
    }
    Some(i + digit_len)
}

//! Double-quoted string literal scanning.

use crate::cursor::Cursor;
use crate::error::LexError;

/// Scans a string literal starting at the opening `"` (cursor positioned on it).
/// On success, the cursor is left just past the closing `"`.
pub(super) fn scan_string(cursor: &mut Cursor) -> Result<(), LexError> {
    let start_offset = cursor.position();
    debug_assert_eq!(cursor.current_char(), '"');
    cursor.advance();

    loop {
        if cursor.is_at_end() {
            return Err(LexError::UnexpectedEofInString { offset: start_offset });
        }
        match cursor.current_char() {
            '"' => {
                cursor.advance();
                return Ok(());
            }
            '\\' => {
                cursor.advance();
                scan_escape(cursor, start_offset)?;
            }
            _ => {
                cursor.advance();
            }
        }
    }
}

fn scan_escape(cursor: &mut Cursor, start_offset: usize) -> Result<(), LexError> {
    if cursor.is_at_end() {
        return Err(LexError::UnexpectedEofInString { offset: start_offset });
    }
    match cursor.current_char() {
        'a' | 'b' | 't' | 'n' | 'v' | 'f' | 'r' | 'e' | '"' | '\'' | '\\' | '\n' => {
            cursor.advance();
            Ok(())
        }
        'x' => {
            cursor.advance();
            consume_hex_digits(cursor, 1, 2, start_offset)
        }
        'u' => {
            cursor.advance();
            consume_hex_digits(cursor, 1, 4, start_offset)
        }
        'U' => {
            cursor.advance();
            consume_hex_digits(cursor, 1, 8, start_offset)
        }
        c if c.is_digit(8) => {
            let mut count = 0;
            while count < 3 && !cursor.is_at_end() && cursor.current_char().is_digit(8) {
                cursor.advance();
                count += 1;
            }
            Ok(())
        }
        _ => {
            // Unknown escape: consume the character anyway rather than failing the
            // whole literal over an unrecognized backslash sequence.
            cursor.advance();
            Ok(())
        }
    }
}

fn consume_hex_digits(cursor: &mut Cursor, min: u32, max: u32, start_offset: usize) -> Result<(), LexError> {
    let mut count = 0;
    while count < max && !cursor.is_at_end() && cursor.current_char().is_ascii_hexdigit() {
        cursor.advance();
        count += 1;
    }
    if count < min {
        return Err(LexError::UnexpectedEofInString { offset: start_offset });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(s: &str) -> Result<usize, LexError> {
        let mut cursor = Cursor::new(s);
        scan_string(&mut cursor)?;
        Ok(cursor.position())
    }

    #[test]
    fn simple_string() {
        assert_eq!(run(r#""hello""#), Ok(7));
    }

    #[test]
    fn escaped_quote() {
        assert_eq!(run(r#""a\"b""#), Ok(6));
    }

    #[test]
    fn unterminated() {
        assert!(matches!(run("\"abc"), Err(LexError::UnexpectedEofInString { .. })));
    }

    #[test]
    fn hex_escape() {
        assert_eq!(run(r#""\x41""#), Ok(6));
    }
}

//! Character classes used by the scanner.

/// Check if a character is a line terminator.
#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Characters matched by a `\b`-anchored keyword: ASCII letters, digits and `_`.
#[inline]
pub fn is_word_char(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

/// Check if a character can start an identifier.
#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '_'
        || ch == '$'
        || ch.is_ascii_alphabetic()
        || (ch as u32 > 0x7F && unicode_xid::UnicodeXID::is_xid_start(ch))
}

/// Check if a character can be part of an identifier.
#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch == '_'
        || ch == '$'
        || ch.is_ascii_alphanumeric()
        || (ch as u32 > 0x7F && unicode_xid::UnicodeXID::is_xid_continue(ch))
}

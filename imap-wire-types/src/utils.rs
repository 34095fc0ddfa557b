//! Character classes and escaping helpers shared by the value model and the codec.

use std::borrow::Cow;

/// Byte predicates mirroring the character classes of IMAP's formal syntax.
pub mod indicators {
    /// `CHAR = %x01-7F`
    #[allow(non_snake_case)]
    pub fn is_CHAR(byte: u8) -> bool {
        matches!(byte, 0x01..=0x7f)
    }

    /// `CTL = %x00-1F / %x7F`
    #[allow(non_snake_case)]
    pub fn is_CTL(byte: u8) -> bool {
        matches!(byte, 0x00..=0x1f | 0x7f)
    }

    /// `ATOM-CHAR = <any CHAR except atom-specials>`
    pub fn is_atom_char(byte: u8) -> bool {
        is_CHAR(byte) && !is_atom_specials(byte)
    }

    /// ```abnf
    /// atom-specials = "(" / ")" / "{" / SP / CTL / list-wildcards / quoted-specials /
    ///                 resp-specials
    /// ```
    pub fn is_atom_specials(byte: u8) -> bool {
        matches!(byte, b'(' | b')' | b'{' | b' ')
            || is_CTL(byte)
            || is_list_wildcards(byte)
            || is_quoted_specials(byte)
            || is_resp_specials(byte)
    }

    /// `ASTRING-CHAR = ATOM-CHAR / resp-specials`
    pub fn is_astring_char(byte: u8) -> bool {
        is_atom_char(byte) || is_resp_specials(byte)
    }

    /// `list-wildcards = "%" / "*"`
    pub fn is_list_wildcards(byte: u8) -> bool {
        byte == b'%' || byte == b'*'
    }

    /// `list-char = ATOM-CHAR / list-wildcards / resp-specials`
    pub fn is_list_char(byte: u8) -> bool {
        is_atom_char(byte) || is_list_wildcards(byte) || is_resp_specials(byte)
    }

    /// `quoted-specials = DQUOTE / "\"`
    pub fn is_quoted_specials(byte: u8) -> bool {
        byte == b'"' || byte == b'\\'
    }

    /// `resp-specials = "]"`
    #[inline]
    pub fn is_resp_specials(byte: u8) -> bool {
        byte == b']'
    }

    /// `CHAR8 = %x01-ff`
    #[inline]
    pub fn is_char8(byte: u8) -> bool {
        byte != 0
    }

    /// `TEXT-CHAR = %x01-09 / %x0B-0C / %x0E-7F`
    pub fn is_text_char(byte: u8) -> bool {
        matches!(byte, 0x01..=0x09 | 0x0b..=0x0c | 0x0e..=0x7f)
    }

    /// `<any TEXT-CHAR except "]">`, the bytes allowed inside a response code.
    pub fn is_text_char_except_resp_specials(byte: u8) -> bool {
        is_text_char(byte) && !is_resp_specials(byte)
    }

    /// `<any TEXT-CHAR except quoted-specials>`
    pub fn is_any_text_char_except_quoted_specials(byte: u8) -> bool {
        is_text_char(byte) && !is_quoted_specials(byte)
    }
}

/// Escape `\` and `"` so that the result can be put between double quotes.
pub fn escape_quoted(unescaped: &str) -> Cow<'_, str> {
    if !unescaped.contains(['\\', '"']) {
        return Cow::Borrowed(unescaped);
    }

    let mut escaped = String::with_capacity(unescaped.len() + 2);

    for c in unescaped.chars() {
        if c == '\\' || c == '"' {
            escaped.push('\\');
        }
        escaped.push(c);
    }

    Cow::Owned(escaped)
}

/// Inverse of [`escape_quoted`].
pub fn unescape_quoted(escaped: &str) -> Cow<'_, str> {
    if !escaped.contains('\\') {
        return Cow::Borrowed(escaped);
    }

    let mut unescaped = String::with_capacity(escaped.len());
    let mut chars = escaped.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                unescaped.push(next);
            }
        } else {
            unescaped.push(c);
        }
    }

    Cow::Owned(unescaped)
}

/// Render bytes for humans, e.g., `b"A1 NOOP\r\n"` becomes `A1 NOOP\r\n`.
///
/// Printable ASCII is kept, everything else is escaped.
pub fn escape_byte_string<B>(bytes: B) -> String
where
    B: AsRef<[u8]>,
{
    bytes
        .as_ref()
        .iter()
        .map(|byte| match byte {
            0x00..=0x08 => format!("\\x{:02x}", byte),
            0x09 => String::from("\\t"),
            0x0A => String::from("\\n"),
            0x0B..=0x0C => format!("\\x{:02x}", byte),
            0x0D => String::from("\\r"),
            0x0e..=0x1f => format!("\\x{:02x}", byte),
            0x20..=0x21 => format!("{}", *byte as char),
            0x22 => String::from("\\\""),
            0x23..=0x5B => format!("{}", *byte as char),
            0x5C => String::from("\\\\"),
            0x5D..=0x7E => format!("{}", *byte as char),
            0x7f => String::from("\\x7f"),
            0x80..=0xff => format!("\\x{:02x}", byte),
        })
        .collect::<Vec<String>>()
        .join("")
}

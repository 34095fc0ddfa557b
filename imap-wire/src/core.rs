use std::{borrow::Cow, io::Write, num::NonZeroU32, str::from_utf8};

#[cfg(not(feature = "quirk_crlf_relaxed"))]
use abnf_core::streaming::crlf;
#[cfg(feature = "quirk_crlf_relaxed")]
use abnf_core::streaming::crlf_relaxed as crlf;
use abnf_core::{is_alpha, is_digit, streaming::dquote};
use base64::{engine::general_purpose::STANDARD as _base64, Engine};
use imap_wire_types::{
    core::{
        AString, Atom, AtomExt, Charset, IString, Literal, LiteralMode, NString, Quoted,
        QuotedChar, Tag, Text,
    },
    utils::{
        escape_quoted,
        indicators::{
            is_any_text_char_except_quoted_specials, is_astring_char, is_atom_char,
            is_quoted_specials, is_text_char,
        },
        unescape_quoted,
    },
};
use nom::{
    branch::alt,
    bytes::streaming::{escaped, tag, tag_no_case, take, take_while, take_while1, take_while_m_n},
    character::streaming::{char, digit1, one_of},
    combinator::{map, map_res, opt, recognize, value},
    sequence::{delimited, preceded, terminated, tuple},
};

use crate::codec::{
    decode::{IMAPErrorKind, IMAPParseError, IMAPResult},
    encode::{EncodeContext, EncodeIntoContext},
};

// ----- number -----

/// `1*DIGIT` without leading zeros (except for `0` itself).
fn digits(input: &[u8]) -> IMAPResult<&[u8], &str> {
    let (remaining, digits) = digit1(input)?;

    if digits.len() > 1 && digits[0] == b'0' {
        return Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::BadNumber,
        }));
    }

    // Safety: `digit1` only returns ASCII digits.
    #[allow(clippy::unwrap_used)]
    Ok((remaining, from_utf8(digits).unwrap()))
}

/// `number = 1*DIGIT`
///
/// Unsigned 32-bit integer (0 <= n < 4,294,967,296).
///
/// Leading zeros are refused. An overflow is a [`IMAPErrorKind::BadNumber`].
pub(crate) fn number(input: &[u8]) -> IMAPResult<&[u8], u32> {
    map_res(digits, str::parse::<u32>)(input)
}

/// `number64 = 1*DIGIT`
///
/// Unsigned 63-bit integer (0 <= n <= 9,223,372,036,854,775,807).
pub(crate) fn number64(input: &[u8]) -> IMAPResult<&[u8], u64> {
    let (remaining, number) = map_res(digits, str::parse::<u64>)(input)?;

    if number > i64::MAX as u64 {
        return Err(nom::Err::Error(IMAPParseError {
            input,
            kind: IMAPErrorKind::BadNumber,
        }));
    }

    Ok((remaining, number))
}

/// `nz-number = digit-nz *DIGIT`
///
/// Non-zero unsigned 32-bit integer (0 < n < 4,294,967,296).
pub(crate) fn nz_number(input: &[u8]) -> IMAPResult<&[u8], NonZeroU32> {
    map_res(number, NonZeroU32::try_from)(input)
}

// ----- string -----

/// `string = quoted / literal`
pub(crate) fn string(input: &[u8]) -> IMAPResult<&[u8], IString> {
    alt((map(quoted, IString::Quoted), map(literal, IString::Literal)))(input)
}

/// `quoted = DQUOTE *QUOTED-CHAR DQUOTE`
///
/// Only allocates when an escape sequence must be replaced.
pub(crate) fn quoted(input: &[u8]) -> IMAPResult<&[u8], Quoted> {
    let (remaining, quoted) = delimited(
        dquote,
        escaped(
            take_while1(is_any_text_char_except_quoted_specials),
            '\\',
            one_of("\\\""),
        ),
        dquote,
    )(input)?;

    // Safety: text chars and escapes are ASCII.
    #[allow(clippy::unwrap_used)]
    let quoted = from_utf8(quoted).unwrap();

    Ok((remaining, Quoted::unvalidated(unescape_quoted(quoted))))
}

/// `QUOTED-CHAR = <any TEXT-CHAR except quoted-specials> / "\" quoted-specials`
pub(crate) fn quoted_char(input: &[u8]) -> IMAPResult<&[u8], QuotedChar> {
    map(
        alt((
            take_while_m_n(1, 1, is_any_text_char_except_quoted_specials),
            preceded(tag("\\"), take_while_m_n(1, 1, is_quoted_specials)),
        )),
        |bytes: &[u8]| QuotedChar::unvalidated(bytes[0] as char),
    )(input)
}

/// `"{" number ["+"] "}" CRLF`
pub(crate) fn literal_prefix(input: &[u8]) -> IMAPResult<&[u8], (u32, LiteralMode)> {
    terminated(
        delimited(
            tag(b"{"),
            tuple((
                number,
                map(opt(char('+')), |plus| match plus {
                    Some(_) => LiteralMode::NonSync,
                    None => LiteralMode::Sync,
                }),
            )),
            tag(b"}"),
        ),
        crlf,
    )(input)
}

/// Stop with [`IMAPErrorKind::Literal`] when nothing follows a literal announcement.
///
/// The tag is unknown here. `command` fills it in.
pub(crate) fn literal_found<'a>(
    input: &'a [u8],
    remaining: &'a [u8],
    length: u32,
    mode: LiteralMode,
) -> IMAPResult<'a, &'a [u8], ()> {
    if remaining.is_empty() {
        return Err(nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::Literal {
                tag: None,
                length,
                mode,
            },
        }));
    }

    Ok((remaining, ()))
}

/// `literal = "{" number ["+"] "}" CRLF *CHAR8`
///
/// `+` marks a non-synchronizing literal (LITERAL+/LITERAL-, RFC 7888).
pub(crate) fn literal(input: &[u8]) -> IMAPResult<&[u8], Literal> {
    let (remaining, (length, mode)) = literal_prefix(input)?;
    let (remaining, _) = literal_found(input, remaining, length, mode)?;
    let (remaining, data) = take(length)(remaining)?;

    match Literal::try_from(data) {
        Ok(mut literal) => {
            literal.set_mode(mode);
            Ok((remaining, literal))
        }
        Err(_) => Err(nom::Err::Failure(IMAPParseError {
            input,
            kind: IMAPErrorKind::LiteralContainsNull,
        })),
    }
}

// ----- astring ----- atom (roughly) or string

/// `astring = 1*ASTRING-CHAR / string`
pub(crate) fn astring(input: &[u8]) -> IMAPResult<&[u8], AString> {
    alt((
        map(take_while1(is_astring_char), |bytes: &[u8]| {
            // Safety: `is_astring_char` only accepts ASCII that `AtomExt` allows.
            #[allow(clippy::unwrap_used)]
            AString::Atom(AtomExt::unvalidated(Cow::Borrowed(from_utf8(bytes).unwrap())))
        }),
        map(string, AString::String),
    ))(input)
}

/// `atom = 1*ATOM-CHAR`
pub(crate) fn atom(input: &[u8]) -> IMAPResult<&[u8], Atom> {
    let (remaining, atom) = take_while1(is_atom_char)(input)?;

    // Safety: `is_atom_char` only accepts ASCII that `Atom` allows.
    #[allow(clippy::unwrap_used)]
    Ok((remaining, Atom::unvalidated(from_utf8(atom).unwrap())))
}

// ----- nstring ----- nil or string

/// `nstring = string / nil`
pub(crate) fn nstring(input: &[u8]) -> IMAPResult<&[u8], NString> {
    alt((
        map(string, |item| NString(Some(item))),
        value(NString(None), nil),
    ))(input)
}

/// `nil = "NIL"`
#[inline]
pub(crate) fn nil(input: &[u8]) -> IMAPResult<&[u8], &[u8]> {
    tag_no_case(b"NIL")(input)
}

// ----- text -----

/// `text = 1*TEXT-CHAR`
pub(crate) fn text(input: &[u8]) -> IMAPResult<&[u8], Text> {
    let (remaining, text) = take_while1(is_text_char)(input)?;

    // Safety: `is_text_char` only accepts ASCII.
    #[allow(clippy::unwrap_used)]
    Ok((remaining, Text::unvalidated(from_utf8(text).unwrap())))
}

// ----- base64 -----

/// `base64 = *(4base64-char) [base64-terminal]`
///
/// Decodes the recognized input. Invalid padding is a [`IMAPErrorKind::BadBase64`].
pub(crate) fn base64(input: &[u8]) -> IMAPResult<&[u8], Vec<u8>> {
    map_res(
        recognize(tuple((
            take_while(is_base64_char),
            opt(alt((tag("=="), tag("=")))),
        ))),
        |input| _base64.decode(input),
    )(input)
}

/// `base64-char = ALPHA / DIGIT / "+" / "/" ; Case-sensitive`
pub(crate) fn is_base64_char(i: u8) -> bool {
    is_alpha(i) || is_digit(i) || i == b'+' || i == b'/'
}

// ----- charset -----

/// `charset = atom / quoted`
pub(crate) fn charset(input: &[u8]) -> IMAPResult<&[u8], Charset> {
    alt((map(atom, Charset::Atom), map(quoted, Charset::Quoted)))(input)
}

// ----- tag -----

/// `tag = 1*<any ASTRING-CHAR except "+">`
pub(crate) fn tag_imap(input: &[u8]) -> IMAPResult<&[u8], Tag> {
    let (remaining, tag) = take_while1(|b| is_astring_char(b) && b != b'+')(input)?;

    // Safety: `is_astring_char` only accepts ASCII.
    #[allow(clippy::unwrap_used)]
    Ok((remaining, Tag::unvalidated(from_utf8(tag).unwrap())))
}

// ----- encoding -----

macro_rules! impl_encode_for_string_type {
    ($($target:ident),*) => {
        $(
            impl<'a> EncodeIntoContext for $target<'a> {
                fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
                    ctx.write_all(self.inner().as_bytes())
                }
            }
        )*
    };
}

impl_encode_for_string_type!(Atom, AtomExt, Tag, Text);

impl<'a> EncodeIntoContext for Quoted<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        write!(ctx, "\"{}\"", escape_quoted(self.inner()))
    }
}

impl EncodeIntoContext for QuotedChar {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        if self.needs_escaping() {
            ctx.write_all(b"\\")?;
        }

        ctx.write_all(&[self.inner() as u8])
    }
}

impl<'a> EncodeIntoContext for Literal<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self.mode() {
            LiteralMode::Sync => write!(ctx, "{{{}}}\r\n", self.data().len())?,
            LiteralMode::NonSync => write!(ctx, "{{{}+}}\r\n", self.data().len())?,
        }

        ctx.push_line();
        ctx.write_all(self.data())?;
        ctx.push_literal(self.mode());

        Ok(())
    }
}

impl<'a> EncodeIntoContext for IString<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Literal(literal) => literal.encode_ctx(ctx),
            Self::Quoted(quoted) => quoted.encode_ctx(ctx),
        }
    }
}

impl<'a> EncodeIntoContext for NString<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match &self.0 {
            Some(string) => string.encode_ctx(ctx),
            None => ctx.write_all(b"NIL"),
        }
    }
}

impl<'a> EncodeIntoContext for AString<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Atom(atom) => atom.encode_ctx(ctx),
            Self::String(string) => string.encode_ctx(ctx),
        }
    }
}

impl<'a> EncodeIntoContext for Charset<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Atom(atom) => atom.encode_ctx(ctx),
            Self::Quoted(quoted) => quoted.encode_ctx(ctx),
        }
    }
}

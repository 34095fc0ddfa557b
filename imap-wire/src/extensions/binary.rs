use std::{borrow::Cow, io::Write};

use imap_wire_types::{
    core::LiteralMode,
    extensions::binary::{Literal8, LiteralOrLiteral8, NString8},
};
use nom::{
    branch::alt,
    bytes::streaming::take,
    character::streaming::char,
    combinator::map,
    sequence::preceded,
};

use crate::{
    codec::{
        decode::IMAPResult,
        encode::{EncodeContext, EncodeIntoContext},
    },
    core::{literal, literal_found, literal_prefix, nstring},
};

/// `literal8 = "~{" number ["+"] "}" CRLF *OCTET`
///
/// Unlike a [`literal`], the data may contain NUL.
pub(crate) fn literal8(input: &[u8]) -> IMAPResult<&[u8], Literal8> {
    let (remaining, (length, mode)) = preceded(char('~'), literal_prefix)(input)?;
    let (remaining, _) = literal_found(input, remaining, length, mode)?;
    let (remaining, data) = take(length)(remaining)?;

    Ok((
        remaining,
        Literal8 {
            data: Cow::Borrowed(data),
            mode,
        },
    ))
}

/// `literal / literal8`, e.g., the message in `APPEND`.
pub(crate) fn literal_or_literal8(input: &[u8]) -> IMAPResult<&[u8], LiteralOrLiteral8> {
    alt((
        map(literal, LiteralOrLiteral8::Literal),
        map(literal8, LiteralOrLiteral8::Literal8),
    ))(input)
}

/// `nstring / literal8`, e.g., the value of `BINARY[...]`.
pub(crate) fn nstring8(input: &[u8]) -> IMAPResult<&[u8], NString8> {
    alt((
        map(nstring, NString8::NString),
        map(literal8, NString8::Literal8),
    ))(input)
}

impl<'a> EncodeIntoContext for Literal8<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self.mode {
            LiteralMode::Sync => write!(ctx, "~{{{}}}\r\n", self.data.len())?,
            LiteralMode::NonSync => write!(ctx, "~{{{}+}}\r\n", self.data.len())?,
        }

        ctx.push_line();
        ctx.write_all(&self.data)?;
        ctx.push_literal(self.mode);

        Ok(())
    }
}

impl<'a> EncodeIntoContext for LiteralOrLiteral8<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Literal(literal) => literal.encode_ctx(ctx),
            Self::Literal8(literal8) => literal8.encode_ctx(ctx),
        }
    }
}

impl<'a> EncodeIntoContext for NString8<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::NString(nstring) => nstring.encode_ctx(ctx),
            Self::Literal8(literal8) => literal8.encode_ctx(ctx),
        }
    }
}

use std::{borrow::Cow, io::Write};

#[cfg(not(feature = "quirk_crlf_relaxed"))]
use abnf_core::streaming::crlf;
#[cfg(feature = "quirk_crlf_relaxed")]
use abnf_core::streaming::crlf_relaxed as crlf;
use base64::{engine::general_purpose::STANDARD as _base64, Engine};
use imap_wire_types::{
    auth::{AuthMechanism, AuthenticateData},
    secret::Secret,
};
use nom::{
    branch::alt,
    bytes::streaming::tag,
    combinator::{map, value},
    sequence::{terminated, tuple},
};

use crate::{
    codec::{
        decode::IMAPResult,
        encode::{EncodeContext, EncodeIntoContext},
    },
    core::{atom, base64},
};

/// `auth-type = atom`
pub(crate) fn auth_type(input: &[u8]) -> IMAPResult<&[u8], AuthMechanism> {
    map(atom, AuthMechanism::from)(input)
}

/// A client line during `AUTHENTICATE`: `base64 CRLF` or `"*" CRLF` (cancel).
pub(crate) fn authenticate_data(input: &[u8]) -> IMAPResult<&[u8], AuthenticateData> {
    alt((
        value(AuthenticateData::Cancel, tuple((tag(b"*"), crlf))),
        map(terminated(base64, crlf), |data| {
            AuthenticateData::Continue(Secret::new(Cow::Owned(data)))
        }),
    ))(input)
}

impl<'a> EncodeIntoContext for AuthMechanism<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        write!(ctx, "{}", self)
    }
}

impl<'a> EncodeIntoContext for AuthenticateData<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Continue(data) => {
                ctx.write_all(_base64.encode(data.declassify()).as_bytes())?;
                ctx.write_all(b"\r\n")
            }
            Self::Cancel => ctx.write_all(b"*\r\n"),
        }
    }
}

use std::io::Write;

use abnf_core::streaming::sp;
use imap_wire_types::envelope::{Address, Envelope};
use nom::{
    branch::alt,
    bytes::streaming::tag,
    combinator::value,
    multi::many1,
    sequence::{delimited, preceded, tuple},
};

use crate::{
    codec::{
        decode::IMAPResult,
        encode::{utils::List1OrNil, EncodeContext, EncodeIntoContext},
    },
    core::{nil, nstring},
};

/// ```abnf
/// envelope = "(" env-date SP env-subject SP env-from SP
///                env-sender SP env-reply-to SP env-to SP
///                env-cc SP env-bcc SP env-in-reply-to SP
///                env-message-id ")"
/// ```
///
/// `env-date`, `env-subject`, `env-in-reply-to`, and `env-message-id` are `nstring`s.
pub(crate) fn envelope(input: &[u8]) -> IMAPResult<&[u8], Envelope> {
    let (
        remaining,
        (date, subject, from, sender, reply_to, to, cc, bcc, in_reply_to, message_id),
    ) = delimited(
        tag(b"("),
        tuple((
            nstring,
            preceded(sp, nstring),
            preceded(sp, address_list),
            preceded(sp, address_list),
            preceded(sp, address_list),
            preceded(sp, address_list),
            preceded(sp, address_list),
            preceded(sp, address_list),
            preceded(sp, nstring),
            preceded(sp, nstring),
        )),
        tag(b")"),
    )(input)?;

    Ok((
        remaining,
        Envelope {
            date,
            subject,
            from,
            sender,
            reply_to,
            to,
            cc,
            bcc,
            in_reply_to,
            message_id,
        },
    ))
}

/// `env-from = "(" 1*address ")" / nil` (same for sender, reply-to, to, cc, and bcc)
pub(crate) fn address_list(input: &[u8]) -> IMAPResult<&[u8], Vec<Address>> {
    alt((
        delimited(tag(b"("), many1(address), tag(b")")),
        value(Vec::new(), nil),
    ))(input)
}

/// ```abnf
/// address = "(" addr-name SP addr-adl SP addr-mailbox SP addr-host ")"
/// ```
///
/// A `NIL` host marks RFC 2822 group syntax.
pub(crate) fn address(input: &[u8]) -> IMAPResult<&[u8], Address> {
    let (remaining, (name, _, adl, _, mailbox, _, host)) = delimited(
        tag(b"("),
        tuple((nstring, sp, nstring, sp, nstring, sp, nstring)),
        tag(b")"),
    )(input)?;

    Ok((
        remaining,
        Address {
            name,
            adl,
            mailbox,
            host,
        },
    ))
}

impl<'a> EncodeIntoContext for Envelope<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        ctx.write_all(b"(")?;
        self.date.encode_ctx(ctx)?;
        ctx.write_all(b" ")?;
        self.subject.encode_ctx(ctx)?;
        for addresses in [
            &self.from,
            &self.sender,
            &self.reply_to,
            &self.to,
            &self.cc,
            &self.bcc,
        ] {
            ctx.write_all(b" ")?;
            List1OrNil(addresses, b"").encode_ctx(ctx)?;
        }
        ctx.write_all(b" ")?;
        self.in_reply_to.encode_ctx(ctx)?;
        ctx.write_all(b" ")?;
        self.message_id.encode_ctx(ctx)?;
        ctx.write_all(b")")
    }
}

impl<'a> EncodeIntoContext for Address<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        ctx.write_all(b"(")?;
        self.name.encode_ctx(ctx)?;
        ctx.write_all(b" ")?;
        self.adl.encode_ctx(ctx)?;
        ctx.write_all(b" ")?;
        self.mailbox.encode_ctx(ctx)?;
        ctx.write_all(b" ")?;
        self.host.encode_ctx(ctx)?;
        ctx.write_all(b")")
    }
}

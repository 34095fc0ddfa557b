use std::{io::Write, num::NonZeroU32};

use abnf_core::streaming::{dquote, sp};
use imap_wire_types::{
    core::QuotedChar,
    flag::FlagNameAttribute,
    mailbox::{ListCharString, ListMailbox, Mailbox},
    response::Data,
    utils::indicators::is_list_char,
};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case, take_while1},
    combinator::{map, opt, value},
    multi::many0,
    sequence::{delimited, preceded, terminated, tuple},
};

use crate::{
    codec::{
        decode::IMAPResult,
        encode::{EncodeContext, EncodeIntoContext},
    },
    core::{astring, nil, number, nz_number, quoted_char, string},
    extensions::{
        metadata::metadata_resp,
        quota::{quota_response, quotaroot_response},
        thread::thread_data,
    },
    flag::{flag_list, mbx_list_flags},
    status::status_att_list,
};

/// `list-mailbox = 1*list-char / string`
pub(crate) fn list_mailbox(input: &[u8]) -> IMAPResult<&[u8], ListMailbox> {
    alt((
        map(take_while1(is_list_char), |bytes: &[u8]| {
            // Safety: `is_list_char` only accepts ASCII that `ListCharString` allows.
            #[allow(clippy::unwrap_used)]
            ListMailbox::Token(ListCharString::unvalidated(
                std::str::from_utf8(bytes).unwrap(),
            ))
        }),
        map(string, ListMailbox::String),
    ))(input)
}

/// `mailbox = "INBOX" / astring`
///
/// INBOX is case-insensitive, regardless of whether it was sent as atom, quoted, or literal.
pub(crate) fn mailbox(input: &[u8]) -> IMAPResult<&[u8], Mailbox> {
    map(astring, Mailbox::from)(input)
}

/// ```abnf
/// mailbox-data = "FLAGS" SP flag-list /
///                "LIST" SP mailbox-list /
///                "LSUB" SP mailbox-list /
///                "SEARCH" *(SP nz-number) /
///                "SORT" *(SP nz-number) /                                  ; RFC 5256
///                "THREAD" *thread-list /                                   ; RFC 5256
///                "STATUS" SP mailbox SP "(" [status-att-list] ")" /
///                "METADATA" SP mailbox SP (entry-values / entry-list) /    ; RFC 5464
///                "QUOTA" SP astring SP quota-list /                       ; RFC 9208
///                "QUOTAROOT" SP mailbox *(SP astring) /                   ; RFC 9208
///                number SP "EXISTS" /
///                number SP "RECENT"
/// ```
pub(crate) fn mailbox_data(input: &[u8]) -> IMAPResult<&[u8], Data> {
    alt((
        map(preceded(tag_no_case(b"FLAGS "), flag_list), Data::Flags),
        map(
            preceded(tag_no_case(b"LIST "), mailbox_list),
            |(items, delimiter, mailbox)| Data::List {
                items,
                delimiter,
                mailbox,
            },
        ),
        map(
            preceded(tag_no_case(b"LSUB "), mailbox_list),
            |(items, delimiter, mailbox)| Data::Lsub {
                items,
                delimiter,
                mailbox,
            },
        ),
        map(search_data, Data::Search),
        map(
            preceded(tag_no_case(b"SORT"), many0(preceded(sp, nz_number))),
            Data::Sort,
        ),
        thread_data,
        status_data,
        metadata_resp,
        map(terminated(number, tag_no_case(b" EXISTS")), Data::Exists),
        map(terminated(number, tag_no_case(b" RECENT")), Data::Recent),
        quotaroot_response,
        quota_response,
    ))(input)
}

/// ```abnf
/// mailbox-list = "(" [mbx-list-flags] ")" SP
///                (DQUOTE QUOTED-CHAR DQUOTE / nil) SP
///                mailbox
/// ```
#[allow(clippy::type_complexity)]
pub(crate) fn mailbox_list(
    input: &[u8],
) -> IMAPResult<&[u8], (Vec<FlagNameAttribute>, Option<QuotedChar>, Mailbox)> {
    let (remaining, (items, _, delimiter, _, mailbox)) = tuple((
        delimited(tag(b"("), opt(mbx_list_flags), tag(b")")),
        sp,
        alt((
            map(delimited(dquote, quoted_char, dquote), Some),
            value(None, nil),
        )),
        sp,
        mailbox,
    ))(input)?;

    Ok((remaining, (items.unwrap_or_default(), delimiter, mailbox)))
}

/// `"SEARCH" *(SP nz-number)`
///
/// # Quirks
///
/// With `quirk_trailing_space_search`, a trailing space, e.g., `* SEARCH 1 2 \r\n`, is accepted.
fn search_data(input: &[u8]) -> IMAPResult<&[u8], Vec<NonZeroU32>> {
    let (remaining, numbers) =
        preceded(tag_no_case(b"SEARCH"), many0(preceded(sp, nz_number)))(input)?;

    #[cfg(feature = "quirk_trailing_space_search")]
    let remaining = match sp(remaining) {
        Ok((remaining, _)) => {
            log::warn!("Rectified trailing space in SEARCH data");
            remaining
        }
        Err(_) => remaining,
    };

    Ok((remaining, numbers))
}

/// `"STATUS" SP mailbox SP "(" [status-att-list] ")"`
///
/// # Quirks
///
/// With `quirk_trailing_space_status`, a trailing space after `)` is accepted.
fn status_data(input: &[u8]) -> IMAPResult<&[u8], Data> {
    let (remaining, (_, mailbox, items)) = tuple((
        tag_no_case(b"STATUS "),
        mailbox,
        delimited(tag(b" ("), opt(status_att_list), tag(b")")),
    ))(input)?;

    #[cfg(feature = "quirk_trailing_space_status")]
    let remaining = match sp(remaining) {
        Ok((remaining, _)) => {
            log::warn!("Rectified trailing space in STATUS data");
            remaining
        }
        Err(_) => remaining,
    };

    Ok((
        remaining,
        Data::Status {
            mailbox,
            items: items.unwrap_or_default(),
        },
    ))
}

impl<'a> EncodeIntoContext for Mailbox<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Inbox => ctx.write_all(b"INBOX"),
            Self::Other(other) => other.inner().encode_ctx(ctx),
        }
    }
}

impl<'a> EncodeIntoContext for ListMailbox<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Token(token) => ctx.write_all(token.as_ref()),
            Self::String(string) => string.encode_ctx(ctx),
        }
    }
}

/// `DQUOTE QUOTED-CHAR DQUOTE / nil`
pub(crate) fn encode_delimiter(
    delimiter: &Option<QuotedChar>,
    ctx: &mut EncodeContext,
) -> std::io::Result<()> {
    match delimiter {
        Some(delimiter) => {
            ctx.write_all(b"\"")?;
            delimiter.encode_ctx(ctx)?;
            ctx.write_all(b"\"")
        }
        None => ctx.write_all(b"NIL"),
    }
}

//! METADATA (RFC 5464)
//!
//! An empty mailbox name addresses server annotations.

use std::io::Write;

use abnf_core::streaming::sp;
use imap_wire_types::{
    command::CommandBody,
    core::Vec1,
    extensions::metadata::{
        Depth, Entry, EntryValue, GetMetadataOption, MetadataCode, MetadataResponse,
    },
    response::Data,
};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, opt, value},
    multi::separated_list1,
    sequence::{delimited, preceded, separated_pair, tuple},
};

use crate::{
    codec::{
        decode::IMAPResult,
        encode::{utils::join_serializable, EncodeContext, EncodeIntoContext},
    },
    core::{astring, number},
    extensions::binary::nstring8,
    mailbox::mailbox,
};

/// `setmetadata = "SETMETADATA" SP mailbox SP entry-values`
pub(crate) fn setmetadata(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    map(
        tuple((
            tag_no_case(b"SETMETADATA "),
            mailbox,
            preceded(sp, entry_values),
        )),
        |(_, mailbox, entry_values)| CommandBody::SetMetadata {
            mailbox,
            entry_values,
        },
    )(input)
}

/// `getmetadata = "GETMETADATA" [SP getmetadata-options] SP mailbox SP entries`
pub(crate) fn getmetadata(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    map(
        tuple((
            tag_no_case(b"GETMETADATA"),
            opt(preceded(sp, getmetadata_options)),
            preceded(sp, mailbox),
            preceded(sp, entries),
        )),
        |(_, options, mailbox, entries)| CommandBody::GetMetadata {
            options: options.map(Vec1::into_inner).unwrap_or_default(),
            mailbox,
            entries,
        },
    )(input)
}

/// `getmetadata-options = "(" getmetadata-option *(SP getmetadata-option) ")"`
pub(crate) fn getmetadata_options(input: &[u8]) -> IMAPResult<&[u8], Vec1<GetMetadataOption>> {
    map(
        delimited(tag(b"("), separated_list1(sp, getmetadata_option), tag(b")")),
        Vec1::unvalidated,
    )(input)
}

/// ```abnf
/// getmetadata-option = maxsize-opt / scope-opt
/// maxsize-opt        = "MAXSIZE" SP number
/// scope-opt          = "DEPTH" SP ("0" / "1" / "infinity")
/// ```
pub(crate) fn getmetadata_option(input: &[u8]) -> IMAPResult<&[u8], GetMetadataOption> {
    alt((
        map(
            preceded(tag_no_case(b"MAXSIZE "), number),
            GetMetadataOption::MaxSize,
        ),
        map(
            preceded(
                tag_no_case(b"DEPTH "),
                alt((
                    value(Depth::Null, tag(b"0")),
                    value(Depth::One, tag(b"1")),
                    value(Depth::Infinity, tag_no_case(b"infinity")),
                )),
            ),
            GetMetadataOption::Depth,
        ),
    ))(input)
}

/// `entries = entry / "(" entry *(SP entry) ")"`
pub(crate) fn entries(input: &[u8]) -> IMAPResult<&[u8], Vec1<Entry>> {
    alt((
        map(entry, Vec1::from),
        map(
            delimited(tag(b"("), separated_list1(sp, entry), tag(b")")),
            Vec1::unvalidated,
        ),
    ))(input)
}

/// `entry-values = "(" entry-value *(SP entry-value) ")"`
pub(crate) fn entry_values(input: &[u8]) -> IMAPResult<&[u8], Vec1<EntryValue>> {
    map(
        delimited(tag(b"("), separated_list1(sp, entry_value), tag(b")")),
        Vec1::unvalidated,
    )(input)
}

/// ```abnf
/// entry-value = entry SP value
/// value       = nstring / literal8
/// ```
pub(crate) fn entry_value(input: &[u8]) -> IMAPResult<&[u8], EntryValue> {
    map(separated_pair(entry, sp, nstring8), |(entry, value)| {
        EntryValue { entry, value }
    })(input)
}

/// `entry = astring`
///
/// A slash-separated path, e.g., `/private/comment`.
pub(crate) fn entry(input: &[u8]) -> IMAPResult<&[u8], Entry> {
    map(astring, Entry::from)(input)
}

/// ```abnf
/// metadata-resp = "METADATA" SP mailbox SP (entry-values / entry-list)
/// entry-list    = entry *(SP entry)
/// ```
pub(crate) fn metadata_resp(input: &[u8]) -> IMAPResult<&[u8], Data> {
    map(
        tuple((
            tag_no_case(b"METADATA "),
            mailbox,
            preceded(
                sp,
                alt((
                    map(entry_values, MetadataResponse::WithValues),
                    map(
                        separated_list1(sp, entry),
                        |entries| MetadataResponse::WithoutValues(Vec1::unvalidated(entries)),
                    ),
                )),
            ),
        )),
        |(_, mailbox, items)| Data::Metadata { mailbox, items },
    )(input)
}

/// ```abnf
/// resp-text-code =/ "METADATA" SP ("LONGENTRIES" SP number /
///                                  "MAXSIZE" SP number /
///                                  "TOOMANY" /
///                                  "NOPRIVATE")
/// ```
///
/// Parses what follows `METADATA SP`.
pub(crate) fn metadata_code(input: &[u8]) -> IMAPResult<&[u8], MetadataCode> {
    alt((
        map(
            preceded(tag_no_case(b"LONGENTRIES "), number),
            MetadataCode::LongEntries,
        ),
        map(
            preceded(tag_no_case(b"MAXSIZE "), number),
            MetadataCode::MaxSize,
        ),
        value(MetadataCode::TooMany, tag_no_case(b"TOOMANY")),
        value(MetadataCode::NoPrivate, tag_no_case(b"NOPRIVATE")),
    ))(input)
}

impl<'a> EncodeIntoContext for MetadataResponse<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::WithValues(entry_values) => {
                ctx.write_all(b"(")?;
                join_serializable(entry_values.as_ref(), b" ", ctx)?;
                ctx.write_all(b")")
            }
            Self::WithoutValues(entries) => join_serializable(entries.as_ref(), b" ", ctx),
        }
    }
}

impl EncodeIntoContext for MetadataCode {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::LongEntries(number) => write!(ctx, "LONGENTRIES {number}"),
            Self::MaxSize(number) => write!(ctx, "MAXSIZE {number}"),
            Self::TooMany => ctx.write_all(b"TOOMANY"),
            Self::NoPrivate => ctx.write_all(b"NOPRIVATE"),
        }
    }
}

impl<'a> EncodeIntoContext for Entry<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        self.inner().encode_ctx(ctx)
    }
}

impl<'a> EncodeIntoContext for EntryValue<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        self.entry.encode_ctx(ctx)?;
        ctx.write_all(b" ")?;
        self.value.encode_ctx(ctx)
    }
}

impl EncodeIntoContext for GetMetadataOption {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::MaxSize(number) => write!(ctx, "MAXSIZE {number}"),
            Self::Depth(depth) => {
                ctx.write_all(b"DEPTH ")?;
                depth.encode_ctx(ctx)
            }
        }
    }
}

impl EncodeIntoContext for Depth {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        ctx.write_all(match self {
            Self::Null => b"0",
            Self::One => b"1",
            Self::Infinity => b"INFINITY",
        })
    }
}

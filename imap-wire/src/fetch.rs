use std::{io::Write, num::NonZeroU32};

use abnf_core::streaming::sp;
use imap_wire_types::{
    core::{AString, Vec1},
    fetch::{
        Macro, MacroOrMessageDataItemNames, MessageDataItem, MessageDataItemName, Part, Section,
    },
};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, opt, value},
    multi::{separated_list0, separated_list1},
    sequence::{delimited, preceded, separated_pair, tuple},
};

use crate::{
    body::body,
    codec::{
        decode::{IMAPResult, RECURSION_LIMIT},
        encode::{utils::join_serializable, EncodeContext, EncodeIntoContext},
    },
    core::{astring, nstring, number, nz_number},
    datetime::date_time,
    envelope::envelope,
    extensions::binary::nstring8,
    flag::flag_fetch,
};

/// ```abnf
/// fetch-att-list = "ALL" / "FULL" / "FAST" / fetch-att / "(" fetch-att *(SP fetch-att) ")"
/// ```
pub(crate) fn macro_or_item_names(
    input: &[u8],
) -> IMAPResult<&[u8], MacroOrMessageDataItemNames> {
    alt((
        value(
            MacroOrMessageDataItemNames::Macro(Macro::All),
            tag_no_case(b"ALL"),
        ),
        value(
            MacroOrMessageDataItemNames::Macro(Macro::Fast),
            tag_no_case(b"FAST"),
        ),
        value(
            MacroOrMessageDataItemNames::Macro(Macro::Full),
            tag_no_case(b"FULL"),
        ),
        map(fetch_att, |name| {
            MacroOrMessageDataItemNames::MessageDataItemNames(vec![name])
        }),
        map(
            delimited(tag(b"("), separated_list0(sp, fetch_att), tag(b")")),
            MacroOrMessageDataItemNames::MessageDataItemNames,
        ),
    ))(input)
}

/// ```abnf
/// fetch-att = "ENVELOPE" /
///             "FLAGS" /
///             "INTERNALDATE" /
///             "RFC822" [".HEADER" / ".SIZE" / ".TEXT"] /
///             "BODY" ["STRUCTURE"] /
///             "UID" /
///             "BODY"      section ["<" number "." nz-number ">"] /
///             "BODY.PEEK" section ["<" number "." nz-number ">"] /
///             "BINARY"      section-binary [partial] / ; RFC 3516
///             "BINARY.PEEK" section-binary [partial] / ; RFC 3516
///             "BINARY.SIZE" section-binary             ; RFC 3516
/// ```
pub(crate) fn fetch_att(input: &[u8]) -> IMAPResult<&[u8], MessageDataItemName> {
    alt((
        value(MessageDataItemName::Envelope, tag_no_case(b"ENVELOPE")),
        value(MessageDataItemName::Flags, tag_no_case(b"FLAGS")),
        value(
            MessageDataItemName::InternalDate,
            tag_no_case(b"INTERNALDATE"),
        ),
        value(
            MessageDataItemName::BodyStructure,
            tag_no_case(b"BODYSTRUCTURE"),
        ),
        map(
            tuple((tag_no_case(b"BODY.PEEK"), section, opt(partial))),
            |(_, section, partial)| MessageDataItemName::BodyExt {
                section,
                partial,
                peek: true,
            },
        ),
        map(
            tuple((tag_no_case(b"BODY"), section, opt(partial))),
            |(_, section, partial)| MessageDataItemName::BodyExt {
                section,
                partial,
                peek: false,
            },
        ),
        value(MessageDataItemName::Body, tag_no_case(b"BODY")),
        map(
            preceded(tag_no_case(b"BINARY.SIZE"), section_binary),
            |section| MessageDataItemName::BinarySize { section },
        ),
        map(
            tuple((tag_no_case(b"BINARY.PEEK"), section_binary, opt(partial))),
            |(_, section, partial)| MessageDataItemName::Binary {
                section,
                partial,
                peek: true,
            },
        ),
        map(
            tuple((tag_no_case(b"BINARY"), section_binary, opt(partial))),
            |(_, section, partial)| MessageDataItemName::Binary {
                section,
                partial,
                peek: false,
            },
        ),
        value(MessageDataItemName::Uid, tag_no_case(b"UID")),
        value(
            MessageDataItemName::Rfc822Header,
            tag_no_case(b"RFC822.HEADER"),
        ),
        value(MessageDataItemName::Rfc822Size, tag_no_case(b"RFC822.SIZE")),
        value(MessageDataItemName::Rfc822Text, tag_no_case(b"RFC822.TEXT")),
        value(MessageDataItemName::Rfc822, tag_no_case(b"RFC822")),
    ))(input)
}

/// `partial = "<" number "." nz-number ">"`
pub(crate) fn partial(input: &[u8]) -> IMAPResult<&[u8], (u32, NonZeroU32)> {
    delimited(
        tag(b"<"),
        separated_pair(number, tag(b"."), nz_number),
        tag(b">"),
    )(input)
}

/// ```abnf
/// msg-att = "(" (msg-att-dynamic / msg-att-static) *(SP (msg-att-dynamic / msg-att-static)) ")"
/// ```
pub(crate) fn msg_att(input: &[u8]) -> IMAPResult<&[u8], Vec1<MessageDataItem>> {
    map(
        delimited(
            tag(b"("),
            separated_list1(sp, alt((msg_att_dynamic, msg_att_static))),
            tag(b")"),
        ),
        Vec1::unvalidated,
    )(input)
}

/// `msg-att-dynamic = "FLAGS" SP "(" [flag-fetch *(SP flag-fetch)] ")"`
pub(crate) fn msg_att_dynamic(input: &[u8]) -> IMAPResult<&[u8], MessageDataItem> {
    map(
        preceded(
            tag_no_case(b"FLAGS "),
            delimited(tag(b"("), separated_list0(sp, flag_fetch), tag(b")")),
        ),
        MessageDataItem::Flags,
    )(input)
}

/// ```abnf
/// msg-att-static = "ENVELOPE" SP envelope /
///                  "INTERNALDATE" SP date-time /
///                  "RFC822" [".HEADER" / ".TEXT"] SP nstring /
///                  "RFC822.SIZE" SP number /
///                  "BODY" ["STRUCTURE"] SP body /
///                  "BODY" section ["<" number ">"] SP nstring /
///                  "UID" SP uniqueid /
///                  "BINARY" section-binary SP (nstring / literal8) / ; RFC 3516
///                  "BINARY.SIZE" section-binary SP number            ; RFC 3516
/// ```
pub(crate) fn msg_att_static(input: &[u8]) -> IMAPResult<&[u8], MessageDataItem> {
    alt((
        map(
            preceded(tag_no_case(b"ENVELOPE "), envelope),
            MessageDataItem::Envelope,
        ),
        map(
            preceded(tag_no_case(b"INTERNALDATE "), date_time),
            MessageDataItem::InternalDate,
        ),
        map(
            preceded(tag_no_case(b"RFC822.HEADER "), nstring),
            MessageDataItem::Rfc822Header,
        ),
        map(
            preceded(tag_no_case(b"RFC822.TEXT "), nstring),
            MessageDataItem::Rfc822Text,
        ),
        map(
            preceded(tag_no_case(b"RFC822.SIZE "), number),
            MessageDataItem::Rfc822Size,
        ),
        map(
            preceded(tag_no_case(b"RFC822 "), nstring),
            MessageDataItem::Rfc822,
        ),
        map(
            preceded(tag_no_case(b"BODYSTRUCTURE "), body(RECURSION_LIMIT)),
            MessageDataItem::BodyStructure,
        ),
        map(
            preceded(tag_no_case(b"BODY "), body(RECURSION_LIMIT)),
            MessageDataItem::Body,
        ),
        map(
            tuple((
                tag_no_case(b"BODY"),
                section,
                opt(delimited(tag(b"<"), number, tag(b">"))),
                sp,
                nstring,
            )),
            |(_, section, origin, _, data)| MessageDataItem::BodyExt {
                section,
                origin,
                data,
            },
        ),
        map(preceded(tag_no_case(b"UID "), nz_number), MessageDataItem::Uid),
        map(
            tuple((tag_no_case(b"BINARY.SIZE"), section_binary, sp, number)),
            |(_, section, _, size)| MessageDataItem::BinarySize { section, size },
        ),
        map(
            tuple((tag_no_case(b"BINARY"), section_binary, sp, nstring8)),
            |(_, section, _, value)| MessageDataItem::Binary { section, value },
        ),
    ))(input)
}

/// `section = "[" [section-spec] "]"`
pub(crate) fn section(input: &[u8]) -> IMAPResult<&[u8], Option<Section>> {
    delimited(tag(b"["), opt(section_spec), tag(b"]"))(input)
}

/// `section-binary = "[" [section-part] "]"`
pub(crate) fn section_binary(input: &[u8]) -> IMAPResult<&[u8], Vec<NonZeroU32>> {
    map(
        delimited(tag(b"["), opt(section_part), tag(b"]")),
        |part| part.map(Vec1::into_inner).unwrap_or_default(),
    )(input)
}

/// `section-spec = section-msgtext / (section-part ["." section-text])`
pub(crate) fn section_spec(input: &[u8]) -> IMAPResult<&[u8], Section> {
    alt((
        map(section_msgtext, |msgtext| msgtext.into_section(None)),
        map(
            tuple((section_part, opt(preceded(tag(b"."), section_text)))),
            |(part, text)| {
                let part = Part(part);

                match text {
                    Some(Some(msgtext)) => msgtext.into_section(Some(part)),
                    Some(None) => Section::Mime(part),
                    None => Section::Part(part),
                }
            },
        ),
    ))(input)
}

/// What follows the (optional) part number in a section.
#[derive(Clone, Debug)]
pub(crate) enum MsgText<'a> {
    Header,
    HeaderFields(Vec1<AString<'a>>),
    HeaderFieldsNot(Vec1<AString<'a>>),
    Text,
}

impl<'a> MsgText<'a> {
    fn into_section(self, part: Option<Part>) -> Section<'a> {
        match self {
            Self::Header => Section::Header(part),
            Self::HeaderFields(fields) => Section::HeaderFields(part, fields),
            Self::HeaderFieldsNot(fields) => Section::HeaderFieldsNot(part, fields),
            Self::Text => Section::Text(part),
        }
    }
}

/// `section-msgtext = "HEADER" / "HEADER.FIELDS" [".NOT"] SP header-list / "TEXT"`
pub(crate) fn section_msgtext(input: &[u8]) -> IMAPResult<&[u8], MsgText> {
    alt((
        map(
            preceded(tag_no_case(b"HEADER.FIELDS.NOT "), header_list),
            MsgText::HeaderFieldsNot,
        ),
        map(
            preceded(tag_no_case(b"HEADER.FIELDS "), header_list),
            MsgText::HeaderFields,
        ),
        value(MsgText::Header, tag_no_case(b"HEADER")),
        value(MsgText::Text, tag_no_case(b"TEXT")),
    ))(input)
}

/// `section-part = nz-number *("." nz-number)`
pub(crate) fn section_part(input: &[u8]) -> IMAPResult<&[u8], Vec1<NonZeroU32>> {
    map(separated_list1(tag(b"."), nz_number), Vec1::unvalidated)(input)
}

/// `section-text = section-msgtext / "MIME"`
///
/// `None` is `MIME`.
pub(crate) fn section_text(input: &[u8]) -> IMAPResult<&[u8], Option<MsgText>> {
    alt((
        map(section_msgtext, Some),
        value(None, tag_no_case(b"MIME")),
    ))(input)
}

/// `header-list = "(" header-fld-name *(SP header-fld-name) ")"`
///
/// `header-fld-name = astring`
pub(crate) fn header_list(input: &[u8]) -> IMAPResult<&[u8], Vec1<AString>> {
    map(
        delimited(tag(b"("), separated_list1(sp, astring), tag(b")")),
        Vec1::unvalidated,
    )(input)
}

impl<'a> EncodeIntoContext for MacroOrMessageDataItemNames<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Macro(r#macro) => r#macro.encode_ctx(ctx),
            Self::MessageDataItemNames(names) => match names.as_slice() {
                [name] => name.encode_ctx(ctx),
                names => {
                    ctx.write_all(b"(")?;
                    join_serializable(names, b" ", ctx)?;
                    ctx.write_all(b")")
                }
            },
        }
    }
}

impl EncodeIntoContext for Macro {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        write!(ctx, "{}", self)
    }
}

impl<'a> EncodeIntoContext for MessageDataItemName<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Body => ctx.write_all(b"BODY"),
            Self::BodyExt {
                section,
                partial,
                peek,
            } => {
                ctx.write_all(if *peek { b"BODY.PEEK[" } else { b"BODY[" })?;
                if let Some(section) = section {
                    section.encode_ctx(ctx)?;
                }
                ctx.write_all(b"]")?;
                encode_partial(partial, ctx)
            }
            Self::BodyStructure => ctx.write_all(b"BODYSTRUCTURE"),
            Self::Envelope => ctx.write_all(b"ENVELOPE"),
            Self::Flags => ctx.write_all(b"FLAGS"),
            Self::InternalDate => ctx.write_all(b"INTERNALDATE"),
            Self::Rfc822 => ctx.write_all(b"RFC822"),
            Self::Rfc822Header => ctx.write_all(b"RFC822.HEADER"),
            Self::Rfc822Size => ctx.write_all(b"RFC822.SIZE"),
            Self::Rfc822Text => ctx.write_all(b"RFC822.TEXT"),
            Self::Uid => ctx.write_all(b"UID"),
            Self::Binary {
                section,
                partial,
                peek,
            } => {
                ctx.write_all(if *peek { b"BINARY.PEEK[" } else { b"BINARY[" })?;
                join_serializable(section, b".", ctx)?;
                ctx.write_all(b"]")?;
                encode_partial(partial, ctx)
            }
            Self::BinarySize { section } => {
                ctx.write_all(b"BINARY.SIZE[")?;
                join_serializable(section, b".", ctx)?;
                ctx.write_all(b"]")
            }
        }
    }
}

fn encode_partial(
    partial: &Option<(u32, NonZeroU32)>,
    ctx: &mut EncodeContext,
) -> std::io::Result<()> {
    match partial {
        Some((origin, count)) => write!(ctx, "<{origin}.{count}>"),
        None => Ok(()),
    }
}

impl<'a> EncodeIntoContext for MessageDataItem<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Body(body) => {
                ctx.write_all(b"BODY ")?;
                body.encode_ctx(ctx)
            }
            Self::BodyExt {
                section,
                origin,
                data,
            } => {
                ctx.write_all(b"BODY[")?;
                if let Some(section) = section {
                    section.encode_ctx(ctx)?;
                }
                ctx.write_all(b"]")?;
                if let Some(origin) = origin {
                    write!(ctx, "<{origin}>")?;
                }
                ctx.write_all(b" ")?;
                data.encode_ctx(ctx)
            }
            Self::BodyStructure(body) => {
                ctx.write_all(b"BODYSTRUCTURE ")?;
                body.encode_ctx(ctx)
            }
            Self::Envelope(envelope) => {
                ctx.write_all(b"ENVELOPE ")?;
                envelope.encode_ctx(ctx)
            }
            Self::Flags(flags) => {
                ctx.write_all(b"FLAGS (")?;
                join_serializable(flags, b" ", ctx)?;
                ctx.write_all(b")")
            }
            Self::InternalDate(date_time) => {
                ctx.write_all(b"INTERNALDATE ")?;
                date_time.encode_ctx(ctx)
            }
            Self::Rfc822(data) => {
                ctx.write_all(b"RFC822 ")?;
                data.encode_ctx(ctx)
            }
            Self::Rfc822Header(data) => {
                ctx.write_all(b"RFC822.HEADER ")?;
                data.encode_ctx(ctx)
            }
            Self::Rfc822Size(size) => write!(ctx, "RFC822.SIZE {size}"),
            Self::Rfc822Text(data) => {
                ctx.write_all(b"RFC822.TEXT ")?;
                data.encode_ctx(ctx)
            }
            Self::Uid(uid) => write!(ctx, "UID {uid}"),
            Self::Binary { section, value } => {
                ctx.write_all(b"BINARY[")?;
                join_serializable(section, b".", ctx)?;
                ctx.write_all(b"] ")?;
                value.encode_ctx(ctx)
            }
            Self::BinarySize { section, size } => {
                ctx.write_all(b"BINARY.SIZE[")?;
                join_serializable(section, b".", ctx)?;
                write!(ctx, "] {size}")
            }
        }
    }
}

impl<'a> EncodeIntoContext for Section<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        let (part, text): (Option<&Part>, &[u8]) = match self {
            Self::Part(part) => return part.encode_ctx(ctx),
            Self::Header(part) => (part.as_ref(), b"HEADER"),
            Self::HeaderFields(part, _) => (part.as_ref(), b"HEADER.FIELDS"),
            Self::HeaderFieldsNot(part, _) => (part.as_ref(), b"HEADER.FIELDS.NOT"),
            Self::Text(part) => (part.as_ref(), b"TEXT"),
            Self::Mime(part) => (Some(part), b"MIME"),
        };

        if let Some(part) = part {
            part.encode_ctx(ctx)?;
            ctx.write_all(b".")?;
        }
        ctx.write_all(text)?;

        match self {
            Self::HeaderFields(_, fields) | Self::HeaderFieldsNot(_, fields) => {
                ctx.write_all(b" (")?;
                join_serializable(fields.as_ref(), b" ", ctx)?;
                ctx.write_all(b")")
            }
            _ => Ok(()),
        }
    }
}

impl EncodeIntoContext for Part {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        join_serializable(self.0.as_ref(), b".", ctx)
    }
}

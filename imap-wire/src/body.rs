use std::io::Write;

use abnf_core::streaming::sp;
use imap_wire_types::{
    body::{
        BasicFields, Body, BodyExtension, BodyStructure, Disposition, Language, Location,
        MultiPartExtensionData, SinglePartExtensionData, SpecificFields,
    },
    core::{IString, NString, Vec1},
};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, opt, value},
    multi::{many0, many1, separated_list0, separated_list1},
    sequence::{delimited, preceded, tuple},
};

use crate::{
    codec::{
        decode::{recursion_limit_exceeded, IMAPResult, RECURSION_LIMIT},
        encode::{
            utils::{join_serializable, List1AttributeValueOrNil},
            EncodeContext, EncodeIntoContext,
        },
    },
    core::{nil, nstring, number, string},
    envelope::envelope,
};

/// `body = "(" (body-type-1part / body-type-mpart) ")"`
///
/// `body` is recursive (`message/rfc822` and `multipart/*` contain bodies). Nesting deeper than
/// `remaining_recursions` is a [`RecursionLimitExceeded`](crate::codec::decode::IMAPErrorKind)
/// failure.
pub(crate) fn body(
    remaining_recursions: usize,
) -> impl Fn(&[u8]) -> IMAPResult<&[u8], BodyStructure> {
    move |input: &[u8]| body_limited(input, remaining_recursions)
}

fn body_limited<'a>(
    input: &'a [u8],
    remaining_recursions: usize,
) -> IMAPResult<&'a [u8], BodyStructure<'a>> {
    if remaining_recursions == 0 {
        return Err(recursion_limit_exceeded(input));
    }

    let nested = remaining_recursions - 1;

    delimited(
        tag(b"("),
        alt((
            move |input: &'a [u8]| body_type_1part(input, nested),
            move |input: &'a [u8]| body_type_mpart(input, nested),
        )),
        tag(b")"),
    )(input)
}

/// `body-type-1part = (body-type-basic / body-type-msg / body-type-text) [SP body-ext-1part]`
fn body_type_1part<'a>(
    input: &'a [u8],
    remaining_recursions: usize,
) -> IMAPResult<&'a [u8], BodyStructure<'a>> {
    let (remaining, ((basic, specific), extension_data)) = tuple((
        alt((
            move |input: &'a [u8]| body_type_msg(input, remaining_recursions),
            body_type_text,
            body_type_basic,
        )),
        opt(preceded(sp, body_ext_1part)),
    ))(input)?;

    Ok((
        remaining,
        BodyStructure::Single {
            body: Body { basic, specific },
            extension_data,
        },
    ))
}

/// `body-type-basic = media-basic SP body-fields`
pub(crate) fn body_type_basic(input: &[u8]) -> IMAPResult<&[u8], (BasicFields, SpecificFields)> {
    let (remaining, ((r#type, subtype), _, basic)) =
        tuple((media_basic, sp, body_fields))(input)?;

    Ok((remaining, (basic, SpecificFields::Basic { r#type, subtype })))
}

/// ```abnf
/// body-type-msg = media-message SP body-fields SP envelope SP body SP body-fld-lines
/// ```
fn body_type_msg(
    input: &[u8],
    remaining_recursions: usize,
) -> IMAPResult<&[u8], (BasicFields, SpecificFields)> {
    let (remaining, (_, _, basic, _, envelope, _, body_structure, _, number_of_lines)) =
        tuple((
            media_message,
            sp,
            body_fields,
            sp,
            envelope,
            sp,
            body(remaining_recursions),
            sp,
            number,
        ))(input)?;

    Ok((
        remaining,
        (
            basic,
            SpecificFields::Message {
                envelope: Box::new(envelope),
                body_structure: Box::new(body_structure),
                number_of_lines,
            },
        ),
    ))
}

/// `body-type-text = media-text SP body-fields SP body-fld-lines`
pub(crate) fn body_type_text(input: &[u8]) -> IMAPResult<&[u8], (BasicFields, SpecificFields)> {
    let (remaining, (subtype, _, basic, _, number_of_lines)) =
        tuple((media_text, sp, body_fields, sp, number))(input)?;

    Ok((
        remaining,
        (
            basic,
            SpecificFields::Text {
                subtype,
                number_of_lines,
            },
        ),
    ))
}

/// ```abnf
/// body-fields = body-fld-param SP
///               body-fld-id SP
///               body-fld-desc SP
///               body-fld-enc SP
///               body-fld-octets
/// ```
///
/// `body-fld-id` and `body-fld-desc` are `nstring`s, `body-fld-enc` is (simplified) a `string`.
pub(crate) fn body_fields(input: &[u8]) -> IMAPResult<&[u8], BasicFields> {
    let (remaining, (parameter_list, id, description, content_transfer_encoding, size)) =
        tuple((
            body_fld_param,
            preceded(sp, nstring),
            preceded(sp, nstring),
            preceded(sp, string),
            preceded(sp, body_fld_octets),
        ))(input)?;

    Ok((
        remaining,
        BasicFields {
            parameter_list,
            id,
            description,
            content_transfer_encoding,
            size,
        },
    ))
}

/// `body-fld-param = "(" string SP string *(SP string SP string) ")" / nil`
///
/// An empty list, i.e., `()`, is accepted as well. Some servers send it.
pub(crate) fn body_fld_param(input: &[u8]) -> IMAPResult<&[u8], Vec<(IString, IString)>> {
    alt((
        delimited(
            tag(b"("),
            separated_list0(
                sp,
                map(tuple((string, sp, string)), |(attribute, _, value)| {
                    (attribute, value)
                }),
            ),
            tag(b")"),
        ),
        value(Vec::new(), nil),
    ))(input)
}

/// `body-fld-octets = number`
///
/// # Quirks
///
/// Dovecot was observed to send `-1`. With `quirk_rectify_numbers`, a negative number is
/// rectified to `0`.
#[allow(clippy::needless_return)]
pub(crate) fn body_fld_octets(input: &[u8]) -> IMAPResult<&[u8], u32> {
    #[cfg(not(feature = "quirk_rectify_numbers"))]
    return number(input);

    #[cfg(feature = "quirk_rectify_numbers")]
    return alt((
        number,
        map(preceded(tag(b"-"), number), |number| {
            log::warn!("Rectified negative octet count -{number} to 0");
            0
        }),
    ))(input);
}

/// ```abnf
/// body-ext-1part = body-fld-md5
///                  [SP body-fld-dsp
///                    [SP body-fld-lang
///                      [SP body-fld-loc *(SP body-extension)]
///                    ]
///                  ]
/// ```
pub(crate) fn body_ext_1part(input: &[u8]) -> IMAPResult<&[u8], SinglePartExtensionData> {
    map(
        tuple((nstring, opt(preceded(sp, disposition)))),
        |(md5, tail)| SinglePartExtensionData { md5, tail },
    )(input)
}

/// ```abnf
/// body-ext-mpart = body-fld-param
///                  [SP body-fld-dsp
///                    [SP body-fld-lang
///                      [SP body-fld-loc *(SP body-extension)]
///                    ]
///                  ]
/// ```
pub(crate) fn body_ext_mpart(input: &[u8]) -> IMAPResult<&[u8], MultiPartExtensionData> {
    map(
        tuple((body_fld_param, opt(preceded(sp, disposition)))),
        |(parameter_list, tail)| MultiPartExtensionData {
            parameter_list,
            tail,
        },
    )(input)
}

/// The optional tail shared by `body-ext-1part` and `body-ext-mpart`.
fn disposition(input: &[u8]) -> IMAPResult<&[u8], Disposition> {
    map(
        tuple((body_fld_dsp, opt(preceded(sp, language)))),
        |(disposition, tail)| Disposition { disposition, tail },
    )(input)
}

fn language(input: &[u8]) -> IMAPResult<&[u8], Language> {
    map(
        tuple((body_fld_lang, opt(preceded(sp, location)))),
        |(language, tail)| Language { language, tail },
    )(input)
}

/// `body-fld-loc *(SP body-extension)`
fn location(input: &[u8]) -> IMAPResult<&[u8], Location> {
    map(
        tuple((nstring, many0(preceded(sp, body_extension(RECURSION_LIMIT))))),
        |(location, extensions)| Location {
            location,
            extensions,
        },
    )(input)
}

/// `body-fld-dsp = "(" string SP body-fld-param ")" / nil`
#[allow(clippy::type_complexity)]
pub(crate) fn body_fld_dsp(
    input: &[u8],
) -> IMAPResult<&[u8], Option<(IString, Vec<(IString, IString)>)>> {
    alt((
        delimited(
            tag(b"("),
            map(tuple((string, sp, body_fld_param)), |(kind, _, params)| {
                Some((kind, params))
            }),
            tag(b")"),
        ),
        value(None, nil),
    ))(input)
}

/// `body-fld-lang = nstring / "(" string *(SP string) ")"`
pub(crate) fn body_fld_lang(input: &[u8]) -> IMAPResult<&[u8], Vec<IString>> {
    alt((
        map(nstring, |nstring| nstring.into_option().into_iter().collect()),
        delimited(tag(b"("), separated_list1(sp, string), tag(b")")),
    ))(input)
}

/// ```abnf
/// body-extension = nstring /
///                  number /
///                  "(" body-extension *(SP body-extension) ")"
/// ```
///
/// Reserved for future extensions. Clients must accept (and keep) them.
pub(crate) fn body_extension(
    remaining_recursions: usize,
) -> impl Fn(&[u8]) -> IMAPResult<&[u8], BodyExtension> {
    move |input: &[u8]| body_extension_limited(input, remaining_recursions)
}

fn body_extension_limited(
    input: &[u8],
    remaining_recursions: usize,
) -> IMAPResult<&[u8], BodyExtension> {
    if remaining_recursions == 0 {
        return Err(recursion_limit_exceeded(input));
    }

    alt((
        map(nstring, BodyExtension::NString),
        map(number, BodyExtension::Number),
        map(
            delimited(
                tag(b"("),
                separated_list1(sp, body_extension(remaining_recursions - 1)),
                tag(b")"),
            ),
            |extensions| BodyExtension::List(Vec1::unvalidated(extensions)),
        ),
    ))(input)
}

/// `body-type-mpart = 1*body SP media-subtype [SP body-ext-mpart]`
fn body_type_mpart(input: &[u8], remaining_recursions: usize) -> IMAPResult<&[u8], BodyStructure> {
    let (remaining, (bodies, _, subtype, extension_data)) = tuple((
        many1(body(remaining_recursions)),
        sp,
        string,
        opt(preceded(sp, body_ext_mpart)),
    ))(input)?;

    Ok((
        remaining,
        BodyStructure::Multi {
            bodies: Vec1::unvalidated(bodies),
            subtype,
            extension_data,
        },
    ))
}

/// `media-basic = string SP media-subtype`
///
/// The ABNF lists well-known types, e.g., `"APPLICATION"`, but also allows any `string`.
pub(crate) fn media_basic(input: &[u8]) -> IMAPResult<&[u8], (IString, IString)> {
    let (remaining, (r#type, _, subtype)) = tuple((string, sp, string))(input)?;

    Ok((remaining, (r#type, subtype)))
}

/// `media-message = DQUOTE "MESSAGE" DQUOTE SP DQUOTE "RFC822" DQUOTE`
pub(crate) fn media_message(input: &[u8]) -> IMAPResult<&[u8], &[u8]> {
    tag_no_case(b"\"MESSAGE\" \"RFC822\"")(input)
}

/// `media-text = DQUOTE "TEXT" DQUOTE SP media-subtype`
pub(crate) fn media_text(input: &[u8]) -> IMAPResult<&[u8], IString> {
    preceded(tag_no_case(b"\"TEXT\" "), string)(input)
}

impl<'a> EncodeIntoContext for BodyStructure<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        ctx.write_all(b"(")?;
        match self {
            Self::Single {
                body,
                extension_data,
            } => {
                body.encode_ctx(ctx)?;
                if let Some(extension_data) = extension_data {
                    ctx.write_all(b" ")?;
                    extension_data.encode_ctx(ctx)?;
                }
            }
            Self::Multi {
                bodies,
                subtype,
                extension_data,
            } => {
                // No separator between the parts.
                join_serializable(bodies.as_ref(), b"", ctx)?;
                ctx.write_all(b" ")?;
                subtype.encode_ctx(ctx)?;
                if let Some(extension_data) = extension_data {
                    ctx.write_all(b" ")?;
                    extension_data.encode_ctx(ctx)?;
                }
            }
        }
        ctx.write_all(b")")
    }
}

impl<'a> EncodeIntoContext for Body<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match &self.specific {
            SpecificFields::Basic { r#type, subtype } => {
                r#type.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                subtype.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                self.basic.encode_ctx(ctx)
            }
            SpecificFields::Message {
                envelope,
                body_structure,
                number_of_lines,
            } => {
                ctx.write_all(b"\"MESSAGE\" \"RFC822\" ")?;
                self.basic.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                envelope.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                body_structure.encode_ctx(ctx)?;
                write!(ctx, " {number_of_lines}")
            }
            SpecificFields::Text {
                subtype,
                number_of_lines,
            } => {
                ctx.write_all(b"\"TEXT\" ")?;
                subtype.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                self.basic.encode_ctx(ctx)?;
                write!(ctx, " {number_of_lines}")
            }
        }
    }
}

impl<'a> EncodeIntoContext for BasicFields<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        List1AttributeValueOrNil(&self.parameter_list).encode_ctx(ctx)?;
        ctx.write_all(b" ")?;
        self.id.encode_ctx(ctx)?;
        ctx.write_all(b" ")?;
        self.description.encode_ctx(ctx)?;
        ctx.write_all(b" ")?;
        self.content_transfer_encoding.encode_ctx(ctx)?;
        write!(ctx, " {}", self.size)
    }
}

impl<'a> EncodeIntoContext for SinglePartExtensionData<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        self.md5.encode_ctx(ctx)?;
        encode_tail(&self.tail, ctx)
    }
}

impl<'a> EncodeIntoContext for MultiPartExtensionData<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        List1AttributeValueOrNil(&self.parameter_list).encode_ctx(ctx)?;
        encode_tail(&self.tail, ctx)
    }
}

impl<'a> EncodeIntoContext for Disposition<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match &self.disposition {
            Some((kind, params)) => {
                ctx.write_all(b"(")?;
                kind.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                List1AttributeValueOrNil(params).encode_ctx(ctx)?;
                ctx.write_all(b")")?;
            }
            None => ctx.write_all(b"NIL")?,
        }
        encode_tail(&self.tail, ctx)
    }
}

impl<'a> EncodeIntoContext for Language<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self.language.as_slice() {
            [] => ctx.write_all(b"NIL")?,
            [language] => language.encode_ctx(ctx)?,
            languages => {
                ctx.write_all(b"(")?;
                join_serializable(languages, b" ", ctx)?;
                ctx.write_all(b")")?;
            }
        }
        encode_tail(&self.tail, ctx)
    }
}

impl<'a> EncodeIntoContext for Location<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        self.location.encode_ctx(ctx)?;

        for extension in &self.extensions {
            ctx.write_all(b" ")?;
            extension.encode_ctx(ctx)?;
        }

        Ok(())
    }
}

impl<'a> EncodeIntoContext for BodyExtension<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::NString(nstring) => nstring.encode_ctx(ctx),
            Self::Number(number) => number.encode_ctx(ctx),
            Self::List(list) => {
                ctx.write_all(b"(")?;
                join_serializable(list.as_ref(), b" ", ctx)?;
                ctx.write_all(b")")
            }
        }
    }
}

fn encode_tail<T: EncodeIntoContext>(
    tail: &Option<T>,
    ctx: &mut EncodeContext,
) -> std::io::Result<()> {
    match tail {
        Some(tail) => {
            ctx.write_all(b" ")?;
            tail.encode_ctx(ctx)
        }
        None => Ok(()),
    }
}

use std::{io::Write, str::from_utf8};

#[cfg(not(feature = "quirk_crlf_relaxed"))]
use abnf_core::streaming::crlf;
#[cfg(feature = "quirk_crlf_relaxed")]
use abnf_core::streaming::crlf_relaxed as crlf;
use abnf_core::streaming::sp;
use base64::{engine::general_purpose::STANDARD as _base64, Engine};
use imap_wire_types::{
    core::{Tag, Text, Vec1},
    response::{
        Bye, Capability, Code, CodeOther, CommandContinuationRequest, Data, Greeting, GreetingKind,
        ReferralUrl, Response, Status, StatusBody, StatusKind, Tagged,
    },
    utils::indicators::is_text_char_except_resp_specials,
};
#[cfg(feature = "quirk_missing_text")]
use nom::combinator::peek;
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case, take_until, take_while, take_while1},
    combinator::{map, map_res, opt, value},
    error::ErrorKind,
    multi::separated_list1,
    sequence::{delimited, preceded, terminated, tuple},
};

use crate::{
    codec::{
        decode::{IMAPErrorKind, IMAPParseError, IMAPResult},
        encode::{
            utils::{join_serializable, prefix_serializable},
            EncodeContext, EncodeIntoContext,
        },
    },
    core::{atom, charset, nz_number, tag_imap, text},
    extensions::{
        enable::enable_data,
        metadata::metadata_code,
        uidplus::{resp_code_apnd, resp_code_copy},
    },
    fetch::msg_att,
    flag::flag_perm,
    mailbox::{encode_delimiter, mailbox_data},
};

// # Greeting

/// `greeting = "*" SP (resp-cond-auth / resp-cond-bye) CRLF`
pub(crate) fn greeting(input: &[u8]) -> IMAPResult<&[u8], Greeting> {
    let bye = map(resp_cond_bye, |Bye { code, text }| Greeting {
        kind: GreetingKind::Bye,
        code,
        text,
    });

    delimited(tag(b"* "), alt((resp_cond_auth, bye)), crlf)(input)
}

/// `resp-cond-auth = ("OK" / "PREAUTH") SP resp-text`
pub(crate) fn resp_cond_auth(input: &[u8]) -> IMAPResult<&[u8], Greeting> {
    let kind = alt((
        value(GreetingKind::Ok, tag_no_case(b"OK")),
        value(GreetingKind::PreAuth, tag_no_case(b"PREAUTH")),
    ));

    map(tuple((kind, sp_resp_text)), |(kind, (code, text))| {
        Greeting { kind, code, text }
    })(input)
}

/// `SP resp-text`
///
/// # Quirks
///
/// With `quirk_missing_text`, a condition without any text, e.g., `* OK\r\n`, is accepted and the
/// text is rectified to `...`.
fn sp_resp_text(input: &[u8]) -> IMAPResult<&[u8], (Option<Code>, Text)> {
    #[cfg(not(feature = "quirk_missing_text"))]
    let mut parser = preceded(sp, resp_text);
    #[cfg(feature = "quirk_missing_text")]
    let mut parser = alt((
        map(missing_text, |text| (None, text)),
        preceded(sp, resp_text),
    ));

    parser(input)
}

/// `SP text`, see [`sp_resp_text`] for the quirk.
fn sp_text(input: &[u8]) -> IMAPResult<&[u8], Text> {
    #[cfg(not(feature = "quirk_missing_text"))]
    let mut parser = preceded(sp, text);
    #[cfg(feature = "quirk_missing_text")]
    let mut parser = alt((missing_text, preceded(sp, text)));

    parser(input)
}

/// Nothing but CRLF where a text is required. The CRLF is not consumed.
#[cfg(feature = "quirk_missing_text")]
fn missing_text(input: &[u8]) -> IMAPResult<&[u8], Text> {
    let (remaining, _) = peek(crlf)(input)?;

    log::warn!("Rectified missing text to \"...\"");

    Ok((remaining, Text::unvalidated("...")))
}

/// `resp-text = ["[" resp-text-code "]" SP] text`
///
/// An unrecognized code is kept as [`Code::Other`].
///
/// # Quirks
///
/// With `quirk_missing_text`, `[<code>]` directly followed by CRLF is accepted and the text is
/// rectified to `...`.
pub(crate) fn resp_text(input: &[u8]) -> IMAPResult<&[u8], (Option<Code>, Text)> {
    // Without "[", everything is text. With "[", a code must follow.
    if opt(tag(b"["))(input)?.1.is_none() {
        return map(text, |text| (None, text))(input);
    }

    let code_other = map(take_while(is_text_char_except_resp_specials), |bytes| {
        Code::Other(CodeOther::unvalidated(bytes))
    });
    let code = preceded(
        tag(b"["),
        alt((
            terminated(resp_text_code, tag(b"]")),
            terminated(code_other, tag(b"]")),
        )),
    );

    map(tuple((code, sp_text)), |(code, text)| (Some(code), text))(input)
}

/// ```abnf
/// resp-text-code = "ALERT" /
///                  "BADCHARSET" [SP "(" charset *(SP charset) ")" ] /
///                  capability-data /
///                  "PARSE" /
///                  "PERMANENTFLAGS" SP "(" [flag-perm *(SP flag-perm)] ")" /
///                  "READ-ONLY" /
///                  "READ-WRITE" /
///                  "TRYCREATE" /
///                  "UIDNEXT" SP nz-number /
///                  "UIDVALIDITY" SP nz-number /
///                  "UNSEEN" SP nz-number /
///                  "REFERRAL" SP imapurl /                       ; RFC 2221
///                  "COMPRESSIONACTIVE" /                         ; RFC 4978
///                  "OVERQUOTA" /                                 ; RFC 9208
///                  "TOOBIG" /                                    ; RFC 4469
///                  "METADATA" SP ("LONGENTRIES" SP number /      ; RFC 5464
///                                 "MAXSIZE" SP number /
///                                 "TOOMANY" /
///                                 "NOPRIVATE") /
///                  "UNKNOWN-CTE" /                               ; RFC 3516
///                  resp-code-apnd / resp-code-copy / "UIDNOTSTICKY" /  ; RFC 4315
///                  atom [SP 1*<any TEXT-CHAR except "]">]
/// ```
///
/// The last alternative is handled by [`resp_text`], which keeps the raw bytes in
/// [`Code::Other`].
pub(crate) fn resp_text_code(input: &[u8]) -> IMAPResult<&[u8], Code> {
    alt((
        value(Code::Alert, tag_no_case(b"ALERT")),
        map(
            preceded(
                tag_no_case(b"BADCHARSET"),
                opt(delimited(
                    tag(b" ("),
                    separated_list1(sp, charset),
                    tag(b")"),
                )),
            ),
            |allowed| Code::BadCharset {
                allowed: allowed.unwrap_or_default(),
            },
        ),
        map(capability_data, Code::Capability),
        value(Code::Parse, tag_no_case(b"PARSE")),
        map(
            delimited(
                tag_no_case(b"PERMANENTFLAGS ("),
                opt(separated_list1(sp, flag_perm)),
                tag(b")"),
            ),
            |flags| Code::PermanentFlags(flags.unwrap_or_default()),
        ),
        value(Code::ReadOnly, tag_no_case(b"READ-ONLY")),
        value(Code::ReadWrite, tag_no_case(b"READ-WRITE")),
        value(Code::TryCreate, tag_no_case(b"TRYCREATE")),
        map(preceded(tag_no_case(b"UIDNEXT "), nz_number), Code::UidNext),
        map(
            preceded(tag_no_case(b"UIDVALIDITY "), nz_number),
            Code::UidValidity,
        ),
        map(preceded(tag_no_case(b"UNSEEN "), nz_number), Code::Unseen),
        map(preceded(tag_no_case(b"REFERRAL "), referral), Code::Referral),
        value(Code::CompressionActive, tag_no_case(b"COMPRESSIONACTIVE")),
        value(Code::OverQuota, tag_no_case(b"OVERQUOTA")),
        value(Code::TooBig, tag_no_case(b"TOOBIG")),
        map(
            preceded(tag_no_case(b"METADATA "), metadata_code),
            Code::Metadata,
        ),
        value(Code::UnknownCte, tag_no_case(b"UNKNOWN-CTE")),
        resp_code_apnd,
        resp_code_copy,
        value(Code::UidNotSticky, tag_no_case(b"UIDNOTSTICKY")),
    ))(input)
}

/// The IMAP URL (RFC 2192) is kept as is, i.e., not parsed into its parts.
fn referral(input: &[u8]) -> IMAPResult<&[u8], ReferralUrl> {
    let (remaining, url) = take_while1(is_text_char_except_resp_specials)(input)?;

    // Safety: `is_text_char_except_resp_specials` only accepts ASCII.
    #[allow(clippy::unwrap_used)]
    Ok((remaining, ReferralUrl::unvalidated(from_utf8(url).unwrap())))
}

/// `capability-data = "CAPABILITY" *(SP capability) SP "IMAP4rev1" *(SP capability)`
///
/// `IMAP4rev1` is not enforced to be present.
///
/// # Quirks
///
/// With `quirk_trailing_space_capability`, a trailing space, e.g., `* CAPABILITY IMAP4rev1 \r\n`,
/// is accepted.
pub(crate) fn capability_data(input: &[u8]) -> IMAPResult<&[u8], Vec1<Capability>> {
    let (remaining, capabilities) =
        preceded(tag_no_case(b"CAPABILITY "), separated_list1(sp, capability))(input)?;

    #[cfg(feature = "quirk_trailing_space_capability")]
    let remaining = match sp(remaining) {
        Ok((remaining, _)) => {
            log::warn!("Rectified trailing space in CAPABILITY data");
            remaining
        }
        Err(_) => remaining,
    };

    Ok((remaining, Vec1::unvalidated(capabilities)))
}

/// ```abnf
/// capability = ("AUTH=" auth-type) /
///              "COMPRESS=" algorithm / ; RFC 4978
///              atom
/// ```
pub(crate) fn capability(input: &[u8]) -> IMAPResult<&[u8], Capability> {
    map(atom, Capability::from)(input)
}

/// `resp-cond-bye = "BYE" SP resp-text`
pub(crate) fn resp_cond_bye(input: &[u8]) -> IMAPResult<&[u8], Bye> {
    map(preceded(tag_no_case(b"BYE"), sp_resp_text), |(code, text)| {
        Bye { code, text }
    })(input)
}

// # Response

/// `response = *(continue-req / response-data) response-done`
///
/// Decodes a single line of a response, i.e., one of the alternatives.
pub(crate) fn response(input: &[u8]) -> IMAPResult<&[u8], Response> {
    alt((
        map(continue_req, Response::CommandContinuationRequest),
        response_data,
        map(response_done, Response::Status),
    ))(input)
}

/// `continue-req = "+" SP (resp-text / base64) CRLF`
///
/// Base64 is tried first. A text that happens to be valid base64 is a SASL challenge.
///
/// # Quirks
///
/// With `quirk_empty_continue_req`, `+` directly followed by CRLF is accepted and the text is
/// rectified to `...`.
pub(crate) fn continue_req(input: &[u8]) -> IMAPResult<&[u8], CommandContinuationRequest> {
    // Postpones the construction of `CommandContinuationRequest` until parsing finished.
    enum Either<A, B> {
        Base64(A),
        Basic(B),
    }

    #[cfg(feature = "quirk_empty_continue_req")]
    if let Ok(rectified) = empty_continue_req(input) {
        return Ok(rectified);
    }

    let mut parser = tuple((
        tag(b"+ "),
        alt((
            #[cfg(not(feature = "quirk_crlf_relaxed"))]
            map(
                map_res(take_until("\r\n"), |line| _base64.decode(line)),
                Either::Base64,
            ),
            #[cfg(feature = "quirk_crlf_relaxed")]
            map(
                map_res(take_until("\n"), |line: &[u8]| {
                    _base64.decode(line.strip_suffix(b"\r").unwrap_or(line))
                }),
                Either::Base64,
            ),
            map(resp_text, Either::Basic),
        )),
        crlf,
    ));

    let (remaining, (_, either, _)) = parser(input)?;

    let continue_request = match either {
        Either::Base64(data) => CommandContinuationRequest::base64(data),
        Either::Basic((code, text)) => match CommandContinuationRequest::basic(code, text) {
            Ok(continue_request) => continue_request,
            Err(_) => {
                return Err(nom::Err::Failure(IMAPParseError {
                    input,
                    kind: IMAPErrorKind::Nom(ErrorKind::Verify),
                }))
            }
        },
    };

    Ok((remaining, continue_request))
}

/// `"+" CRLF`
#[cfg(feature = "quirk_empty_continue_req")]
fn empty_continue_req(input: &[u8]) -> IMAPResult<&[u8], CommandContinuationRequest> {
    let (remaining, _) = tuple((tag(b"+"), crlf))(input)?;

    log::warn!("Rectified empty continuation request to \"+ ...\"");

    // Safety: "..." is neither valid base64 nor starts with "[".
    #[allow(clippy::unwrap_used)]
    Ok((
        remaining,
        CommandContinuationRequest::basic(None, "...").unwrap(),
    ))
}

/// ```abnf
/// response-data = "*" SP (
///                   resp-cond-state /
///                   resp-cond-bye /
///                   mailbox-data /
///                   message-data /
///                   capability-data /
///                   enable-data      ; RFC 5161
///                 ) CRLF
/// ```
pub(crate) fn response_data(input: &[u8]) -> IMAPResult<&[u8], Response> {
    let status = alt((
        map(resp_cond_state, Status::Untagged),
        map(resp_cond_bye, Status::Bye),
    ));
    let data = alt((
        mailbox_data,
        message_data,
        map(capability_data, Data::Capability),
        enable_data,
    ));

    delimited(
        tag(b"* "),
        alt((map(status, Response::Status), map(data, Response::Data))),
        crlf,
    )(input)
}

/// `resp-cond-state = ("OK" / "NO" / "BAD") SP resp-text`
pub(crate) fn resp_cond_state(input: &[u8]) -> IMAPResult<&[u8], StatusBody> {
    let kind = alt((
        value(StatusKind::Ok, tag_no_case(b"OK")),
        value(StatusKind::No, tag_no_case(b"NO")),
        value(StatusKind::Bad, tag_no_case(b"BAD")),
    ));

    map(tuple((kind, sp_resp_text)), |(kind, (code, text))| {
        StatusBody { kind, code, text }
    })(input)
}

/// `response-done = response-tagged / response-fatal`
pub(crate) fn response_done(input: &[u8]) -> IMAPResult<&[u8], Status> {
    alt((response_tagged, response_fatal))(input)
}

/// `response-tagged = tag SP resp-cond-state CRLF`
pub(crate) fn response_tagged(input: &[u8]) -> IMAPResult<&[u8], Status> {
    map(
        terminated(tuple((terminated(tag_imap, sp), resp_cond_state)), crlf),
        |(tag, body)| Status::Tagged(Tagged { tag, body }),
    )(input)
}

/// `response-fatal = "*" SP resp-cond-bye CRLF`
pub(crate) fn response_fatal(input: &[u8]) -> IMAPResult<&[u8], Status> {
    map(delimited(tag(b"* "), resp_cond_bye, crlf), Status::Bye)(input)
}

/// `message-data = nz-number SP ("EXPUNGE" / ("FETCH" SP msg-att))`
pub(crate) fn message_data(input: &[u8]) -> IMAPResult<&[u8], Data> {
    let (remaining, seq) = terminated(nz_number, sp)(input)?;

    let expunge = value(None, tag_no_case(b"EXPUNGE"));
    let fetch = map(preceded(tag_no_case(b"FETCH "), msg_att), Some);
    let (remaining, items) = alt((expunge, fetch))(remaining)?;

    let data = match items {
        Some(items) => Data::Fetch { seq, items },
        None => Data::Expunge(seq),
    };

    Ok((remaining, data))
}

impl<'a> EncodeIntoContext for Greeting<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        ctx.write_all(b"* ")?;
        self.kind.encode_ctx(ctx)?;
        ctx.write_all(b" ")?;
        encode_resp_text(self.code.as_ref(), &self.text, ctx)?;
        ctx.write_all(b"\r\n")
    }
}

impl EncodeIntoContext for GreetingKind {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        ctx.write_all(match self {
            Self::Ok => b"OK",
            Self::PreAuth => b"PREAUTH",
            Self::Bye => b"BYE",
        })
    }
}

impl<'a> EncodeIntoContext for Response<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Status(status) => status.encode_ctx(ctx),
            Self::Data(data) => data.encode_ctx(ctx),
            Self::CommandContinuationRequest(continue_request) => continue_request.encode_ctx(ctx),
        }
    }
}

impl<'a> EncodeIntoContext for Status<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        fn format_status(
            tag: Option<&Tag>,
            status: &[u8],
            code: Option<&Code>,
            text: &Text,
            ctx: &mut EncodeContext,
        ) -> std::io::Result<()> {
            match tag {
                Some(tag) => tag.encode_ctx(ctx)?,
                None => ctx.write_all(b"*")?,
            }
            ctx.write_all(b" ")?;
            ctx.write_all(status)?;
            ctx.write_all(b" ")?;
            encode_resp_text(code, text, ctx)?;
            ctx.write_all(b"\r\n")
        }

        fn kind_to_bytes(kind: &StatusKind) -> &'static [u8] {
            match kind {
                StatusKind::Ok => b"OK",
                StatusKind::No => b"NO",
                StatusKind::Bad => b"BAD",
            }
        }

        match self {
            Self::Untagged(StatusBody { kind, code, text }) => {
                format_status(None, kind_to_bytes(kind), code.as_ref(), text, ctx)
            }
            Self::Tagged(Tagged {
                tag,
                body: StatusBody { kind, code, text },
            }) => format_status(Some(tag), kind_to_bytes(kind), code.as_ref(), text, ctx),
            Self::Bye(Bye { code, text }) => format_status(None, b"BYE", code.as_ref(), text, ctx),
        }
    }
}

fn encode_resp_text(
    code: Option<&Code>,
    text: &Text,
    ctx: &mut EncodeContext,
) -> std::io::Result<()> {
    if let Some(code) = code {
        ctx.write_all(b"[")?;
        code.encode_ctx(ctx)?;
        ctx.write_all(b"] ")?;
    }

    text.encode_ctx(ctx)
}

impl<'a> EncodeIntoContext for Code<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Alert => ctx.write_all(b"ALERT"),
            Self::BadCharset { allowed } => {
                if allowed.is_empty() {
                    ctx.write_all(b"BADCHARSET")
                } else {
                    ctx.write_all(b"BADCHARSET (")?;
                    join_serializable(allowed, b" ", ctx)?;
                    ctx.write_all(b")")
                }
            }
            Self::Capability(caps) => {
                ctx.write_all(b"CAPABILITY ")?;
                join_serializable(caps.as_ref(), b" ", ctx)
            }
            Self::Parse => ctx.write_all(b"PARSE"),
            Self::PermanentFlags(flags) => {
                ctx.write_all(b"PERMANENTFLAGS (")?;
                join_serializable(flags, b" ", ctx)?;
                ctx.write_all(b")")
            }
            Self::ReadOnly => ctx.write_all(b"READ-ONLY"),
            Self::ReadWrite => ctx.write_all(b"READ-WRITE"),
            Self::TryCreate => ctx.write_all(b"TRYCREATE"),
            Self::UidNext(next) => write!(ctx, "UIDNEXT {next}"),
            Self::UidValidity(validity) => write!(ctx, "UIDVALIDITY {validity}"),
            Self::Unseen(seq) => write!(ctx, "UNSEEN {seq}"),
            Self::Referral(url) => {
                ctx.write_all(b"REFERRAL ")?;
                ctx.write_all(url.inner().as_bytes())
            }
            Self::CompressionActive => ctx.write_all(b"COMPRESSIONACTIVE"),
            Self::OverQuota => ctx.write_all(b"OVERQUOTA"),
            Self::TooBig => ctx.write_all(b"TOOBIG"),
            Self::Metadata(code) => {
                ctx.write_all(b"METADATA ")?;
                code.encode_ctx(ctx)
            }
            Self::UnknownCte => ctx.write_all(b"UNKNOWN-CTE"),
            Self::AppendUid { uid_validity, uid } => {
                write!(ctx, "APPENDUID {uid_validity} {uid}")
            }
            Self::CopyUid {
                uid_validity,
                source,
                destination,
            } => {
                write!(ctx, "COPYUID {uid_validity} ")?;
                source.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                destination.encode_ctx(ctx)
            }
            Self::UidNotSticky => ctx.write_all(b"UIDNOTSTICKY"),
            Self::Other(other) => ctx.write_all(other.inner()),
        }
    }
}

impl<'a> EncodeIntoContext for Capability<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        write!(ctx, "{}", self)
    }
}

impl<'a> EncodeIntoContext for Data<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Capability(caps) => {
                ctx.write_all(b"* CAPABILITY ")?;
                join_serializable(caps.as_ref(), b" ", ctx)?;
            }
            Self::List {
                items,
                delimiter,
                mailbox,
            } => {
                ctx.write_all(b"* LIST (")?;
                join_serializable(items, b" ", ctx)?;
                ctx.write_all(b") ")?;
                encode_delimiter(delimiter, ctx)?;
                ctx.write_all(b" ")?;
                mailbox.encode_ctx(ctx)?;
            }
            Self::Lsub {
                items,
                delimiter,
                mailbox,
            } => {
                ctx.write_all(b"* LSUB (")?;
                join_serializable(items, b" ", ctx)?;
                ctx.write_all(b") ")?;
                encode_delimiter(delimiter, ctx)?;
                ctx.write_all(b" ")?;
                mailbox.encode_ctx(ctx)?;
            }
            Self::Status { mailbox, items } => {
                ctx.write_all(b"* STATUS ")?;
                mailbox.encode_ctx(ctx)?;
                ctx.write_all(b" (")?;
                join_serializable(items, b" ", ctx)?;
                ctx.write_all(b")")?;
            }
            Self::Search(seqs) => {
                ctx.write_all(b"* SEARCH")?;
                prefix_serializable(seqs, b" ", ctx)?;
            }
            Self::Sort(seqs) => {
                ctx.write_all(b"* SORT")?;
                prefix_serializable(seqs, b" ", ctx)?;
            }
            Self::Thread(threads) => {
                ctx.write_all(b"* THREAD")?;
                if !threads.is_empty() {
                    ctx.write_all(b" ")?;
                    for thread in threads {
                        thread.encode_ctx(ctx)?;
                    }
                }
            }
            Self::Flags(flags) => {
                ctx.write_all(b"* FLAGS (")?;
                join_serializable(flags, b" ", ctx)?;
                ctx.write_all(b")")?;
            }
            Self::Exists(count) => write!(ctx, "* {count} EXISTS")?,
            Self::Recent(count) => write!(ctx, "* {count} RECENT")?,
            Self::Expunge(seq) => write!(ctx, "* {seq} EXPUNGE")?,
            Self::Fetch { seq, items } => {
                write!(ctx, "* {seq} FETCH (")?;
                join_serializable(items.as_ref(), b" ", ctx)?;
                ctx.write_all(b")")?;
            }
            Self::Enabled { capabilities } => {
                ctx.write_all(b"* ENABLED")?;
                for capability in capabilities {
                    ctx.write_all(b" ")?;
                    capability.encode_ctx(ctx)?;
                }
            }
            Self::Quota { root, quotas } => {
                ctx.write_all(b"* QUOTA ")?;
                root.encode_ctx(ctx)?;
                ctx.write_all(b" (")?;
                join_serializable(quotas.as_ref(), b" ", ctx)?;
                ctx.write_all(b")")?;
            }
            Self::QuotaRoot { mailbox, roots } => {
                ctx.write_all(b"* QUOTAROOT ")?;
                mailbox.encode_ctx(ctx)?;
                for root in roots {
                    ctx.write_all(b" ")?;
                    root.encode_ctx(ctx)?;
                }
            }
            Self::Metadata { mailbox, items } => {
                ctx.write_all(b"* METADATA ")?;
                mailbox.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                items.encode_ctx(ctx)?;
            }
        }

        ctx.write_all(b"\r\n")
    }
}

impl<'a> EncodeIntoContext for CommandContinuationRequest<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        ctx.write_all(b"+ ")?;

        match self {
            Self::Basic(basic) => encode_resp_text(basic.code(), basic.text(), ctx)?,
            Self::Base64(data) => ctx.write_all(_base64.encode(data).as_bytes())?,
        }

        ctx.write_all(b"\r\n")
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use imap_wire_types::{
        auth::AuthMechanism,
        core::{Charset, Literal, NString, QuotedChar},
        extensions::{
            enable::CapabilityEnable,
            quota::{QuotaGet, Resource},
            uidplus::{UidElement, UidSet},
        },
        fetch::MessageDataItem,
        flag::{Flag, FlagNameAttribute, FlagPerm},
        mailbox::Mailbox,
        status::StatusDataItem,
    };

    use super::*;
    use crate::testing::{
        kat_inverse_greeting, kat_inverse_response, known_answer_test_encode,
        known_answer_test_parse,
    };

    fn nz(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_kat_inverse_greeting() {
        kat_inverse_greeting(&[
            (
                b"* OK [badcharset] ...\r\n".as_ref(),
                b"".as_ref(),
                Greeting::ok(Some(Code::BadCharset { allowed: vec![] }), "...").unwrap(),
            ),
            (
                b"* OK [UnSEEN 12345] ...\r\naaa",
                b"aaa",
                Greeting::ok(Some(Code::Unseen(nz(12345))), "...").unwrap(),
            ),
            (
                b"* OK [unseen 12345]  \r\n ",
                b" ",
                Greeting::ok(Some(Code::Unseen(nz(12345))), " ").unwrap(),
            ),
            (
                b"* PREAUTH [ALERT] hello\r\n",
                b"",
                Greeting::preauth(Some(Code::Alert), "hello").unwrap(),
            ),
            (
                b"* BYE Too many connections\r\n",
                b"",
                Greeting::bye(None, "Too many connections").unwrap(),
            ),
            (
                b"* OK [CAPABILITY IMAP4rev1 AUTH=PLAIN] Server ready\r\n",
                b"",
                Greeting::ok(
                    Some(Code::Capability(
                        Vec1::try_from(vec![
                            Capability::Imap4Rev1,
                            Capability::Auth(AuthMechanism::Plain),
                        ])
                        .unwrap(),
                    )),
                    "Server ready",
                )
                .unwrap(),
            ),
        ]);
    }

    #[test]
    fn test_parse_greeting_negative() {
        // A greeting is never tagged and can't be NO or BAD.
        assert!(greeting(b"A OK hello\r\n").is_err());
        assert!(greeting(b"* NO hello\r\n").is_err());
        assert!(greeting(b"* BAD hello\r\n").is_err());
        assert!(matches!(greeting(b"* OK hello"), Err(nom::Err::Incomplete(_))));
    }

    #[test]
    fn test_parse_resp_text_code() {
        let tests = [
            (
                b"BADCHARSET (UTF-8 \"a b\")]".as_ref(),
                b"]".as_ref(),
                Code::BadCharset {
                    allowed: vec![
                        Charset::try_from("UTF-8").unwrap(),
                        Charset::try_from("a b").unwrap(),
                    ],
                },
            ),
            (
                b"PERMANENTFLAGS (\\Deleted \\Seen \\*)]",
                b"]",
                Code::PermanentFlags(vec![
                    FlagPerm::Flag(Flag::Deleted),
                    FlagPerm::Flag(Flag::Seen),
                    FlagPerm::Asterisk,
                ]),
            ),
            (b"PERMANENTFLAGS ()]", b"]", Code::PermanentFlags(vec![])),
            (
                b"REFERRAL imap://user@host/INBOX]",
                b"]",
                Code::Referral(ReferralUrl::try_from("imap://user@host/INBOX").unwrap()),
            ),
            (
                b"APPENDUID 38505 3955]",
                b"]",
                Code::AppendUid {
                    uid_validity: nz(38505),
                    uid: nz(3955),
                },
            ),
            (
                b"COPYUID 38505 304,319:320 3956:3958]",
                b"]",
                Code::CopyUid {
                    uid_validity: nz(38505),
                    source: UidSet(
                        Vec1::try_from(vec![
                            UidElement::Single(nz(304)),
                            UidElement::Range(nz(319), nz(320)),
                        ])
                        .unwrap(),
                    ),
                    destination: UidSet::from(UidElement::Range(nz(3956), nz(3958))),
                },
            ),
            (b"uidnotsticky]", b"]", Code::UidNotSticky),
        ];

        for test in tests {
            known_answer_test_parse(test, resp_text_code);
        }
    }

    #[test]
    fn test_parse_resp_text() {
        let (rem, (code, text)) = resp_text(b"[X-UNKNOWN 1 2] hi\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(
            code,
            Some(Code::Other(
                CodeOther::try_from(b"X-UNKNOWN 1 2".as_ref()).unwrap()
            ))
        );
        assert_eq!(text, Text::try_from("hi").unwrap());

        let (rem, (code, text)) = resp_text(b"no code here\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(code, None);
        assert_eq!(text, Text::try_from("no code here").unwrap());

        // "[" must start a code.
        assert!(resp_text(b"[ALERT hello\r\n").is_err());
    }

    #[test]
    fn test_kat_inverse_response_data() {
        kat_inverse_response(&[
            (
                b"* CAPABILITY IMAP4REV1 IDLE X-GM-EXT-1\r\n".as_ref(),
                b"".as_ref(),
                Response::Data(Data::Capability(
                    Vec1::try_from(vec![
                        Capability::Imap4Rev1,
                        Capability::Idle,
                        Capability::try_from("X-GM-EXT-1").unwrap(),
                    ])
                    .unwrap(),
                )),
            ),
            (
                b"* LIST (\\Noselect) \"/\" bbb\r\n",
                b"",
                Response::Data(Data::List {
                    items: vec![FlagNameAttribute::Noselect],
                    delimiter: Some(QuotedChar::try_from('/').unwrap()),
                    mailbox: Mailbox::try_from("bbb").unwrap(),
                }),
            ),
            (
                b"* LSUB () NIL INBOX\r\n",
                b"",
                Response::Data(Data::Lsub {
                    items: vec![],
                    delimiter: None,
                    mailbox: Mailbox::Inbox,
                }),
            ),
            (
                b"* STATUS blurdybloop (MESSAGES 231 UIDNEXT 44292)\r\n",
                b"",
                Response::Data(Data::Status {
                    mailbox: Mailbox::try_from("blurdybloop").unwrap(),
                    items: vec![
                        StatusDataItem::Messages(231),
                        StatusDataItem::UidNext(nz(44292)),
                    ],
                }),
            ),
            (
                b"* SEARCH 1 2 3 42\r\n",
                b"",
                Response::Data(Data::Search(vec![nz(1), nz(2), nz(3), nz(42)])),
            ),
            (b"* SEARCH\r\n", b"", Response::Data(Data::Search(vec![]))),
            (
                b"* SORT 5 3\r\n",
                b"",
                Response::Data(Data::Sort(vec![nz(5), nz(3)])),
            ),
            (
                b"* FLAGS (\\Answered \\Flagged)\r\n",
                b"",
                Response::Data(Data::Flags(vec![Flag::Answered, Flag::Flagged])),
            ),
            (b"* 42 EXISTS\r\n", b"", Response::Data(Data::Exists(42))),
            (b"* 0 RECENT\r\n", b"", Response::Data(Data::Recent(0))),
            (
                b"* 123 EXPUNGE\r\n",
                b"",
                Response::Data(Data::Expunge(nz(123))),
            ),
            (
                b"* 12 FETCH (RFC822.SIZE 44827 UID 7)\r\n",
                b"",
                Response::Data(Data::Fetch {
                    seq: nz(12),
                    items: Vec1::try_from(vec![
                        MessageDataItem::Rfc822Size(44827),
                        MessageDataItem::Uid(nz(7)),
                    ])
                    .unwrap(),
                }),
            ),
            (
                b"* 1 FETCH (RFC822 {5}\r\nhello)\r\n",
                b"",
                Response::Data(Data::Fetch {
                    seq: nz(1),
                    items: Vec1::from(MessageDataItem::Rfc822(
                        NString::from(Literal::unvalidated(b"hello".as_ref())),
                    )),
                }),
            ),
            (
                b"* ENABLED METADATA\r\n",
                b"",
                Response::Data(Data::Enabled {
                    capabilities: vec![CapabilityEnable::Metadata],
                }),
            ),
            (
                b"* QUOTA \"\" (STORAGE 10 512)\r\n",
                b"",
                Response::Data(Data::Quota {
                    root: "".try_into().unwrap(),
                    quotas: Vec1::from(QuotaGet::new(Resource::Storage, 10, 512)),
                }),
            ),
            (
                b"* QUOTAROOT INBOX \"\"\r\n",
                b"",
                Response::Data(Data::QuotaRoot {
                    mailbox: Mailbox::Inbox,
                    roots: vec!["".try_into().unwrap()],
                }),
            ),
        ]);
    }

    #[test]
    fn test_kat_inverse_response_status() {
        kat_inverse_response(&[
            (
                b"A1 OK [READ-WRITE] SELECT completed\r\n".as_ref(),
                b"".as_ref(),
                Response::Status(
                    Status::ok(
                        Some(Tag::try_from("A1").unwrap()),
                        Some(Code::ReadWrite),
                        "SELECT completed",
                    )
                    .unwrap(),
                ),
            ),
            (
                b"A1 no hello\r\n",
                b"",
                Response::Status(
                    Status::no(Some(Tag::try_from("A1").unwrap()), None, "hello").unwrap(),
                ),
            ),
            (
                b"A1 BAD [PARSE] hello\r\n",
                b"",
                Response::Status(
                    Status::bad(Some(Tag::try_from("A1").unwrap()), Some(Code::Parse), "hello")
                        .unwrap(),
                ),
            ),
            (
                b"* OK [UIDVALIDITY 3857529045] UIDs valid\r\n",
                b"",
                Response::Status(
                    Status::ok(None, Some(Code::UidValidity(nz(3857529045))), "UIDs valid")
                        .unwrap(),
                ),
            ),
            (
                b"* NO [OVERQUOTA] Soft quota has been exceeded\r\n",
                b"",
                Response::Status(
                    Status::no(None, Some(Code::OverQuota), "Soft quota has been exceeded")
                        .unwrap(),
                ),
            ),
            (
                b"* BAD hello\r\n",
                b"",
                Response::Status(Status::bad(None, None, "hello").unwrap()),
            ),
            (
                b"* BYE [ALERT] hello\r\n",
                b"",
                Response::Status(Status::bye(Some(Code::Alert), "hello").unwrap()),
            ),
        ]);
    }

    #[test]
    fn test_kat_inverse_continue() {
        kat_inverse_response(&[
            (
                b"+ Ready for literal data\r\n".as_ref(),
                b"".as_ref(),
                Response::CommandContinuationRequest(
                    CommandContinuationRequest::basic(None, "Ready for literal data").unwrap(),
                ),
            ),
            (
                b"+ [ALERT] hello\r\n",
                b"",
                Response::CommandContinuationRequest(
                    CommandContinuationRequest::basic(Some(Code::Alert), "hello").unwrap(),
                ),
            ),
            (
                b"+ VGVzdA==\r\n",
                b"",
                Response::CommandContinuationRequest(CommandContinuationRequest::base64(
                    b"Test".as_ref(),
                )),
            ),
        ]);
    }

    #[test]
    fn test_parse_response_negative() {
        let tests = [
            b"* SEARCH 01\r\n".as_ref(),
            b"* 0 EXPUNGE\r\n",
            b"A1 MAYBE hello\r\n",
            b"+\r\n",
        ];

        for test in tests {
            #[cfg(feature = "quirk_empty_continue_req")]
            if test == b"+\r\n" {
                continue;
            }

            assert!(response(test).is_err(), "{}", String::from_utf8_lossy(test));
        }
    }

    #[test]
    fn test_encode_code() {
        let tests = [
            (Code::Alert, b"ALERT".as_ref()),
            (Code::BadCharset { allowed: vec![] }, b"BADCHARSET"),
            (
                Code::BadCharset {
                    allowed: vec![Charset::try_from("UTF-8").unwrap()],
                },
                b"BADCHARSET (UTF-8)",
            ),
            (Code::PermanentFlags(vec![]), b"PERMANENTFLAGS ()"),
            (
                Code::Referral(ReferralUrl::try_from("imap://host/").unwrap()),
                b"REFERRAL imap://host/",
            ),
            (
                Code::AppendUid {
                    uid_validity: nz(1),
                    uid: nz(2),
                },
                b"APPENDUID 1 2",
            ),
            (
                Code::Other(CodeOther::try_from(b"X-FOO bar".as_ref()).unwrap()),
                b"X-FOO bar",
            ),
        ];

        for test in tests {
            known_answer_test_encode(test);
        }
    }

    #[test]
    fn test_encode_data() {
        let tests = [
            (Data::Thread(vec![]), b"* THREAD\r\n".as_ref()),
            (Data::Sort(vec![]), b"* SORT\r\n"),
            (Data::Sort(vec![nz(7), nz(2)]), b"* SORT 7 2\r\n"),
            (Data::Search(vec![nz(1), nz(10)]), b"* SEARCH 1 10\r\n"),
            (
                Data::Enabled {
                    capabilities: vec![],
                },
                b"* ENABLED\r\n",
            ),
            (Data::Expunge(nz(3)), b"* 3 EXPUNGE\r\n"),
        ];

        for test in tests {
            known_answer_test_encode(test);
        }
    }

    #[test]
    fn test_parse_quirk_lines() {
        let text_quirk = cfg!(feature = "quirk_missing_text");

        // Lines seen from real servers and whether the enabled quirks make them decodable.
        let lines: [(&[u8], bool); 11] = [
            (b"* OK\r\n", text_quirk),
            (b"* NO\r\n", text_quirk),
            (b"A1 BAD\r\n", text_quirk),
            (b"* BYE\r\n", text_quirk),
            (b"* OK [READ-WRITE]\r\n", text_quirk),
            (b"A2 NO [TRYCREATE]\r\n", text_quirk),
            (
                b"* CAPABILITY IMAP4rev1 IDLE \r\n",
                cfg!(feature = "quirk_trailing_space_capability"),
            ),
            (
                b"* SEARCH 2 84 \r\n",
                cfg!(feature = "quirk_trailing_space_search"),
            ),
            (
                b"* STATUS INBOX (MESSAGES 2) \r\n",
                cfg!(feature = "quirk_trailing_space_status"),
            ),
            (b"+\r\n", cfg!(feature = "quirk_empty_continue_req")),
            (b"A3 OK done\n", cfg!(feature = "quirk_crlf_relaxed")),
        ];

        for (line, accepted) in lines {
            let got = response(line);
            assert_eq!(got.is_ok(), accepted, "{}", String::from_utf8_lossy(line));

            if let Ok((rem, _)) = got {
                assert!(rem.is_empty());
            }
        }

        // A single space is neither a text nor a missing one.
        assert!(response(b"* OK \r\n").is_err());
        assert!(response(b"* OK [ALERT] \r\n").is_err());
    }

    #[cfg(feature = "quirk_missing_text")]
    #[test]
    fn test_parse_missing_text_rectified() {
        let (_, got) = response(b"A1 BAD\r\n").unwrap();
        assert_eq!(
            got,
            Response::Status(Status::bad(Some(Tag::try_from("A1").unwrap()), None, "...").unwrap())
        );

        let (_, got) = response(b"* OK [UIDNEXT 7]\r\n").unwrap();
        assert_eq!(
            got,
            Response::Status(Status::ok(None, Some(Code::UidNext(nz(7))), "...").unwrap())
        );

        for line in [b"* OK\r\n".as_ref(), b"* PREAUTH\r\n", b"* BYE\r\n"] {
            let (rem, got) = greeting(line).unwrap();
            assert!(rem.is_empty());
            assert_eq!((got.code, got.text.inner()), (None, "..."));
        }

        // Still waiting for the LF.
        assert!(matches!(response(b"* OK\r"), Err(nom::Err::Incomplete(_))));
    }

    #[cfg(feature = "quirk_empty_continue_req")]
    #[test]
    fn test_parse_empty_continue_req_rectified() {
        let (rem, got) = continue_req(b"+\r\n").unwrap();
        assert!(rem.is_empty());
        assert_eq!(got, CommandContinuationRequest::basic(None, "...").unwrap());
    }
}

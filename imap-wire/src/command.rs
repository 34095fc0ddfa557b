use std::{borrow::Cow, io::Write};

#[cfg(not(feature = "quirk_crlf_relaxed"))]
use abnf_core::streaming::crlf;
#[cfg(feature = "quirk_crlf_relaxed")]
use abnf_core::streaming::crlf_relaxed as crlf;
use abnf_core::streaming::sp;
use base64::{engine::general_purpose::STANDARD as _base64, Engine};
use imap_wire_types::{
    auth::AuthMechanism,
    command::{Command, CommandBody},
    flag::{Flag, StoreResponse, StoreType},
    secret::Secret,
};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, opt, peek, value},
    multi::{separated_list0, separated_list1},
    sequence::{delimited, preceded, terminated, tuple},
};

use crate::{
    auth::auth_type,
    codec::{
        decode::{IMAPErrorKind, IMAPResult},
        encode::{utils::join_serializable, EncodeContext, EncodeIntoContext},
    },
    core::{astring, base64, tag_imap},
    datetime::date_time,
    extensions::{
        binary::literal_or_literal8,
        compress::compress,
        enable::enable,
        idle::idle,
        metadata::{getmetadata, setmetadata},
        quota::{getquota, getquotaroot, setquota},
        sort::sort,
        thread::thread,
        uidplus::uid_expunge,
    },
    fetch::macro_or_item_names,
    flag::{flag, flag_list},
    mailbox::{list_mailbox, mailbox},
    search::search,
    sequence::sequence_set,
    status::status_att,
};

/// `command = tag SP (command-any / command-auth / command-nonauth / command-select) CRLF`
///
/// A literal found on the way is reported together with the tag of this command.
pub(crate) fn command(input: &[u8]) -> IMAPResult<&[u8], Command> {
    let mut parser_tag = terminated(tag_imap, sp);
    let mut parser_body = terminated(
        alt((command_any, command_auth, command_nonauth, command_select)),
        crlf,
    );

    let (remaining, obtained_tag) = parser_tag(input)?;

    match parser_body(remaining) {
        Ok((remaining, body)) => Ok((
            remaining,
            Command {
                tag: obtained_tag,
                body,
            },
        )),
        Err(mut error) => {
            if let nom::Err::Error(ref mut err) | nom::Err::Failure(ref mut err) = error {
                if let IMAPErrorKind::Literal { ref mut tag, .. } = err.kind {
                    *tag = Some(obtained_tag);
                }
            }

            Err(error)
        }
    }
}

// # Command Any

/// `command-any = "CAPABILITY" / "LOGOUT" / "NOOP"`
///
/// Valid in all states.
pub(crate) fn command_any(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    alt((
        value(CommandBody::Capability, tag_no_case(b"CAPABILITY")),
        value(CommandBody::Logout, tag_no_case(b"LOGOUT")),
        value(CommandBody::Noop, tag_no_case(b"NOOP")),
    ))(input)
}

// # Command Auth

/// ```abnf
/// command-auth = append / create / delete / examine / list / lsub /
///                rename / select / status / subscribe / unsubscribe /
///                idle /                                         ; RFC 2177
///                enable /                                       ; RFC 5161
///                compress /                                     ; RFC 4978
///                getquota / getquotaroot / setquota /           ; RFC 9208
///                setmetadata / getmetadata                      ; RFC 5464
/// ```
///
/// Valid only in Authenticated or Selected state.
pub(crate) fn command_auth(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    alt((
        append,
        create,
        delete,
        examine,
        list,
        lsub,
        rename,
        select,
        status,
        subscribe,
        unsubscribe,
        idle,
        enable,
        compress,
        // Longest match first.
        getquotaroot,
        getquota,
        setquota,
        setmetadata,
        getmetadata,
    ))(input)
}

/// ```abnf
/// append = "APPEND" SP mailbox [SP flag-list] [SP date-time] SP literal
///                                                              ^^^^^^^
///                                                              literal8 with BINARY (RFC 3516)
/// ```
pub(crate) fn append(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    let mut parser = tuple((
        tag_no_case(b"APPEND "),
        mailbox,
        opt(preceded(sp, flag_list)),
        opt(preceded(sp, date_time)),
        sp,
        literal_or_literal8,
    ));

    let (remaining, (_, mailbox, flags, date, _, message)) = parser(input)?;

    Ok((
        remaining,
        CommandBody::Append {
            mailbox,
            flags: flags.unwrap_or_default(),
            date,
            message,
        },
    ))
}

/// `create = "CREATE" SP mailbox`
pub(crate) fn create(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    map(preceded(tag_no_case(b"CREATE "), mailbox), |mailbox| {
        CommandBody::Create { mailbox }
    })(input)
}

/// `delete = "DELETE" SP mailbox`
pub(crate) fn delete(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    map(preceded(tag_no_case(b"DELETE "), mailbox), |mailbox| {
        CommandBody::Delete { mailbox }
    })(input)
}

/// `examine = "EXAMINE" SP mailbox`
pub(crate) fn examine(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    map(preceded(tag_no_case(b"EXAMINE "), mailbox), |mailbox| {
        CommandBody::Examine { mailbox }
    })(input)
}

/// `list = "LIST" SP mailbox SP list-mailbox`
pub(crate) fn list(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    let mut parser = tuple((tag_no_case(b"LIST "), mailbox, sp, list_mailbox));

    let (remaining, (_, reference, _, mailbox_wildcard)) = parser(input)?;

    Ok((
        remaining,
        CommandBody::List {
            reference,
            mailbox_wildcard,
        },
    ))
}

/// `lsub = "LSUB" SP mailbox SP list-mailbox`
pub(crate) fn lsub(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    let mut parser = tuple((tag_no_case(b"LSUB "), mailbox, sp, list_mailbox));

    let (remaining, (_, reference, _, mailbox_wildcard)) = parser(input)?;

    Ok((
        remaining,
        CommandBody::Lsub {
            reference,
            mailbox_wildcard,
        },
    ))
}

/// `rename = "RENAME" SP mailbox SP mailbox`
pub(crate) fn rename(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    let mut parser = tuple((tag_no_case(b"RENAME "), mailbox, sp, mailbox));

    let (remaining, (_, from, _, to)) = parser(input)?;

    Ok((remaining, CommandBody::Rename { from, to }))
}

/// `select = "SELECT" SP mailbox`
pub(crate) fn select(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    map(preceded(tag_no_case(b"SELECT "), mailbox), |mailbox| {
        CommandBody::Select { mailbox }
    })(input)
}

/// `status = "STATUS" SP mailbox SP "(" status-att *(SP status-att) ")"`
pub(crate) fn status(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    let mut parser = tuple((
        tag_no_case(b"STATUS "),
        mailbox,
        sp,
        // An empty list is accepted.
        delimited(tag(b"("), separated_list0(sp, status_att), tag(b")")),
    ));

    let (remaining, (_, mailbox, _, item_names)) = parser(input)?;

    Ok((
        remaining,
        CommandBody::Status {
            mailbox,
            item_names,
        },
    ))
}

/// `subscribe = "SUBSCRIBE" SP mailbox`
pub(crate) fn subscribe(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    map(preceded(tag_no_case(b"SUBSCRIBE "), mailbox), |mailbox| {
        CommandBody::Subscribe { mailbox }
    })(input)
}

/// `unsubscribe = "UNSUBSCRIBE" SP mailbox`
pub(crate) fn unsubscribe(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    map(preceded(tag_no_case(b"UNSUBSCRIBE "), mailbox), |mailbox| {
        CommandBody::Unsubscribe { mailbox }
    })(input)
}

// # Command NonAuth

/// `command-nonauth = login / authenticate / "STARTTLS"`
///
/// Valid only in Not Authenticated state.
pub(crate) fn command_nonauth(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    alt((
        login,
        map(authenticate, |(mechanism, initial_response)| {
            CommandBody::Authenticate {
                mechanism,
                initial_response,
            }
        }),
        value(CommandBody::StartTLS, tag_no_case(b"STARTTLS")),
    ))(input)
}

/// ```abnf
/// login    = "LOGIN" SP userid SP password
/// userid   = astring
/// password = astring
/// ```
pub(crate) fn login(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    let mut parser = tuple((tag_no_case(b"LOGIN "), astring, sp, astring));

    let (remaining, (_, username, _, password)) = parser(input)?;

    Ok((
        remaining,
        CommandBody::Login {
            username,
            password: Secret::new(password),
        },
    ))
}

/// `authenticate = "AUTHENTICATE" SP auth-type [SP (base64 / "=")]` (RFC 4959)
///
/// `=` is an empty initial response. Further SASL data is exchanged as
/// [`AuthenticateData`](imap_wire_types::auth::AuthenticateData) lines.
#[allow(clippy::type_complexity)]
pub(crate) fn authenticate(
    input: &[u8],
) -> IMAPResult<&[u8], (AuthMechanism, Option<Secret<Cow<[u8]>>>)> {
    let mut parser = tuple((
        tag_no_case(b"AUTHENTICATE "),
        auth_type,
        opt(preceded(
            sp,
            alt((
                // `=` alone, not the padding of a base64 string.
                value(Cow::Borrowed(&b""[..]), terminated(tag(b"="), peek(crlf))),
                map(base64, Cow::Owned),
            )),
        )),
    ));

    let (remaining, (_, mechanism, initial_response)) = parser(input)?;

    Ok((remaining, (mechanism, initial_response.map(Secret::new))))
}

// # Command Select

/// ```abnf
/// command-select = "CHECK" / "CLOSE" / "EXPUNGE" / copy / fetch / store / uid / search /
///                  "UNSELECT" /         ; RFC 3691
///                  move /               ; RFC 6851
///                  sort / thread        ; RFC 5256
/// ```
///
/// Valid only in Selected state.
pub(crate) fn command_select(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    alt((
        value(CommandBody::Check, tag_no_case(b"CHECK")),
        value(CommandBody::Close, tag_no_case(b"CLOSE")),
        value(CommandBody::Expunge, tag_no_case(b"EXPUNGE")),
        copy,
        fetch,
        store,
        uid,
        search,
        value(CommandBody::Unselect, tag_no_case(b"UNSELECT")),
        r#move,
        sort,
        thread,
    ))(input)
}

/// `copy = "COPY" SP sequence-set SP mailbox`
pub(crate) fn copy(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    let mut parser = tuple((tag_no_case(b"COPY "), sequence_set, sp, mailbox));

    let (remaining, (_, sequence_set, _, mailbox)) = parser(input)?;

    Ok((
        remaining,
        CommandBody::Copy {
            sequence_set,
            mailbox,
            uid: false,
        },
    ))
}

/// `move = "MOVE" SP sequence-set SP mailbox` (RFC 6851)
pub(crate) fn r#move(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    let mut parser = tuple((tag_no_case(b"MOVE "), sequence_set, sp, mailbox));

    let (remaining, (_, sequence_set, _, mailbox)) = parser(input)?;

    Ok((
        remaining,
        CommandBody::Move {
            sequence_set,
            mailbox,
            uid: false,
        },
    ))
}

/// ```abnf
/// fetch = "FETCH" SP sequence-set SP ("ALL" /
///                                     "FULL" /
///                                     "FAST" /
///                                     fetch-att /
///                                     "(" fetch-att *(SP fetch-att) ")")
/// ```
pub(crate) fn fetch(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    let mut parser = tuple((
        tag_no_case(b"FETCH "),
        sequence_set,
        sp,
        macro_or_item_names,
    ));

    let (remaining, (_, sequence_set, _, macro_or_item_names)) = parser(input)?;

    Ok((
        remaining,
        CommandBody::Fetch {
            sequence_set,
            macro_or_item_names,
            uid: false,
        },
    ))
}

/// `store = "STORE" SP sequence-set SP store-att-flags`
pub(crate) fn store(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    let mut parser = tuple((tag_no_case(b"STORE "), sequence_set, sp, store_att_flags));

    let (remaining, (_, sequence_set, _, (kind, response, flags))) = parser(input)?;

    Ok((
        remaining,
        CommandBody::Store {
            sequence_set,
            kind,
            response,
            flags,
            uid: false,
        },
    ))
}

/// `store-att-flags = (["+" / "-"] "FLAGS" [".SILENT"]) SP (flag-list / (flag *(SP flag)))`
pub(crate) fn store_att_flags(
    input: &[u8],
) -> IMAPResult<&[u8], (StoreType, StoreResponse, Vec<Flag>)> {
    let mut parser = tuple((
        map(
            opt(alt((
                value(StoreType::Add, tag(b"+")),
                value(StoreType::Remove, tag(b"-")),
            ))),
            |kind| kind.unwrap_or(StoreType::Replace),
        ),
        tag_no_case(b"FLAGS"),
        map(opt(tag_no_case(b".SILENT")), |silent| match silent {
            Some(_) => StoreResponse::Silent,
            None => StoreResponse::Answer,
        }),
        sp,
        alt((flag_list, separated_list1(sp, flag))),
    ));

    let (remaining, (kind, _, response, _, flags)) = parser(input)?;

    Ok((remaining, (kind, response, flags)))
}

/// ```abnf
/// uid = "UID" SP (copy / fetch / search / store / move) /
///       uid-expunge                                      ; RFC 4315
/// ```
///
/// `UID SORT` and `UID THREAD` are handled by [`sort`] and [`thread`].
pub(crate) fn uid(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    let (remaining, mut body) = alt((
        uid_expunge,
        preceded(tag_no_case(b"UID "), alt((copy, fetch, search, store, r#move))),
    ))(input)?;

    if let CommandBody::Copy { uid, .. }
    | CommandBody::Fetch { uid, .. }
    | CommandBody::Search { uid, .. }
    | CommandBody::Store { uid, .. }
    | CommandBody::Move { uid, .. } = &mut body
    {
        *uid = true;
    }

    Ok((remaining, body))
}

impl<'a> EncodeIntoContext for Command<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        self.tag.encode_ctx(ctx)?;
        ctx.write_all(b" ")?;
        self.body.encode_ctx(ctx)?;
        ctx.write_all(b"\r\n")
    }
}

impl<'a> EncodeIntoContext for CommandBody<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Capability => ctx.write_all(b"CAPABILITY"),
            Self::Noop => ctx.write_all(b"NOOP"),
            Self::Logout => ctx.write_all(b"LOGOUT"),
            Self::StartTLS => ctx.write_all(b"STARTTLS"),
            Self::Authenticate {
                mechanism,
                initial_response,
            } => {
                ctx.write_all(b"AUTHENTICATE ")?;
                mechanism.encode_ctx(ctx)?;

                if let Some(initial_response) = initial_response {
                    ctx.write_all(b" ")?;

                    // RFC 4959: A zero-length initial response is sent as a single "=".
                    if initial_response.declassify().is_empty() {
                        ctx.write_all(b"=")?;
                    } else {
                        ctx.write_all(
                            _base64
                                .encode(initial_response.declassify())
                                .as_bytes(),
                        )?;
                    }
                }

                Ok(())
            }
            Self::Login { username, password } => {
                ctx.write_all(b"LOGIN ")?;
                username.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                password.declassify().encode_ctx(ctx)
            }
            Self::Select { mailbox } => {
                ctx.write_all(b"SELECT ")?;
                mailbox.encode_ctx(ctx)
            }
            Self::Unselect => ctx.write_all(b"UNSELECT"),
            Self::Examine { mailbox } => {
                ctx.write_all(b"EXAMINE ")?;
                mailbox.encode_ctx(ctx)
            }
            Self::Create { mailbox } => {
                ctx.write_all(b"CREATE ")?;
                mailbox.encode_ctx(ctx)
            }
            Self::Delete { mailbox } => {
                ctx.write_all(b"DELETE ")?;
                mailbox.encode_ctx(ctx)
            }
            Self::Rename { from, to } => {
                ctx.write_all(b"RENAME ")?;
                from.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                to.encode_ctx(ctx)
            }
            Self::Subscribe { mailbox } => {
                ctx.write_all(b"SUBSCRIBE ")?;
                mailbox.encode_ctx(ctx)
            }
            Self::Unsubscribe { mailbox } => {
                ctx.write_all(b"UNSUBSCRIBE ")?;
                mailbox.encode_ctx(ctx)
            }
            Self::List {
                reference,
                mailbox_wildcard,
            } => {
                ctx.write_all(b"LIST ")?;
                reference.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                mailbox_wildcard.encode_ctx(ctx)
            }
            Self::Lsub {
                reference,
                mailbox_wildcard,
            } => {
                ctx.write_all(b"LSUB ")?;
                reference.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                mailbox_wildcard.encode_ctx(ctx)
            }
            Self::Status {
                mailbox,
                item_names,
            } => {
                ctx.write_all(b"STATUS ")?;
                mailbox.encode_ctx(ctx)?;
                ctx.write_all(b" (")?;
                join_serializable(item_names, b" ", ctx)?;
                ctx.write_all(b")")
            }
            Self::Append {
                mailbox,
                flags,
                date,
                message,
            } => {
                ctx.write_all(b"APPEND ")?;
                mailbox.encode_ctx(ctx)?;

                if !flags.is_empty() {
                    ctx.write_all(b" (")?;
                    join_serializable(flags, b" ", ctx)?;
                    ctx.write_all(b")")?;
                }

                if let Some(date) = date {
                    ctx.write_all(b" ")?;
                    date.encode_ctx(ctx)?;
                }

                ctx.write_all(b" ")?;
                message.encode_ctx(ctx)
            }
            Self::Idle => ctx.write_all(b"IDLE"),
            Self::Enable { capabilities } => {
                ctx.write_all(b"ENABLE ")?;
                join_serializable(capabilities.as_ref(), b" ", ctx)
            }
            Self::Compress { algorithm } => {
                ctx.write_all(b"COMPRESS ")?;
                algorithm.encode_ctx(ctx)
            }
            Self::GetQuota { root } => {
                ctx.write_all(b"GETQUOTA ")?;
                root.encode_ctx(ctx)
            }
            Self::GetQuotaRoot { mailbox } => {
                ctx.write_all(b"GETQUOTAROOT ")?;
                mailbox.encode_ctx(ctx)
            }
            Self::SetQuota { root, quotas } => {
                ctx.write_all(b"SETQUOTA ")?;
                root.encode_ctx(ctx)?;
                ctx.write_all(b" (")?;
                join_serializable(quotas, b" ", ctx)?;
                ctx.write_all(b")")
            }
            Self::SetMetadata {
                mailbox,
                entry_values,
            } => {
                ctx.write_all(b"SETMETADATA ")?;
                mailbox.encode_ctx(ctx)?;
                ctx.write_all(b" (")?;
                join_serializable(entry_values.as_ref(), b" ", ctx)?;
                ctx.write_all(b")")
            }
            Self::GetMetadata {
                options,
                mailbox,
                entries,
            } => {
                ctx.write_all(b"GETMETADATA")?;

                if !options.is_empty() {
                    ctx.write_all(b" (")?;
                    join_serializable(options, b" ", ctx)?;
                    ctx.write_all(b")")?;
                }

                ctx.write_all(b" ")?;
                mailbox.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;

                if entries.len() == 1 {
                    entries.first().encode_ctx(ctx)
                } else {
                    ctx.write_all(b"(")?;
                    join_serializable(entries.as_ref(), b" ", ctx)?;
                    ctx.write_all(b")")
                }
            }
            Self::Check => ctx.write_all(b"CHECK"),
            Self::Close => ctx.write_all(b"CLOSE"),
            Self::Expunge => ctx.write_all(b"EXPUNGE"),
            Self::ExpungeUid { sequence_set } => {
                ctx.write_all(b"UID EXPUNGE ")?;
                sequence_set.encode_ctx(ctx)
            }
            Self::Search {
                charset,
                criteria,
                uid,
            } => {
                encode_uid_prefix(*uid, ctx)?;
                ctx.write_all(b"SEARCH")?;

                if let Some(charset) = charset {
                    ctx.write_all(b" CHARSET ")?;
                    charset.encode_ctx(ctx)?;
                }

                ctx.write_all(b" ")?;
                join_serializable(criteria.as_ref(), b" ", ctx)
            }
            Self::Sort {
                sort_criteria,
                charset,
                search_criteria,
                uid,
            } => {
                encode_uid_prefix(*uid, ctx)?;
                ctx.write_all(b"SORT (")?;
                join_serializable(sort_criteria.as_ref(), b" ", ctx)?;
                ctx.write_all(b") ")?;
                charset.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                join_serializable(search_criteria.as_ref(), b" ", ctx)
            }
            Self::Thread {
                algorithm,
                charset,
                search_criteria,
                uid,
            } => {
                encode_uid_prefix(*uid, ctx)?;
                ctx.write_all(b"THREAD ")?;
                algorithm.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                charset.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                join_serializable(search_criteria.as_ref(), b" ", ctx)
            }
            Self::Fetch {
                sequence_set,
                macro_or_item_names,
                uid,
            } => {
                encode_uid_prefix(*uid, ctx)?;
                ctx.write_all(b"FETCH ")?;
                sequence_set.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                macro_or_item_names.encode_ctx(ctx)
            }
            Self::Store {
                sequence_set,
                kind,
                response,
                flags,
                uid,
            } => {
                encode_uid_prefix(*uid, ctx)?;
                ctx.write_all(b"STORE ")?;
                sequence_set.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;

                match kind {
                    StoreType::Add => ctx.write_all(b"+")?,
                    StoreType::Remove => ctx.write_all(b"-")?,
                    StoreType::Replace => {}
                }

                ctx.write_all(b"FLAGS")?;

                if let StoreResponse::Silent = response {
                    ctx.write_all(b".SILENT")?;
                }

                ctx.write_all(b" (")?;
                join_serializable(flags, b" ", ctx)?;
                ctx.write_all(b")")
            }
            Self::Copy {
                sequence_set,
                mailbox,
                uid,
            } => {
                encode_uid_prefix(*uid, ctx)?;
                ctx.write_all(b"COPY ")?;
                sequence_set.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                mailbox.encode_ctx(ctx)
            }
            Self::Move {
                sequence_set,
                mailbox,
                uid,
            } => {
                encode_uid_prefix(*uid, ctx)?;
                ctx.write_all(b"MOVE ")?;
                sequence_set.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                mailbox.encode_ctx(ctx)
            }
        }
    }
}

fn encode_uid_prefix(uid: bool, ctx: &mut EncodeContext) -> std::io::Result<()> {
    if uid {
        ctx.write_all(b"UID ")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use imap_wire_types::{
        core::{Literal, LiteralMode, Tag, Vec1},
        datetime::DateTime,
        extensions::binary::{Literal8, LiteralOrLiteral8},
        fetch::{Macro, MessageDataItemName},
        mailbox::{ListMailbox, Mailbox},
        search::SearchKey,
        sequence::SequenceSet,
        status::StatusDataItemName,
    };

    use super::*;
    use crate::{
        codec::decode::IMAPParseError,
        testing::{kat_inverse_command, known_answer_test_encode},
    };

    #[test]
    fn test_parse_command_literal_carries_tag() {
        match command(b"A1 LOGIN {5}\r\n") {
            Err(nom::Err::Failure(IMAPParseError {
                kind: IMAPErrorKind::Literal { tag, length, mode },
                ..
            })) => {
                assert_eq!(tag, Some(Tag::try_from("A1").unwrap()));
                assert_eq!(length, 5);
                assert_eq!(mode, LiteralMode::Sync);
            }
            got => panic!("unexpected: {got:?}"),
        }
    }

    #[test]
    fn test_parse_authenticate() {
        let tests: [(&[u8], Option<&[u8]>); 4] = [
            (b"AUTHENTICATE PLAIN\r\n", None),
            (b"authenticate plain =\r\n", Some(b"")),
            (b"AUTHENTICATE PLAIN AGFsaWNlAHBhc3M=\r\n", Some(b"\x00alice\x00pass")),
            (b"AUTHENTICATE PLAIN VGVzdA==\r\n", Some(b"Test")),
        ];

        for (input, expected) in tests {
            let (rem, (mechanism, initial_response)) = authenticate(input).unwrap();
            assert_eq!(rem, b"\r\n");
            assert_eq!(mechanism, AuthMechanism::Plain);
            assert_eq!(
                initial_response.as_ref().map(|ir| ir.declassify().as_ref()),
                expected
            );
        }
    }

    #[test]
    fn test_parse_store_att_flags() {
        let (rem, (kind, response, flags)) = store_att_flags(b"-FLAGS \\Seen \\Draft\r\n").unwrap();
        assert_eq!(rem, b"\r\n");
        assert_eq!(kind, StoreType::Remove);
        assert_eq!(response, StoreResponse::Answer);
        assert_eq!(flags, vec![Flag::Seen, Flag::Draft]);

        let (_, (kind, response, flags)) = store_att_flags(b"flags.silent ()\r\n").unwrap();
        assert_eq!(kind, StoreType::Replace);
        assert_eq!(response, StoreResponse::Silent);
        assert!(flags.is_empty());
    }

    #[test]
    fn test_parse_uid_sets_flag() {
        for input in [
            b"UID COPY 1 a\r\n".as_ref(),
            b"UID FETCH 1 UID\r\n",
            b"UID SEARCH ALL\r\n",
            b"UID STORE 1 FLAGS ()\r\n",
            b"UID MOVE 1 a\r\n",
        ] {
            let (_, body) = uid(input).unwrap();
            match body {
                CommandBody::Copy { uid, .. }
                | CommandBody::Fetch { uid, .. }
                | CommandBody::Search { uid, .. }
                | CommandBody::Store { uid, .. }
                | CommandBody::Move { uid, .. } => assert!(uid),
                other => panic!("unexpected: {other:?}"),
            }
        }

        let (_, body) = uid(b"UID EXPUNGE 3:5\r\n").unwrap();
        assert_eq!(
            body,
            CommandBody::ExpungeUid {
                sequence_set: SequenceSet::try_from("3:5").unwrap()
            }
        );

        assert!(uid(b"UID CHECK\r\n").is_err());
    }

    #[test]
    fn test_kat_inverse_command_any_and_nonauth() {
        kat_inverse_command(&[
            (
                b"A capability\r\n".as_ref(),
                b"".as_ref(),
                Command::new("A", CommandBody::Capability).unwrap(),
            ),
            (
                b"A LOGOUT\r\n?",
                b"?",
                Command::new("A", CommandBody::Logout).unwrap(),
            ),
            (
                b"A STARTTLS\r\n",
                b"",
                Command::new("A", CommandBody::StartTLS).unwrap(),
            ),
            (
                b"A LOGIN alice \"a b\"\r\n",
                b"",
                Command::new("A", CommandBody::login("alice", "a b").unwrap()).unwrap(),
            ),
            (
                b"A AUTHENTICATE XOAUTH2\r\n",
                b"",
                Command::new("A", CommandBody::authenticate(AuthMechanism::XOAuth2)).unwrap(),
            ),
            (
                b"A AUTHENTICATE PLAIN VGVzdA==\r\n",
                b"",
                Command::new(
                    "A",
                    CommandBody::authenticate_with_ir(AuthMechanism::Plain, b"Test".as_ref()),
                )
                .unwrap(),
            ),
        ]);
    }

    #[test]
    fn test_kat_inverse_command_auth() {
        kat_inverse_command(&[
            (
                b"A CREATE inbox.foo\r\n".as_ref(),
                b"".as_ref(),
                Command::new("A", CommandBody::create("inbox.foo").unwrap()).unwrap(),
            ),
            (
                b"A DELETE foo\r\n",
                b"",
                Command::new("A", CommandBody::delete("foo").unwrap()).unwrap(),
            ),
            (
                b"A EXAMINE INBOX\r\n",
                b"",
                Command::new("A", CommandBody::examine("inbox").unwrap()).unwrap(),
            ),
            (
                b"A RENAME a b\r\n",
                b"",
                Command::new("A", CommandBody::rename("a", "b").unwrap()).unwrap(),
            ),
            (
                b"A SUBSCRIBE a\r\n",
                b"",
                Command::new("A", CommandBody::subscribe("a").unwrap()).unwrap(),
            ),
            (
                b"A UNSUBSCRIBE a\r\n",
                b"",
                Command::new("A", CommandBody::unsubscribe("a").unwrap()).unwrap(),
            ),
            (
                b"A LIST \"\" %\r\n",
                b"",
                Command::new("A", CommandBody::list("", "%").unwrap()).unwrap(),
            ),
            (
                b"A LSUB foo *\r\n",
                b"",
                Command::new("A", CommandBody::lsub("foo", "*").unwrap()).unwrap(),
            ),
            (
                b"A STATUS blurdybloop (UIDNEXT MESSAGES)\r\n",
                b"",
                Command::new(
                    "A",
                    CommandBody::status(
                        "blurdybloop",
                        vec![StatusDataItemName::UidNext, StatusDataItemName::Messages],
                    )
                    .unwrap(),
                )
                .unwrap(),
            ),
            (
                b"A APPEND saved-messages (\\Seen) \"17-Jul-1996 02:44:25 -0700\" \
                  {5+}\r\nhello\r\n",
                b"",
                Command::new(
                    "A",
                    CommandBody::Append {
                        mailbox: Mailbox::try_from("saved-messages").unwrap(),
                        flags: vec![Flag::Seen],
                        date: Some(
                            DateTime::try_from(
                                chrono::DateTime::parse_from_rfc2822(
                                    "Wed, 17 Jul 1996 02:44:25 -0700",
                                )
                                .unwrap(),
                            )
                            .unwrap(),
                        ),
                        message: LiteralOrLiteral8::Literal(Literal::unvalidated_non_sync(
                            b"hello".as_ref(),
                        )),
                    },
                )
                .unwrap(),
            ),
            (
                b"A APPEND INBOX ~{3}\r\n\x00\x01\x02\r\n",
                b"",
                Command::new(
                    "A",
                    CommandBody::Append {
                        mailbox: Mailbox::Inbox,
                        flags: vec![],
                        date: None,
                        message: LiteralOrLiteral8::Literal8(Literal8::new(
                            b"\x00\x01\x02".as_ref(),
                            LiteralMode::Sync,
                        )),
                    },
                )
                .unwrap(),
            ),
        ]);
    }

    #[test]
    fn test_kat_inverse_command_select() {
        kat_inverse_command(&[
            (
                b"A CHECK\r\n".as_ref(),
                b"".as_ref(),
                Command::new("A", CommandBody::Check).unwrap(),
            ),
            (
                b"A close\r\n",
                b"",
                Command::new("A", CommandBody::Close).unwrap(),
            ),
            (
                b"A EXPUNGE\r\n",
                b"",
                Command::new("A", CommandBody::Expunge).unwrap(),
            ),
            (
                b"A UNSELECT\r\n",
                b"",
                Command::new("A", CommandBody::Unselect).unwrap(),
            ),
            (
                b"A COPY 2:4 MEETING\r\n",
                b"",
                Command::new("A", CommandBody::copy("2:4", "MEETING", false).unwrap()).unwrap(),
            ),
            (
                b"A UID MOVE 42 foo\r\n",
                b"",
                Command::new("A", CommandBody::r#move("42", "foo", true).unwrap()).unwrap(),
            ),
            (
                b"A FETCH 1:* (FLAGS UID)\r\n",
                b"",
                Command::new(
                    "A",
                    CommandBody::fetch(
                        "1:*",
                        vec![MessageDataItemName::Flags, MessageDataItemName::Uid],
                        false,
                    )
                    .unwrap(),
                )
                .unwrap(),
            ),
            (
                b"A FETCH 1 ALL\r\n",
                b"",
                Command::new("A", CommandBody::fetch("1", Macro::All, false).unwrap()).unwrap(),
            ),
            (
                b"A UID STORE 1,3 FLAGS (\\Deleted)\r\n",
                b"",
                Command::new(
                    "A",
                    CommandBody::store(
                        "1,3",
                        StoreType::Replace,
                        StoreResponse::Answer,
                        vec![Flag::Deleted],
                        true,
                    )
                    .unwrap(),
                )
                .unwrap(),
            ),
            (
                b"A STORE 1 -FLAGS.SILENT \\Seen\r\n",
                b"",
                Command::new(
                    "A",
                    CommandBody::store(
                        "1",
                        StoreType::Remove,
                        StoreResponse::Silent,
                        vec![Flag::Seen],
                        false,
                    )
                    .unwrap(),
                )
                .unwrap(),
            ),
            (
                b"A UID EXPUNGE 1:2\r\n",
                b"",
                Command::new(
                    "A",
                    CommandBody::ExpungeUid {
                        sequence_set: SequenceSet::try_from("1:2").unwrap(),
                    },
                )
                .unwrap(),
            ),
            (
                b"A SEARCH CHARSET UTF-8 SEEN\r\n",
                b"",
                Command::new(
                    "A",
                    CommandBody::search(
                        Some("UTF-8".try_into().unwrap()),
                        Vec1::from(SearchKey::Seen),
                        false,
                    ),
                )
                .unwrap(),
            ),
        ]);
    }

    #[test]
    fn test_parse_command_failures() {
        for input in [
            b"A NOOP \r\n".as_ref(),
            b"A SELECT\r\n",
            b"A UID NOOP\r\n",
            b"A FETCH 0 FLAGS\r\n",
            b"A STORE 1 *FLAGS (\\Seen)\r\n",
            b"A XYZZY\r\n",
        ] {
            assert!(
                matches!(command(input), Err(nom::Err::Error(_) | nom::Err::Failure(_))),
                "{}",
                String::from_utf8_lossy(input)
            );
        }
    }

    #[test]
    fn test_encode_command_body() {
        let tests = [
            (
                CommandBody::authenticate_with_ir(AuthMechanism::Plain, b"".as_ref()),
                b"AUTHENTICATE PLAIN =".as_ref(),
            ),
            (
                CommandBody::login("alice", "password").unwrap(),
                b"LOGIN alice password",
            ),
            (
                CommandBody::store(
                    "1:*",
                    StoreType::Add,
                    StoreResponse::Answer,
                    vec![Flag::Flagged],
                    false,
                )
                .unwrap(),
                b"STORE 1:* +FLAGS (\\Flagged)",
            ),
            (
                CommandBody::status("INBOX", vec![]).unwrap(),
                b"STATUS INBOX ()",
            ),
            (
                CommandBody::copy("1", "a b", true).unwrap(),
                b"UID COPY 1 \"a b\"",
            ),
        ];

        for test in tests {
            known_answer_test_encode(test);
        }
    }
}

pub mod decode;
pub mod encode;

/// Codec for greetings.
#[derive(Debug, Default)]
// `#[non_exhaustive]` keeps struct literal syntax out of user code so that configuration
// options can be added later.
#[non_exhaustive]
pub struct GreetingCodec;

/// Codec for commands.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct CommandCodec;

/// Codec for `AUTHENTICATE` continuation lines.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct AuthenticateDataCodec;

/// Codec for responses.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct ResponseCodec;

/// Codec for the `DONE` line that ends `IDLE`.
#[derive(Debug, Default)]
#[non_exhaustive]
pub struct IdleDoneCodec;

macro_rules! impl_codec_new {
    ($codec:ty) => {
        impl $codec {
            /// Create codec with default configuration.
            pub fn new() -> Self {
                Self::default()
            }
        }
    };
}

impl_codec_new!(GreetingCodec);
impl_codec_new!(CommandCodec);
impl_codec_new!(AuthenticateDataCodec);
impl_codec_new!(ResponseCodec);
impl_codec_new!(IdleDoneCodec);

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use imap_wire_types::{
        auth::{AuthMechanism, AuthenticateData},
        command::{Command, CommandBody},
        core::{IString, Literal, NString, Vec1},
        extensions::idle::IdleDone,
        fetch::{Macro, MessageDataItem},
        flag::{Flag, StoreResponse, StoreType},
        mailbox::Mailbox,
        response::{
            Capability, Code, CommandContinuationRequest, Data, Greeting, GreetingKind, Response,
            Status,
        },
        search::SearchKey,
    };

    use crate::testing::{
        kat_inverse_authenticate_data, kat_inverse_command, kat_inverse_done,
        kat_inverse_greeting, kat_inverse_response,
    };

    #[test]
    fn test_kat_inverse_greeting() {
        kat_inverse_greeting(&[
            (
                b"* OK [ALERT] Hello, World!\r\n".as_ref(),
                b"".as_ref(),
                Greeting::new(GreetingKind::Ok, Some(Code::Alert), "Hello, World!").unwrap(),
            ),
            (
                b"* OK [CAPABILITY IMAP4REV1 AUTH=PLAIN LITERAL+] ready\r\n",
                b"",
                Greeting::ok(
                    Some(Code::Capability(Vec1::unvalidated(vec![
                        Capability::Imap4Rev1,
                        Capability::Auth(AuthMechanism::Plain),
                        Capability::LiteralPlus,
                    ]))),
                    "ready",
                )
                .unwrap(),
            ),
            (
                b"* ByE .\r\n???",
                b"???",
                Greeting::new(GreetingKind::Bye, None, ".").unwrap(),
            ),
            (
                b"* preaUth x\r\n?",
                b"?",
                Greeting::new(GreetingKind::PreAuth, None, "x").unwrap(),
            ),
        ]);
    }

    #[test]
    fn test_kat_inverse_command() {
        kat_inverse_command(&[
            (
                b"a nOOP\r\n".as_ref(),
                b"".as_ref(),
                Command::new("a", CommandBody::Noop).unwrap(),
            ),
            (
                b"a SeLECT {5}\r\ninbox\r\nxxx",
                b"xxx",
                Command::new("a", CommandBody::Select { mailbox: Mailbox::Inbox }).unwrap(),
            ),
            (
                b"a LOGIN alice {4+}\r\npass\r\n",
                b"",
                Command::new(
                    "a",
                    CommandBody::login("alice", Literal::unvalidated_non_sync(b"pass".as_ref()))
                        .unwrap(),
                )
                .unwrap(),
            ),
            (
                b"b UID FETCH 1:* FAST\r\n",
                b"",
                Command::new(
                    "b",
                    CommandBody::fetch("1:*", Macro::Fast, true).unwrap(),
                )
                .unwrap(),
            ),
            (
                b"c STORE 1 +FLAGS.SILENT (\\Seen)\r\n",
                b"",
                Command::new(
                    "c",
                    CommandBody::store(
                        "1",
                        StoreType::Add,
                        StoreResponse::Silent,
                        vec![Flag::Seen],
                        false,
                    )
                    .unwrap(),
                )
                .unwrap(),
            ),
            (
                b"d SEARCH NOT SEEN\r\n",
                b"",
                Command::new(
                    "d",
                    CommandBody::search(
                        None,
                        Vec1::from(SearchKey::Not(Box::new(SearchKey::Seen))),
                        false,
                    ),
                )
                .unwrap(),
            ),
            (
                b"e AUTHENTICATE PLAIN =\r\n",
                b"",
                Command::new(
                    "e",
                    CommandBody::authenticate_with_ir(AuthMechanism::Plain, b"".as_ref()),
                )
                .unwrap(),
            ),
            (
                b"f IDLE\r\n",
                b"",
                Command::new("f", CommandBody::Idle).unwrap(),
            ),
        ]);
    }

    #[test]
    fn test_kat_inverse_response() {
        kat_inverse_response(&[
            (
                b"* SEARCH 1\r\n".as_ref(),
                b"".as_ref(),
                Response::Data(Data::Search(vec![NonZeroU32::new(1).unwrap()])),
            ),
            (
                b"* SEARCH\r\n???",
                b"???",
                Response::Data(Data::Search(vec![])),
            ),
            (
                b"* 1 FETCH (RFC822 {5}\r\nhello)\r\n",
                b"",
                Response::Data(Data::Fetch {
                    seq: NonZeroU32::new(1).unwrap(),
                    items: Vec1::from(MessageDataItem::Rfc822(NString(Some(
                        IString::Literal(Literal::try_from(b"hello".as_ref()).unwrap()),
                    )))),
                }),
            ),
            (
                b"* 3 EXPUNGE\r\n",
                b"",
                Response::Data(Data::expunge(3).unwrap()),
            ),
            (
                b"A1 OK [READ-WRITE] SELECT completed\r\n",
                b"",
                Response::Status(
                    Status::ok(
                        Some("A1".try_into().unwrap()),
                        Some(Code::ReadWrite),
                        "SELECT completed",
                    )
                    .unwrap(),
                ),
            ),
            (
                b"+ Ready for literal data\r\n",
                b"",
                Response::CommandContinuationRequest(
                    CommandContinuationRequest::basic(None, "Ready for literal data").unwrap(),
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
    fn test_kat_inverse_authenticate_data() {
        kat_inverse_authenticate_data(&[
            (
                b"VGVzdA==\r\n".as_ref(),
                b"".as_ref(),
                AuthenticateData::r#continue(b"Test".to_vec()),
            ),
            (
                b"AA==\r\n".as_ref(),
                b"".as_ref(),
                AuthenticateData::r#continue(b"\x00".to_vec()),
            ),
            (b"\r\n".as_ref(), b"".as_ref(), AuthenticateData::r#continue(vec![])),
            (b"*\r\n".as_ref(), b"".as_ref(), AuthenticateData::Cancel),
        ]);
    }

    #[test]
    fn test_kat_inverse_done() {
        kat_inverse_done(&[
            (b"done\r\n".as_ref(), b"".as_ref(), IdleDone),
            (b"DONE\r\nA1 NOOP\r\n".as_ref(), b"A1 NOOP\r\n".as_ref(), IdleDone),
        ]);
    }
}

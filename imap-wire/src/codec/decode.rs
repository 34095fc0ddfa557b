//! # Decoding of messages.
//!
//! You can use [`Decoder`]s to parse messages.
//!
//! IMAP literals make separating the parsing logic from the application logic difficult. When a
//! server recognizes a literal (e.g. `{42}\r\n`) in a command, it first needs to agree to receive
//! more data by sending a so-called "command continuation request" (`+ ...`). Without a command
//! continuation request, a client won't send more data, and the command parser on the server would
//! always return `Incomplete`. However, a server may also reject literals, e.g., because they are
//! too large.
//!
//! Thus, the parser must "pause" and give the caller a chance to accept or reject the literal.
//! This is what the `LiteralFound` variants are for. The caller must then read exactly `length`
//! more bytes, append them to the buffer, and call `decode` again with the *whole* buffer.
//!
//! # Example
//!
//! ```rust
//! use imap_wire::{
//!     decode::{CommandDecodeError, Decoder},
//!     imap_wire_types::core::{LiteralMode, Tag},
//!     CommandCodec,
//! };
//!
//! let codec = CommandCodec::default();
//!
//! // The client announces a literal ...
//! let mut buffer = b"A1 SELECT {5}\r\n".to_vec();
//!
//! match codec.decode(&buffer) {
//!     Err(CommandDecodeError::LiteralFound { tag, length, mode }) => {
//!         assert_eq!(tag, Tag::try_from("A1").unwrap());
//!         assert_eq!(length, 5);
//!         assert_eq!(mode, LiteralMode::Sync);
//!         // ... a server would send `+ ...` here ...
//!     }
//!     _ => unreachable!(),
//! }
//!
//! // ... and sends the literal data together with the rest of the command.
//! buffer.extend_from_slice(b"INBOX\r\n");
//!
//! let (remaining, command) = codec.decode(&buffer).unwrap();
//! assert!(remaining.is_empty());
//! assert_eq!(command.name(), "SELECT");
//! ```

use std::num::{ParseIntError, TryFromIntError};

use imap_wire_types::{
    auth::AuthenticateData,
    bounded_static::IntoBoundedStatic,
    command::Command,
    core::{LiteralMode, Tag},
    extensions::idle::IdleDone,
    response::{Greeting, Response},
};
use nom::error::{ErrorKind, FromExternalError, ParseError};

use crate::{
    auth::authenticate_data,
    codec::{AuthenticateDataCodec, CommandCodec, GreetingCodec, IdleDoneCodec, ResponseCodec},
    command::command,
    extensions::idle::idle_done,
    response::{greeting, response},
};

/// An extended version of [`nom::IResult`].
pub(crate) type IMAPResult<'a, I, O> = Result<(I, O), nom::Err<IMAPParseError<'a, I>>>;

/// An extended version of [`nom::error::Error`].
#[derive(Debug)]
pub(crate) struct IMAPParseError<'a, I> {
    #[allow(unused)]
    pub input: I,
    pub kind: IMAPErrorKind<'a>,
}

/// An extended version of [`nom::error::ErrorKind`].
#[derive(Debug)]
pub(crate) enum IMAPErrorKind<'a> {
    /// A literal was announced but its data is not available yet.
    ///
    /// The `literal` parser doesn't know the tag. `command` fills it in.
    Literal {
        tag: Option<Tag<'a>>,
        length: u32,
        mode: LiteralMode,
    },
    BadNumber,
    BadBase64,
    BadDateTime,
    LiteralContainsNull,
    RecursionLimitExceeded,
    Nom(ErrorKind),
}

/// How deep recursive productions, e.g., `body` or `search-key`, may nest.
pub(crate) const RECURSION_LIMIT: usize = 8;

pub(crate) fn recursion_limit_exceeded<'a, I>(input: I) -> nom::Err<IMAPParseError<'a, I>> {
    nom::Err::Failure(IMAPParseError {
        input,
        kind: IMAPErrorKind::RecursionLimitExceeded,
    })
}

impl<'a, I> ParseError<I> for IMAPParseError<'a, I> {
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Self {
            input,
            kind: IMAPErrorKind::Nom(kind),
        }
    }

    fn append(input: I, kind: ErrorKind, _: Self) -> Self {
        Self {
            input,
            kind: IMAPErrorKind::Nom(kind),
        }
    }
}

impl<'a, I> FromExternalError<I, ParseIntError> for IMAPParseError<'a, I> {
    fn from_external_error(input: I, _: ErrorKind, _: ParseIntError) -> Self {
        Self {
            input,
            kind: IMAPErrorKind::BadNumber,
        }
    }
}

impl<'a, I> FromExternalError<I, TryFromIntError> for IMAPParseError<'a, I> {
    fn from_external_error(input: I, _: ErrorKind, _: TryFromIntError) -> Self {
        Self {
            input,
            kind: IMAPErrorKind::BadNumber,
        }
    }
}

impl<'a, I> FromExternalError<I, base64::DecodeError> for IMAPParseError<'a, I> {
    fn from_external_error(input: I, _: ErrorKind, _: base64::DecodeError) -> Self {
        Self {
            input,
            kind: IMAPErrorKind::BadBase64,
        }
    }
}

/// Decoder.
///
/// Implemented for types that know how to decode a specific IMAP message. See [implementors].
///
/// [implementors]: Decoder#implementors
pub trait Decoder {
    type Message<'a>: Sized;
    type Error<'a>;

    fn decode<'a>(&self, input: &'a [u8])
    -> Result<(&'a [u8], Self::Message<'a>), Self::Error<'a>>;

    /// Decode and detach the message (and error) from the input buffer.
    fn decode_static<'a>(
        &self,
        input: &'a [u8],
    ) -> Result<(&'a [u8], Self::Message<'static>), Self::Error<'static>>
    where
        Self::Message<'a>: IntoBoundedStatic<Static = Self::Message<'static>>,
        Self::Error<'a>: IntoBoundedStatic<Static = Self::Error<'static>>,
    {
        let (remaining, value) = self.decode(input).map_err(IntoBoundedStatic::into_static)?;
        Ok((remaining, value.into_static()))
    }
}

/// Error during greeting decoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum GreetingDecodeError {
    /// More data is needed.
    Incomplete,

    /// Decoding failed.
    Failed,
}

/// Error during command decoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CommandDecodeError<'a> {
    /// More data is needed.
    Incomplete,

    /// More data is needed (and further action may be necessary).
    ///
    /// The decoder stopped at the beginning of literal data. Typically, a server MUST send a
    /// command continuation request to agree to the receival of the remaining data. This behaviour
    /// is different when `LITERAL+/LITERAL-` is used.
    ///
    /// # Note
    ///
    /// The server MUST accept or reject the literal. Otherwise, the client will wait forever.
    LiteralFound {
        /// The corresponding command (tag) to which this literal is bound.
        ///
        /// This is required to reject literals, e.g., when their length exceeds a limit.
        tag: Tag<'a>,

        /// Literal length.
        length: u32,

        /// Literal mode, i.e., sync or non-sync.
        mode: LiteralMode,
    },

    /// Decoding failed.
    Failed,
}

/// Error during authenticate data line decoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AuthenticateDataDecodeError {
    /// More data is needed.
    Incomplete,

    /// Decoding failed.
    Failed,
}

/// Error during response decoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ResponseDecodeError {
    /// More data is needed.
    Incomplete,

    /// The decoder stopped at the beginning of literal data.
    ///
    /// A client doesn't need to acknowledge literals sent by a server. The caller should read
    /// `length` more bytes and decode again.
    LiteralFound { length: u32, mode: LiteralMode },

    /// Decoding failed.
    Failed,
}

/// Error during idle done decoding.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IdleDoneDecodeError {
    /// More data is needed.
    Incomplete,

    /// Decoding failed.
    Failed,
}

macro_rules! impl_into_static_for_owned_error {
    ($error:ty) => {
        impl IntoBoundedStatic for $error {
            type Static = $error;

            fn into_static(self) -> Self::Static {
                self
            }
        }
    };
}

impl_into_static_for_owned_error!(GreetingDecodeError);
impl_into_static_for_owned_error!(AuthenticateDataDecodeError);
impl_into_static_for_owned_error!(ResponseDecodeError);
impl_into_static_for_owned_error!(IdleDoneDecodeError);

impl<'a> IntoBoundedStatic for CommandDecodeError<'a> {
    type Static = CommandDecodeError<'static>;

    fn into_static(self) -> Self::Static {
        match self {
            Self::Incomplete => CommandDecodeError::Incomplete,
            Self::LiteralFound { tag, length, mode } => CommandDecodeError::LiteralFound {
                tag: tag.into_static(),
                length,
                mode,
            },
            Self::Failed => CommandDecodeError::Failed,
        }
    }
}

// -------------------------------------------------------------------------------------------------

impl Decoder for GreetingCodec {
    type Message<'a> = Greeting<'a>;
    type Error<'a> = GreetingDecodeError;

    fn decode<'a>(
        &self,
        input: &'a [u8],
    ) -> Result<(&'a [u8], Self::Message<'a>), Self::Error<'a>> {
        match greeting(input) {
            Ok((rem, grt)) => Ok((rem, grt)),
            Err(nom::Err::Incomplete(_)) => Err(GreetingDecodeError::Incomplete),
            Err(nom::Err::Failure(_)) | Err(nom::Err::Error(_)) => Err(GreetingDecodeError::Failed),
        }
    }
}

impl Decoder for CommandCodec {
    type Message<'a> = Command<'a>;
    type Error<'a> = CommandDecodeError<'a>;

    fn decode<'a>(
        &self,
        input: &'a [u8],
    ) -> Result<(&'a [u8], Self::Message<'a>), Self::Error<'a>> {
        match command(input) {
            Ok((rem, cmd)) => Ok((rem, cmd)),
            Err(nom::Err::Incomplete(_)) => Err(CommandDecodeError::Incomplete),
            Err(nom::Err::Failure(error)) => match error {
                IMAPParseError {
                    input: _,
                    kind:
                        IMAPErrorKind::Literal {
                            tag: Some(tag),
                            length,
                            mode,
                        },
                } => Err(CommandDecodeError::LiteralFound { tag, length, mode }),
                _ => Err(CommandDecodeError::Failed),
            },
            Err(nom::Err::Error(_)) => Err(CommandDecodeError::Failed),
        }
    }
}

impl Decoder for ResponseCodec {
    type Message<'a> = Response<'a>;
    type Error<'a> = ResponseDecodeError;

    fn decode<'a>(
        &self,
        input: &'a [u8],
    ) -> Result<(&'a [u8], Self::Message<'a>), Self::Error<'a>> {
        match response(input) {
            Ok((rem, rsp)) => Ok((rem, rsp)),
            Err(nom::Err::Incomplete(_)) => Err(ResponseDecodeError::Incomplete),
            Err(nom::Err::Error(error) | nom::Err::Failure(error)) => match error {
                IMAPParseError {
                    kind: IMAPErrorKind::Literal { length, mode, .. },
                    ..
                } => Err(ResponseDecodeError::LiteralFound { length, mode }),
                _ => Err(ResponseDecodeError::Failed),
            },
        }
    }
}

impl Decoder for AuthenticateDataCodec {
    type Message<'a> = AuthenticateData<'a>;
    type Error<'a> = AuthenticateDataDecodeError;

    fn decode<'a>(
        &self,
        input: &'a [u8],
    ) -> Result<(&'a [u8], Self::Message<'a>), Self::Error<'a>> {
        match authenticate_data(input) {
            Ok((rem, rsp)) => Ok((rem, rsp)),
            Err(nom::Err::Incomplete(_)) => Err(AuthenticateDataDecodeError::Incomplete),
            Err(nom::Err::Failure(_)) | Err(nom::Err::Error(_)) => {
                Err(AuthenticateDataDecodeError::Failed)
            }
        }
    }
}

impl Decoder for IdleDoneCodec {
    type Message<'a> = IdleDone;
    type Error<'a> = IdleDoneDecodeError;

    fn decode<'a>(
        &self,
        input: &'a [u8],
    ) -> Result<(&'a [u8], Self::Message<'a>), Self::Error<'a>> {
        match idle_done(input) {
            Ok((rem, rsp)) => Ok((rem, rsp)),
            Err(nom::Err::Incomplete(_)) => Err(IdleDoneDecodeError::Incomplete),
            Err(nom::Err::Failure(_)) | Err(nom::Err::Error(_)) => {
                Err(IdleDoneDecodeError::Failed)
            }
        }
    }
}

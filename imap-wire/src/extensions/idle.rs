//! IDLE (RFC 2177)
//!
//! ```abnf
//! idle = "IDLE" CRLF "DONE"
//! ```
//!
//! `IDLE` is a regular command. `DONE` is not, it has its own codec.

use std::io::Write;

#[cfg(not(feature = "quirk_crlf_relaxed"))]
use abnf_core::streaming::crlf;
#[cfg(feature = "quirk_crlf_relaxed")]
use abnf_core::streaming::crlf_relaxed as crlf;
use imap_wire_types::{command::CommandBody, extensions::idle::IdleDone};
use nom::{bytes::streaming::tag_no_case, combinator::value, sequence::terminated};

use crate::codec::{
    decode::IMAPResult,
    encode::{EncodeContext, EncodeIntoContext},
};

/// `"IDLE"`
///
/// The CRLF is consumed by `command`.
pub(crate) fn idle(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    value(CommandBody::Idle, tag_no_case(b"IDLE"))(input)
}

/// `"DONE" CRLF`
///
/// Runs instead of `command` while a server is idling.
pub(crate) fn idle_done(input: &[u8]) -> IMAPResult<&[u8], IdleDone> {
    value(IdleDone, terminated(tag_no_case(b"DONE"), crlf))(input)
}

impl EncodeIntoContext for IdleDone {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        ctx.write_all(b"DONE\r\n")
    }
}

#[cfg(test)]
mod tests {
    use imap_wire_types::command::Command;

    use super::*;
    use crate::{
        codec::decode::{Decoder, IdleDoneDecodeError},
        testing::{kat_inverse_command, kat_inverse_done},
        IdleDoneCodec,
    };

    #[test]
    fn test_kat_inverse_command_idle() {
        kat_inverse_command(&[
            (
                b"A IDLE\r\n".as_ref(),
                b"".as_ref(),
                Command::new("A", CommandBody::Idle).unwrap(),
            ),
            (
                b"A idle\r\n?",
                b"?",
                Command::new("A", CommandBody::Idle).unwrap(),
            ),
        ]);
    }

    #[test]
    fn test_kat_inverse_done() {
        kat_inverse_done(&[
            (b"DONE\r\n".as_ref(), b"".as_ref(), IdleDone),
            (b"done\r\nA NOOP\r\n", b"A NOOP\r\n", IdleDone),
        ]);
    }

    #[test]
    fn test_decode_idle_done() {
        let tests = [
            (b"d".as_ref(), Err(IdleDoneDecodeError::Incomplete)),
            (b"don", Err(IdleDoneDecodeError::Incomplete)),
            (b"done", Err(IdleDoneDecodeError::Incomplete)),
            (b"done\r", Err(IdleDoneDecodeError::Incomplete)),
            (b"donee\r\n", Err(IdleDoneDecodeError::Failed)),
            (b" done\r\n", Err(IdleDoneDecodeError::Failed)),
            (b"done \r\n", Err(IdleDoneDecodeError::Failed)),
            (b"A NOOP\r\n", Err(IdleDoneDecodeError::Failed)),
        ];

        for (test, expected) in tests {
            assert_eq!(IdleDoneCodec::default().decode(test), expected);
        }
    }
}

//! UIDPLUS (RFC 4315)
//!
//! ```abnf
//! command-select =/ uid-expunge
//! resp-text-code =/ resp-code-apnd / resp-code-copy / "UIDNOTSTICKY"
//! ```

use std::{io::Write, num::NonZeroU32};

use abnf_core::streaming::sp;
use imap_wire_types::{
    command::CommandBody,
    core::Vec1,
    extensions::uidplus::{UidElement, UidSet},
    response::Code,
};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::map,
    multi::separated_list1,
    sequence::{preceded, separated_pair, tuple},
};

use crate::{
    codec::{
        decode::IMAPResult,
        encode::{utils::join_serializable, EncodeContext, EncodeIntoContext},
    },
    core::nz_number,
    sequence::sequence_set,
};

/// `uid-expunge = "UID" SP "EXPUNGE" SP sequence-set`
pub(crate) fn uid_expunge(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    map(
        preceded(tag_no_case(b"UID EXPUNGE "), sequence_set),
        |sequence_set| CommandBody::ExpungeUid { sequence_set },
    )(input)
}

/// ```abnf
/// resp-code-apnd = "APPENDUID" SP nz-number SP append-uid
/// append-uid     = uniqueid
/// ```
pub(crate) fn resp_code_apnd(input: &[u8]) -> IMAPResult<&[u8], Code> {
    map(
        tuple((tag_no_case(b"APPENDUID "), nz_number, sp, nz_number)),
        |(_, uid_validity, _, uid)| Code::AppendUid { uid_validity, uid },
    )(input)
}

/// `resp-code-copy = "COPYUID" SP nz-number SP uid-set SP uid-set`
pub(crate) fn resp_code_copy(input: &[u8]) -> IMAPResult<&[u8], Code> {
    map(
        tuple((tag_no_case(b"COPYUID "), nz_number, sp, uid_set, sp, uid_set)),
        |(_, uid_validity, _, source, _, destination)| Code::CopyUid {
            uid_validity,
            source,
            destination,
        },
    )(input)
}

/// `uid-set = (uniqueid / uid-range) *("," uid-set)`
pub(crate) fn uid_set(input: &[u8]) -> IMAPResult<&[u8], UidSet> {
    map(
        separated_list1(
            tag(b","),
            alt((
                map(uid_range, |(from, to)| UidElement::Range(from, to)),
                map(nz_number, UidElement::Single),
            )),
        ),
        |set| UidSet(Vec1::unvalidated(set)),
    )(input)
}

/// `uid-range = uniqueid ":" uniqueid`
pub(crate) fn uid_range(input: &[u8]) -> IMAPResult<&[u8], (NonZeroU32, NonZeroU32)> {
    separated_pair(nz_number, tag(b":"), nz_number)(input)
}

impl EncodeIntoContext for UidSet {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        join_serializable(self.0.as_ref(), b",", ctx)
    }
}

impl EncodeIntoContext for UidElement {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Single(uid) => uid.encode_ctx(ctx),
            Self::Range(from, to) => write!(ctx, "{from}:{to}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use imap_wire_types::{
        command::Command,
        core::Text,
        response::{Response, Status, StatusBody, StatusKind},
        sequence::SequenceSet,
    };

    use super::*;
    use crate::testing::{kat_inverse_command, kat_inverse_response, known_answer_test_parse};

    fn uid(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).unwrap()
    }

    #[test]
    fn test_kat_inverse_command_uid_expunge() {
        kat_inverse_command(&[
            (
                b"A UID EXPUNGE 1\r\n?".as_ref(),
                b"?".as_ref(),
                Command::new(
                    "A",
                    CommandBody::ExpungeUid {
                        sequence_set: SequenceSet::try_from("1").unwrap(),
                    },
                )
                .unwrap(),
            ),
            (
                b"A uid expunge 1:1337,*\r\n",
                b"",
                Command::new(
                    "A",
                    CommandBody::expunge_uid("1:1337,*").unwrap(),
                )
                .unwrap(),
            ),
        ]);
    }

    #[test]
    fn test_kat_inverse_response_uidplus() {
        kat_inverse_response(&[
            (
                b"* OK [UIDNOTSTICKY] ...\r\n???".as_ref(),
                b"???".as_ref(),
                Response::Status(Status::Untagged(StatusBody {
                    kind: StatusKind::Ok,
                    code: Some(Code::UidNotSticky),
                    text: Text::try_from("...").unwrap(),
                })),
            ),
            (
                b"* OK [APPENDUID 12345 1337] ...\r\n",
                b"",
                Response::Status(Status::Untagged(StatusBody {
                    kind: StatusKind::Ok,
                    code: Some(Code::AppendUid {
                        uid_validity: uid(12345),
                        uid: uid(1337),
                    }),
                    text: Text::try_from("...").unwrap(),
                })),
            ),
            (
                b"* OK [COPYUID 12345 1001:1005,7 1:5,6] ...\r\n",
                b"",
                Response::Status(Status::Untagged(StatusBody {
                    kind: StatusKind::Ok,
                    code: Some(Code::CopyUid {
                        uid_validity: uid(12345),
                        source: UidSet(
                            Vec1::try_from(vec![
                                UidElement::Range(uid(1001), uid(1005)),
                                UidElement::Single(uid(7)),
                            ])
                            .unwrap(),
                        ),
                        destination: UidSet(
                            Vec1::try_from(vec![
                                UidElement::Range(uid(1), uid(5)),
                                UidElement::Single(uid(6)),
                            ])
                            .unwrap(),
                        ),
                    }),
                    text: Text::try_from("...").unwrap(),
                })),
            ),
        ]);
    }

    #[test]
    fn test_parse_uid_set() {
        let tests = [
            (
                b"1 ".as_ref(),
                b" ".as_ref(),
                UidSet::from(uid(1)),
            ),
            (
                b"1:5 ",
                b" ",
                UidSet::from(UidElement::Range(uid(1), uid(5))),
            ),
        ];

        for test in tests {
            known_answer_test_parse(test, uid_set);
        }

        assert!(uid_set(b"* ").is_err());
        assert!(uid_set(b"0 ").is_err());
    }
}

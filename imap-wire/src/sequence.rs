use std::io::Write;

use imap_wire_types::{
    core::Vec1,
    sequence::{SeqOrUid, Sequence, SequenceSet},
};
use nom::{
    branch::alt,
    bytes::streaming::tag,
    combinator::{map, value},
    multi::separated_list1,
    sequence::separated_pair,
};

use crate::{
    codec::{
        decode::IMAPResult,
        encode::{utils::join_serializable, EncodeContext, EncodeIntoContext},
    },
    core::nz_number,
};

/// `sequence-set = (seq-number / seq-range) *("," (seq-number / seq-range))`
///
/// The order doesn't matter and overlaps are allowed, e.g., `*:4,5:7`.
pub(crate) fn sequence_set(input: &[u8]) -> IMAPResult<&[u8], SequenceSet> {
    map(
        separated_list1(
            tag(b","),
            alt((
                // `seq-range` first, because `seq-number` is a prefix of it.
                map(seq_range, |(from, to)| Sequence::Range(from, to)),
                map(seq_number, Sequence::Single),
            )),
        ),
        |set| SequenceSet(Vec1::unvalidated(set)),
    )(input)
}

/// `seq-range = seq-number ":" seq-number`
///
/// `2:4` and `4:2` are equivalent.
pub(crate) fn seq_range(input: &[u8]) -> IMAPResult<&[u8], (SeqOrUid, SeqOrUid)> {
    separated_pair(seq_number, tag(b":"), seq_number)(input)
}

/// `seq-number = nz-number / "*"`
pub(crate) fn seq_number(input: &[u8]) -> IMAPResult<&[u8], SeqOrUid> {
    alt((
        map(nz_number, SeqOrUid::Value),
        value(SeqOrUid::Asterisk, tag(b"*")),
    ))(input)
}

impl EncodeIntoContext for SequenceSet {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        join_serializable(self.0.as_ref(), b",", ctx)
    }
}

impl EncodeIntoContext for Sequence {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Single(seq_no) => seq_no.encode_ctx(ctx),
            Self::Range(from, to) => {
                from.encode_ctx(ctx)?;
                ctx.write_all(b":")?;
                to.encode_ctx(ctx)
            }
        }
    }
}

impl EncodeIntoContext for SeqOrUid {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::Value(number) => write!(ctx, "{number}"),
            Self::Asterisk => ctx.write_all(b"*"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use super::*;
    use crate::testing::known_answer_test_encode;

    fn value(number: u32) -> SeqOrUid {
        SeqOrUid::Value(NonZeroU32::new(number).unwrap())
    }

    #[test]
    fn test_parse_sequence_set() {
        let (rem, val) = sequence_set(b"1,2:*,*:5,7 ").unwrap();
        assert_eq!(rem, b" ");
        assert_eq!(
            val,
            SequenceSet(
                Vec1::try_from(vec![
                    Sequence::Single(value(1)),
                    Sequence::Range(value(2), SeqOrUid::Asterisk),
                    Sequence::Range(SeqOrUid::Asterisk, value(5)),
                    Sequence::Single(value(7)),
                ])
                .unwrap()
            )
        );
        assert_eq!(val, SequenceSet::try_from("1,2:*,*:5,7").unwrap());

        assert!(sequence_set(b"0 ").is_err());
        assert!(sequence_set(b",1 ").is_err());
        assert!(matches!(sequence_set(b"1:"), Err(nom::Err::Incomplete(_))));
    }

    #[test]
    fn test_encode_sequence_set() {
        let tests = [
            (SequenceSet::from(value(1)), b"1".as_ref()),
            (SequenceSet::from(SeqOrUid::Asterisk), b"*"),
            (SequenceSet::try_from("1:*").unwrap(), b"1:*"),
            (SequenceSet::try_from("5,1:3,*").unwrap(), b"5,1:3,*"),
        ];

        for test in tests {
            known_answer_test_encode(test);
        }
    }
}

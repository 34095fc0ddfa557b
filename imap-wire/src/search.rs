use std::io::Write;

use abnf_core::streaming::sp;
use imap_wire_types::{
    command::CommandBody,
    core::{Charset, Vec1},
    search::SearchKey,
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
        decode::{recursion_limit_exceeded, IMAPResult, RECURSION_LIMIT},
        encode::{utils::join_serializable, EncodeContext, EncodeIntoContext},
    },
    core::{astring, atom, charset, number},
    datetime::date,
    sequence::sequence_set,
};

/// `search = "SEARCH" [SP "CHARSET" SP charset] 1*(SP search-key)`
pub(crate) fn search(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    let mut parser = tuple((
        tag_no_case(b"SEARCH"),
        opt(preceded(tag_no_case(b" CHARSET "), charset)),
        sp,
        search_keys,
    ));

    let (remaining, (_, charset, _, criteria)) = parser(input)?;

    Ok((
        remaining,
        CommandBody::Search {
            charset,
            criteria,
            uid: false,
        },
    ))
}

/// `search-criteria = charset 1*(SP search-key)` (RFC 5256)
///
/// Unlike `SEARCH`, `SORT` and `THREAD` always carry a charset.
pub(crate) fn search_criteria(input: &[u8]) -> IMAPResult<&[u8], (Charset, Vec1<SearchKey>)> {
    separated_pair(charset, sp, search_keys)(input)
}

fn search_keys(input: &[u8]) -> IMAPResult<&[u8], Vec1<SearchKey>> {
    map(
        separated_list1(sp, search_key(RECURSION_LIMIT)),
        Vec1::unvalidated,
    )(input)
}

/// ```abnf
/// search-key = "ALL" / "ANSWERED" / "BCC" SP astring /
///              "BEFORE" SP date / "BODY" SP astring /
///              "CC" SP astring / "DELETED" / "FLAGGED" /
///              "FROM" SP astring / "KEYWORD" SP flag-keyword /
///              "NEW" / "OLD" / "ON" SP date / "RECENT" / "SEEN" /
///              "SINCE" SP date / "SUBJECT" SP astring /
///              "TEXT" SP astring / "TO" SP astring /
///              "UNANSWERED" / "UNDELETED" / "UNFLAGGED" /
///              "UNKEYWORD" SP flag-keyword / "UNSEEN" /
///              "DRAFT" / "HEADER" SP header-fld-name SP astring /
///              "LARGER" SP number / "NOT" SP search-key /
///              "OR" SP search-key SP search-key /
///              "SENTBEFORE" SP date / "SENTON" SP date /
///              "SENTSINCE" SP date / "SMALLER" SP number /
///              "UID" SP sequence-set / "UNDRAFT" / sequence-set /
///              "(" search-key *(SP search-key) ")"
/// ```
///
/// `NOT`, `OR`, and parenthesized lists nest. Every level consumes one unit of
/// `remaining_recursions`; running out is a [`RecursionLimitExceeded`] failure.
///
/// [`RecursionLimitExceeded`]: crate::codec::decode::IMAPErrorKind::RecursionLimitExceeded
pub(crate) fn search_key(
    remaining_recursions: usize,
) -> impl Fn(&[u8]) -> IMAPResult<&[u8], SearchKey> {
    move |input: &[u8]| search_key_limited(input, remaining_recursions)
}

fn search_key_limited<'a>(
    input: &'a [u8],
    remaining_recursions: usize,
) -> IMAPResult<&'a [u8], SearchKey<'a>> {
    if remaining_recursions == 0 {
        return Err(recursion_limit_exceeded(input));
    }

    let search_key =
        move |input: &'a [u8]| search_key_limited(input, remaining_recursions.saturating_sub(1));

    alt((
        alt((
            value(SearchKey::All, tag_no_case(b"ALL")),
            value(SearchKey::Answered, tag_no_case(b"ANSWERED")),
            map(preceded(tag_no_case(b"BCC "), astring), SearchKey::Bcc),
            map(preceded(tag_no_case(b"BEFORE "), date), SearchKey::Before),
            map(preceded(tag_no_case(b"BODY "), astring), SearchKey::Body),
            map(preceded(tag_no_case(b"CC "), astring), SearchKey::Cc),
            value(SearchKey::Deleted, tag_no_case(b"DELETED")),
            value(SearchKey::Flagged, tag_no_case(b"FLAGGED")),
            map(preceded(tag_no_case(b"FROM "), astring), SearchKey::From),
            // `flag-keyword` is an atom.
            map(preceded(tag_no_case(b"KEYWORD "), atom), SearchKey::Keyword),
            value(SearchKey::New, tag_no_case(b"NEW")),
            value(SearchKey::Old, tag_no_case(b"OLD")),
            map(preceded(tag_no_case(b"ON "), date), SearchKey::On),
            value(SearchKey::Recent, tag_no_case(b"RECENT")),
            value(SearchKey::Seen, tag_no_case(b"SEEN")),
            map(preceded(tag_no_case(b"SINCE "), date), SearchKey::Since),
            map(
                preceded(tag_no_case(b"SUBJECT "), astring),
                SearchKey::Subject,
            ),
            map(preceded(tag_no_case(b"TEXT "), astring), SearchKey::Text),
            map(preceded(tag_no_case(b"TO "), astring), SearchKey::To),
        )),
        alt((
            value(SearchKey::Unanswered, tag_no_case(b"UNANSWERED")),
            value(SearchKey::Undeleted, tag_no_case(b"UNDELETED")),
            value(SearchKey::Unflagged, tag_no_case(b"UNFLAGGED")),
            map(
                preceded(tag_no_case(b"UNKEYWORD "), atom),
                SearchKey::Unkeyword,
            ),
            value(SearchKey::Unseen, tag_no_case(b"UNSEEN")),
            value(SearchKey::Draft, tag_no_case(b"DRAFT")),
            map(
                // `header-fld-name = astring`
                tuple((tag_no_case(b"HEADER "), astring, sp, astring)),
                |(_, name, _, value)| SearchKey::Header(name, value),
            ),
            map(preceded(tag_no_case(b"LARGER "), number), SearchKey::Larger),
            map(preceded(tag_no_case(b"NOT "), search_key), |key| {
                SearchKey::Not(Box::new(key))
            }),
            map(
                tuple((tag_no_case(b"OR "), search_key, sp, search_key)),
                |(_, left, _, right)| SearchKey::Or(Box::new(left), Box::new(right)),
            ),
            map(
                preceded(tag_no_case(b"SENTBEFORE "), date),
                SearchKey::SentBefore,
            ),
            map(preceded(tag_no_case(b"SENTON "), date), SearchKey::SentOn),
            map(
                preceded(tag_no_case(b"SENTSINCE "), date),
                SearchKey::SentSince,
            ),
            map(
                preceded(tag_no_case(b"SMALLER "), number),
                SearchKey::Smaller,
            ),
            map(preceded(tag_no_case(b"UID "), sequence_set), SearchKey::Uid),
            value(SearchKey::Undraft, tag_no_case(b"UNDRAFT")),
            map(sequence_set, SearchKey::SequenceSet),
            map(
                delimited(tag(b"("), separated_list1(sp, search_key), tag(b")")),
                |keys| SearchKey::And(Vec1::unvalidated(keys)),
            ),
        )),
    ))(input)
}

impl<'a> EncodeIntoContext for SearchKey<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        match self {
            Self::And(keys) => {
                ctx.write_all(b"(")?;
                join_serializable(keys.as_ref(), b" ", ctx)?;
                ctx.write_all(b")")
            }
            Self::SequenceSet(sequence_set) => sequence_set.encode_ctx(ctx),
            Self::All => ctx.write_all(b"ALL"),
            Self::Answered => ctx.write_all(b"ANSWERED"),
            Self::Bcc(value) => {
                ctx.write_all(b"BCC ")?;
                value.encode_ctx(ctx)
            }
            Self::Before(date) => {
                ctx.write_all(b"BEFORE ")?;
                date.encode_ctx(ctx)
            }
            Self::Body(value) => {
                ctx.write_all(b"BODY ")?;
                value.encode_ctx(ctx)
            }
            Self::Cc(value) => {
                ctx.write_all(b"CC ")?;
                value.encode_ctx(ctx)
            }
            Self::Deleted => ctx.write_all(b"DELETED"),
            Self::Draft => ctx.write_all(b"DRAFT"),
            Self::Flagged => ctx.write_all(b"FLAGGED"),
            Self::From(value) => {
                ctx.write_all(b"FROM ")?;
                value.encode_ctx(ctx)
            }
            Self::Header(name, value) => {
                ctx.write_all(b"HEADER ")?;
                name.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                value.encode_ctx(ctx)
            }
            Self::Keyword(keyword) => {
                ctx.write_all(b"KEYWORD ")?;
                keyword.encode_ctx(ctx)
            }
            Self::Larger(size) => write!(ctx, "LARGER {size}"),
            Self::New => ctx.write_all(b"NEW"),
            Self::Not(key) => {
                ctx.write_all(b"NOT ")?;
                key.encode_ctx(ctx)
            }
            Self::Old => ctx.write_all(b"OLD"),
            Self::On(date) => {
                ctx.write_all(b"ON ")?;
                date.encode_ctx(ctx)
            }
            Self::Or(left, right) => {
                ctx.write_all(b"OR ")?;
                left.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                right.encode_ctx(ctx)
            }
            Self::Recent => ctx.write_all(b"RECENT"),
            Self::Seen => ctx.write_all(b"SEEN"),
            Self::SentBefore(date) => {
                ctx.write_all(b"SENTBEFORE ")?;
                date.encode_ctx(ctx)
            }
            Self::SentOn(date) => {
                ctx.write_all(b"SENTON ")?;
                date.encode_ctx(ctx)
            }
            Self::SentSince(date) => {
                ctx.write_all(b"SENTSINCE ")?;
                date.encode_ctx(ctx)
            }
            Self::Since(date) => {
                ctx.write_all(b"SINCE ")?;
                date.encode_ctx(ctx)
            }
            Self::Smaller(size) => write!(ctx, "SMALLER {size}"),
            Self::Subject(value) => {
                ctx.write_all(b"SUBJECT ")?;
                value.encode_ctx(ctx)
            }
            Self::Text(value) => {
                ctx.write_all(b"TEXT ")?;
                value.encode_ctx(ctx)
            }
            Self::To(value) => {
                ctx.write_all(b"TO ")?;
                value.encode_ctx(ctx)
            }
            Self::Uid(sequence_set) => {
                ctx.write_all(b"UID ")?;
                sequence_set.encode_ctx(ctx)
            }
            Self::Unanswered => ctx.write_all(b"UNANSWERED"),
            Self::Undeleted => ctx.write_all(b"UNDELETED"),
            Self::Undraft => ctx.write_all(b"UNDRAFT"),
            Self::Unflagged => ctx.write_all(b"UNFLAGGED"),
            Self::Unkeyword(keyword) => {
                ctx.write_all(b"UNKEYWORD ")?;
                keyword.encode_ctx(ctx)
            }
            Self::Unseen => ctx.write_all(b"UNSEEN"),
        }
    }
}

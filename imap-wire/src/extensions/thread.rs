//! THREAD (RFC 5256)

use std::io::Write;

use abnf_core::streaming::sp;
use imap_wire_types::{
    command::CommandBody,
    core::{Vec1, Vec2},
    extensions::thread::{Thread, ThreadingAlgorithm},
    response::Data,
};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, opt},
    multi::{many1, many_m_n, separated_list1},
    sequence::{delimited, preceded, tuple},
};

use crate::{
    codec::{
        decode::{recursion_limit_exceeded, IMAPResult, RECURSION_LIMIT},
        encode::{EncodeContext, EncodeIntoContext},
    },
    core::{atom, nz_number},
    search::search_criteria,
};

/// `thread = ["UID" SP] "THREAD" SP thread-alg SP search-criteria`
pub(crate) fn thread(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    let mut parser = tuple((
        map(opt(tag_no_case(b"UID ")), |uid| uid.is_some()),
        tag_no_case(b"THREAD "),
        thread_alg,
        sp,
        search_criteria,
    ));

    let (remaining, (uid, _, algorithm, _, (charset, search_criteria))) = parser(input)?;

    Ok((
        remaining,
        CommandBody::Thread {
            algorithm,
            charset,
            search_criteria,
            uid,
        },
    ))
}

/// ```abnf
/// thread-alg     = "ORDEREDSUBJECT" / "REFERENCES" / thread-alg-ext
/// thread-alg-ext = atom
/// ```
pub(crate) fn thread_alg(input: &[u8]) -> IMAPResult<&[u8], ThreadingAlgorithm> {
    map(atom, ThreadingAlgorithm::from)(input)
}

/// `thread-data = "THREAD" [SP 1*thread-list]`
pub(crate) fn thread_data(input: &[u8]) -> IMAPResult<&[u8], Data> {
    map(
        preceded(
            tag_no_case(b"THREAD"),
            opt(preceded(sp, many1(thread_list(RECURSION_LIMIT)))),
        ),
        |threads| Data::Thread(threads.unwrap_or_default()),
    )(input)
}

pub(crate) fn thread_list(
    remaining_recursions: usize,
) -> impl Fn(&[u8]) -> IMAPResult<&[u8], Thread> {
    move |input: &[u8]| thread_list_limited(input, remaining_recursions)
}

/// ```abnf
/// thread-list    = "(" (thread-members / thread-nested) ")"
/// thread-members = nz-number *(SP nz-number) [SP thread-nested]
/// thread-nested  = 2*thread-list
/// ```
fn thread_list_limited<'a>(
    input: &'a [u8],
    remaining_recursions: usize,
) -> IMAPResult<&'a [u8], Thread> {
    if remaining_recursions == 0 {
        return Err(recursion_limit_exceeded(input));
    }

    let thread_list = move |input: &'a [u8]| thread_list_limited(input, remaining_recursions - 1);

    delimited(
        tag(b"("),
        alt((
            map(
                tuple((
                    separated_list1(sp, nz_number),
                    opt(preceded(sp, many_m_n(2, usize::MAX, thread_list))),
                )),
                |(prefix, answers)| Thread::Members {
                    prefix: Vec1::unvalidated(prefix),
                    answers: answers.map(Vec2::unvalidated),
                },
            ),
            map(many_m_n(2, usize::MAX, thread_list), |answers| {
                Thread::Nested {
                    answers: Vec2::unvalidated(answers),
                }
            }),
        )),
        tag(b")"),
    )(input)
}

impl EncodeIntoContext for Thread {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        write!(ctx, "{}", self)
    }
}

impl<'a> EncodeIntoContext for ThreadingAlgorithm<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        write!(ctx, "{}", self)
    }
}

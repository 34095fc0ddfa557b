//! SORT (RFC 5256)

use std::io::Write;

use abnf_core::streaming::sp;
use imap_wire_types::{
    command::CommandBody,
    core::Vec1,
    extensions::sort::{SortCriterion, SortKey},
};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case},
    combinator::{map, opt, value},
    multi::separated_list1,
    sequence::{delimited, tuple},
};

use crate::{
    codec::{
        decode::IMAPResult,
        encode::{EncodeContext, EncodeIntoContext},
    },
    search::search_criteria,
};

/// `sort = ["UID" SP] "SORT" SP sort-criteria SP search-criteria`
pub(crate) fn sort(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    let mut parser = tuple((
        map(opt(tag_no_case(b"UID ")), |uid| uid.is_some()),
        tag_no_case(b"SORT "),
        sort_criteria,
        sp,
        search_criteria,
    ));

    let (remaining, (uid, _, sort_criteria, _, (charset, search_criteria))) = parser(input)?;

    Ok((
        remaining,
        CommandBody::Sort {
            sort_criteria,
            charset,
            search_criteria,
            uid,
        },
    ))
}

/// `sort-criteria = "(" sort-criterion *(SP sort-criterion) ")"`
pub(crate) fn sort_criteria(input: &[u8]) -> IMAPResult<&[u8], Vec1<SortCriterion>> {
    delimited(
        tag(b"("),
        map(separated_list1(sp, sort_criterion), Vec1::unvalidated),
        tag(b")"),
    )(input)
}

/// `sort-criterion = ["REVERSE" SP] sort-key`
pub(crate) fn sort_criterion(input: &[u8]) -> IMAPResult<&[u8], SortCriterion> {
    map(
        tuple((
            map(opt(tag_no_case(b"REVERSE ")), |reverse| reverse.is_some()),
            sort_key,
        )),
        |(reverse, key)| SortCriterion { reverse, key },
    )(input)
}

/// `sort-key = "ARRIVAL" / "CC" / "DATE" / "FROM" / "SIZE" / "SUBJECT" / "TO"`
pub(crate) fn sort_key(input: &[u8]) -> IMAPResult<&[u8], SortKey> {
    alt((
        value(SortKey::Arrival, tag_no_case(b"ARRIVAL")),
        value(SortKey::Cc, tag_no_case(b"CC")),
        value(SortKey::Date, tag_no_case(b"DATE")),
        value(SortKey::From, tag_no_case(b"FROM")),
        value(SortKey::Size, tag_no_case(b"SIZE")),
        value(SortKey::Subject, tag_no_case(b"SUBJECT")),
        value(SortKey::To, tag_no_case(b"TO")),
    ))(input)
}

impl EncodeIntoContext for SortCriterion {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        if self.reverse {
            ctx.write_all(b"REVERSE ")?;
        }

        ctx.write_all(self.key.as_ref().as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use imap_wire_types::{
        command::Command,
        core::Charset,
        response::{Data, Response},
        search::SearchKey,
    };

    use super::*;
    use crate::testing::{kat_inverse_command, kat_inverse_response, known_answer_test_encode};

    #[test]
    fn test_parse_sort_criteria() {
        let (rem, val) = sort_criteria(b"(REVERSE arrival subject) ").unwrap();
        assert_eq!(rem, b" ");
        assert_eq!(
            val.into_inner(),
            vec![
                SortCriterion {
                    reverse: true,
                    key: SortKey::Arrival
                },
                SortCriterion {
                    reverse: false,
                    key: SortKey::Subject
                },
            ]
        );

        assert!(sort_criteria(b"() ").is_err());
        assert!(sort_criteria(b"(REVERSE) ").is_err());
    }

    #[test]
    fn test_kat_inverse_command_sort() {
        kat_inverse_command(&[
            (
                b"A SORT (SUBJECT) UTF-8 ALL\r\n".as_ref(),
                b"".as_ref(),
                Command::new(
                    "A",
                    CommandBody::Sort {
                        sort_criteria: Vec1::from(SortCriterion {
                            reverse: false,
                            key: SortKey::Subject,
                        }),
                        charset: Charset::try_from("UTF-8").unwrap(),
                        search_criteria: Vec1::from(SearchKey::All),
                        uid: false,
                    },
                )
                .unwrap(),
            ),
            (
                b"A UID SORT (REVERSE DATE TO) US-ASCII SEEN UNDELETED\r\n",
                b"",
                Command::new(
                    "A",
                    CommandBody::Sort {
                        sort_criteria: Vec1::try_from(vec![
                            SortCriterion {
                                reverse: true,
                                key: SortKey::Date,
                            },
                            SortCriterion {
                                reverse: false,
                                key: SortKey::To,
                            },
                        ])
                        .unwrap(),
                        charset: Charset::try_from("US-ASCII").unwrap(),
                        search_criteria: Vec1::try_from(vec![SearchKey::Seen, SearchKey::Undeleted])
                            .unwrap(),
                        uid: true,
                    },
                )
                .unwrap(),
            ),
        ]);
    }

    #[test]
    fn test_kat_inverse_response_sort() {
        kat_inverse_response(&[
            (
                b"* SORT\r\n".as_ref(),
                b"".as_ref(),
                Response::Data(Data::Sort(vec![])),
            ),
            (
                b"* SORT 5 3 4\r\n",
                b"",
                Response::Data(Data::Sort(
                    [5, 3, 4]
                        .into_iter()
                        .map(|n| NonZeroU32::new(n).unwrap())
                        .collect(),
                )),
            ),
        ]);
    }

    #[test]
    fn test_encode_sort_criterion() {
        known_answer_test_encode((
            SortCriterion {
                reverse: true,
                key: SortKey::Cc,
            },
            b"REVERSE CC".as_ref(),
        ));
    }
}

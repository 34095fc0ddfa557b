//! Search-related types.

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    core::{AString, Atom, Vec1},
    datetime::NaiveDate,
    sequence::SequenceSet,
};

/// A search key as used in `SEARCH`, `SORT`, and `THREAD`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum SearchKey<'a> {
    /// Several keys that must all match.
    ///
    /// IMAP has no AND keyword. A parenthesized list (or the top-level list of criteria) is an
    /// implicit AND.
    And(Vec1<SearchKey<'a>>),
    SequenceSet(SequenceSet),
    All,
    Answered,
    Bcc(AString<'a>),
    Before(NaiveDate),
    Body(AString<'a>),
    Cc(AString<'a>),
    Deleted,
    Draft,
    Flagged,
    From(AString<'a>),
    Header(AString<'a>, AString<'a>),
    Keyword(Atom<'a>),
    Larger(u32),
    New,
    Not(Box<SearchKey<'a>>),
    Old,
    On(NaiveDate),
    Or(Box<SearchKey<'a>>, Box<SearchKey<'a>>),
    Recent,
    Seen,
    SentBefore(NaiveDate),
    SentOn(NaiveDate),
    SentSince(NaiveDate),
    Since(NaiveDate),
    Smaller(u32),
    Subject(AString<'a>),
    Text(AString<'a>),
    To(AString<'a>),
    Uid(SequenceSet),
    Unanswered,
    Undeleted,
    Undraft,
    Unflagged,
    Unkeyword(Atom<'a>),
    Unseen,
}

impl<'a> SearchKey<'a> {
    pub fn uid<S>(sequence_set: S) -> Self
    where
        S: Into<SequenceSet>,
    {
        Self::Uid(sequence_set.into())
    }

    pub fn not(key: SearchKey<'a>) -> Self {
        Self::Not(Box::new(key))
    }

    pub fn or(left: SearchKey<'a>, right: SearchKey<'a>) -> Self {
        Self::Or(Box::new(left), Box::new(right))
    }
}

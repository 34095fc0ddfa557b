//! IMAP SORT Extension (RFC 5256)

use std::fmt::{Display, Formatter};

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::Atom;

/// A sort key, optionally reversed, e.g., `REVERSE DATE`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ToStatic)]
pub struct SortCriterion {
    pub reverse: bool,
    pub key: SortKey,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ToStatic)]
pub enum SortKey {
    Arrival,
    Cc,
    Date,
    From,
    Size,
    Subject,
    To,
}

impl AsRef<str> for SortKey {
    fn as_ref(&self) -> &str {
        match self {
            Self::Arrival => "ARRIVAL",
            Self::Cc => "CC",
            Self::Date => "DATE",
            Self::From => "FROM",
            Self::Size => "SIZE",
            Self::Subject => "SUBJECT",
            Self::To => "TO",
        }
    }
}

/// The algorithm in a `SORT=<algorithm>` capability, e.g., `SORT=DISPLAY` (RFC 5957).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum SortAlgorithm<'a> {
    Display,
    Other(SortAlgorithmOther<'a>),
}

impl<'a> From<Atom<'a>> for SortAlgorithm<'a> {
    fn from(atom: Atom<'a>) -> Self {
        if atom.inner().eq_ignore_ascii_case("display") {
            Self::Display
        } else {
            Self::Other(SortAlgorithmOther(atom))
        }
    }
}

impl<'a> Display for SortAlgorithm<'a> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Display => f.write_str("DISPLAY"),
            Self::Other(other) => f.write_str(other.0.inner()),
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct SortAlgorithmOther<'a>(Atom<'a>);

impl<'a> SortAlgorithmOther<'a> {
    pub fn inner(&self) -> &Atom<'a> {
        &self.0
    }
}

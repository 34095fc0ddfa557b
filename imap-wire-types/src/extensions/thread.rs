//! IMAP THREAD Extension (RFC 5256)

use std::{
    fmt::{Display, Formatter},
    num::NonZeroU32,
};

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::{Atom, Vec1, Vec2};

/// A thread as returned in `THREAD` data, e.g., `(1 2 (3)(4 5))`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum Thread {
    /// A chain of messages, each answering the previous one, optionally followed by branches.
    Members {
        prefix: Vec1<NonZeroU32>,
        answers: Option<Vec2<Thread>>,
    },
    /// Branches without a common parent message.
    Nested { answers: Vec2<Thread> },
}

impl Display for Thread {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str("(")?;

        let answers: &[Thread] = match self {
            Self::Members { prefix, answers } => {
                let mut numbers = prefix.iter();
                if let Some(first) = numbers.next() {
                    write!(f, "{first}")?;
                }
                for number in numbers {
                    write!(f, " {number}")?;
                }

                match answers {
                    Some(answers) => {
                        f.write_str(" ")?;
                        answers.as_slice()
                    }
                    None => &[],
                }
            }
            Self::Nested { answers } => answers.as_slice(),
        };

        for answer in answers {
            write!(f, "{answer}")?;
        }

        f.write_str(")")
    }
}

/// The algorithm used by `THREAD`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum ThreadingAlgorithm<'a> {
    OrderedSubject,
    References,
    Other(ThreadingAlgorithmOther<'a>),
}

impl<'a> From<Atom<'a>> for ThreadingAlgorithm<'a> {
    fn from(atom: Atom<'a>) -> Self {
        match atom.inner().to_ascii_lowercase().as_ref() {
            "orderedsubject" => Self::OrderedSubject,
            "references" => Self::References,
            _ => Self::Other(ThreadingAlgorithmOther(atom)),
        }
    }
}

impl<'a> Display for ThreadingAlgorithm<'a> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Self::OrderedSubject => "ORDEREDSUBJECT",
            Self::References => "REFERENCES",
            Self::Other(other) => other.0.inner(),
        })
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct ThreadingAlgorithmOther<'a>(Atom<'a>);

impl<'a> ThreadingAlgorithmOther<'a> {
    pub fn inner(&self) -> &Atom<'a> {
        &self.0
    }
}

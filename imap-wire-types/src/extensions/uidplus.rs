//! The IMAP UIDPLUS Extension (RFC 4315)

use std::num::NonZeroU32;

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{command::CommandBody, core::Vec1, sequence::SequenceSet};

impl<'a> CommandBody<'a> {
    /// `UID EXPUNGE <sequence-set>`
    pub fn expunge_uid<S>(sequence_set: S) -> Result<Self, S::Error>
    where
        S: TryInto<SequenceSet>,
    {
        Ok(Self::ExpungeUid {
            sequence_set: sequence_set.try_into()?,
        })
    }
}

/// A set of UIDs as used in `APPENDUID` and `COPYUID`. Unlike a sequence set, `*` is not allowed.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct UidSet(pub Vec1<UidElement>);

impl From<UidElement> for UidSet {
    fn from(value: UidElement) -> Self {
        Self(Vec1::from(value))
    }
}

impl From<NonZeroU32> for UidSet {
    fn from(value: NonZeroU32) -> Self {
        Self::from(UidElement::Single(value))
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ToStatic)]
pub enum UidElement {
    Single(NonZeroU32),
    Range(NonZeroU32, NonZeroU32),
}

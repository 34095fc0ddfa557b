//! Sequence sets, e.g., `1:5,7,10:*`.

use std::{
    num::NonZeroU32,
    ops::{RangeFrom, RangeFull, RangeInclusive},
    str::FromStr,
};

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::Vec1;

pub const ONE: NonZeroU32 = match NonZeroU32::new(1) {
    Some(one) => one,
    None => panic!(),
};

/// A non-empty set of message sequence numbers or UIDs.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct SequenceSet(pub Vec1<Sequence>);

/// A single number or a range, both possibly involving `*`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum Sequence {
    Single(SeqOrUid),
    Range(SeqOrUid, SeqOrUid),
}

/// A number or `*` (the largest number in use).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ToStatic)]
pub enum SeqOrUid {
    Value(NonZeroU32),
    Asterisk,
}

#[derive(Clone, Copy, Debug, Eq, Error, Hash, PartialEq)]
pub enum SequenceError {
    #[error("Must not be empty")]
    Empty,
    #[error("Must not be zero")]
    Zero,
    #[error("Must not have leading zeros")]
    LeadingZero,
    #[error("Invalid sequence")]
    Invalid,
}

impl SequenceSet {
    pub fn iter(&self) -> std::slice::Iter<'_, Sequence> {
        self.0.iter()
    }
}

impl From<Sequence> for SequenceSet {
    fn from(sequence: Sequence) -> Self {
        Self(Vec1::from(sequence))
    }
}

impl From<SeqOrUid> for SequenceSet {
    fn from(value: SeqOrUid) -> Self {
        Self::from(Sequence::Single(value))
    }
}

impl From<NonZeroU32> for SequenceSet {
    fn from(value: NonZeroU32) -> Self {
        Self::from(SeqOrUid::Value(value))
    }
}

impl From<RangeFull> for SequenceSet {
    fn from(_: RangeFull) -> Self {
        Self::from(Sequence::Range(SeqOrUid::Value(ONE), SeqOrUid::Asterisk))
    }
}

impl TryFrom<u32> for SequenceSet {
    type Error = SequenceError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Ok(Self::from(SeqOrUid::try_from(value)?))
    }
}

impl TryFrom<RangeInclusive<u32>> for SequenceSet {
    type Error = SequenceError;

    fn try_from(range: RangeInclusive<u32>) -> Result<Self, Self::Error> {
        Ok(Self::from(Sequence::Range(
            SeqOrUid::try_from(*range.start())?,
            SeqOrUid::try_from(*range.end())?,
        )))
    }
}

impl TryFrom<RangeFrom<u32>> for SequenceSet {
    type Error = SequenceError;

    fn try_from(range: RangeFrom<u32>) -> Result<Self, Self::Error> {
        Ok(Self::from(Sequence::Range(
            SeqOrUid::try_from(range.start)?,
            SeqOrUid::Asterisk,
        )))
    }
}

impl TryFrom<Vec<Sequence>> for SequenceSet {
    type Error = SequenceError;

    fn try_from(sequences: Vec<Sequence>) -> Result<Self, Self::Error> {
        Ok(Self(
            Vec1::try_from(sequences).map_err(|_| SequenceError::Empty)?,
        ))
    }
}

impl TryFrom<&str> for SequenceSet {
    type Error = SequenceError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl FromStr for SequenceSet {
    type Err = SequenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .split(',')
            .map(Sequence::from_str)
            .collect::<Result<Vec<_>, _>>()
            .and_then(Self::try_from)
    }
}

impl FromStr for Sequence {
    type Err = SequenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.split_once(':') {
            None => Ok(Self::Single(value.parse()?)),
            Some((start, end)) => Ok(Self::Range(start.parse()?, end.parse()?)),
        }
    }
}

impl TryFrom<u32> for SeqOrUid {
    type Error = SequenceError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        NonZeroU32::new(value)
            .map(Self::Value)
            .ok_or(SequenceError::Zero)
    }
}

impl From<NonZeroU32> for SeqOrUid {
    fn from(value: NonZeroU32) -> Self {
        Self::Value(value)
    }
}

impl FromStr for SeqOrUid {
    type Err = SequenceError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "" => Err(SequenceError::Empty),
            "*" => Ok(Self::Asterisk),
            // `u32::from_str` would accept `+1` and `007`.
            _ if !value.bytes().all(|b| b.is_ascii_digit()) => Err(SequenceError::Invalid),
            _ if value.starts_with('0') && value.len() > 1 => Err(SequenceError::LeadingZero),
            _ => {
                let value = u32::from_str(value).map_err(|_| SequenceError::Invalid)?;

                Self::try_from(value)
            }
        }
    }
}

//! Error-related types.

use std::fmt::{Display, Formatter};

use thiserror::Error;

/// A validation error.
///
/// Returned whenever a value can't be constructed because it would be invalid in IMAP,
/// e.g., an empty tag or an atom containing a space.
#[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
pub struct ValidationError {
    kind: ValidationErrorKind,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind) -> Self {
        Self { kind }
    }

    /// What went wrong.
    pub fn kind(&self) -> &ValidationErrorKind {
        &self.kind
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Validation failed: {}", self.kind)
    }
}

#[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
#[non_exhaustive]
pub enum ValidationErrorKind {
    #[error("Must not be empty")]
    Empty,
    #[error("Must have at least {min} elements")]
    NotEnough { min: usize },
    #[error("Invalid value")]
    Invalid,
    #[error("Invalid byte b'\\x{byte:02x}' at index {at}")]
    InvalidByteAt { byte: u8, at: usize },
    #[error("Reserved: use the dedicated variant instead")]
    Reserved,
    #[error("Year {got} is not representable, must be in 0..=9999")]
    YearOutOfRange { got: i32 },
    #[error("Sub-second precision is not representable, got {nanos} ns")]
    SubSecond { nanos: u32 },
    #[error("Offset of {seconds} s is not a whole number of minutes")]
    OffsetNotInMinutes { seconds: i32 },
}

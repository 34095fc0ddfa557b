//! IMAP4 Binary Content Extension (RFC 3516)

use std::{
    borrow::Cow,
    fmt::{Debug, Formatter},
};

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::{Literal, LiteralMode, NString};

/// A literal that may contain any octet, including NUL (`~{n}`).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct Literal8<'a> {
    pub data: Cow<'a, [u8]>,
    pub mode: LiteralMode,
}

impl<'a> Literal8<'a> {
    pub fn new<D>(data: D, mode: LiteralMode) -> Self
    where
        D: Into<Cow<'a, [u8]>>,
    {
        Self {
            data: data.into(),
            mode,
        }
    }
}

impl<'a> Debug for Literal8<'a> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        struct BStr<'a>(&'a [u8]);

        impl<'a> Debug for BStr<'a> {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "b\"{}\"", crate::utils::escape_byte_string(self.0))
            }
        }

        f.debug_struct("Literal8")
            .field("data", &BStr(&self.data))
            .field("mode", &self.mode)
            .finish()
    }
}

/// The message argument of `APPEND`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum LiteralOrLiteral8<'a> {
    Literal(Literal<'a>),
    Literal8(Literal8<'a>),
}

impl<'a> From<Literal<'a>> for LiteralOrLiteral8<'a> {
    fn from(value: Literal<'a>) -> Self {
        Self::Literal(value)
    }
}

impl<'a> From<Literal8<'a>> for LiteralOrLiteral8<'a> {
    fn from(value: Literal8<'a>) -> Self {
        Self::Literal8(value)
    }
}

/// The value of `BINARY[...]` fetch data.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum NString8<'a> {
    NString(NString<'a>),
    Literal8(Literal8<'a>),
}

//! Fetch-related types.

use std::{
    fmt::{Display, Formatter},
    num::NonZeroU32,
};

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    body::BodyStructure,
    core::{AString, NString, Vec1},
    datetime::DateTime,
    envelope::Envelope,
    extensions::binary::NString8,
    flag::FlagFetch,
};

/// Shorthands for common sets of data item names.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ToStatic)]
pub enum Macro {
    /// `(FLAGS INTERNALDATE RFC822.SIZE ENVELOPE)`
    All,
    /// `(FLAGS INTERNALDATE RFC822.SIZE)`
    Fast,
    /// `(FLAGS INTERNALDATE RFC822.SIZE ENVELOPE BODY)`
    Full,
}

impl Macro {
    pub fn expand(&self) -> Vec<MessageDataItemName<'static>> {
        use MessageDataItemName::*;

        match self {
            Self::All => vec![Flags, InternalDate, Rfc822Size, Envelope],
            Self::Fast => vec![Flags, InternalDate, Rfc822Size],
            Self::Full => vec![Flags, InternalDate, Rfc822Size, Envelope, Body],
        }
    }
}

impl Display for Macro {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::All => "ALL",
            Self::Fast => "FAST",
            Self::Full => "FULL",
        })
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum MacroOrMessageDataItemNames<'a> {
    Macro(Macro),
    MessageDataItemNames(Vec<MessageDataItemName<'a>>),
}

impl<'a> From<Macro> for MacroOrMessageDataItemNames<'a> {
    fn from(value: Macro) -> Self {
        Self::Macro(value)
    }
}

impl<'a> From<Vec<MessageDataItemName<'a>>> for MacroOrMessageDataItemNames<'a> {
    fn from(value: Vec<MessageDataItemName<'a>>) -> Self {
        Self::MessageDataItemNames(value)
    }
}

/// A data item name as requested in `FETCH`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum MessageDataItemName<'a> {
    /// `BODY`
    Body,
    /// `BODY[<section>]<<partial>>` and `BODY.PEEK[<section>]<<partial>>`
    BodyExt {
        section: Option<Section<'a>>,
        /// `<origin.count>`
        partial: Option<(u32, NonZeroU32)>,
        peek: bool,
    },
    /// `BODYSTRUCTURE`
    BodyStructure,
    /// `ENVELOPE`
    Envelope,
    /// `FLAGS`
    Flags,
    /// `INTERNALDATE`
    InternalDate,
    /// `RFC822`
    Rfc822,
    /// `RFC822.HEADER`
    Rfc822Header,
    /// `RFC822.SIZE`
    Rfc822Size,
    /// `RFC822.TEXT`
    Rfc822Text,
    /// `UID`
    Uid,
    /// `BINARY[<section-binary>]<<partial>>` and `BINARY.PEEK[...]`
    Binary {
        section: Vec<NonZeroU32>,
        partial: Option<(u32, NonZeroU32)>,
        peek: bool,
    },
    /// `BINARY.SIZE[<section-binary>]`
    BinarySize { section: Vec<NonZeroU32> },
}

/// A data item as returned in `FETCH` data.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum MessageDataItem<'a> {
    /// `BODY` (body structure without extension data)
    Body(BodyStructure<'a>),
    /// `BODY[<section>]<<origin>>`
    BodyExt {
        section: Option<Section<'a>>,
        origin: Option<u32>,
        data: NString<'a>,
    },
    /// `BODYSTRUCTURE`
    BodyStructure(BodyStructure<'a>),
    Envelope(Envelope<'a>),
    Flags(Vec<FlagFetch<'a>>),
    InternalDate(DateTime),
    Rfc822(NString<'a>),
    Rfc822Header(NString<'a>),
    Rfc822Size(u32),
    Rfc822Text(NString<'a>),
    Uid(NonZeroU32),
    Binary {
        section: Vec<NonZeroU32>,
        value: NString8<'a>,
    },
    BinarySize {
        section: Vec<NonZeroU32>,
        size: u32,
    },
}

/// A section specification, e.g., the `1.2.HEADER` in `BODY[1.2.HEADER]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum Section<'a> {
    Part(Part),
    Header(Option<Part>),
    HeaderFields(Option<Part>, Vec1<AString<'a>>),
    HeaderFieldsNot(Option<Part>, Vec1<AString<'a>>),
    Text(Option<Part>),
    /// Only valid with a part, i.e., `1.MIME`.
    Mime(Part),
}

/// A part number path, e.g., `1.2.3`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct Part(pub Vec1<NonZeroU32>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macro_expand() {
        assert_eq!(Macro::Fast.expand().len(), 3);
        assert_eq!(
            Macro::Full.expand().last(),
            Some(&MessageDataItemName::Body)
        );
        assert_eq!(Macro::All.to_string(), "ALL");
    }
}

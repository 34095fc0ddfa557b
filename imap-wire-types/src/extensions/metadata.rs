//! The IMAP METADATA Extension (RFC 5464)

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    command::CommandBody,
    core::{AString, Vec1},
    error::ValidationError,
    extensions::binary::NString8,
    mailbox::Mailbox,
};

impl<'a> CommandBody<'a> {
    pub fn set_metadata<M>(
        mailbox: M,
        entry_values: Vec1<EntryValue<'a>>,
    ) -> Result<Self, M::Error>
    where
        M: TryInto<Mailbox<'a>>,
    {
        Ok(Self::SetMetadata {
            mailbox: mailbox.try_into()?,
            entry_values,
        })
    }

    pub fn get_metadata<M>(
        options: Vec<GetMetadataOption>,
        mailbox: M,
        entries: Vec1<Entry<'a>>,
    ) -> Result<Self, M::Error>
    where
        M: TryInto<Mailbox<'a>>,
    {
        Ok(Self::GetMetadata {
            options,
            mailbox: mailbox.try_into()?,
            entries,
        })
    }
}

/// An entry name, e.g., `/private/comment`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, Hash, PartialEq, ToStatic)]
pub struct Entry<'a>(AString<'a>);

impl<'a> Entry<'a> {
    pub fn inner(&self) -> &AString<'a> {
        &self.0
    }
}

impl<'a> From<AString<'a>> for Entry<'a> {
    fn from(value: AString<'a>) -> Self {
        Self(value)
    }
}

impl<'a> TryFrom<&'a str> for Entry<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Ok(Self(AString::try_from(value)?))
    }
}

impl<'a> AsRef<[u8]> for Entry<'a> {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

/// An entry with its value. A `NIL` value removes the entry.
///
/// Values may be binary, so a `literal8` is accepted as well.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, Hash, PartialEq, ToStatic)]
pub struct EntryValue<'a> {
    pub entry: Entry<'a>,
    pub value: NString8<'a>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, ToStatic)]
pub enum GetMetadataOption {
    /// `MAXSIZE <n>`
    MaxSize(u32),
    /// `DEPTH <depth>`
    Depth(Depth),
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, ToStatic)]
pub enum Depth {
    /// `0`
    Null,
    /// `1`
    One,
    /// `infinity`
    Infinity,
}

/// The `METADATA` response code.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, ToStatic)]
pub enum MetadataCode {
    /// `LONGENTRIES <n>`
    LongEntries(u32),
    /// `MAXSIZE <n>`
    MaxSize(u32),
    /// `TOOMANY`
    TooMany,
    /// `NOPRIVATE`
    NoPrivate,
}

/// The payload of `METADATA` data.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Eq, Hash, PartialEq, ToStatic)]
pub enum MetadataResponse<'a> {
    /// Solicited, i.e., an answer to `GETMETADATA`.
    WithValues(Vec1<EntryValue<'a>>),
    /// Unsolicited, i.e., announcing changed entries.
    WithoutValues(Vec1<Entry<'a>>),
}

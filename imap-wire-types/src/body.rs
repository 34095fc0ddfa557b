//! Body structure types, i.e., the parsed MIME structure of a message.
//!
//! The optional extension data at the end of a body can only be present when everything before
//! it is present as well. This is modelled by nesting: each optional field holds the next one in
//! its `tail`.

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    core::{IString, NString, Vec1},
    envelope::Envelope,
};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum BodyStructure<'a> {
    /// A non-multipart body part.
    Single {
        body: Body<'a>,
        /// Only present in `BODYSTRUCTURE`, never in `BODY`.
        extension_data: Option<SinglePartExtensionData<'a>>,
    },
    /// A multipart body part.
    Multi {
        bodies: Vec1<BodyStructure<'a>>,
        subtype: IString<'a>,
        /// Only present in `BODYSTRUCTURE`, never in `BODY`.
        extension_data: Option<MultiPartExtensionData<'a>>,
    },
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct Body<'a> {
    pub basic: BasicFields<'a>,
    pub specific: SpecificFields<'a>,
}

/// Fields shared by all non-multipart bodies.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct BasicFields<'a> {
    /// Attribute/value pairs, e.g., `("charset" "us-ascii")`.
    pub parameter_list: Vec<(IString<'a>, IString<'a>)>,
    /// `Content-ID`
    pub id: NString<'a>,
    /// `Content-Description`
    pub description: NString<'a>,
    /// `Content-Transfer-Encoding`
    pub content_transfer_encoding: IString<'a>,
    /// Size in octets, i.e., in its transfer encoding.
    pub size: u32,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum SpecificFields<'a> {
    /// Any type other than `MESSAGE/RFC822` or `TEXT/*`.
    Basic {
        r#type: IString<'a>,
        subtype: IString<'a>,
    },
    /// `MESSAGE/RFC822`
    Message {
        envelope: Box<Envelope<'a>>,
        body_structure: Box<BodyStructure<'a>>,
        number_of_lines: u32,
    },
    /// `TEXT/*`
    Text {
        subtype: IString<'a>,
        number_of_lines: u32,
    },
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct SinglePartExtensionData<'a> {
    /// `Content-MD5`
    pub md5: NString<'a>,
    pub tail: Option<Disposition<'a>>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct MultiPartExtensionData<'a> {
    pub parameter_list: Vec<(IString<'a>, IString<'a>)>,
    pub tail: Option<Disposition<'a>>,
}

/// `Content-Disposition`, e.g., `("attachment" ("filename" "a.pdf"))`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct Disposition<'a> {
    pub disposition: Option<(IString<'a>, Vec<(IString<'a>, IString<'a>)>)>,
    pub tail: Option<Language<'a>>,
}

/// `Content-Language`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct Language<'a> {
    pub language: Vec<IString<'a>>,
    pub tail: Option<Location<'a>>,
}

/// `Content-Location`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct Location<'a> {
    pub location: NString<'a>,
    /// Future extensions, kept as-is.
    pub extensions: Vec<BodyExtension<'a>>,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum BodyExtension<'a> {
    NString(NString<'a>),
    Number(u32),
    List(Vec1<BodyExtension<'a>>),
}

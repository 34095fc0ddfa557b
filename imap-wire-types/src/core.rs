//! Core data types
//!
//! The "string types" of IMAP. They decide how a datum travels over the wire and, in case of
//! [`Literal`]s, whether the sender has to wait for a continuation request first.
//!
//! ```text
//!        ┌───────┐ ┌─────────────────┐
//!        │AString│ │     NString     │
//!        └──┬─┬──┘ │(Option<IString>)│
//!           │ │    └─────┬───────────┘
//!           │ └──────┐   │
//!           │        │   │
//! ┌────┐ ┌──▼────┐ ┌─▼───▼─┐
//! │Atom│ │AtomExt│ │IString│
//! └────┘ └───────┘ └┬─────┬┘
//!                   │     │
//!             ┌─────▼─┐ ┌─▼────┐
//!             │Literal│ │Quoted│
//!             └───────┘ └──────┘
//! ```

use std::{
    borrow::Cow,
    fmt::{Display, Formatter},
    str::from_utf8,
    vec::IntoIter,
};

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{ValidationError, ValidationErrorKind},
    utils::indicators::{
        is_astring_char, is_atom_char, is_char8, is_quoted_specials, is_text_char,
    },
};

/// Implement `TryFrom<$from>` for `$target` by going through `$via` and `From<$via>`.
macro_rules! impl_try_from {
    ($via:ty, $lifetime:lifetime, $from:ty, $target:ty) => {
        impl<$lifetime> TryFrom<$from> for $target {
            type Error = <$via as TryFrom<$from>>::Error;

            fn try_from(value: $from) -> Result<Self, Self::Error> {
                let value = <$via>::try_from(value)?;

                Ok(Self::from(value))
            }
        }
    };
}

pub(crate) use impl_try_from;

/// Accessors and conversions shared by all `Cow<str>`-backed string types.
///
/// The target must provide `fn verify(impl AsRef<[u8]>) -> Result<(), ValidationError>` which
/// only accepts ASCII.
macro_rules! impl_string_type {
    ($target:ident) => {
        impl<'a> $target<'a> {
            pub fn inner(&self) -> &str {
                self.0.as_ref()
            }

            pub fn into_inner(self) -> std::borrow::Cow<'a, str> {
                self.0
            }

            /// Create without validation.
            ///
            /// The caller must uphold the invariants of this type. Checked in debug builds.
            #[cfg(feature = "unvalidated")]
            #[cfg_attr(docsrs, doc(cfg(feature = "unvalidated")))]
            pub fn unvalidated<C>(inner: C) -> Self
            where
                C: Into<std::borrow::Cow<'a, str>>,
            {
                let inner = inner.into();

                #[cfg(debug_assertions)]
                Self::verify(inner.as_bytes()).unwrap();

                Self(inner)
            }
        }

        impl<'a> TryFrom<&'a [u8]> for $target<'a> {
            type Error = $crate::error::ValidationError;

            fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
                Self::verify(value)?;

                // Safety: `unwrap` can't panic because `verify` only accepts ASCII.
                Ok(Self(std::borrow::Cow::Borrowed(std::str::from_utf8(value).unwrap())))
            }
        }

        impl<'a> TryFrom<Vec<u8>> for $target<'a> {
            type Error = $crate::error::ValidationError;

            fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
                Self::verify(&value)?;

                // Safety: `unwrap` can't panic because `verify` only accepts ASCII.
                Ok(Self(std::borrow::Cow::Owned(String::from_utf8(value).unwrap())))
            }
        }

        impl<'a> TryFrom<&'a str> for $target<'a> {
            type Error = $crate::error::ValidationError;

            fn try_from(value: &'a str) -> Result<Self, Self::Error> {
                Self::verify(value)?;

                Ok(Self(std::borrow::Cow::Borrowed(value)))
            }
        }

        impl<'a> TryFrom<String> for $target<'a> {
            type Error = $crate::error::ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::verify(&value)?;

                Ok(Self(std::borrow::Cow::Owned(value)))
            }
        }

        impl<'a> TryFrom<std::borrow::Cow<'a, str>> for $target<'a> {
            type Error = $crate::error::ValidationError;

            fn try_from(value: std::borrow::Cow<'a, str>) -> Result<Self, Self::Error> {
                Self::verify(value.as_bytes())?;

                Ok(Self(value))
            }
        }

        impl<'a> AsRef<str> for $target<'a> {
            fn as_ref(&self) -> &str {
                self.0.as_ref()
            }
        }

        impl<'a> std::fmt::Display for $target<'a> {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str(self.inner())
            }
        }
    };
}

pub(crate) use impl_string_type;

/// Reject empty values and return the first byte not matching `allowed`.
pub(crate) fn verify_bytes(
    value: &[u8],
    allow_empty: bool,
    allowed: fn(u8) -> bool,
) -> Result<(), ValidationError> {
    if !allow_empty && value.is_empty() {
        return Err(ValidationError::new(ValidationErrorKind::Empty));
    }

    if let Some(at) = value.iter().position(|b| !allowed(*b)) {
        return Err(ValidationError::new(ValidationErrorKind::InvalidByteAt {
            byte: value[at],
            at,
        }));
    }

    Ok(())
}

/// An atom.
///
/// "An atom consists of one or more non-special characters."
/// ([RFC 3501](https://www.rfc-editor.org/rfc/rfc3501.html))
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String")
)]
#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash, ToStatic)]
pub struct Atom<'a>(pub(crate) Cow<'a, str>);

impl<'a> Atom<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), ValidationError> {
        verify_bytes(value.as_ref(), false, is_atom_char)
    }
}

impl_string_type!(Atom);

/// An (extended) atom.
///
/// An atom that may additionally contain `]`. Used as the unquoted form of an `astring`.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct AtomExt<'a>(pub(crate) Cow<'a, str>);

impl<'a> AtomExt<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), ValidationError> {
        verify_bytes(value.as_ref(), false, is_astring_char)
    }
}

impl_string_type!(AtomExt);

impl<'a> From<Atom<'a>> for AtomExt<'a> {
    fn from(value: Atom<'a>) -> Self {
        Self(value.0)
    }
}

/// A tag.
///
/// Chosen by the client to correlate a command with its completion result.
/// `tag = 1*<any ASTRING-CHAR except "+">`
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct Tag<'a>(pub(crate) Cow<'a, str>);

impl<'a> Tag<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), ValidationError> {
        verify_bytes(value.as_ref(), false, |b| is_astring_char(b) && b != b'+')
    }
}

impl_string_type!(Tag);

/// Human-readable text, e.g., the trailing text of a status response.
///
/// `text = 1*TEXT-CHAR`
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct Text<'a>(pub(crate) Cow<'a, str>);

impl<'a> Text<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), ValidationError> {
        verify_bytes(value.as_ref(), false, is_text_char)
    }
}

impl_string_type!(Text);

/// A quoted string.
///
/// Stored unescaped. Escaping of `\` and `"` happens during encoding.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct Quoted<'a>(pub(crate) Cow<'a, str>);

impl<'a> Quoted<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), ValidationError> {
        verify_bytes(value.as_ref(), true, is_text_char)
    }
}

impl_string_type!(Quoted);

/// A single character that may appear in a quoted string, e.g., a hierarchy delimiter.
///
/// `QUOTED-CHAR = <any TEXT-CHAR except quoted-specials> / "\" quoted-specials`
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "char")
)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct QuotedChar(char);

impl QuotedChar {
    pub fn verify(input: char) -> Result<(), ValidationError> {
        if input.is_ascii() && is_text_char(input as u8) {
            Ok(())
        } else {
            Err(ValidationError::new(ValidationErrorKind::Invalid))
        }
    }

    pub fn inner(&self) -> char {
        self.0
    }

    /// Whether this char needs a backslash when put in a quoted string.
    pub fn needs_escaping(&self) -> bool {
        is_quoted_specials(self.0 as u8)
    }

    /// Create without validation. Checked in debug builds.
    #[cfg(feature = "unvalidated")]
    #[cfg_attr(docsrs, doc(cfg(feature = "unvalidated")))]
    pub fn unvalidated(inner: char) -> Self {
        #[cfg(debug_assertions)]
        Self::verify(inner).unwrap();

        Self(inner)
    }
}

impl TryFrom<char> for QuotedChar {
    type Error = ValidationError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        Self::verify(value)?;

        Ok(Self(value))
    }
}

/// Whether a literal is synchronizing (`{n}`) or non-synchronizing (`{n+}`, LITERAL+/LITERAL-).
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, ToStatic)]
pub enum LiteralMode {
    /// The sender must wait for a continuation request before sending the data.
    #[default]
    Sync,
    /// The data directly follows the announcement.
    NonSync,
}

/// A literal.
///
/// "A literal is a sequence of zero or more octets (including CR and LF), prefix-quoted with an
/// octet count in the form of an open brace ("{"), the number of octets, close brace ("}"), and
/// CRLF." ([RFC 3501](https://www.rfc-editor.org/rfc/rfc3501.html))
///
/// NUL is the only octet that is not allowed. Use [`Literal8`](crate::extensions::binary::Literal8)
/// for arbitrary binary data.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "LiteralShadow"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct Literal<'a> {
    pub(crate) data: Cow<'a, [u8]>,
    pub(crate) mode: LiteralMode,
}

#[cfg(feature = "serde")]
#[derive(Deserialize, Debug)]
struct LiteralShadow<'a> {
    data: Cow<'a, [u8]>,
    mode: LiteralMode,
}

#[cfg(feature = "serde")]
impl<'a> TryFrom<LiteralShadow<'a>> for Literal<'a> {
    type Error = ValidationError;

    fn try_from(value: LiteralShadow<'a>) -> Result<Self, Self::Error> {
        Literal::verify(&value.data)?;

        Ok(Self {
            data: value.data,
            mode: value.mode,
        })
    }
}

impl<'a> Literal<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), ValidationError> {
        verify_bytes(value.as_ref(), true, is_char8)
    }

    pub fn data(&self) -> &[u8] {
        self.data.as_ref()
    }

    pub fn mode(&self) -> LiteralMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: LiteralMode) {
        self.mode = mode;
    }

    /// Turn this literal into a non-synchronizing one.
    pub fn into_non_sync(self) -> Self {
        Self {
            data: self.data,
            mode: LiteralMode::NonSync,
        }
    }

    pub fn into_inner(self) -> Cow<'a, [u8]> {
        self.data
    }

    /// Create a synchronizing literal without validation. Checked in debug builds.
    #[cfg(feature = "unvalidated")]
    #[cfg_attr(docsrs, doc(cfg(feature = "unvalidated")))]
    pub fn unvalidated<D>(data: D) -> Self
    where
        D: Into<Cow<'a, [u8]>>,
    {
        let data = data.into();

        #[cfg(debug_assertions)]
        Self::verify(&data).unwrap();

        Self {
            data,
            mode: LiteralMode::Sync,
        }
    }

    /// Create a non-synchronizing literal without validation. Checked in debug builds.
    #[cfg(feature = "unvalidated")]
    #[cfg_attr(docsrs, doc(cfg(feature = "unvalidated")))]
    pub fn unvalidated_non_sync<D>(data: D) -> Self
    where
        D: Into<Cow<'a, [u8]>>,
    {
        Self::unvalidated(data).into_non_sync()
    }
}

impl<'a> TryFrom<&'a [u8]> for Literal<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        Self::verify(value)?;

        Ok(Self {
            data: Cow::Borrowed(value),
            mode: LiteralMode::Sync,
        })
    }
}

impl<'a> TryFrom<Vec<u8>> for Literal<'a> {
    type Error = ValidationError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::verify(&value)?;

        Ok(Self {
            data: Cow::Owned(value),
            mode: LiteralMode::Sync,
        })
    }
}

impl<'a> TryFrom<&'a str> for Literal<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::try_from(value.as_bytes())
    }
}

impl<'a> TryFrom<String> for Literal<'a> {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.into_bytes())
    }
}

impl<'a> AsRef<[u8]> for Literal<'a> {
    fn as_ref(&self) -> &[u8] {
        self.data.as_ref()
    }
}

/// Either a literal or a quoted string.
///
/// Conversions pick a quoted string when possible and fall back to a literal.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum IString<'a> {
    Literal(Literal<'a>),
    Quoted(Quoted<'a>),
}

impl<'a> IString<'a> {
    pub fn into_inner(self) -> Cow<'a, [u8]> {
        match self {
            Self::Literal(literal) => literal.into_inner(),
            Self::Quoted(quoted) => match quoted.into_inner() {
                Cow::Borrowed(s) => Cow::Borrowed(s.as_bytes()),
                Cow::Owned(s) => Cow::Owned(s.into_bytes()),
            },
        }
    }
}

impl<'a> TryFrom<&'a [u8]> for IString<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        if let Ok(quoted) = Quoted::try_from(value) {
            return Ok(Self::Quoted(quoted));
        }

        Ok(Self::Literal(Literal::try_from(value)?))
    }
}

impl<'a> TryFrom<Vec<u8>> for IString<'a> {
    type Error = ValidationError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        if Quoted::verify(&value).is_ok() {
            return Ok(Self::Quoted(Quoted::try_from(value)?));
        }

        Ok(Self::Literal(Literal::try_from(value)?))
    }
}

impl<'a> TryFrom<&'a str> for IString<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::try_from(value.as_bytes())
    }
}

impl<'a> TryFrom<String> for IString<'a> {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.into_bytes())
    }
}

impl<'a> From<Literal<'a>> for IString<'a> {
    fn from(value: Literal<'a>) -> Self {
        Self::Literal(value)
    }
}

impl<'a> From<Quoted<'a>> for IString<'a> {
    fn from(value: Quoted<'a>) -> Self {
        Self::Quoted(value)
    }
}

impl<'a> AsRef<[u8]> for IString<'a> {
    fn as_ref(&self) -> &[u8] {
        match self {
            Self::Literal(literal) => literal.as_ref(),
            Self::Quoted(quoted) => quoted.inner().as_bytes(),
        }
    }
}

/// A string or `NIL`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct NString<'a>(pub Option<IString<'a>>);

impl<'a> NString<'a> {
    /// `NIL`
    pub const fn nil() -> Self {
        Self(None)
    }

    pub fn into_option(self) -> Option<IString<'a>> {
        self.0
    }
}

impl_try_from!(IString<'a>, 'a, &'a [u8], NString<'a>);
impl_try_from!(IString<'a>, 'a, Vec<u8>, NString<'a>);
impl_try_from!(IString<'a>, 'a, &'a str, NString<'a>);
impl_try_from!(IString<'a>, 'a, String, NString<'a>);

impl<'a> From<IString<'a>> for NString<'a> {
    fn from(value: IString<'a>) -> Self {
        Self(Some(value))
    }
}

impl<'a> From<Literal<'a>> for NString<'a> {
    fn from(value: Literal<'a>) -> Self {
        Self(Some(IString::Literal(value)))
    }
}

impl<'a> From<Quoted<'a>> for NString<'a> {
    fn from(value: Quoted<'a>) -> Self {
        Self(Some(IString::Quoted(value)))
    }
}

/// An atom (with `]` allowed) or a string.
///
/// Conversions pick the cheapest representation: atom, then quoted string, then literal.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum AString<'a> {
    Atom(AtomExt<'a>),
    String(IString<'a>),
}

impl<'a> TryFrom<&'a [u8]> for AString<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        if let Ok(atom) = AtomExt::try_from(value) {
            return Ok(Self::Atom(atom));
        }

        Ok(Self::String(IString::try_from(value)?))
    }
}

impl<'a> TryFrom<Vec<u8>> for AString<'a> {
    type Error = ValidationError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        if AtomExt::verify(&value).is_ok() {
            return Ok(Self::Atom(AtomExt::try_from(value)?));
        }

        Ok(Self::String(IString::try_from(value)?))
    }
}

impl<'a> TryFrom<&'a str> for AString<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::try_from(value.as_bytes())
    }
}

impl<'a> TryFrom<String> for AString<'a> {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.into_bytes())
    }
}

impl<'a> From<Atom<'a>> for AString<'a> {
    fn from(value: Atom<'a>) -> Self {
        Self::Atom(AtomExt::from(value))
    }
}

impl<'a> From<AtomExt<'a>> for AString<'a> {
    fn from(value: AtomExt<'a>) -> Self {
        Self::Atom(value)
    }
}

impl<'a> From<IString<'a>> for AString<'a> {
    fn from(value: IString<'a>) -> Self {
        Self::String(value)
    }
}

impl<'a> From<Quoted<'a>> for AString<'a> {
    fn from(value: Quoted<'a>) -> Self {
        Self::String(IString::Quoted(value))
    }
}

impl<'a> From<Literal<'a>> for AString<'a> {
    fn from(value: Literal<'a>) -> Self {
        Self::String(IString::Literal(value))
    }
}

impl<'a> AsRef<[u8]> for AString<'a> {
    fn as_ref(&self) -> &[u8] {
        match self {
            Self::Atom(atom) => atom.inner().as_bytes(),
            Self::String(istr) => istr.as_ref(),
        }
    }
}

/// A charset, e.g., `UTF-8`.
///
/// `charset = atom / quoted`
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum Charset<'a> {
    Atom(Atom<'a>),
    Quoted(Quoted<'a>),
}

impl<'a> TryFrom<&'a str> for Charset<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        if let Ok(atom) = Atom::try_from(value) {
            return Ok(Self::Atom(atom));
        }

        Ok(Self::Quoted(Quoted::try_from(value)?))
    }
}

impl<'a> TryFrom<String> for Charset<'a> {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if Atom::verify(&value).is_ok() {
            return Ok(Self::Atom(Atom::try_from(value)?));
        }

        Ok(Self::Quoted(Quoted::try_from(value)?))
    }
}

impl<'a> From<Atom<'a>> for Charset<'a> {
    fn from(value: Atom<'a>) -> Self {
        Self::Atom(value)
    }
}

impl<'a> From<Quoted<'a>> for Charset<'a> {
    fn from(value: Quoted<'a>) -> Self {
        Self::Quoted(value)
    }
}

impl<'a> AsRef<str> for Charset<'a> {
    fn as_ref(&self) -> &str {
        match self {
            Self::Atom(atom) => atom.inner(),
            Self::Quoted(quoted) => quoted.inner(),
        }
    }
}

/// A vector with at least one element.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<T>")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct Vec1<T>(pub(crate) Vec<T>);

impl<T> Vec1<T> {
    pub fn verify(value: &[T]) -> Result<(), ValidationError> {
        if value.is_empty() {
            return Err(ValidationError::new(ValidationErrorKind::NotEnough {
                min: 1,
            }));
        }

        Ok(())
    }

    /// Create without validation. Checked in debug builds.
    #[cfg(feature = "unvalidated")]
    #[cfg_attr(docsrs, doc(cfg(feature = "unvalidated")))]
    pub fn unvalidated(inner: Vec<T>) -> Self {
        #[cfg(debug_assertions)]
        Self::verify(&inner).unwrap();

        Self(inner)
    }

    pub fn first(&self) -> &T {
        // Safety: `Vec1` is never empty.
        &self.0[0]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    // A `Vec1` is never empty. Provided for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> From<T> for Vec1<T> {
    fn from(value: T) -> Self {
        Self(vec![value])
    }
}

impl<T> TryFrom<Vec<T>> for Vec1<T> {
    type Error = ValidationError;

    fn try_from(inner: Vec<T>) -> Result<Self, Self::Error> {
        Self::verify(&inner)?;

        Ok(Self(inner))
    }
}

impl<T> AsRef<[T]> for Vec1<T> {
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

impl<T> IntoIterator for Vec1<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Vec1<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// A vector with at least two elements.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<T>")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct Vec2<T>(pub(crate) Vec<T>);

impl<T> Vec2<T> {
    pub fn verify(value: &[T]) -> Result<(), ValidationError> {
        if value.len() < 2 {
            return Err(ValidationError::new(ValidationErrorKind::NotEnough {
                min: 2,
            }));
        }

        Ok(())
    }

    /// Create without validation. Checked in debug builds.
    #[cfg(feature = "unvalidated")]
    #[cfg_attr(docsrs, doc(cfg(feature = "unvalidated")))]
    pub fn unvalidated(inner: Vec<T>) -> Self {
        #[cfg(debug_assertions)]
        Self::verify(&inner).unwrap();

        Self(inner)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> TryFrom<Vec<T>> for Vec2<T> {
    type Error = ValidationError;

    fn try_from(inner: Vec<T>) -> Result<Self, Self::Error> {
        Self::verify(&inner)?;

        Ok(Self(inner))
    }
}

impl<T> AsRef<[T]> for Vec2<T> {
    fn as_ref(&self) -> &[T] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_atom() {
        assert!(Atom::try_from("alice").is_ok());
        assert!(Atom::try_from("").is_err());
        assert!(Atom::try_from("al ice").is_err());
        assert!(Atom::try_from("al]ice").is_err());
        assert!(AtomExt::try_from("al]ice").is_ok());
        assert_eq!(
            *Atom::try_from("a(b").unwrap_err().kind(),
            ValidationErrorKind::InvalidByteAt { byte: b'(', at: 1 }
        );
    }

    #[test]
    fn test_conversion_tag() {
        assert!(Tag::try_from("A1").is_ok());
        assert!(Tag::try_from("a]").is_ok());
        assert!(Tag::try_from("").is_err());
        assert!(Tag::try_from("+").is_err());
        assert!(Tag::try_from("A 1").is_err());
        assert!(Tag::try_from("*").is_err());
    }

    #[test]
    fn test_conversion_text() {
        assert!(Text::try_from("Hello, World!").is_ok());
        assert!(Text::try_from("[ALERT]").is_ok());
        assert!(Text::try_from("").is_err());
        assert!(Text::try_from("a\r\nb").is_err());
        assert!(Text::try_from("äöü").is_err());
    }

    #[test]
    fn test_conversion_quoted_and_literal() {
        assert!(Quoted::try_from("").is_ok());
        assert!(Quoted::try_from("\"\\").is_ok());
        assert!(Quoted::try_from("\r").is_err());

        assert!(Literal::try_from(b"".as_ref()).is_ok());
        assert!(Literal::try_from(b"\r\n\xff".as_ref()).is_ok());
        assert!(Literal::try_from(b"\x00".as_ref()).is_err());
        assert_eq!(
            Literal::try_from("x").unwrap().mode(),
            LiteralMode::Sync
        );
        assert_eq!(
            Literal::try_from("x").unwrap().into_non_sync().mode(),
            LiteralMode::NonSync
        );
    }

    #[test]
    fn test_conversion_astring_picks_cheapest() {
        assert!(matches!(AString::try_from("alice"), Ok(AString::Atom(_))));
        assert!(matches!(
            AString::try_from("alice smith"),
            Ok(AString::String(IString::Quoted(_)))
        ));
        assert!(matches!(
            AString::try_from(b"\xca\xfe".as_ref()),
            Ok(AString::String(IString::Literal(_)))
        ));
        assert!(matches!(
            AString::try_from("line\r\nbreak"),
            Ok(AString::String(IString::Literal(_)))
        ));
        assert!(AString::try_from(b"\x00".as_ref()).is_err());
    }

    #[test]
    fn test_conversion_charset() {
        assert!(matches!(Charset::try_from("UTF-8"), Ok(Charset::Atom(_))));
        assert!(matches!(
            Charset::try_from("Some Charset"),
            Ok(Charset::Quoted(_))
        ));
    }

    #[test]
    fn test_quoted_char() {
        assert!(QuotedChar::try_from('/').is_ok());
        assert!(QuotedChar::try_from('"').unwrap().needs_escaping());
        assert!(QuotedChar::try_from('\n').is_err());
        assert!(QuotedChar::try_from('ä').is_err());
    }

    #[test]
    fn test_vec1() {
        assert!(Vec1::<u8>::try_from(vec![]).is_err());

        let vec1 = Vec1::try_from(vec![1, 2, 3]).unwrap();
        assert_eq!(*vec1.first(), 1);
        assert_eq!(vec1.len(), 3);
        assert_eq!(vec1.into_inner(), vec![1, 2, 3]);

        assert!(Vec2::try_from(vec![1]).is_err());
        assert!(Vec2::try_from(vec![1, 2]).is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialization_literal() {
        let literal: Literal =
            serde_json::from_str(r#"{"data":[120,10],"mode":"NonSync"}"#).unwrap();
        assert_eq!(literal.data(), b"x\n");
        assert_eq!(literal.mode(), LiteralMode::NonSync);

        assert!(serde_json::from_str::<Literal>(r#"{"data":[120,0],"mode":"Sync"}"#).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialization_string_types_refuse_invalid() {
        assert!(serde_json::from_str::<Atom>(r#""al ice""#).is_err());
        assert!(serde_json::from_str::<Tag>(r#""""#).is_err());
        assert!(serde_json::from_str::<Text>(r#""a\r\nb""#).is_err());
        assert!(serde_json::from_str::<Quoted>(r#""a\nb""#).is_err());
        assert!(serde_json::from_str::<Vec1<u8>>("[]").is_err());
    }
}

//! Authentication-related types.

use std::{
    borrow::Cow,
    fmt::{Display, Formatter},
};

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    core::{impl_try_from, Atom},
    error::{ValidationError, ValidationErrorKind},
    secret::Secret,
};

/// A SASL mechanism as used in `AUTHENTICATE` and `AUTH=` capabilities.
///
/// Matching is case-insensitive. Unknown mechanisms end up in [`AuthMechanism::Other`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum AuthMechanism<'a> {
    /// `PLAIN` (RFC 4616)
    Plain,
    /// `LOGIN` (draft-murchison-sasl-login)
    Login,
    /// `OAUTHBEARER` (RFC 7628)
    OAuthBearer,
    /// `XOAUTH2` (Google's pre-standard OAuth 2.0 mechanism)
    XOAuth2,
    /// `SCRAM-SHA-1` (RFC 5802)
    ScramSha1,
    /// `SCRAM-SHA-1-PLUS` (RFC 5802)
    ScramSha1Plus,
    /// `SCRAM-SHA-256` (RFC 7677)
    ScramSha256,
    /// `SCRAM-SHA-256-PLUS` (RFC 7677)
    ScramSha256Plus,
    /// `SCRAM-SHA3-512`
    ScramSha3_512,
    /// `SCRAM-SHA3-512-PLUS`
    ScramSha3_512Plus,
    Other(AuthMechanismOther<'a>),
}

impl<'a> AuthMechanism<'a> {
    fn typed(lowercase: &str) -> Option<AuthMechanism<'static>> {
        Some(match lowercase {
            "plain" => AuthMechanism::Plain,
            "login" => AuthMechanism::Login,
            "oauthbearer" => AuthMechanism::OAuthBearer,
            "xoauth2" => AuthMechanism::XOAuth2,
            "scram-sha-1" => AuthMechanism::ScramSha1,
            "scram-sha-1-plus" => AuthMechanism::ScramSha1Plus,
            "scram-sha-256" => AuthMechanism::ScramSha256,
            "scram-sha-256-plus" => AuthMechanism::ScramSha256Plus,
            "scram-sha3-512" => AuthMechanism::ScramSha3_512,
            "scram-sha3-512-plus" => AuthMechanism::ScramSha3_512Plus,
            _ => return None,
        })
    }
}

impl_try_from!(Atom<'a>, 'a, &'a [u8], AuthMechanism<'a>);
impl_try_from!(Atom<'a>, 'a, Vec<u8>, AuthMechanism<'a>);
impl_try_from!(Atom<'a>, 'a, &'a str, AuthMechanism<'a>);
impl_try_from!(Atom<'a>, 'a, String, AuthMechanism<'a>);
impl_try_from!(Atom<'a>, 'a, Cow<'a, str>, AuthMechanism<'a>);

impl<'a> From<Atom<'a>> for AuthMechanism<'a> {
    fn from(atom: Atom<'a>) -> Self {
        match Self::typed(&atom.inner().to_ascii_lowercase()) {
            Some(typed) => typed,
            None => Self::Other(AuthMechanismOther(atom)),
        }
    }
}

impl<'a> Display for AuthMechanism<'a> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Self::Plain => "PLAIN",
            Self::Login => "LOGIN",
            Self::OAuthBearer => "OAUTHBEARER",
            Self::XOAuth2 => "XOAUTH2",
            Self::ScramSha1 => "SCRAM-SHA-1",
            Self::ScramSha1Plus => "SCRAM-SHA-1-PLUS",
            Self::ScramSha256 => "SCRAM-SHA-256",
            Self::ScramSha256Plus => "SCRAM-SHA-256-PLUS",
            Self::ScramSha3_512 => "SCRAM-SHA3-512",
            Self::ScramSha3_512Plus => "SCRAM-SHA3-512-PLUS",
            Self::Other(other) => other.0.inner(),
        })
    }
}

/// A mechanism without a typed variant in [`AuthMechanism`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Atom<'a>"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct AuthMechanismOther<'a>(Atom<'a>);

impl<'a> AuthMechanismOther<'a> {
    pub fn verify(atom: &Atom<'a>) -> Result<(), ValidationError> {
        if AuthMechanism::typed(&atom.inner().to_ascii_lowercase()).is_some() {
            return Err(ValidationError::new(ValidationErrorKind::Reserved));
        }

        Ok(())
    }

    pub fn inner(&self) -> &Atom<'a> {
        &self.0
    }
}

impl<'a> TryFrom<Atom<'a>> for AuthMechanismOther<'a> {
    type Error = ValidationError;

    fn try_from(atom: Atom<'a>) -> Result<Self, Self::Error> {
        Self::verify(&atom)?;

        Ok(Self(atom))
    }
}

impl<'a> TryFrom<&'a str> for AuthMechanismOther<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::try_from(Atom::try_from(value)?)
    }
}

/// Data sent by the client during an `AUTHENTICATE` exchange.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum AuthenticateData<'a> {
    /// A (base64-decoded) SASL response.
    Continue(Secret<Cow<'a, [u8]>>),
    /// `*`, i.e., the client aborts the exchange.
    Cancel,
}

impl<'a> AuthenticateData<'a> {
    pub fn r#continue<D>(data: D) -> Self
    where
        D: Into<Cow<'a, [u8]>>,
    {
        Self::Continue(Secret::new(data.into()))
    }
}

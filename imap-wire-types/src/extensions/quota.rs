//! IMAP QUOTA Extension (RFC 9208)

use std::{
    borrow::Cow,
    fmt::{Display, Formatter},
};

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    command::CommandBody,
    core::{impl_try_from, AString, Atom, Vec1},
    error::{ValidationError, ValidationErrorKind},
    mailbox::Mailbox,
    response::Data,
};

impl<'a> CommandBody<'a> {
    pub fn get_quota<R>(root: R) -> Result<Self, R::Error>
    where
        R: TryInto<AString<'a>>,
    {
        Ok(CommandBody::GetQuota {
            root: root.try_into()?,
        })
    }

    pub fn get_quota_root<M>(mailbox: M) -> Result<Self, M::Error>
    where
        M: TryInto<Mailbox<'a>>,
    {
        Ok(CommandBody::GetQuotaRoot {
            mailbox: mailbox.try_into()?,
        })
    }

    pub fn set_quota<R>(root: R, quotas: Vec<QuotaSet<'a>>) -> Result<Self, R::Error>
    where
        R: TryInto<AString<'a>>,
    {
        Ok(CommandBody::SetQuota {
            root: root.try_into()?,
            quotas,
        })
    }
}

impl<'a> Data<'a> {
    pub fn quota<R>(root: R, quotas: Vec1<QuotaGet<'a>>) -> Result<Self, R::Error>
    where
        R: TryInto<AString<'a>>,
    {
        Ok(Self::Quota {
            root: root.try_into()?,
            quotas,
        })
    }

    pub fn quota_root<M>(mailbox: M, roots: Vec<AString<'a>>) -> Result<Self, M::Error>
    where
        M: TryInto<Mailbox<'a>>,
    {
        Ok(Self::QuotaRoot {
            mailbox: mailbox.try_into()?,
            roots,
        })
    }
}

/// A resource type, e.g., `STORAGE`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum Resource<'a> {
    /// `STORAGE`, in units of 1024 octets.
    Storage,
    /// `MESSAGE`, the number of messages.
    Message,
    /// `MAILBOX`, the number of mailboxes.
    Mailbox,
    /// `ANNOTATION-STORAGE`, in units of 1024 octets.
    AnnotationStorage,
    Other(ResourceOther<'a>),
}

impl_try_from!(Atom<'a>, 'a, &'a [u8], Resource<'a>);
impl_try_from!(Atom<'a>, 'a, Vec<u8>, Resource<'a>);
impl_try_from!(Atom<'a>, 'a, &'a str, Resource<'a>);
impl_try_from!(Atom<'a>, 'a, String, Resource<'a>);
impl_try_from!(Atom<'a>, 'a, Cow<'a, str>, Resource<'a>);

impl<'a> From<Atom<'a>> for Resource<'a> {
    fn from(atom: Atom<'a>) -> Self {
        match atom.inner().to_ascii_lowercase().as_ref() {
            "storage" => Self::Storage,
            "message" => Self::Message,
            "mailbox" => Self::Mailbox,
            "annotation-storage" => Self::AnnotationStorage,
            _ => Self::Other(ResourceOther(atom)),
        }
    }
}

impl<'a> Display for Resource<'a> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        f.write_str(match self {
            Self::Storage => "STORAGE",
            Self::Message => "MESSAGE",
            Self::Mailbox => "MAILBOX",
            Self::AnnotationStorage => "ANNOTATION-STORAGE",
            Self::Other(other) => other.0.inner(),
        })
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Atom<'a>"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct ResourceOther<'a>(Atom<'a>);

impl<'a> ResourceOther<'a> {
    pub fn inner(&self) -> &Atom<'a> {
        &self.0
    }
}

impl<'a> TryFrom<Atom<'a>> for ResourceOther<'a> {
    type Error = ValidationError;

    fn try_from(atom: Atom<'a>) -> Result<Self, Self::Error> {
        match Resource::from(atom) {
            Resource::Other(other) => Ok(other),
            _ => Err(ValidationError::new(ValidationErrorKind::Reserved)),
        }
    }
}

/// Usage and limit of a resource as returned in `QUOTA` data.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct QuotaGet<'a> {
    pub resource: Resource<'a>,
    pub usage: u64,
    pub limit: u64,
}

impl<'a> QuotaGet<'a> {
    pub fn new(resource: Resource<'a>, usage: u64, limit: u64) -> Self {
        Self {
            resource,
            usage,
            limit,
        }
    }
}

/// A new limit for a resource as requested in `SETQUOTA`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct QuotaSet<'a> {
    pub resource: Resource<'a>,
    pub limit: u64,
}

impl<'a> QuotaSet<'a> {
    pub fn new(resource: Resource<'a>, limit: u64) -> Self {
        Self { resource, limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_resource() {
        assert_eq!(Resource::try_from("storage").unwrap(), Resource::Storage);
        assert_eq!(
            Resource::try_from("ANNOTATION-STORAGE").unwrap(),
            Resource::AnnotationStorage
        );

        let other = Resource::try_from("X-FILES").unwrap();
        assert!(matches!(other, Resource::Other(_)));
        assert_eq!(other.to_string(), "X-FILES");

        assert!(ResourceOther::try_from(Atom::try_from("message").unwrap()).is_err());
    }
}

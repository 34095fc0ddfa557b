//! Client commands.
//!
//! See <https://www.rfc-editor.org/rfc/rfc3501#section-6>.

use std::borrow::Cow;

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    auth::AuthMechanism,
    command::error::{AppendError, CopyError, ListError, LoginError, RenameError},
    core::{AString, Charset, Literal, Tag, Vec1},
    datetime::DateTime,
    extensions::{
        binary::LiteralOrLiteral8,
        compress::CompressionAlgorithm,
        enable::CapabilityEnable,
        metadata::{Entry, EntryValue, GetMetadataOption},
        quota::QuotaSet,
        sort::SortCriterion,
        thread::ThreadingAlgorithm,
    },
    fetch::MacroOrMessageDataItemNames,
    flag::{Flag, StoreResponse, StoreType},
    mailbox::{ListMailbox, Mailbox},
    search::SearchKey,
    secret::Secret,
    sequence::SequenceSet,
    status::StatusDataItemName,
};

/// A command, i.e., a tag and a command body.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct Command<'a> {
    pub tag: Tag<'a>,
    pub body: CommandBody<'a>,
}

impl<'a> Command<'a> {
    pub fn new<T>(tag: T, body: CommandBody<'a>) -> Result<Self, T::Error>
    where
        T: TryInto<Tag<'a>>,
    {
        Ok(Self {
            tag: tag.try_into()?,
            body,
        })
    }

    pub fn name(&self) -> &'static str {
        self.body.name()
    }
}

/// The body of a command.
///
/// Variants are grouped by the session state in which they are valid. The codec doesn't track
/// session state, so any variant can be encoded and decoded at any time.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum CommandBody<'a> {
    // ----- Any state -----
    /// `CAPABILITY`
    Capability,
    /// `NOOP`
    Noop,
    /// `LOGOUT`
    Logout,

    // ----- Not authenticated -----
    /// `STARTTLS`
    StartTLS,
    /// `AUTHENTICATE <mechanism> [<initial response>]`
    ///
    /// The initial response (SASL-IR) is base64-encoded on the wire. An empty initial response is
    /// sent as `=`.
    Authenticate {
        mechanism: AuthMechanism<'a>,
        initial_response: Option<Secret<Cow<'a, [u8]>>>,
    },
    /// `LOGIN <username> <password>`
    Login {
        username: AString<'a>,
        password: Secret<AString<'a>>,
    },

    // ----- Authenticated -----
    Select {
        mailbox: Mailbox<'a>,
    },
    /// `UNSELECT` (RFC 3691)
    Unselect,
    Examine {
        mailbox: Mailbox<'a>,
    },
    Create {
        mailbox: Mailbox<'a>,
    },
    Delete {
        mailbox: Mailbox<'a>,
    },
    Rename {
        from: Mailbox<'a>,
        to: Mailbox<'a>,
    },
    Subscribe {
        mailbox: Mailbox<'a>,
    },
    Unsubscribe {
        mailbox: Mailbox<'a>,
    },
    List {
        reference: Mailbox<'a>,
        mailbox_wildcard: ListMailbox<'a>,
    },
    Lsub {
        reference: Mailbox<'a>,
        mailbox_wildcard: ListMailbox<'a>,
    },
    Status {
        mailbox: Mailbox<'a>,
        item_names: Vec<StatusDataItemName>,
    },
    /// `APPEND <mailbox> [<flags>] [<date-time>] <message>`
    Append {
        mailbox: Mailbox<'a>,
        flags: Vec<Flag<'a>>,
        date: Option<DateTime>,
        message: LiteralOrLiteral8<'a>,
    },
    /// `IDLE` (RFC 2177)
    Idle,
    /// `ENABLE` (RFC 5161)
    Enable {
        capabilities: Vec1<CapabilityEnable<'a>>,
    },
    /// `COMPRESS` (RFC 4978)
    Compress {
        algorithm: CompressionAlgorithm,
    },
    /// `GETQUOTA` (RFC 9208)
    GetQuota {
        root: AString<'a>,
    },
    /// `GETQUOTAROOT` (RFC 9208)
    GetQuotaRoot {
        mailbox: Mailbox<'a>,
    },
    /// `SETQUOTA` (RFC 9208)
    SetQuota {
        root: AString<'a>,
        quotas: Vec<QuotaSet<'a>>,
    },
    /// `SETMETADATA` (RFC 5464)
    SetMetadata {
        mailbox: Mailbox<'a>,
        entry_values: Vec1<EntryValue<'a>>,
    },
    /// `GETMETADATA` (RFC 5464)
    GetMetadata {
        options: Vec<GetMetadataOption>,
        mailbox: Mailbox<'a>,
        entries: Vec1<Entry<'a>>,
    },

    // ----- Selected -----
    Check,
    Close,
    Expunge,
    /// `UID EXPUNGE <sequence-set>` (RFC 4315)
    ExpungeUid {
        sequence_set: SequenceSet,
    },
    /// `[UID] SEARCH [CHARSET <charset>] <criteria>`
    Search {
        charset: Option<Charset<'a>>,
        criteria: Vec1<SearchKey<'a>>,
        uid: bool,
    },
    /// `[UID] SORT (<criteria>) <charset> <search criteria>` (RFC 5256)
    Sort {
        sort_criteria: Vec1<SortCriterion>,
        charset: Charset<'a>,
        search_criteria: Vec1<SearchKey<'a>>,
        uid: bool,
    },
    /// `[UID] THREAD <algorithm> <charset> <search criteria>` (RFC 5256)
    Thread {
        algorithm: ThreadingAlgorithm<'a>,
        charset: Charset<'a>,
        search_criteria: Vec1<SearchKey<'a>>,
        uid: bool,
    },
    /// `[UID] FETCH <sequence-set> <macro or item names>`
    Fetch {
        sequence_set: SequenceSet,
        macro_or_item_names: MacroOrMessageDataItemNames<'a>,
        uid: bool,
    },
    /// `[UID] STORE <sequence-set> [+|-]FLAGS[.SILENT] <flags>`
    Store {
        sequence_set: SequenceSet,
        kind: StoreType,
        response: StoreResponse,
        flags: Vec<Flag<'a>>,
        uid: bool,
    },
    /// `[UID] COPY <sequence-set> <mailbox>`
    Copy {
        sequence_set: SequenceSet,
        mailbox: Mailbox<'a>,
        uid: bool,
    },
    /// `[UID] MOVE <sequence-set> <mailbox>` (RFC 6851)
    Move {
        sequence_set: SequenceSet,
        mailbox: Mailbox<'a>,
        uid: bool,
    },
}

impl<'a> CommandBody<'a> {
    /// Prepend a tag to finalize the command body to a command.
    pub fn tag<T>(self, tag: T) -> Result<Command<'a>, T::Error>
    where
        T: TryInto<Tag<'a>>,
    {
        Command::new(tag, self)
    }

    pub fn authenticate(mechanism: AuthMechanism<'a>) -> Self {
        Self::Authenticate {
            mechanism,
            initial_response: None,
        }
    }

    /// Requires the `SASL-IR` capability.
    pub fn authenticate_with_ir<I>(mechanism: AuthMechanism<'a>, initial_response: I) -> Self
    where
        I: Into<Cow<'a, [u8]>>,
    {
        Self::Authenticate {
            mechanism,
            initial_response: Some(Secret::new(initial_response.into())),
        }
    }

    pub fn login<U, P>(username: U, password: P) -> Result<Self, LoginError<U::Error, P::Error>>
    where
        U: TryInto<AString<'a>>,
        P: TryInto<AString<'a>>,
    {
        Ok(Self::Login {
            username: username.try_into().map_err(LoginError::Username)?,
            password: Secret::new(password.try_into().map_err(LoginError::Password)?),
        })
    }

    pub fn select<M>(mailbox: M) -> Result<Self, M::Error>
    where
        M: TryInto<Mailbox<'a>>,
    {
        Ok(Self::Select {
            mailbox: mailbox.try_into()?,
        })
    }

    pub fn examine<M>(mailbox: M) -> Result<Self, M::Error>
    where
        M: TryInto<Mailbox<'a>>,
    {
        Ok(Self::Examine {
            mailbox: mailbox.try_into()?,
        })
    }

    pub fn create<M>(mailbox: M) -> Result<Self, M::Error>
    where
        M: TryInto<Mailbox<'a>>,
    {
        Ok(Self::Create {
            mailbox: mailbox.try_into()?,
        })
    }

    pub fn delete<M>(mailbox: M) -> Result<Self, M::Error>
    where
        M: TryInto<Mailbox<'a>>,
    {
        Ok(Self::Delete {
            mailbox: mailbox.try_into()?,
        })
    }

    pub fn rename<F, T>(from: F, to: T) -> Result<Self, RenameError<F::Error, T::Error>>
    where
        F: TryInto<Mailbox<'a>>,
        T: TryInto<Mailbox<'a>>,
    {
        Ok(Self::Rename {
            from: from.try_into().map_err(RenameError::From)?,
            to: to.try_into().map_err(RenameError::To)?,
        })
    }

    pub fn subscribe<M>(mailbox: M) -> Result<Self, M::Error>
    where
        M: TryInto<Mailbox<'a>>,
    {
        Ok(Self::Subscribe {
            mailbox: mailbox.try_into()?,
        })
    }

    pub fn unsubscribe<M>(mailbox: M) -> Result<Self, M::Error>
    where
        M: TryInto<Mailbox<'a>>,
    {
        Ok(Self::Unsubscribe {
            mailbox: mailbox.try_into()?,
        })
    }

    pub fn list<R, M>(
        reference: R,
        mailbox_wildcard: M,
    ) -> Result<Self, ListError<R::Error, M::Error>>
    where
        R: TryInto<Mailbox<'a>>,
        M: TryInto<ListMailbox<'a>>,
    {
        Ok(Self::List {
            reference: reference.try_into().map_err(ListError::Reference)?,
            mailbox_wildcard: mailbox_wildcard.try_into().map_err(ListError::Mailbox)?,
        })
    }

    pub fn lsub<R, M>(
        reference: R,
        mailbox_wildcard: M,
    ) -> Result<Self, ListError<R::Error, M::Error>>
    where
        R: TryInto<Mailbox<'a>>,
        M: TryInto<ListMailbox<'a>>,
    {
        Ok(Self::Lsub {
            reference: reference.try_into().map_err(ListError::Reference)?,
            mailbox_wildcard: mailbox_wildcard.try_into().map_err(ListError::Mailbox)?,
        })
    }

    pub fn status<M>(mailbox: M, item_names: Vec<StatusDataItemName>) -> Result<Self, M::Error>
    where
        M: TryInto<Mailbox<'a>>,
    {
        Ok(Self::Status {
            mailbox: mailbox.try_into()?,
            item_names,
        })
    }

    pub fn append<M, D>(
        mailbox: M,
        flags: Vec<Flag<'a>>,
        date: Option<DateTime>,
        message: D,
    ) -> Result<Self, AppendError<M::Error, D::Error>>
    where
        M: TryInto<Mailbox<'a>>,
        D: TryInto<Literal<'a>>,
    {
        Ok(Self::Append {
            mailbox: mailbox.try_into().map_err(AppendError::Mailbox)?,
            flags,
            date,
            message: LiteralOrLiteral8::Literal(message.try_into().map_err(AppendError::Data)?),
        })
    }

    pub fn search(charset: Option<Charset<'a>>, criteria: Vec1<SearchKey<'a>>, uid: bool) -> Self {
        Self::Search {
            charset,
            criteria,
            uid,
        }
    }

    pub fn fetch<S, I>(sequence_set: S, macro_or_item_names: I, uid: bool) -> Result<Self, S::Error>
    where
        S: TryInto<SequenceSet>,
        I: Into<MacroOrMessageDataItemNames<'a>>,
    {
        Ok(Self::Fetch {
            sequence_set: sequence_set.try_into()?,
            macro_or_item_names: macro_or_item_names.into(),
            uid,
        })
    }

    pub fn store<S>(
        sequence_set: S,
        kind: StoreType,
        response: StoreResponse,
        flags: Vec<Flag<'a>>,
        uid: bool,
    ) -> Result<Self, S::Error>
    where
        S: TryInto<SequenceSet>,
    {
        Ok(Self::Store {
            sequence_set: sequence_set.try_into()?,
            kind,
            response,
            flags,
            uid,
        })
    }

    pub fn copy<S, M>(
        sequence_set: S,
        mailbox: M,
        uid: bool,
    ) -> Result<Self, CopyError<S::Error, M::Error>>
    where
        S: TryInto<SequenceSet>,
        M: TryInto<Mailbox<'a>>,
    {
        Ok(Self::Copy {
            sequence_set: sequence_set.try_into().map_err(CopyError::Sequence)?,
            mailbox: mailbox.try_into().map_err(CopyError::Mailbox)?,
            uid,
        })
    }

    /// Requires the `MOVE` capability.
    pub fn r#move<S, M>(
        sequence_set: S,
        mailbox: M,
        uid: bool,
    ) -> Result<Self, CopyError<S::Error, M::Error>>
    where
        S: TryInto<SequenceSet>,
        M: TryInto<Mailbox<'a>>,
    {
        Ok(Self::Move {
            sequence_set: sequence_set.try_into().map_err(CopyError::Sequence)?,
            mailbox: mailbox.try_into().map_err(CopyError::Mailbox)?,
            uid,
        })
    }

    /// The command name as it appears on the wire (without a `UID` prefix).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Capability => "CAPABILITY",
            Self::Noop => "NOOP",
            Self::Logout => "LOGOUT",
            Self::StartTLS => "STARTTLS",
            Self::Authenticate { .. } => "AUTHENTICATE",
            Self::Login { .. } => "LOGIN",
            Self::Select { .. } => "SELECT",
            Self::Unselect => "UNSELECT",
            Self::Examine { .. } => "EXAMINE",
            Self::Create { .. } => "CREATE",
            Self::Delete { .. } => "DELETE",
            Self::Rename { .. } => "RENAME",
            Self::Subscribe { .. } => "SUBSCRIBE",
            Self::Unsubscribe { .. } => "UNSUBSCRIBE",
            Self::List { .. } => "LIST",
            Self::Lsub { .. } => "LSUB",
            Self::Status { .. } => "STATUS",
            Self::Append { .. } => "APPEND",
            Self::Idle => "IDLE",
            Self::Enable { .. } => "ENABLE",
            Self::Compress { .. } => "COMPRESS",
            Self::GetQuota { .. } => "GETQUOTA",
            Self::GetQuotaRoot { .. } => "GETQUOTAROOT",
            Self::SetQuota { .. } => "SETQUOTA",
            Self::SetMetadata { .. } => "SETMETADATA",
            Self::GetMetadata { .. } => "GETMETADATA",
            Self::Check => "CHECK",
            Self::Close => "CLOSE",
            Self::Expunge | Self::ExpungeUid { .. } => "EXPUNGE",
            Self::Search { .. } => "SEARCH",
            Self::Sort { .. } => "SORT",
            Self::Thread { .. } => "THREAD",
            Self::Fetch { .. } => "FETCH",
            Self::Store { .. } => "STORE",
            Self::Copy { .. } => "COPY",
            Self::Move { .. } => "MOVE",
        }
    }
}

/// Error-related types.
pub mod error {
    use thiserror::Error;

    #[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
    pub enum LoginError<U, P> {
        #[error("Invalid username: {0}")]
        Username(U),
        #[error("Invalid password: {0}")]
        Password(P),
    }

    #[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
    pub enum RenameError<F, T> {
        #[error("Invalid (from) mailbox: {0}")]
        From(F),
        #[error("Invalid (to) mailbox: {0}")]
        To(T),
    }

    #[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
    pub enum ListError<R, M> {
        #[error("Invalid reference: {0}")]
        Reference(R),
        #[error("Invalid mailbox: {0}")]
        Mailbox(M),
    }

    #[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
    pub enum AppendError<M, D> {
        #[error("Invalid mailbox: {0}")]
        Mailbox(M),
        #[error("Invalid data: {0}")]
        Data(D),
    }

    #[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
    pub enum CopyError<S, M> {
        #[error("Invalid sequence: {0}")]
        Sequence(S),
        #[error("Invalid mailbox: {0}")]
        Mailbox(M),
    }
}

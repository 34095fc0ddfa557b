//! Server responses.
//!
//! See <https://www.rfc-editor.org/rfc/rfc3501#section-7>.

use std::{
    borrow::Cow,
    fmt::{Debug, Display, Formatter},
    num::{NonZeroU32, TryFromIntError},
};

use base64::{engine::general_purpose::STANDARD as _base64, Engine};
use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    auth::AuthMechanism,
    core::{
        impl_string_type, impl_try_from, verify_bytes, AString, Atom, Charset, QuotedChar, Tag,
        Text, Vec1,
    },
    error::{ValidationError, ValidationErrorKind},
    extensions::{
        compress::CompressionAlgorithm,
        enable::CapabilityEnable,
        metadata::{MetadataCode, MetadataResponse},
        quota::{QuotaGet, Resource},
        sort::SortAlgorithm,
        thread::{Thread, ThreadingAlgorithm},
        uidplus::UidSet,
    },
    fetch::MessageDataItem,
    flag::{Flag, FlagNameAttribute, FlagPerm},
    mailbox::Mailbox,
    response::error::{ContinueError, FetchError, StatusError},
    status::StatusDataItem,
    utils::indicators::is_text_char_except_resp_specials,
};

/// `Greeting::<name>(code, text)` as a shorthand for `Greeting::new(<kind>, code, text)`.
macro_rules! greeting_shorthand {
    ($lt:lifetime, $name:ident, $kind:expr) => {
        pub fn $name<T>(code: Option<Code<$lt>>, text: T) -> Result<Self, StatusError<T::Error>>
        where
            T: TryInto<Text<$lt>>,
        {
            Self::new($kind, code, text)
        }
    };
}

/// `Status::<name>(tag, code, text)` as a shorthand for `Status::new(tag, <kind>, code, text)`.
macro_rules! status_shorthand {
    ($lt:lifetime, $name:ident, $kind:expr) => {
        pub fn $name<T>(
            tag: Option<Tag<$lt>>,
            code: Option<Code<$lt>>,
            text: T,
        ) -> Result<Self, StatusError<T::Error>>
        where
            T: TryInto<Text<$lt>>,
        {
            Self::new(tag, $kind, code, text)
        }
    };
}

/// The first line a server sends after a connection was established.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GreetingShadow"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct Greeting<'a> {
    pub kind: GreetingKind,
    pub code: Option<Code<'a>>,
    pub text: Text<'a>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize, Debug)]
struct GreetingShadow<'a> {
    kind: GreetingKind,
    code: Option<Code<'a>>,
    text: Text<'a>,
}

#[cfg(feature = "serde")]
impl<'a> TryFrom<GreetingShadow<'a>> for Greeting<'a> {
    type Error = StatusError<std::convert::Infallible>;

    fn try_from(value: GreetingShadow<'a>) -> Result<Self, Self::Error> {
        Self::new(value.kind, value.code, value.text)
    }
}

impl<'a> Greeting<'a> {
    /// Create a greeting.
    ///
    /// Without a `code`, a `text` starting with `[` is refused because it would be read back as a
    /// response code.
    pub fn new<T>(
        kind: GreetingKind,
        code: Option<Code<'a>>,
        text: T,
    ) -> Result<Self, StatusError<T::Error>>
    where
        T: TryInto<Text<'a>>,
    {
        let text = unambiguous_text(code.as_ref(), text)?;

        Ok(Self { kind, code, text })
    }

    greeting_shorthand!('a, ok, GreetingKind::Ok);
    greeting_shorthand!('a, preauth, GreetingKind::PreAuth);
    greeting_shorthand!('a, bye, GreetingKind::Bye);
}


#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ToStatic)]
pub enum GreetingKind {
    /// The connection is not yet authenticated.
    Ok,
    /// The connection was authenticated by external means.
    PreAuth,
    /// The server refuses the connection and closes it.
    Bye,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum Response<'a> {
    /// `+ ...`
    CommandContinuationRequest(CommandContinuationRequest<'a>),
    /// `* ...` (untagged server data)
    Data(Data<'a>),
    /// `<tag> OK|NO|BAD ...`, `* OK|NO|BAD ...`, or `* BYE ...`
    Status(Status<'a>),
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum Status<'a> {
    Untagged(StatusBody<'a>),
    Tagged(Tagged<'a>),
    Bye(Bye<'a>),
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "StatusBodyShadow"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct StatusBody<'a> {
    pub kind: StatusKind,
    pub code: Option<Code<'a>>,
    pub text: Text<'a>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize, Debug)]
struct StatusBodyShadow<'a> {
    kind: StatusKind,
    code: Option<Code<'a>>,
    text: Text<'a>,
}

#[cfg(feature = "serde")]
impl<'a> TryFrom<StatusBodyShadow<'a>> for StatusBody<'a> {
    type Error = StatusError<std::convert::Infallible>;

    fn try_from(value: StatusBodyShadow<'a>) -> Result<Self, Self::Error> {
        let text = unambiguous_text(value.code.as_ref(), value.text)?;

        Ok(Self {
            kind: value.kind,
            code: value.code,
            text,
        })
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ToStatic)]
pub enum StatusKind {
    Ok,
    No,
    Bad,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct Tagged<'a> {
    pub tag: Tag<'a>,
    pub body: StatusBody<'a>,
}

/// The server is about to close the connection.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ByeShadow"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct Bye<'a> {
    pub code: Option<Code<'a>>,
    pub text: Text<'a>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize, Debug)]
struct ByeShadow<'a> {
    code: Option<Code<'a>>,
    text: Text<'a>,
}

#[cfg(feature = "serde")]
impl<'a> TryFrom<ByeShadow<'a>> for Bye<'a> {
    type Error = StatusError<std::convert::Infallible>;

    fn try_from(value: ByeShadow<'a>) -> Result<Self, Self::Error> {
        let text = unambiguous_text(value.code.as_ref(), value.text)?;

        Ok(Self {
            code: value.code,
            text,
        })
    }
}

impl<'a> Status<'a> {
    /// Create a tagged (`tag` is `Some`) or untagged status response.
    ///
    /// Refuses a `text` starting with `[` when there is no `code`.
    pub fn new<T>(
        tag: Option<Tag<'a>>,
        kind: StatusKind,
        code: Option<Code<'a>>,
        text: T,
    ) -> Result<Self, StatusError<T::Error>>
    where
        T: TryInto<Text<'a>>,
    {
        let text = unambiguous_text(code.as_ref(), text)?;
        let body = StatusBody { kind, code, text };

        match tag {
            Some(tag) => Ok(Self::Tagged(Tagged { tag, body })),
            None => Ok(Self::Untagged(body)),
        }
    }

    status_shorthand!('a, ok, StatusKind::Ok);
    status_shorthand!('a, no, StatusKind::No);
    status_shorthand!('a, bad, StatusKind::Bad);

    pub fn bye<T>(code: Option<Code<'a>>, text: T) -> Result<Self, StatusError<T::Error>>
    where
        T: TryInto<Text<'a>>,
    {
        let text = unambiguous_text(code.as_ref(), text)?;

        Ok(Self::Bye(Bye { code, text }))
    }

    /// The tag, code and text, wherever they are stored.
    fn parts(&self) -> (Option<&Tag<'a>>, Option<&Code<'a>>, &Text<'a>) {
        match self {
            Self::Untagged(body) => (None, body.code.as_ref(), &body.text),
            Self::Tagged(tagged) => (
                Some(&tagged.tag),
                tagged.body.code.as_ref(),
                &tagged.body.text,
            ),
            Self::Bye(bye) => (None, bye.code.as_ref(), &bye.text),
        }
    }

    pub fn tag(&self) -> Option<&Tag<'a>> {
        self.parts().0
    }

    pub fn code(&self) -> Option<&Code<'a>> {
        self.parts().1
    }

    pub fn text(&self) -> &Text<'a> {
        self.parts().2
    }
}


fn unambiguous_text<'a, T>(
    code: Option<&Code<'a>>,
    text: T,
) -> Result<Text<'a>, StatusError<T::Error>>
where
    T: TryInto<Text<'a>>,
{
    let text = text.try_into().map_err(StatusError::Text)?;

    if code.is_none() && text.inner().starts_with('[') {
        return Err(StatusError::Ambiguity);
    }

    Ok(text)
}

/// Untagged server data.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum Data<'a> {
    /// `* CAPABILITY ...`
    Capability(Vec1<Capability<'a>>),
    /// `* LIST (<attributes>) <delimiter> <mailbox>`
    List {
        items: Vec<FlagNameAttribute<'a>>,
        /// `None` means the mailbox name is flat.
        delimiter: Option<QuotedChar>,
        mailbox: Mailbox<'a>,
    },
    /// `* LSUB (<attributes>) <delimiter> <mailbox>`
    Lsub {
        items: Vec<FlagNameAttribute<'a>>,
        delimiter: Option<QuotedChar>,
        mailbox: Mailbox<'a>,
    },
    /// `* STATUS <mailbox> (<items>)`
    Status {
        mailbox: Mailbox<'a>,
        items: Vec<StatusDataItem>,
    },
    /// `* SEARCH [<number>...]`
    ///
    /// Message sequence numbers or UIDs, depending on the command.
    Search(Vec<NonZeroU32>),
    /// `* SORT [<number>...]`
    Sort(Vec<NonZeroU32>),
    /// `* THREAD [<thread>...]`
    Thread(Vec<Thread>),
    /// `* FLAGS (<flags>)`
    Flags(Vec<Flag<'a>>),
    /// `* <n> EXISTS`
    Exists(u32),
    /// `* <n> RECENT`
    Recent(u32),
    /// `* <seq> EXPUNGE`
    Expunge(NonZeroU32),
    /// `* <seq> FETCH (<items>)`
    Fetch {
        seq: NonZeroU32,
        items: Vec1<MessageDataItem<'a>>,
    },
    /// `* ENABLED [<capability>...]`
    Enabled {
        capabilities: Vec<CapabilityEnable<'a>>,
    },
    /// `* QUOTA <root> (<resource> <usage> <limit> ...)`
    Quota {
        root: AString<'a>,
        quotas: Vec1<QuotaGet<'a>>,
    },
    /// `* QUOTAROOT <mailbox> [<root>...]`
    QuotaRoot {
        mailbox: Mailbox<'a>,
        roots: Vec<AString<'a>>,
    },
    /// `* METADATA <mailbox> ...`
    Metadata {
        mailbox: Mailbox<'a>,
        items: MetadataResponse<'a>,
    },
}

impl<'a> Data<'a> {
    pub fn capability<C>(caps: C) -> Result<Self, C::Error>
    where
        C: TryInto<Vec1<Capability<'a>>>,
    {
        Ok(Self::Capability(caps.try_into()?))
    }

    /// Refuses 0, which is not a message sequence number.
    pub fn expunge(seq: u32) -> Result<Self, TryFromIntError> {
        seq.try_into().map(Self::Expunge)
    }

    pub fn fetch<S, I>(seq: S, items: I) -> Result<Self, FetchError<S::Error, I::Error>>
    where
        S: TryInto<NonZeroU32>,
        I: TryInto<Vec1<MessageDataItem<'a>>>,
    {
        let seq = seq.try_into().map_err(FetchError::SeqOrUid)?;
        let items = items.try_into().map_err(FetchError::InvalidItems)?;

        Ok(Self::Fetch { seq, items })
    }
}

/// `+ ...`
///
/// Sent when the server is ready for the remainder of a command (e.g., after a synchronizing
/// literal was announced) or to carry a SASL challenge during `AUTHENTICATE`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
#[doc(alias = "Continuation")]
pub enum CommandContinuationRequest<'a> {
    Basic(CommandContinuationRequestBasic<'a>),
    /// A (decoded) SASL challenge.
    Base64(Cow<'a, [u8]>),
}

impl<'a> CommandContinuationRequest<'a> {
    pub fn basic<T>(code: Option<Code<'a>>, text: T) -> Result<Self, ContinueError<T::Error>>
    where
        T: TryInto<Text<'a>>,
    {
        Ok(Self::Basic(CommandContinuationRequestBasic::new(code, text)?))
    }

    pub fn base64<D>(data: D) -> Self
    where
        D: Into<Cow<'a, [u8]>>,
    {
        Self::Base64(data.into())
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "CommandContinuationRequestBasicShadow")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct CommandContinuationRequestBasic<'a> {
    code: Option<Code<'a>>,
    text: Text<'a>,
}

#[cfg(feature = "serde")]
#[derive(Deserialize, Debug)]
struct CommandContinuationRequestBasicShadow<'a> {
    code: Option<Code<'a>>,
    text: Text<'a>,
}

#[cfg(feature = "serde")]
impl<'a> TryFrom<CommandContinuationRequestBasicShadow<'a>>
    for CommandContinuationRequestBasic<'a>
{
    type Error = ContinueError<std::convert::Infallible>;

    fn try_from(value: CommandContinuationRequestBasicShadow<'a>) -> Result<Self, Self::Error> {
        Self::new(value.code, value.text)
    }
}

impl<'a> CommandContinuationRequestBasic<'a> {
    /// Create a basic continuation request.
    ///
    /// Without a `code`, the `text` must neither start with `[` nor be valid base64. Otherwise it
    /// would be read back as a code or as a [`CommandContinuationRequest::Base64`].
    pub fn new<T>(code: Option<Code<'a>>, text: T) -> Result<Self, ContinueError<T::Error>>
    where
        T: TryInto<Text<'a>>,
    {
        let text = text.try_into().map_err(ContinueError::Text)?;

        let looks_like_base64 = || _base64.decode(text.inner()).is_ok();
        if code.is_none() && (text.inner().starts_with('[') || looks_like_base64()) {
            return Err(ContinueError::Ambiguity);
        }

        Ok(Self { code, text })
    }

    pub fn code(&self) -> Option<&Code<'a>> {
        self.code.as_ref()
    }

    pub fn text(&self) -> &Text<'a> {
        &self.text
    }
}

/// A response code, i.e., the bracketed part in `* OK [UIDNEXT 4392] Predicted next UID`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub enum Code<'a> {
    /// `ALERT`: the text must be shown to the user.
    Alert,
    /// `BADCHARSET [(<charset>...)]`
    BadCharset { allowed: Vec<Charset<'a>> },
    /// `CAPABILITY ...`
    Capability(Vec1<Capability<'a>>),
    /// `PARSE`: a message header could not be parsed.
    Parse,
    /// `PERMANENTFLAGS (<flags>)`
    PermanentFlags(Vec<FlagPerm<'a>>),
    /// `READ-ONLY`
    ReadOnly,
    /// `READ-WRITE`
    ReadWrite,
    /// `TRYCREATE`: the target mailbox of APPEND or COPY does not exist.
    TryCreate,
    /// `UIDNEXT <n>`
    UidNext(NonZeroU32),
    /// `UIDVALIDITY <n>`
    UidValidity(NonZeroU32),
    /// `UNSEEN <n>`
    Unseen(NonZeroU32),
    /// `REFERRAL <imap url>` (RFC 2221)
    Referral(ReferralUrl<'a>),
    /// `COMPRESSIONACTIVE` (RFC 4978)
    CompressionActive,
    /// `OVERQUOTA` (RFC 9208)
    OverQuota,
    /// `TOOBIG` (RFC 7888)
    TooBig,
    /// `METADATA ...` (RFC 5464)
    Metadata(MetadataCode),
    /// `UNKNOWN-CTE` (RFC 3516)
    UnknownCte,
    /// `APPENDUID <uidvalidity> <uid>` (RFC 4315)
    AppendUid {
        uid_validity: NonZeroU32,
        uid: NonZeroU32,
    },
    /// `COPYUID <uidvalidity> <source> <destination>` (RFC 4315)
    CopyUid {
        uid_validity: NonZeroU32,
        source: UidSet,
        destination: UidSet,
    },
    /// `UIDNOTSTICKY` (RFC 4315)
    UidNotSticky,
    /// Everything not recognized above, including known codes with malformed arguments.
    Other(CodeOther<'a>),
}

// The numeric codes refuse 0.
impl<'a> Code<'a> {
    pub fn uidnext(value: u32) -> Result<Self, TryFromIntError> {
        value.try_into().map(Self::UidNext)
    }

    pub fn uidvalidity(value: u32) -> Result<Self, TryFromIntError> {
        value.try_into().map(Self::UidValidity)
    }

    pub fn unseen(value: u32) -> Result<Self, TryFromIntError> {
        value.try_into().map(Self::Unseen)
    }
}

/// The URL of a `REFERRAL` code.
///
/// Not checked to be a well-formed IMAP URL, but it can't leave the brackets of the code.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String")
)]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct ReferralUrl<'a>(Cow<'a, str>);

impl<'a> ReferralUrl<'a> {
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), ValidationError> {
        verify_bytes(value.as_ref(), false, is_text_char_except_resp_specials)
    }
}

impl_string_type!(ReferralUrl);

/// The raw bytes of an unrecognized code (everything between `[` and `]`).
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<u8>")
)]
#[derive(Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct CodeOther<'a>(Cow<'a, [u8]>);

impl<'a> Debug for CodeOther<'a> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "CodeOther(b\"{}\")",
            crate::utils::escape_byte_string(self.0.as_ref())
        )
    }
}

impl<'a> CodeOther<'a> {
    /// An empty code (`[]`) is allowed. `]`, CR, LF and non-ASCII bytes are not.
    pub fn verify(value: impl AsRef<[u8]>) -> Result<(), ValidationError> {
        verify_bytes(value.as_ref(), true, is_text_char_except_resp_specials)
    }

    /// Create an unrecognized code without validation. Checked in debug builds.
    ///
    /// Don't use this with untrusted input.
    #[cfg(feature = "unvalidated")]
    #[cfg_attr(docsrs, doc(cfg(feature = "unvalidated")))]
    pub fn unvalidated<D>(data: D) -> Self
    where
        D: Into<Cow<'a, [u8]>>,
    {
        let data = data.into();

        #[cfg(debug_assertions)]
        Self::verify(&data).unwrap();

        Self(data)
    }

    pub fn inner(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl<'a> TryFrom<&'a [u8]> for CodeOther<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a [u8]) -> Result<Self, Self::Error> {
        Self::verify(value)?;

        Ok(Self(Cow::Borrowed(value)))
    }
}

impl<'a> TryFrom<Vec<u8>> for CodeOther<'a> {
    type Error = ValidationError;

    fn try_from(value: Vec<u8>) -> Result<Self, Self::Error> {
        Self::verify(&value)?;

        Ok(Self(Cow::Owned(value)))
    }
}

impl<'a> TryFrom<&'a str> for CodeOther<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::try_from(value.as_bytes())
    }
}

/// A capability as announced in `CAPABILITY` data or in a `[CAPABILITY ...]` code.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
#[non_exhaustive]
pub enum Capability<'a> {
    Imap4Rev1,
    Auth(AuthMechanism<'a>),
    LoginDisabled,
    StartTls,
    /// RFC 2177
    Idle,
    /// RFC 2193
    MailboxReferrals,
    /// RFC 2221
    LoginReferrals,
    /// RFC 4959
    SaslIr,
    /// RFC 5161
    Enable,
    /// RFC 4978
    Compress { algorithm: CompressionAlgorithm },
    /// RFC 9208
    Quota,
    QuotaRes(Resource<'a>),
    QuotaSet,
    /// RFC 7888
    LiteralPlus,
    LiteralMinus,
    /// RFC 6851
    Move,
    /// RFC 3691
    Unselect,
    /// RFC 5256
    Sort(Option<SortAlgorithm<'a>>),
    Thread(ThreadingAlgorithm<'a>),
    /// RFC 5464 (server and mailbox annotations)
    Metadata,
    /// RFC 5464 (server annotations only)
    MetadataServer,
    /// RFC 3516
    Binary,
    /// RFC 4315
    UidPlus,
    Other(CapabilityOther<'a>),
}

/// Capabilities that are a bare name, with their canonical spelling.
const NAMED_CAPABILITIES: [(&str, Capability<'static>); 19] = [
    ("IMAP4REV1", Capability::Imap4Rev1),
    ("LOGINDISABLED", Capability::LoginDisabled),
    ("STARTTLS", Capability::StartTls),
    ("IDLE", Capability::Idle),
    ("MAILBOX-REFERRALS", Capability::MailboxReferrals),
    ("LOGIN-REFERRALS", Capability::LoginReferrals),
    ("SASL-IR", Capability::SaslIr),
    ("ENABLE", Capability::Enable),
    ("QUOTA", Capability::Quota),
    ("QUOTASET", Capability::QuotaSet),
    ("LITERAL+", Capability::LiteralPlus),
    ("LITERAL-", Capability::LiteralMinus),
    ("MOVE", Capability::Move),
    ("UNSELECT", Capability::Unselect),
    ("SORT", Capability::Sort(None)),
    ("METADATA", Capability::Metadata),
    ("METADATA-SERVER", Capability::MetadataServer),
    ("BINARY", Capability::Binary),
    ("UIDPLUS", Capability::UidPlus),
];

impl<'a> Capability<'a> {
    fn named(name: &str) -> Option<Capability<'static>> {
        NAMED_CAPABILITIES
            .into_iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(name))
            .map(|(_, capability)| capability)
    }

    fn name(&self) -> Option<&'static str> {
        NAMED_CAPABILITIES
            .iter()
            .find(|(_, capability)| capability == self)
            .map(|(name, _)| *name)
    }

    /// Try the `<name>=<value>` forms, e.g., `AUTH=PLAIN` or `QUOTA=RES-STORAGE`.
    fn parameterized(atom: &Atom<'a>) -> Option<Self> {
        let (name, value) = split_at_equals(&atom.0)?;

        match name.to_ascii_lowercase().as_ref() {
            "auth" => AuthMechanism::try_from(value).ok().map(Self::Auth),
            "compress" => Atom::try_from(value)
                .ok()
                .and_then(|atom| CompressionAlgorithm::try_from(atom).ok())
                .map(|algorithm| Self::Compress { algorithm }),
            "quota" => {
                if value.len() > 4 && value[..4].eq_ignore_ascii_case("res-") {
                    Resource::try_from(tail(value, 4)).ok().map(Self::QuotaRes)
                } else {
                    None
                }
            }
            "sort" => Atom::try_from(value)
                .ok()
                .map(|atom| Self::Sort(Some(SortAlgorithm::from(atom)))),
            "thread" => Atom::try_from(value)
                .ok()
                .map(|atom| Self::Thread(ThreadingAlgorithm::from(atom))),
            _ => None,
        }
    }
}

fn split_at_equals<'a>(cow: &Cow<'a, str>) -> Option<(String, Cow<'a, str>)> {
    match cow {
        Cow::Borrowed(str) => {
            let (name, value) = str.split_once('=')?;
            Some((name.to_owned(), Cow::Borrowed(value)))
        }
        Cow::Owned(string) => {
            let (name, value) = string.split_once('=')?;
            Some((name.to_owned(), Cow::Owned(value.to_owned())))
        }
    }
}

fn tail(cow: Cow<'_, str>, at: usize) -> Cow<'_, str> {
    match cow {
        Cow::Borrowed(str) => Cow::Borrowed(&str[at..]),
        Cow::Owned(string) => Cow::Owned(string[at..].to_owned()),
    }
}

impl_try_from!(Atom<'a>, 'a, &'a [u8], Capability<'a>);
impl_try_from!(Atom<'a>, 'a, Vec<u8>, Capability<'a>);
impl_try_from!(Atom<'a>, 'a, &'a str, Capability<'a>);
impl_try_from!(Atom<'a>, 'a, String, Capability<'a>);

impl<'a> From<Atom<'a>> for Capability<'a> {
    fn from(atom: Atom<'a>) -> Self {
        if let Some(capability) = Self::named(atom.inner()) {
            return capability;
        }

        if let Some(capability) = Self::parameterized(&atom) {
            return capability;
        }

        Self::Other(CapabilityOther(atom))
    }
}

impl<'a> Display for Capability<'a> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }

        match self {
            Self::Auth(mechanism) => write!(f, "AUTH={mechanism}"),
            Self::Compress { algorithm } => write!(f, "COMPRESS={algorithm}"),
            Self::QuotaRes(resource) => write!(f, "QUOTA=RES-{resource}"),
            Self::Sort(Some(algorithm)) => write!(f, "SORT={algorithm}"),
            Self::Thread(algorithm) => write!(f, "THREAD={algorithm}"),
            Self::Other(other) => f.write_str(other.0.inner()),
            // Named ones were written above.
            _ => Ok(()),
        }
    }
}

/// A capability without a typed variant in [`Capability`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Atom<'a>"))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, ToStatic)]
pub struct CapabilityOther<'a>(Atom<'a>);

impl<'a> CapabilityOther<'a> {
    pub fn verify(atom: &Atom<'a>) -> Result<(), ValidationError> {
        match Capability::from(atom.clone()) {
            Capability::Other(_) => Ok(()),
            _ => Err(ValidationError::new(ValidationErrorKind::Reserved)),
        }
    }

    pub fn inner(&self) -> &Atom<'a> {
        &self.0
    }
}

impl<'a> TryFrom<Atom<'a>> for CapabilityOther<'a> {
    type Error = ValidationError;

    fn try_from(atom: Atom<'a>) -> Result<Self, Self::Error> {
        Self::verify(&atom)?;

        Ok(Self(atom))
    }
}

impl<'a> TryFrom<&'a str> for CapabilityOther<'a> {
    type Error = ValidationError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> {
        Self::try_from(Atom::try_from(value)?)
    }
}

/// Error-related types.
pub mod error {
    use thiserror::Error;

    /// Refusal to build a greeting or a status response.
    #[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
    pub enum StatusError<T> {
        #[error("Text is not valid")]
        Text(T),
        /// The text would be read back as a response code.
        #[error("Text without a code must not start with \"[\"")]
        Ambiguity,
    }

    /// Refusal to build a `+ <text>` continuation request.
    #[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
    pub enum ContinueError<T> {
        #[error("Text is not valid")]
        Text(T),
        /// The text would be read back as a response code or as a base64 challenge.
        #[error("Text without a code must neither start with \"[\" nor be base64")]
        Ambiguity,
    }

    #[derive(Clone, Debug, Eq, Error, Hash, Ord, PartialEq, PartialOrd)]
    pub enum FetchError<S, I> {
        #[error("Invalid sequence or UID: {0:?}")]
        SeqOrUid(S),
        #[error("Invalid items: {0:?}")]
        InvalidItems(I),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conversion_data() {
        let _ = Data::capability(vec![Capability::Imap4Rev1]).unwrap();
        let _ = Data::fetch(1, vec![MessageDataItem::Rfc822Size(123)]).unwrap();
        assert!(Data::fetch(0, vec![MessageDataItem::Rfc822Size(123)]).is_err());
        assert!(Data::expunge(0).is_err());
        assert_eq!(Code::uidnext(4392), Ok(Code::UidNext(NonZeroU32::new(4392).unwrap())));
        assert!(Code::uidvalidity(0).is_err());
        assert!(Code::unseen(0).is_err());
    }

    #[test]
    fn test_continue_basic_must_not_look_like_code_or_base64() {
        // `text` needs at least one character.
        assert!(matches!(
            CommandContinuationRequest::basic(Some(Code::ReadWrite), ""),
            Err(ContinueError::Text(_))
        ));

        for (text, ambiguous) in [
            ("[Ready", true),
            ("VGVzdA==", true),
            ("abcd", true),
            ("go ahead", false),
            ("abc", false),
        ] {
            let got = CommandContinuationRequest::basic(None, text);
            assert_eq!(got == Err(ContinueError::Ambiguity), ambiguous, "{text}");
        }

        // A code disambiguates.
        assert!(CommandContinuationRequest::basic(Some(Code::Alert), "VGVzdA==").is_ok());
        assert!(CommandContinuationRequest::basic(Some(Code::Alert), "[x").is_ok());
    }

    #[test]
    fn test_status_refuses_bracket_without_code() {
        assert_eq!(
            Status::ok(None, None, "[not a code"),
            Err(StatusError::Ambiguity)
        );
        assert_eq!(Status::bye(None, "[oops"), Err(StatusError::Ambiguity));
        assert!(Greeting::ok(None, "[ALERT] Hello").is_err());
        assert!(Greeting::ok(Some(Code::Alert), "[ALERT] Hello").is_ok());
        assert!(Greeting::ok(Some(Code::Alert), "Hello, World!").is_ok());
        assert!(matches!(
            Status::no(Some(Tag::try_from("A1").unwrap()), None, ""),
            Err(StatusError::Text(_))
        ));
    }

    #[test]
    fn test_status_accessors() {
        let status = Status::no(
            Some(Tag::try_from("A1").unwrap()),
            Some(Code::TryCreate),
            "no such mailbox",
        )
        .unwrap();

        assert_eq!(status.tag().map(Tag::inner), Some("A1"));
        assert_eq!(status.code(), Some(&Code::TryCreate));
        assert_eq!(status.text().inner(), "no such mailbox");
    }

    #[test]
    fn test_conversion_capability() {
        let tests = [
            ("imap4REV1", Capability::Imap4Rev1),
            ("STARTTLS", Capability::StartTls),
            ("LITERAL+", Capability::LiteralPlus),
            ("auth=plain", Capability::Auth(AuthMechanism::Plain)),
            (
                "COMPRESS=DEFLATE",
                Capability::Compress {
                    algorithm: CompressionAlgorithm::Deflate,
                },
            ),
            ("QUOTA=RES-STORAGE", Capability::QuotaRes(Resource::Storage)),
            ("SORT", Capability::Sort(None)),
            (
                "THREAD=REFERENCES",
                Capability::Thread(ThreadingAlgorithm::References),
            ),
        ];

        for (atom, expected) in tests {
            assert_eq!(Capability::try_from(atom).unwrap(), expected);
        }

        assert_eq!(
            Capability::try_from("AUTH=PLAIN").unwrap().to_string(),
            "AUTH=PLAIN"
        );
        assert_eq!(
            Capability::QuotaRes(Resource::Storage).to_string(),
            "QUOTA=RES-STORAGE"
        );
    }

    #[test]
    fn test_conversion_capability_other() {
        for atom in ["XFOO", "COMPRESS=LZ4", "QUOTA=RES-", "AUTH"] {
            assert!(matches!(
                Capability::try_from(atom).unwrap(),
                Capability::Other(_)
            ));
        }

        assert_eq!(
            *CapabilityOther::try_from("idle").unwrap_err().kind(),
            ValidationErrorKind::Reserved
        );
        assert!(CapabilityOther::try_from("XFOO").is_ok());
    }

    #[test]
    fn test_conversion_code_other() {
        assert!(CodeOther::try_from("X-UNKNOWN 1 2").is_ok());
        assert!(CodeOther::try_from("").is_ok());

        for bad in [
            b"X]".as_ref(),
            b"X\r\n* BYE".as_ref(),
            b"X\nY".as_ref(),
            b"X\x00".as_ref(),
            b"\xCA\xFE".as_ref(),
        ] {
            assert!(CodeOther::try_from(bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_conversion_referral_url() {
        let url = ReferralUrl::try_from("imap://user@host/INBOX").unwrap();
        assert_eq!(url.inner(), "imap://user@host/INBOX");

        for bad in ["", "imap://host/]", "x]\r\n* BYE pwned", "imap://h\nost/", "imap://hö/"] {
            assert!(ReferralUrl::try_from(bad).is_err(), "{bad:?}");
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialization_code_other() {
        let code = Code::Other(CodeOther::try_from(vec![1, 2, 3]).unwrap());

        assert_eq!(
            serde_json::to_string(&code).unwrap(),
            r#"{"Other":[1,2,3]}"#
        );
        assert_eq!(
            serde_json::from_str::<Code>(r#"{"Other":[1,2,3]}"#).unwrap(),
            code
        );
        assert!(serde_json::from_str::<Code>(r#"{"Other":[88,93,13,10]}"#).is_err());
        assert!(serde_json::from_str::<Code>(r#"{"Referral":"x]\r\n* BYE"}"#).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialization_status_refuses_ambiguity() {
        let greeting = r#"{ "kind": "Ok", "code": null, "text": "[ALERT] hi" }"#;
        assert!(serde_json::from_str::<Greeting>(greeting).is_err());

        let greeting = r#"{ "kind": "Ok", "code": "Alert", "text": "[ALERT] hi" }"#;
        assert!(serde_json::from_str::<Greeting>(greeting).is_ok());

        let tagged = r#"{
            "Tagged": { "tag": "A1", "body": { "kind": "No", "code": null, "text": "[x" } }
        }"#;
        assert!(serde_json::from_str::<Status>(tagged).is_err());

        let untagged = r#"{ "Untagged": { "kind": "Ok", "code": null, "text": "fine" } }"#;
        assert!(serde_json::from_str::<Status>(untagged).is_ok());

        let bye = r#"{ "Bye": { "code": null, "text": "[x" } }"#;
        assert!(serde_json::from_str::<Status>(bye).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialization_continue_basic() {
        let request: CommandContinuationRequestBasic =
            serde_json::from_str(r#"{ "code": null, "text": "send literal data" }"#).unwrap();
        assert_eq!(request.code(), None);
        assert_eq!(request.text().inner(), "send literal data");

        for refused in [
            r#"{ "code": null, "text": "[send literal data" }"#,
            r#"{ "code": null, "text": "VGVzdA==" }"#,
        ] {
            assert!(serde_json::from_str::<CommandContinuationRequestBasic>(refused).is_err());
        }
    }
}

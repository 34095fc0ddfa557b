//! # Encoding of messages.
//!
//! [`Encoder::encode`] does not return a flat byte vector but an [`Encoded`] message: a queue of
//! [`Fragment`]s. A literal may require the peer's permission before it is sent, so callers
//! walk the fragments and wait for a continuation request where the [`LiteralMode`] says so.
//!
//! Every encoded message has the shape `Line (Literal Line)*`, i.e., `2k + 1` fragments for `k`
//! literals. The final line is always present, even when it is empty.
//!
//! # Example
//!
//! ```rust
//! use imap_wire::{
//!     encode::{Encoder, Fragment},
//!     imap_wire_types::{
//!         command::{Command, CommandBody},
//!         core::LiteralMode,
//!     },
//!     CommandCodec,
//! };
//!
//! let command = Command::new("A1", CommandBody::login("alice", "Pa²²W0rD").unwrap()).unwrap();
//!
//! for fragment in CommandCodec::default().encode(&command) {
//!     match fragment {
//!         Fragment::Line { data } => {
//!             println!("C: {}", String::from_utf8_lossy(&data));
//!         }
//!         Fragment::Literal { data, mode } => match mode {
//!             LiteralMode::Sync => {
//!                 // Wait for `+ ...` before sending `data`.
//!             }
//!             LiteralMode::NonSync => {
//!                 // Send `data` right away.
//!             }
//!         },
//!     }
//! }
//! ```
//!
//! ```imap
//! C: A1 LOGIN alice {10}
//! S: + ...
//! C: Pa²²W0rD
//! ```

use std::{borrow::Borrow, collections::VecDeque, io::Write, num::NonZeroU32};

use imap_wire_types::{
    auth::AuthenticateData,
    command::Command,
    core::LiteralMode,
    extensions::idle::IdleDone,
    response::{Greeting, Response},
};

use crate::{AuthenticateDataCodec, CommandCodec, GreetingCodec, IdleDoneCodec, ResponseCodec};

/// Encoder.
///
/// Implemented for types that know how to encode a specific IMAP message. See
/// [implementors](trait.Encoder.html#implementors).
pub trait Encoder {
    type Message<'a>;

    /// Encode this message.
    fn encode(&self, message: &Self::Message<'_>) -> Encoded;
}

/// An encoded message.
///
/// Iterate over it to obtain the [`Fragment`]s in order, or [`dump`](Encoded::dump) whatever was
/// not consumed yet.
///
/// # Example
///
/// ```rust
/// use imap_wire::{
///     encode::{Encoder, Fragment},
///     imap_wire_types::command::{Command, CommandBody},
///     CommandCodec,
/// };
///
/// let cmd = Command::new("A", CommandBody::login("alice", "pass").unwrap()).unwrap();
///
/// for fragment in CommandCodec::default().encode(&cmd) {
///     match fragment {
///         Fragment::Line { data } => {}
///         Fragment::Literal { data, mode } => {}
///     }
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Encoded {
    items: VecDeque<Fragment>,
}

impl Encoded {
    /// Dump the (remaining) encoded data without being guided by [`Fragment`]s.
    pub fn dump(self) -> Vec<u8> {
        self.items
            .into_iter()
            .fold(Vec::new(), |mut out, fragment| {
                match fragment {
                    Fragment::Line { mut data } | Fragment::Literal { mut data, .. } => {
                        out.append(&mut data)
                    }
                }
                out
            })
    }
}

impl Iterator for Encoded {
    type Item = Fragment;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.pop_front()
    }
}

/// A piece of an encoded message.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Fragment {
    /// A line that is ready to be sent.
    ///
    /// Lines announcing a literal end with the `{n}\r\n` (or `{n+}\r\n`, `~{n}\r\n`) prefix.
    Line { data: Vec<u8> },

    /// Literal data that may require a continuation request before it is sent.
    Literal { data: Vec<u8>, mode: LiteralMode },
}

//--------------------------------------------------------------------------------------------------

/// Accumulates bytes and cuts them into fragments at literal boundaries.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct EncodeContext {
    accumulator: Vec<u8>,
    items: VecDeque<Fragment>,
}

impl EncodeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the current line, e.g., after writing a literal announcement.
    pub fn push_line(&mut self) {
        self.items.push_back(Fragment::Line {
            data: std::mem::take(&mut self.accumulator),
        })
    }

    /// Turn everything written since the last cut into literal data.
    pub fn push_literal(&mut self, mode: LiteralMode) {
        self.items.push_back(Fragment::Literal {
            data: std::mem::take(&mut self.accumulator),
            mode,
        })
    }

    pub fn into_items(mut self) -> VecDeque<Fragment> {
        self.push_line();
        self.items
    }

    #[cfg(test)]
    pub(crate) fn dump(self) -> Vec<u8> {
        Encoded {
            items: self.into_items(),
        }
        .dump()
    }
}

impl Write for EncodeContext {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.accumulator.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

macro_rules! impl_encoder_for_codec {
    ($codec:ty, $message:ty) => {
        impl Encoder for $codec {
            type Message<'a> = $message;

            fn encode(&self, message: &Self::Message<'_>) -> Encoded {
                let mut encode_context = EncodeContext::new();

                // Safety: `EncodeContext` writes into a `Vec<u8>` and never fails.
                #[allow(clippy::unwrap_used)]
                EncodeIntoContext::encode_ctx(message.borrow(), &mut encode_context).unwrap();

                Encoded {
                    items: encode_context.into_items(),
                }
            }
        }
    };
}

impl_encoder_for_codec!(GreetingCodec, Greeting<'a>);
impl_encoder_for_codec!(CommandCodec, Command<'a>);
impl_encoder_for_codec!(AuthenticateDataCodec, AuthenticateData<'a>);
impl_encoder_for_codec!(ResponseCodec, Response<'a>);
impl_encoder_for_codec!(IdleDoneCodec, IdleDone);

// -------------------------------------------------------------------------------------------------

/// Serialization of a value into an [`EncodeContext`].
///
/// Implemented next to the parser of each type.
pub(crate) trait EncodeIntoContext {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()>;
}

impl EncodeIntoContext for u32 {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        write!(ctx, "{self}")
    }
}

impl EncodeIntoContext for u64 {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        write!(ctx, "{self}")
    }
}

impl EncodeIntoContext for NonZeroU32 {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        write!(ctx, "{self}")
    }
}

pub(crate) mod utils {
    use std::io::Write;

    use super::{EncodeContext, EncodeIntoContext};

    /// `"(" a SP b ... ")"` or `NIL` when empty.
    pub struct List1OrNil<'a, T>(pub &'a [T], pub &'a [u8]);

    /// `"(" k SP v SP ... ")"` or `NIL` when empty.
    pub struct List1AttributeValueOrNil<'a, T>(pub &'a [(T, T)]);

    pub(crate) fn join_serializable<I: EncodeIntoContext>(
        elements: &[I],
        sep: &[u8],
        ctx: &mut EncodeContext,
    ) -> std::io::Result<()> {
        for (index, element) in elements.iter().enumerate() {
            if index > 0 {
                ctx.write_all(sep)?;
            }
            element.encode_ctx(ctx)?;
        }

        Ok(())
    }

    /// Write `prefix` and the element for every element, e.g., `" 1 2 3"` for `* SEARCH`.
    pub(crate) fn prefix_serializable<I: EncodeIntoContext>(
        elements: &[I],
        prefix: &[u8],
        ctx: &mut EncodeContext,
    ) -> std::io::Result<()> {
        for element in elements {
            ctx.write_all(prefix)?;
            element.encode_ctx(ctx)?;
        }

        Ok(())
    }

    impl<'a, T> EncodeIntoContext for List1OrNil<'a, T>
    where
        T: EncodeIntoContext,
    {
        fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
            if self.0.is_empty() {
                return ctx.write_all(b"NIL");
            }

            ctx.write_all(b"(")?;
            join_serializable(self.0, self.1, ctx)?;
            ctx.write_all(b")")
        }
    }

    impl<'a, T> EncodeIntoContext for List1AttributeValueOrNil<'a, T>
    where
        T: EncodeIntoContext,
    {
        fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
            if self.0.is_empty() {
                return ctx.write_all(b"NIL");
            }

            ctx.write_all(b"(")?;
            for (index, (attribute, value)) in self.0.iter().enumerate() {
                if index > 0 {
                    ctx.write_all(b" ")?;
                }
                attribute.encode_ctx(ctx)?;
                ctx.write_all(b" ")?;
                value.encode_ctx(ctx)?;
            }
            ctx.write_all(b")")
        }
    }
}

//! # Streaming IMAP codec
//!
//! imap-wire parses and serializes [IMAP4rev1] messages, i.e., greetings, commands, responses,
//! authenticate data lines, and the `DONE` that ends `IDLE`. The message types themselves live in
//! [imap-wire-types](imap_wire_types) and are re-exported as [`imap_wire_types`].
//!
//! Every message type has a codec: [`GreetingCodec`], [`CommandCodec`], [`ResponseCodec`],
//! [`AuthenticateDataCodec`], and [`IdleDoneCodec`].
//!
//! Note that IMAP traces are not guaranteed to be UTF-8.
//!
//! ## Decoding
//!
//! Decoding is provided through the [`Decoder`](decode::Decoder) trait. A decoder takes a buffer
//! and returns the parsed message together with the bytes that were not consumed. When the buffer
//! doesn't hold a full message yet, the error tells the caller what to do next. See the
//! [`decode`] module documentation for the details, in particular for literals.
//!
//! ```rust
//! use imap_wire::{
//!     decode::Decoder,
//!     imap_wire_types::{
//!         core::Text,
//!         response::{Code, Greeting, GreetingKind},
//!     },
//!     GreetingCodec,
//! };
//!
//! let (remaining, greeting) = GreetingCodec::default()
//!     .decode(b"* OK [ALERT] Hello, World!\r\n<remaining>")
//!     .unwrap();
//!
//! assert_eq!(
//!     greeting,
//!     Greeting {
//!         kind: GreetingKind::Ok,
//!         code: Some(Code::Alert),
//!         text: Text::try_from("Hello, World!").unwrap(),
//!     }
//! );
//! assert_eq!(remaining, &b"<remaining>"[..])
//! ```
//!
//! ## Encoding
//!
//! Encoding is provided through the [`Encoder`](encode::Encoder) trait. A message is turned into a
//! sequence of [`Fragment`](encode::Fragment)s so that a client can wait for a continuation
//! request before it sends a synchronizing literal. See the [`encode`] module documentation.
//!
//! ```rust
//! use imap_wire::{
//!     encode::Encoder,
//!     imap_wire_types::{
//!         core::Text,
//!         response::{Code, Greeting, GreetingKind},
//!     },
//!     GreetingCodec,
//! };
//!
//! let greeting = Greeting {
//!     kind: GreetingKind::Ok,
//!     code: Some(Code::Alert),
//!     text: Text::try_from("Hello, World!").unwrap(),
//! };
//!
//! let bytes = GreetingCodec::default().encode(&greeting).dump();
//!
//! assert_eq!(bytes, &b"* OK [ALERT] Hello, World!\r\n"[..]);
//! ```
//!
//! ## Features
//!
//! | Feature                         | Description                                       |
//! |---------------------------------|---------------------------------------------------|
//! | serde                           | Forwarded to imap-wire-types                      |
//! | quirk_crlf_relaxed              | Make `\r` in `\r\n` optional                      |
//! | quirk_missing_text              | Accept a status response without `text`          |
//! | quirk_rectify_numbers           | Rectify negative octet counts to 0                |
//! | quirk_trailing_space_capability | Accept a trailing space in `CAPABILITY` data      |
//! | quirk_trailing_space_search     | Accept a trailing space in `SEARCH` data          |
//! | quirk_trailing_space_status     | Accept a trailing space in `STATUS` data          |
//! | quirk_empty_continue_req        | Accept `+\r\n`                                    |
//!
//! `quirk` enables all quirks except `quirk_crlf_relaxed`. No quirk is enabled by default.
//!
//! ## Quirks
//!
//! Features starting with `quirk_` cope with peers that are *almost* standard-conforming. They
//! only relax decoding. Encoding always produces standard-conforming messages. Whenever a quirk
//! rectifies input, a warning is emitted through the [`log`](https://docs.rs/log) facade.
//!
//! [IMAP4rev1]: https://www.rfc-editor.org/rfc/rfc3501

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod auth;
mod body;
mod codec;
mod command;
mod core;
mod datetime;
mod envelope;
mod extensions;
mod fetch;
mod flag;
mod mailbox;
mod response;
mod search;
mod sequence;
mod status;
#[cfg(test)]
mod testing;

pub use codec::*;
// Re-export.
pub use imap_wire_types;

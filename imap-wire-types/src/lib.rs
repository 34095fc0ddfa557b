//! # Validated IMAP types
//!
//! The most prominent types are [`Greeting`](response::Greeting), [`Command`](command::Command),
//! and [`Response`](response::Response). Together with
//! [`AuthenticateData`](auth::AuthenticateData) and [`IdleDone`](extensions::idle::IdleDone) they
//! are called "messages".
//!
//! None of the constructors allow the creation of a message that can't be represented in IMAP.
//! For example, a [`Tag`](core::Tag) is "just a string", but it must not be empty, contain
//! whitespace, or contain a `+`. Construction goes through [`TryFrom`] and fails otherwise.
//!
//! ## String types decide the protocol flow
//!
//! [`Atom`](core::Atom), [`Quoted`](core::Quoted), and [`Literal`](core::Literal) are more than
//! containers. Sending a password as a synchronizing literal requires the client to wait for a
//! continuation request from the server, while an atom or quoted string is sent in one go.
//! Conversions pick the cheapest valid representation, but the [`core`] module lets you choose.
//!
//! ## Example
//!
//! ```
//! use imap_wire_types::{
//!     command::{Command, CommandBody},
//!     core::Tag,
//! };
//!
//! let cmd = Command::new("A123", CommandBody::Noop).unwrap();
//! assert_eq!(cmd, CommandBody::Noop.tag("A123").unwrap());
//! assert_eq!(
//!     cmd,
//!     Command {
//!         tag: Tag::try_from("A123").unwrap(),
//!         body: CommandBody::Noop,
//!     }
//! );
//! ```
//!
//! ```
//! use std::num::NonZeroU32;
//!
//! use imap_wire_types::{
//!     core::{NString, Vec1},
//!     fetch::{MessageDataItem, Section},
//!     response::Data,
//! };
//!
//! let data = Data::Fetch {
//!     seq: NonZeroU32::new(42).unwrap(),
//!     items: Vec1::try_from(vec![
//!         MessageDataItem::Rfc822Size(1337),
//!         MessageDataItem::BodyExt {
//!             section: Some(Section::Text(None)),
//!             origin: None,
//!             data: NString::try_from("Hello").unwrap(),
//!         },
//!     ])
//!     .unwrap(),
//! };
//! ```
//!
//! ## Features
//!
//! | Feature     | Description                                                  |
//! |-------------|--------------------------------------------------------------|
//! | serde       | `Serialize` and `Deserialize` for all types                  |
//! | unvalidated | `unvalidated` constructors, checked in debug builds only     |

#![forbid(unsafe_code)]
#![deny(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod auth;
pub mod body;
pub mod command;
pub mod core;
pub mod datetime;
pub mod envelope;
pub mod error;
pub mod extensions;
pub mod fetch;
pub mod flag;
pub mod mailbox;
pub mod response;
pub mod search;
pub mod secret;
pub mod sequence;
pub mod status;
pub mod utils;

pub use bounded_static;

//! IMAP extensions.
//!
//! Each module holds the types one extension adds. Variants an extension adds to shared enums,
//! e.g., [`CommandBody::Idle`](crate::command::CommandBody::Idle), live next to the core variants.

pub mod binary;
pub mod compress;
pub mod enable;
pub mod idle;
pub mod metadata;
pub mod quota;
pub mod sort;
pub mod thread;
pub mod uidplus;

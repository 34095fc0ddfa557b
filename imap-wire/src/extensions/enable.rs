//! ENABLE (RFC 5161)
//!
//! ```abnf
//! capability    =/ "ENABLE"
//! command-any   =/ "ENABLE" 1*(SP capability)
//! response-data =/ "*" SP enable-data CRLF
//! ```

use std::io::Write;

use abnf_core::streaming::sp;
use imap_wire_types::{
    command::CommandBody, core::Vec1, extensions::enable::CapabilityEnable, response::Data,
};
use nom::{
    bytes::streaming::tag_no_case,
    combinator::map,
    multi::{many0, many1},
    sequence::preceded,
};

use crate::{
    codec::{
        decode::IMAPResult,
        encode::{EncodeContext, EncodeIntoContext},
    },
    core::atom,
};

/// `enable = "ENABLE" 1*(SP capability)`
pub(crate) fn enable(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    map(
        preceded(
            tag_no_case(b"ENABLE"),
            many1(preceded(sp, capability_enable)),
        ),
        |capabilities| CommandBody::Enable {
            capabilities: Vec1::unvalidated(capabilities),
        },
    )(input)
}

pub(crate) fn capability_enable(input: &[u8]) -> IMAPResult<&[u8], CapabilityEnable> {
    map(atom, CapabilityEnable::from)(input)
}

/// `enable-data = "ENABLED" *(SP capability)`
pub(crate) fn enable_data(input: &[u8]) -> IMAPResult<&[u8], Data> {
    map(
        preceded(
            tag_no_case(b"ENABLED"),
            many0(preceded(sp, capability_enable)),
        ),
        |capabilities| Data::Enabled { capabilities },
    )(input)
}

impl<'a> EncodeIntoContext for CapabilityEnable<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        write!(ctx, "{}", self)
    }
}

//! COMPRESS (RFC 4978)
//!
//! ```abnf
//! command-auth   =/ compress
//! capability     =/ "COMPRESS=" algorithm
//! resp-text-code =/ "COMPRESSIONACTIVE"
//! ```

use std::io::Write;

use imap_wire_types::{command::CommandBody, extensions::compress::CompressionAlgorithm};
use nom::{
    bytes::streaming::tag_no_case,
    combinator::{map, value},
    sequence::preceded,
};

use crate::codec::{
    decode::IMAPResult,
    encode::{EncodeContext, EncodeIntoContext},
};

/// `algorithm = "DEFLATE"`
pub(crate) fn algorithm(input: &[u8]) -> IMAPResult<&[u8], CompressionAlgorithm> {
    value(CompressionAlgorithm::Deflate, tag_no_case(b"DEFLATE"))(input)
}

/// `compress = "COMPRESS" SP algorithm`
pub(crate) fn compress(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    map(preceded(tag_no_case(b"COMPRESS "), algorithm), |algorithm| {
        CommandBody::Compress { algorithm }
    })(input)
}

impl EncodeIntoContext for CompressionAlgorithm {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        write!(ctx, "{}", self)
    }
}

#[cfg(test)]
mod tests {
    use imap_wire_types::{
        command::Command,
        core::Text,
        response::{Code, Response, Status, StatusBody, StatusKind, Tagged},
    };

    use super::*;
    use crate::testing::{kat_inverse_command, kat_inverse_response};

    #[test]
    fn test_parse_compress() {
        let (rem, val) = compress(b"compress deflate ").unwrap();
        assert_eq!(rem, b" ");
        assert_eq!(
            val,
            CommandBody::Compress {
                algorithm: CompressionAlgorithm::Deflate
            }
        );

        assert!(compress(b"compress deflat ").is_err());
        assert!(compress(b"compres deflate ").is_err());
        assert!(compress(b"compress  deflate ").is_err());
    }

    #[test]
    fn test_kat_inverse_command_compress() {
        kat_inverse_command(&[(
            b"A COMPRESS DEFLATE\r\n?".as_ref(),
            b"?".as_ref(),
            Command::new(
                "A",
                CommandBody::Compress {
                    algorithm: CompressionAlgorithm::Deflate,
                },
            )
            .unwrap(),
        )]);
    }

    #[test]
    fn test_kat_inverse_response_compression_active() {
        kat_inverse_response(&[(
            b"A OK [COMPRESSIONACTIVE] DEFLATE active\r\n".as_ref(),
            b"".as_ref(),
            Response::Status(Status::Tagged(Tagged {
                tag: "A".try_into().unwrap(),
                body: StatusBody {
                    kind: StatusKind::Ok,
                    code: Some(Code::CompressionActive),
                    text: Text::try_from("DEFLATE active").unwrap(),
                },
            })),
        )]);
    }
}

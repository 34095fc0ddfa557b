use imap_wire::{
    decode::{CommandDecodeError, Decoder, GreetingDecodeError, ResponseDecodeError},
    encode::{Encoder, Fragment},
    imap_wire_types::{
        command::{Command, CommandBody},
        core::{LiteralMode, Tag},
    },
    CommandCodec, GreetingCodec, ResponseCodec,
};

/// Positions right after the `}\r\n` of each literal announcement.
fn literal_boundaries(input: &[u8]) -> Vec<usize> {
    input
        .windows(3)
        .enumerate()
        .filter(|(_, window)| *window == b"}\r\n")
        .map(|(at, _)| at + 3)
        .collect()
}

#[test]
fn test_command_prefixes() {
    let message = b"A LOGIN {5}\r\nalice {4+}\r\npass\r\n";
    let boundaries = literal_boundaries(message);
    assert_eq!(boundaries, [13, 25]);

    for end in 0..message.len() {
        let got = CommandCodec::default().decode(&message[..end]);

        match end {
            13 => assert_eq!(
                got,
                Err(CommandDecodeError::LiteralFound {
                    tag: Tag::try_from("A").unwrap(),
                    length: 5,
                    mode: LiteralMode::Sync,
                })
            ),
            25 => assert_eq!(
                got,
                Err(CommandDecodeError::LiteralFound {
                    tag: Tag::try_from("A").unwrap(),
                    length: 4,
                    mode: LiteralMode::NonSync,
                })
            ),
            _ => assert_eq!(got, Err(CommandDecodeError::Incomplete), "prefix of {end} bytes"),
        }
    }

    let mut input = message.to_vec();
    input.extend_from_slice(b"B NOOP\r\n");

    let (rem, got) = CommandCodec::default().decode(&input).unwrap();
    assert_eq!(rem, b"B NOOP\r\n");
    assert_eq!(got.tag, Tag::try_from("A").unwrap());
    assert!(matches!(got.body, CommandBody::Login { .. }));
    assert_eq!(CommandCodec::default().encode(&got).dump(), message);
}

#[test]
fn test_response_prefixes() {
    let message = b"* 1 FETCH (RFC822 {5}\r\nhello)\r\n";
    let boundaries = literal_boundaries(message);
    assert_eq!(boundaries, [23]);

    for end in 0..message.len() {
        let got = ResponseCodec::default().decode(&message[..end]);

        if end == 23 {
            assert_eq!(
                got,
                Err(ResponseDecodeError::LiteralFound {
                    length: 5,
                    mode: LiteralMode::Sync,
                })
            );
        } else {
            assert_eq!(got, Err(ResponseDecodeError::Incomplete), "prefix of {end} bytes");
        }
    }

    assert!(ResponseCodec::default().decode(message).is_ok());
}

#[test]
fn test_greeting_prefixes() {
    let message = b"* OK [ALERT] hello\r\n";

    for end in 0..message.len() {
        assert_eq!(
            GreetingCodec::default().decode(&message[..end]),
            Err(GreetingDecodeError::Incomplete),
            "prefix of {end} bytes"
        );
    }

    let (rem, _) = GreetingCodec::default().decode(message).unwrap();
    assert!(rem.is_empty());
}

#[test]
fn test_fragments_without_literal() {
    let command = Command::new("A", CommandBody::login("alice", "pass").unwrap()).unwrap();
    let fragments: Vec<_> = CommandCodec::default().encode(&command).collect();

    assert_eq!(
        fragments,
        [Fragment::Line {
            data: b"A LOGIN alice pass\r\n".to_vec()
        }]
    );
}

#[test]
fn test_fragments_alternate_around_literals() {
    let (_, command) = CommandCodec::default()
        .decode(b"A LOGIN {5}\r\nalice {4+}\r\npass\r\n")
        .unwrap();
    let fragments: Vec<_> = CommandCodec::default().encode(&command).collect();

    // Two literals give 2 * 2 + 1 fragments.
    assert_eq!(
        fragments,
        [
            Fragment::Line {
                data: b"A LOGIN {5}\r\n".to_vec()
            },
            Fragment::Literal {
                data: b"alice".to_vec(),
                mode: LiteralMode::Sync,
            },
            Fragment::Line {
                data: b" {4+}\r\n".to_vec()
            },
            Fragment::Literal {
                data: b"pass".to_vec(),
                mode: LiteralMode::NonSync,
            },
            Fragment::Line {
                data: b"\r\n".to_vec()
            },
        ]
    );

    let bytes: Vec<u8> = fragments
        .into_iter()
        .flat_map(|fragment| match fragment {
            Fragment::Line { data } | Fragment::Literal { data, .. } => data,
        })
        .collect();
    assert_eq!(bytes, b"A LOGIN {5}\r\nalice {4+}\r\npass\r\n");
}

#[test]
fn test_fragments_partially_consumed() {
    let (_, command) = CommandCodec::default()
        .decode(b"A APPEND INBOX {5}\r\nhello\r\n")
        .unwrap();

    let mut encoded = CommandCodec::default().encode(&command);
    assert_eq!(
        encoded.next(),
        Some(Fragment::Line {
            data: b"A APPEND INBOX {5}\r\n".to_vec()
        })
    );

    // The rest is dumped in one piece, e.g., after the continuation request arrived.
    assert_eq!(encoded.dump(), b"hello\r\n");
}

use imap_wire::{
    decode::Decoder,
    encode::Encoder,
    imap_wire_types::{
        auth::AuthMechanism,
        command::{Command, CommandBody},
        core::{Tag, Vec1},
        fetch::Macro,
        flag::{Flag, StoreResponse, StoreType},
        response::{Capability, Code, Data, Response, Status},
    },
    CommandCodec, GreetingCodec, ResponseCodec,
};

enum Who {
    Client,
    Server,
}

/// Splits a trace into `C: ` and `S: ` lines and turns `\n` into `\r\n`.
fn split_trace(trace: &[u8]) -> impl Iterator<Item = (Who, Vec<u8>)> + '_ {
    trace
        .split(|b| *b == b'\n')
        .filter(|line| !line.is_empty())
        .map(|line| {
            let who = match &line[..3] {
                b"C: " => Who::Client,
                b"S: " => Who::Server,
                _ => panic!("Line must begin with \"C: \" or \"S: \"."),
            };

            let mut line = line[3..].to_vec();
            line.extend_from_slice(b"\r\n");

            (who, line)
        })
}

/// Decode every line, encode it again, and decode the result.
fn test_lines_of_trace(trace: &[u8]) {
    for (who, line) in split_trace(trace) {
        match who {
            Who::Client => {
                println!("C:          {}", String::from_utf8_lossy(&line).trim());
                let (rem, parsed) = CommandCodec::default().decode(&line).unwrap();
                assert!(rem.is_empty());
                println!("Parsed:     {:?}", parsed);
                let serialized = CommandCodec::default().encode(&parsed).dump();
                println!("Serialized: {}", String::from_utf8_lossy(&serialized).trim());
                let (rem, parsed2) = CommandCodec::default().decode(&serialized).unwrap();
                assert!(rem.is_empty());
                assert_eq!(parsed, parsed2);
            }
            Who::Server => {
                println!("S:          {}", String::from_utf8_lossy(&line).trim());
                let (rem, parsed) = ResponseCodec::default().decode(&line).unwrap();
                assert!(rem.is_empty());
                println!("Parsed:     {:?}", parsed);
                let serialized = ResponseCodec::default().encode(&parsed).dump();
                println!("Serialized: {}", String::from_utf8_lossy(&serialized).trim());
                let (rem, parsed2) = ResponseCodec::default().decode(&serialized).unwrap();
                assert!(rem.is_empty());
                assert_eq!(parsed, parsed2);
            }
        }

        println!();
    }
}

#[test]
fn test_trace_rfc3501_section_8() {
    let trace = br#"S: * OK IMAP4rev1 Service Ready
C: a001 login mrc secret
S: a001 OK LOGIN completed
C: a002 select inbox
S: * 18 EXISTS
S: * FLAGS (\Answered \Flagged \Deleted \Seen \Draft)
S: * 2 RECENT
S: * OK [UNSEEN 17] Message 17 is the first unseen message
S: * OK [UIDVALIDITY 3857529045] UIDs valid
S: a002 OK [READ-WRITE] SELECT completed
C: a003 fetch 12 full
S: * 12 FETCH (FLAGS (\Seen) INTERNALDATE "17-Jul-1996 02:44:25 -0700" RFC822.SIZE 4286 ENVELOPE ("Wed, 17 Jul 1996 02:23:25 -0700 (PDT)" "IMAP4rev1 WG mtg summary and minutes" (("Terry Gray" NIL "gray" "cac.washington.edu")) (("Terry Gray" NIL "gray" "cac.washington.edu")) (("Terry Gray" NIL "gray" "cac.washington.edu")) ((NIL NIL "imap" "cac.washington.edu")) ((NIL NIL "minutes" "CNRI.Reston.VA.US")("John Klensin" NIL "KLENSIN" "MIT.EDU")) NIL NIL "<B27397-0100000@cac.washington.edu>") BODY ("TEXT" "PLAIN" ("CHARSET" "US-ASCII") NIL NIL "7BIT" 3028 92))
S: a003 OK FETCH completed
C: a004 fetch 12 body[header]
C: a005 store 12 +flags \deleted
S: * 12 FETCH (FLAGS (\Seen \Deleted))
S: a005 OK +FLAGS completed
C: a006 logout
S: * BYE IMAP4rev1 server terminating connection
S: a006 OK LOGOUT completed
"#;

    test_lines_of_trace(trace);
}

#[test]
fn test_trace_extensions() {
    let trace = br#"C: A001 ENABLE METADATA
S: * ENABLED METADATA
S: A001 OK Enabled
C: A002 GETQUOTAROOT INBOX
S: * QUOTAROOT INBOX ""
S: * QUOTA "" (STORAGE 10 512)
S: A002 OK Getquotaroot completed
C: A003 SETQUOTA "" (STORAGE 512)
S: * QUOTA "" (STORAGE 10 512)
S: A003 OK Setquota completed
C: A004 UID SORT (SUBJECT REVERSE DATE) UTF-8 ALL
S: * SORT 5 3 4 1 2
S: A004 OK Sort completed
C: A005 UID THREAD REFERENCES UTF-8 SINCE 5-MAR-2000
S: * THREAD (2)(3 6 (4 23)(44 7 96))
S: A005 OK Thread completed
C: A006 UID MOVE 42:69 foo
S: * OK [COPYUID 432432 42:69 1202:1229] Moved
S: * 22 EXPUNGE
S: A006 OK Done
C: A007 UID EXPUNGE 3000:3002
S: * 3 EXPUNGE
S: A007 OK [UIDNOTSTICKY] Done
C: A008 GETMETADATA (DEPTH 1) INBOX /private/comment
S: * METADATA INBOX (/private/comment "My comment")
S: A008 OK GETMETADATA complete
C: A009 SETMETADATA INBOX (/private/comment NIL)
S: A009 NO [METADATA TOOMANY] Too many annotations
C: A010 IDLE
S: + idling
C: A011 UNSELECT
S: A011 OK Unselect completed
C: A012 COMPRESS DEFLATE
S: A012 OK [COMPRESSIONACTIVE] DEFLATE active
"#;

    test_lines_of_trace(trace);
}

#[test]
fn test_trace_known_positive() {
    let (rem, greeting) = GreetingCodec::default()
        .decode(b"* OK [CAPABILITY IMAP4rev1 STARTTLS AUTH=PLAIN] Ready\r\n")
        .unwrap();
    assert!(rem.is_empty());
    assert_eq!(
        greeting.code,
        Some(Code::Capability(
            Vec1::try_from(vec![
                Capability::Imap4Rev1,
                Capability::StartTls,
                Capability::Auth(AuthMechanism::Plain),
            ])
            .unwrap()
        ))
    );

    let commands = [
        (
            b"a STARTTLS\r\n".as_ref(),
            Command::new("a", CommandBody::StartTLS).unwrap(),
        ),
        (
            b"b UID FETCH 1:* FAST\r\n",
            Command::new("b", CommandBody::fetch("1:*", Macro::Fast, true).unwrap()).unwrap(),
        ),
        (
            b"c STORE 1 +FLAGS.SILENT (\\Seen)\r\n",
            Command::new(
                "c",
                CommandBody::store(
                    "1",
                    StoreType::Add,
                    StoreResponse::Silent,
                    vec![Flag::Seen],
                    false,
                )
                .unwrap(),
            )
            .unwrap(),
        ),
    ];

    for (input, expected) in commands {
        let (rem, got) = CommandCodec::default().decode(input).unwrap();
        assert!(rem.is_empty());
        assert_eq!(got, expected);
        assert_eq!(CommandCodec::default().encode(&got).dump(), input);
    }

    let responses = [
        (
            b"* CAPABILITY IMAP4rev1 LITERAL+ MOVE\r\n".as_ref(),
            Response::Data(
                Data::capability(vec![
                    Capability::Imap4Rev1,
                    Capability::LiteralPlus,
                    Capability::Move,
                ])
                .unwrap(),
            ),
        ),
        (
            b"c OK STORE completed\r\n",
            Response::Status(
                Status::ok(Some(Tag::try_from("c").unwrap()), None, "STORE completed").unwrap(),
            ),
        ),
    ];

    for (input, expected) in responses {
        let (rem, got) = ResponseCodec::default().decode(input).unwrap();
        assert!(rem.is_empty());
        assert_eq!(got, expected);
    }
}

//! QUOTA (RFC 9208)

use std::io::Write;

use abnf_core::streaming::sp;
use imap_wire_types::{
    command::CommandBody,
    core::{AString, Vec1},
    extensions::quota::{QuotaGet, QuotaSet, Resource},
    response::Data,
};
use nom::{
    bytes::streaming::{tag, tag_no_case},
    combinator::map,
    multi::{many0, separated_list0, separated_list1},
    sequence::{delimited, preceded, separated_pair, tuple},
};

use crate::{
    codec::{
        decode::IMAPResult,
        encode::{EncodeContext, EncodeIntoContext},
    },
    core::{astring, atom, number64},
    mailbox::mailbox,
};

/// `quota-root-name = astring`
pub(crate) fn quota_root_name(input: &[u8]) -> IMAPResult<&[u8], AString> {
    astring(input)
}

/// `getquota = "GETQUOTA" SP quota-root-name`
pub(crate) fn getquota(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    map(preceded(tag_no_case(b"GETQUOTA "), quota_root_name), |root| {
        CommandBody::GetQuota { root }
    })(input)
}

/// `getquotaroot = "GETQUOTAROOT" SP mailbox`
pub(crate) fn getquotaroot(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    map(preceded(tag_no_case(b"GETQUOTAROOT "), mailbox), |mailbox| {
        CommandBody::GetQuotaRoot { mailbox }
    })(input)
}

/// ```abnf
/// setquota      = "SETQUOTA" SP quota-root-name SP setquota-list
/// setquota-list = "(" [setquota-resource *(SP setquota-resource)] ")"
/// ```
pub(crate) fn setquota(input: &[u8]) -> IMAPResult<&[u8], CommandBody> {
    map(
        tuple((
            tag_no_case(b"SETQUOTA "),
            quota_root_name,
            delimited(tag(b" ("), separated_list0(sp, setquota_resource), tag(b")")),
        )),
        |(_, root, quotas)| CommandBody::SetQuota { root, quotas },
    )(input)
}

/// `setquota-resource = resource-name SP resource-limit`
pub(crate) fn setquota_resource(input: &[u8]) -> IMAPResult<&[u8], QuotaSet> {
    map(
        separated_pair(resource_name, sp, number64),
        |(resource, limit)| QuotaSet { resource, limit },
    )(input)
}

/// ```abnf
/// quota-resource = resource-name SP resource-usage SP resource-limit
/// resource-usage = number64
/// resource-limit = number64
/// ```
pub(crate) fn quota_resource(input: &[u8]) -> IMAPResult<&[u8], QuotaGet> {
    map(
        tuple((resource_name, sp, number64, sp, number64)),
        |(resource, _, usage, _, limit)| QuotaGet {
            resource,
            usage,
            limit,
        },
    )(input)
}

/// ```abnf
/// resource-name     = "STORAGE" / "MESSAGE" / "MAILBOX" / "ANNOTATION-STORAGE" /
///                     resource-name-ext
/// resource-name-ext = atom
/// ```
pub(crate) fn resource_name(input: &[u8]) -> IMAPResult<&[u8], Resource> {
    map(atom, Resource::from)(input)
}

/// ```abnf
/// quota-response = "QUOTA" SP quota-root-name SP quota-list
/// quota-list     = "(" quota-resource *(SP quota-resource) ")"
/// ```
pub(crate) fn quota_response(input: &[u8]) -> IMAPResult<&[u8], Data> {
    map(
        tuple((
            tag_no_case(b"QUOTA "),
            quota_root_name,
            delimited(tag(b" ("), separated_list1(sp, quota_resource), tag(b")")),
        )),
        |(_, root, quotas)| Data::Quota {
            root,
            quotas: Vec1::unvalidated(quotas),
        },
    )(input)
}

/// `quotaroot-response = "QUOTAROOT" SP mailbox *(SP quota-root-name)`
pub(crate) fn quotaroot_response(input: &[u8]) -> IMAPResult<&[u8], Data> {
    map(
        tuple((
            tag_no_case(b"QUOTAROOT "),
            mailbox,
            many0(preceded(sp, quota_root_name)),
        )),
        |(_, mailbox, roots)| Data::QuotaRoot { mailbox, roots },
    )(input)
}

impl<'a> EncodeIntoContext for Resource<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        write!(ctx, "{}", self)
    }
}

impl<'a> EncodeIntoContext for QuotaGet<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        self.resource.encode_ctx(ctx)?;
        write!(ctx, " {} {}", self.usage, self.limit)
    }
}

impl<'a> EncodeIntoContext for QuotaSet<'a> {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        self.resource.encode_ctx(ctx)?;
        write!(ctx, " {}", self.limit)
    }
}

#[cfg(test)]
mod tests {
    use imap_wire_types::{
        command::Command,
        core::Text,
        mailbox::Mailbox,
        response::{Capability, Code, Response, Status, StatusBody, StatusKind, Tagged},
    };

    use super::*;
    use crate::testing::{kat_inverse_command, kat_inverse_response, known_answer_test_parse};

    #[test]
    fn test_parse_resource_name() {
        let tests = [
            (b"stOragE ".as_ref(), b" ".as_ref(), Resource::Storage),
            (b"mesSaGe ", b" ", Resource::Message),
            (b"maIlbOx ", b" ", Resource::Mailbox),
            (b"anNotatIon-stoRage ", b" ", Resource::AnnotationStorage),
            (
                b"anNotatIon-stoRageX ",
                b" ",
                Resource::try_from("anNotatIon-stoRageX").unwrap(),
            ),
        ];

        for test in tests {
            known_answer_test_parse(test, resource_name);
        }
    }

    #[test]
    fn test_kat_inverse_command_quota() {
        kat_inverse_command(&[
            (
                b"A GETQUOTA \"\"\r\n".as_ref(),
                b"".as_ref(),
                Command::new("A", CommandBody::get_quota("").unwrap()).unwrap(),
            ),
            (
                b"A GETQUOTAROOT INBOX\r\n",
                b"",
                Command::new("A", CommandBody::get_quota_root("inbox").unwrap()).unwrap(),
            ),
            (
                b"A SETQUOTA \"\" ()\r\n",
                b"",
                Command::new("A", CommandBody::set_quota("", vec![]).unwrap()).unwrap(),
            ),
            (
                b"A SETQUOTA #user/alice (STORAGE 512 MESSAGE 9000000000)\r\n",
                b"",
                Command::new(
                    "A",
                    CommandBody::set_quota(
                        "#user/alice",
                        vec![
                            QuotaSet::new(Resource::Storage, 512),
                            QuotaSet::new(Resource::Message, 9_000_000_000),
                        ],
                    )
                    .unwrap(),
                )
                .unwrap(),
            ),
        ]);
    }

    #[test]
    fn test_kat_inverse_response_quota() {
        kat_inverse_response(&[
            (
                b"* QUOTA \"\" (STORAGE 10 512)\r\n".as_ref(),
                b"".as_ref(),
                Response::Data(
                    Data::quota("", Vec1::from(QuotaGet::new(Resource::Storage, 10, 512)))
                        .unwrap(),
                ),
            ),
            (
                b"* QUOTAROOT INBOX \"\"\r\n",
                b"",
                Response::Data(
                    Data::quota_root(Mailbox::Inbox, vec![AString::try_from("").unwrap()])
                        .unwrap(),
                ),
            ),
            (
                b"* QUOTAROOT comp.mail.mime\r\n",
                b"",
                Response::Data(Data::quota_root("comp.mail.mime", vec![]).unwrap()),
            ),
            (
                b"* CAPABILITY QUOTA QUOTA=RES-STORAGE QUOTASET\r\n",
                b"",
                Response::Data(
                    Data::capability(vec![
                        Capability::Quota,
                        Capability::QuotaRes(Resource::Storage),
                        Capability::QuotaSet,
                    ])
                    .unwrap(),
                ),
            ),
            (
                b"A NO [OVERQUOTA] Soft quota has been exceeded\r\n",
                b"",
                Response::Status(Status::Tagged(Tagged {
                    tag: "A".try_into().unwrap(),
                    body: StatusBody {
                        kind: StatusKind::No,
                        code: Some(Code::OverQuota),
                        text: Text::try_from("Soft quota has been exceeded").unwrap(),
                    },
                })),
            ),
        ]);
    }

    #[test]
    fn test_parse_quota_response_empty_list() {
        assert!(quota_response(b"QUOTA \"\" ()\r\n").is_err());
    }
}

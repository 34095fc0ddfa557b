use std::{io::Write, num::ParseIntError, str::FromStr};

use abnf_core::{
    is_digit,
    streaming::{dquote, sp},
};
use chrono::{FixedOffset, LocalResult, NaiveDateTime, NaiveTime, TimeZone};
use imap_wire_types::datetime::{DateTime, NaiveDate};
use nom::{
    branch::alt,
    bytes::streaming::{tag, tag_no_case, take_while_m_n},
    character::streaming::char,
    combinator::{map, map_res, value},
    sequence::{delimited, preceded, tuple},
};

use crate::codec::{
    decode::{IMAPErrorKind, IMAPParseError, IMAPResult},
    encode::{EncodeContext, EncodeIntoContext},
};

fn bad_date_time(input: &[u8]) -> nom::Err<IMAPParseError<'_, &[u8]>> {
    nom::Err::Failure(IMAPParseError {
        input,
        kind: IMAPErrorKind::BadDateTime,
    })
}

/// `date = date-text / DQUOTE date-text DQUOTE`
///
/// A well-formed but impossible date, e.g., `31-Feb-2020`, is a [`IMAPErrorKind::BadDateTime`].
pub(crate) fn date(input: &[u8]) -> IMAPResult<&[u8], NaiveDate> {
    alt((date_text, delimited(dquote, date_text, dquote)))(input)
}

/// `date-text = date-day "-" date-month "-" date-year`
pub(crate) fn date_text(input: &[u8]) -> IMAPResult<&[u8], NaiveDate> {
    let (remaining, (day, _, month, _, year)) =
        tuple((date_day, tag(b"-"), date_month, tag(b"-"), date_year))(input)?;

    let date = chrono::NaiveDate::from_ymd_opt(year.into(), month.into(), day.into())
        .and_then(|date| NaiveDate::try_from(date).ok())
        .ok_or_else(|| bad_date_time(input))?;

    Ok((remaining, date))
}

/// `date-day = 1*2DIGIT`
pub(crate) fn date_day(input: &[u8]) -> IMAPResult<&[u8], u8> {
    map_res(take_while_m_n(1, 2, is_digit), parse_ascii::<u8>)(input)
}

/// `date-day-fixed = (SP DIGIT) / 2DIGIT`
pub(crate) fn date_day_fixed(input: &[u8]) -> IMAPResult<&[u8], u8> {
    alt((
        map(preceded(sp, take_while_m_n(1, 1, is_digit)), |bytes: &[u8]| {
            bytes[0] - b'0'
        }),
        digit_2,
    ))(input)
}

/// `date-month = "Jan" / "Feb" / ... / "Dec"`
pub(crate) fn date_month(input: &[u8]) -> IMAPResult<&[u8], u8> {
    alt((
        value(1, tag_no_case(b"Jan")),
        value(2, tag_no_case(b"Feb")),
        value(3, tag_no_case(b"Mar")),
        value(4, tag_no_case(b"Apr")),
        value(5, tag_no_case(b"May")),
        value(6, tag_no_case(b"Jun")),
        value(7, tag_no_case(b"Jul")),
        value(8, tag_no_case(b"Aug")),
        value(9, tag_no_case(b"Sep")),
        value(10, tag_no_case(b"Oct")),
        value(11, tag_no_case(b"Nov")),
        value(12, tag_no_case(b"Dec")),
    ))(input)
}

/// `date-year = 4DIGIT`
pub(crate) fn date_year(input: &[u8]) -> IMAPResult<&[u8], u16> {
    map_res(take_while_m_n(4, 4, is_digit), parse_ascii::<u16>)(input)
}

/// `time = 2DIGIT ":" 2DIGIT ":" 2DIGIT`
pub(crate) fn time(input: &[u8]) -> IMAPResult<&[u8], Option<NaiveTime>> {
    let (remaining, (h, _, m, _, s)) =
        tuple((digit_2, tag(b":"), digit_2, tag(b":"), digit_2))(input)?;

    Ok((
        remaining,
        NaiveTime::from_hms_opt(h.into(), m.into(), s.into()),
    ))
}

/// `zone = ("+" / "-") 4DIGIT`
///
/// Hours and minutes east of Greenwich.
pub(crate) fn zone(input: &[u8]) -> IMAPResult<&[u8], Option<FixedOffset>> {
    let (remaining, (sign, hh, mm)) =
        tuple((alt((char('+'), char('-'))), digit_2, digit_2))(input)?;

    let offset = 3600 * i32::from(hh) + 60 * i32::from(mm);

    let zone = if sign == '+' {
        FixedOffset::east_opt(offset)
    } else {
        FixedOffset::west_opt(offset)
    };

    Ok((remaining, zone))
}

/// ```abnf
/// date-time = DQUOTE
///              date-day-fixed "-" date-month "-" date-year SP
///              time SP
///              zone
///             DQUOTE
/// ```
pub(crate) fn date_time(input: &[u8]) -> IMAPResult<&[u8], DateTime> {
    let (remaining, (day, _, month, _, year, _, time, _, zone)) = delimited(
        dquote,
        tuple((
            date_day_fixed,
            tag(b"-"),
            date_month,
            tag(b"-"),
            date_year,
            sp,
            time,
            sp,
            zone,
        )),
        dquote,
    )(input)?;

    let date = chrono::NaiveDate::from_ymd_opt(year.into(), month.into(), day.into());

    let (Some(date), Some(time), Some(zone)) = (date, time, zone) else {
        return Err(bad_date_time(input));
    };

    match zone.from_local_datetime(&NaiveDateTime::new(date, time)) {
        LocalResult::Single(datetime) => match DateTime::try_from(datetime) {
            Ok(datetime) => Ok((remaining, datetime)),
            Err(_) => Err(bad_date_time(input)),
        },
        _ => Err(bad_date_time(input)),
    }
}

fn digit_2(input: &[u8]) -> IMAPResult<&[u8], u8> {
    map_res(take_while_m_n(2, 2, is_digit), parse_ascii::<u8>)(input)
}

fn parse_ascii<T>(digits: &[u8]) -> Result<T, ParseIntError>
where
    T: FromStr<Err = ParseIntError>,
{
    std::str::from_utf8(digits).unwrap_or_default().parse::<T>()
}

impl EncodeIntoContext for DateTime {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        write!(ctx, "\"{}\"", self.as_ref().format("%d-%b-%Y %H:%M:%S %z"))
    }
}

impl EncodeIntoContext for NaiveDate {
    fn encode_ctx(&self, ctx: &mut EncodeContext) -> std::io::Result<()> {
        write!(ctx, "{}", self.as_ref().format("%-d-%b-%Y"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{known_answer_test_encode, known_answer_test_parse};

    fn naive(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::try_from(chrono::NaiveDate::from_ymd_opt(year, month, day).unwrap()).unwrap()
    }

    #[test]
    fn test_encode_date_time() {
        let tests = [
            (
                DateTime::try_from(
                    chrono::DateTime::parse_from_rfc2822("Mon, 7 Feb 1994 21:52:25 -0800 (PST)")
                        .unwrap(),
                )
                .unwrap(),
                b"\"07-Feb-1994 21:52:25 -0800\"".as_ref(),
            ),
            (
                DateTime::try_from(
                    chrono::DateTime::parse_from_rfc3339("2020-12-31T23:59:59+05:30").unwrap(),
                )
                .unwrap(),
                b"\"31-Dec-2020 23:59:59 +0530\"".as_ref(),
            ),
        ];

        for test in tests {
            known_answer_test_encode(test);
        }
    }

    #[test]
    fn test_encode_date() {
        known_answer_test_encode((naive(1994, 2, 1), b"1-Feb-1994"));
        known_answer_test_encode((naive(2024, 11, 30), b"30-Nov-2024"));
    }

    #[test]
    fn test_date() {
        known_answer_test_parse(
            (b"1-Feb-2020xxx".as_ref(), b"xxx".as_ref(), naive(2020, 2, 1)),
            date,
        );
        known_answer_test_parse(
            (b"\"1-Feb-2020\"xxx".as_ref(), b"xxx".as_ref(), naive(2020, 2, 1)),
            date,
        );
        known_answer_test_parse((b"01-fEB-2020 ".as_ref(), b" ".as_ref(), naive(2020, 2, 1)), date);

        assert!(matches!(
            date(b"31-Feb-2020 "),
            Err(nom::Err::Failure(IMAPParseError {
                kind: IMAPErrorKind::BadDateTime,
                ..
            }))
        ));
        assert!(date(b"1-Foo-2020 ").is_err());
        assert!(matches!(date(b"1-Feb-202"), Err(nom::Err::Incomplete(_))));
    }

    #[test]
    fn test_date_time() {
        let (rem, val) = date_time(b"\" 7-Feb-1994 21:52:25 -0800\"xxx").unwrap();
        assert_eq!(rem, b"xxx");
        assert_eq!(
            val,
            DateTime::try_from(
                chrono::DateTime::parse_from_rfc2822("Mon, 7 Feb 1994 21:52:25 -0800").unwrap()
            )
            .unwrap()
        );

        assert!(date_time(b"\"07-Feb-1994 21:52:25 -0800\"").is_ok());
        assert!(date_time(b"\"07-Feb-1994 25:52:25 -0800\"").is_err());
        assert!(date_time(b"\"07-Feb-1994 21:52:25 -9900\"").is_err());
        assert!(date_time(b"\"7-Feb-1994 21:52:25 -0800\"").is_err());
    }
}

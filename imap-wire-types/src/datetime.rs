//! `INTERNALDATE`/`APPEND` date-times and `SEARCH` dates.
//!
//! Both wrap their `chrono` counterpart and refuse what the IMAP syntax can't carry: years
//! outside of four digits, fractional seconds, and offsets that are not whole minutes.

use chrono::{Datelike, FixedOffset};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ValidationError, ValidationErrorKind};

fn verify_year(year: i32) -> Result<(), ValidationError> {
    if (0..=9999).contains(&year) {
        Ok(())
    } else {
        Err(ValidationError::new(ValidationErrorKind::YearOutOfRange {
            got: year,
        }))
    }
}

/// Implements the conversions shared by the `chrono` wrappers.
///
/// The target must provide `fn verify(&Inner) -> Result<(), ValidationError>`.
macro_rules! impl_chrono_wrapper {
    ($target:ident, $inner:ty) => {
        impl $target {
            /// Create without validation. Checked in debug builds.
            #[cfg(feature = "unvalidated")]
            #[cfg_attr(docsrs, doc(cfg(feature = "unvalidated")))]
            pub fn unvalidated(value: $inner) -> Self {
                #[cfg(debug_assertions)]
                Self::verify(&value).unwrap();

                Self(value)
            }

            pub fn into_inner(self) -> $inner {
                self.0
            }
        }

        impl TryFrom<$inner> for $target {
            type Error = ValidationError;

            fn try_from(value: $inner) -> Result<Self, Self::Error> {
                Self::verify(&value)?;

                Ok(Self(value))
            }
        }

        impl AsRef<$inner> for $target {
            fn as_ref(&self) -> &$inner {
                &self.0
            }
        }

        impl std::fmt::Debug for $target {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({:?})", stringify!($target), self.0)
            }
        }

        // No borrowed data, so "static" is a plain copy.
        impl bounded_static::IntoBoundedStatic for $target {
            type Static = Self;

            fn into_static(self) -> Self::Static {
                self
            }
        }

        impl bounded_static::ToBoundedStatic for $target {
            type Static = Self;

            fn to_static(&self) -> Self::Static {
                *self
            }
        }
    };
}

/// A date-time, e.g., `"17-Jul-1996 02:44:25 -0700"`.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "chrono::DateTime<FixedOffset>")
)]
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct DateTime(chrono::DateTime<FixedOffset>);

impl DateTime {
    pub fn verify(value: &chrono::DateTime<FixedOffset>) -> Result<(), ValidationError> {
        verify_year(value.year())?;

        let nanos = value.timestamp_subsec_nanos();
        if nanos != 0 {
            return Err(ValidationError::new(ValidationErrorKind::SubSecond {
                nanos,
            }));
        }

        let seconds = value.offset().local_minus_utc();
        if seconds % 60 != 0 {
            return Err(ValidationError::new(
                ValidationErrorKind::OffsetNotInMinutes { seconds },
            ));
        }

        Ok(())
    }
}

impl_chrono_wrapper!(DateTime, chrono::DateTime<FixedOffset>);

/// A date without time and zone, e.g., `1-Feb-1994`.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "chrono::NaiveDate")
)]
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct NaiveDate(chrono::NaiveDate);

impl NaiveDate {
    pub fn verify(value: &chrono::NaiveDate) -> Result<(), ValidationError> {
        verify_year(value.year())
    }
}

impl_chrono_wrapper!(NaiveDate, chrono::NaiveDate);

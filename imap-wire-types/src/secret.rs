//! Redaction of sensitive values.
//!
//! Passwords and SASL payloads travel through the codec like every other value. Wrapping them in
//! [`Secret`] keeps them out of `Debug` output (and thus out of logs) in release builds.

use std::fmt::{Debug, Formatter};

use bounded_static_derive::ToStatic;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A value that is redacted when `Debug`-printed in release builds.
///
/// Equality, hashing, and (de)serialization are not affected.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Eq, Hash, PartialEq, ToStatic)]
pub struct Secret<T>(T);

impl<T> Secret<T> {
    pub fn new(inner: T) -> Self {
        Self(inner)
    }

    /// Get access to the wrapped value.
    ///
    /// Be careful where the value ends up.
    pub fn declassify(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T> Debug for Secret<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        #[cfg(not(debug_assertions))]
        return f.write_str("/* REDACTED */");
        #[cfg(debug_assertions)]
        return self.0.fmt(f);
    }
}

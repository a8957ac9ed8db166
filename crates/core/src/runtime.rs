//! Movie runtime, a whole number of minutes.
//!
//! On the wire a runtime is always a JSON string of the form `"<N> mins"`.
//! The serde impls below are the only codec for it, so any request body or
//! response that embeds a [`Runtime`] goes through the same parsing rules.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The unit word that must follow the number.
const UNIT: &str = "mins";

/// Errors produced while decoding a runtime string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RuntimeError {
    /// Bad quoting, wrong token count, wrong unit, or a number that does not
    /// fit in an `i32`.
    #[error("invalid runtime format")]
    InvalidFormat,
}

/// Runtime of a movie in minutes.
///
/// Zero is a valid stored value and doubles as "unset" for the movie
/// projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Runtime(i32);

impl Runtime {
    pub const ZERO: Self = Self(0);

    pub const fn from_minutes(minutes: i32) -> Self {
        Self(minutes)
    }

    pub const fn minutes(self) -> i32 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Encode as a quoted JSON string, e.g. `"107 mins"`.
    ///
    /// The unquoted text holds only an optional `-`, digits, one space and
    /// the unit, so no escaping is ever needed.
    pub fn to_json(self) -> String {
        format!("\"{self}\"")
    }

    /// Decode a quoted JSON string such as `"107 mins"`.
    ///
    /// The input must be exactly one string literal: whitespace around the
    /// quotes is rejected. JSON escapes inside the quotes are honored.
    pub fn from_json(text: &str) -> Result<Self, RuntimeError> {
        if !(text.len() >= 2 && text.starts_with('"') && text.ends_with('"')) {
            return Err(RuntimeError::InvalidFormat);
        }
        let unquoted: String =
            serde_json::from_str(text).map_err(|_| RuntimeError::InvalidFormat)?;
        unquoted.parse()
    }
}

impl fmt::Display for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {UNIT}", self.0)
    }
}

/// Parse the unquoted form, `<N> mins`.
impl FromStr for Runtime {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(value), Some(UNIT), None) => value
                .parse::<i32>()
                .map(Self)
                .map_err(|_| RuntimeError::InvalidFormat),
            _ => Err(RuntimeError::InvalidFormat),
        }
    }
}

impl Serialize for Runtime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Runtime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(RuntimeVisitor)
    }
}

struct RuntimeVisitor;

impl Visitor<'_> for RuntimeVisitor {
    type Value = Runtime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a runtime string such as \"107 mins\"")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(E::custom)
    }
}

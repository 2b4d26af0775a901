//! Decoding for fields that may appear in more than one shape on the wire.
//!
//! Legacy dialects are loose about field shapes: a condition can be a bare string,
//! a list, or an `{include, exclude}` mapping; a retry policy can be a bare integer
//! or an object. Each such type implements [`Flexible`] by declaring an ordered
//! table of [`Candidate`] shapes. Decoding tries the candidates in declaration order
//! and binds to the first one that accepts the raw value.
//!
//! The order is part of the contract. Some inputs are accepted by more than one
//! candidate (a `{from_secret: x}` mapping is also a valid literal mapping), and the
//! earlier candidate always wins.

/// Defines the candidate table of one or more flexible types and routes their
/// `Deserialize` impls through [`decode`].
macro_rules! flexible {
    ( $( $ty:ty as $field:literal { $( $shape:literal => $decode:expr ),+ $(,)? } )+ ) => {
        $(
            impl $crate::flexible::Flexible for $ty {
                const FIELD: &'static str = $field;
                const CANDIDATES: &'static [$crate::flexible::Candidate<Self>] = &[
                    $( $crate::flexible::Candidate { shape: $shape, decode: $decode }, )+
                ];
            }

            impl<'de> serde::Deserialize<'de> for $ty {
                fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                    let raw = <serde_yaml::Value as serde::Deserialize>::deserialize(deserializer)?;
                    $crate::flexible::decode(&raw).map_err(serde::de::Error::custom)
                }
            }
        )+
    };
}

pub(crate) use flexible;

mod credentials;
mod quantity;
mod retry;
mod strings;

pub use credentials::*;
pub use quantity::*;
pub use retry::*;
pub use strings::*;

use crate::error::DecodeError;
use itertools::Itertools;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use tracing::trace;

/// One legal wire shape of a flexible field.
pub struct Candidate<T> {
    /// Human-readable shape name, used in error messages.
    pub shape: &'static str,
    /// Returns `Some` when the raw value has this shape.
    pub decode: fn(&Value) -> Option<T>,
}

/// A type whose wire representation is one of several candidate shapes.
pub trait Flexible: Sized + 'static {
    /// Name of the field kind, used in error messages.
    const FIELD: &'static str;
    /// Candidate shapes, in the order they are attempted.
    const CANDIDATES: &'static [Candidate<Self>];
}

/// Decodes `raw` into `T`, returning the name of the candidate shape that matched.
pub fn decode_candidate<T: Flexible>(raw: &Value) -> Result<(&'static str, T), DecodeError> {
    for candidate in T::CANDIDATES {
        if let Some(value) = (candidate.decode)(raw) {
            trace!(field = T::FIELD, shape = candidate.shape, "flexible candidate matched");
            return Ok((candidate.shape, value));
        }
        trace!(field = T::FIELD, shape = candidate.shape, "flexible candidate rejected");
    }
    Err(DecodeError {
        field: T::FIELD,
        expected: T::CANDIDATES.iter().map(|c| c.shape).join(", "),
        found: shape_of(raw),
    })
}

/// Decodes `raw` into `T` using the first candidate shape that accepts it.
pub fn decode<T: Flexible>(raw: &Value) -> Result<T, DecodeError> {
    decode_candidate(raw).map(|(_, value)| value)
}

/// Names the on-the-wire shape of a raw value.
pub fn shape_of(raw: &Value) -> &'static str {
    match raw {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Strict serde decode of a candidate shape. Reads the value in place.
pub(crate) fn from_value<T: DeserializeOwned>(raw: &Value) -> Option<T> {
    T::deserialize(raw).ok()
}

/// Accepts a string, number, or bool and renders it as text.
pub(crate) fn scalar_string(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
